// src/model/queues.rs

use std::collections::VecDeque;

/// An order in transit: `quantity` units landing on `arrival_day`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shipment {
    pub arrival_day: u32,
    pub quantity: f64,
}

/// Orders placed but not yet received.
///
/// With a fixed lead time shipments arrive in the order they were placed, so
/// the queue stays sorted by arrival day and arrivals are popped from the
/// front.
#[derive(Debug, Clone, Default)]
pub struct ShipmentPipeline {
    buffer: VecDeque<Shipment>,
}

impl ShipmentPipeline {
    pub fn new() -> Self {
        Self {
            buffer: VecDeque::new(),
        }
    }

    /// Step 1: goods land.
    /// Call this at the START of the day. Returns every shipment due today.
    pub fn pop_arrivals(&mut self, day: u32) -> Vec<Shipment> {
        let mut arrived = Vec::new();
        while let Some(front) = self.buffer.front() {
            if front.arrival_day > day {
                break;
            }
            if let Some(shipment) = self.buffer.pop_front() {
                arrived.push(shipment);
            }
        }
        arrived
    }

    /// Step 2: a new order enters the pipeline.
    pub fn push_departure(&mut self, shipment: Shipment) {
        // Keep the buffer sorted even if a caller mixes lead times.
        let idx = self
            .buffer
            .iter()
            .position(|s| s.arrival_day > shipment.arrival_day)
            .unwrap_or(self.buffer.len());
        self.buffer.insert(idx, shipment);
    }

    /// Units on order (in transit).
    pub fn on_order(&self) -> f64 {
        self.buffer.iter().map(|s| s.quantity).sum()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
