// src/simulation/engine.rs

use crate::model::queues::{Shipment, ShipmentPipeline};
use crate::simulation::config::{SimulationConfig, StartMode};
use crate::simulation::demand::DailyDemand;
use serde::Serialize;
use tracing::debug;

// We make this Serialize so we can write it to CSV later
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TracePoint {
    pub day: u32,
    pub on_hand: f64,
    /// On-hand plus everything in transit.
    pub position: f64,
}

/// Day-by-day record of one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SimulationTrace {
    /// Day 0 (initial state) through the horizon.
    pub points: Vec<TracePoint>,
    pub order_days: Vec<u32>,
    pub arrival_days: Vec<u32>,
    /// Days on which demand exceeded what was on hand.
    pub stockout_days: u32,
}

/// Continuous-review (Q, r) replay of a single SKU with lost sales.
///
/// Each day: shipments due today land, the day's demand is consumed (any
/// excess is lost and counted as a stockout day), then the inventory position
/// is checked and a lot of `quantity` is ordered if it is at or below the
/// reorder point.
pub struct InventorySimulation {
    config: SimulationConfig,

    // The policy under test
    quantity: f64,
    reorder_point: f64,
    lead_time_days: u32,

    // State
    on_hand: f64,
    pipeline: ShipmentPipeline,
    demand: DailyDemand,
    pub current_day: u32,

    pub trace: SimulationTrace,
}

impl InventorySimulation {
    /// # Arguments
    /// * `quantity`, `reorder_point` - The (Q, r) policy.
    /// * `daily_mean`, `daily_stdev` - Daily demand statistics.
    /// * `lead_time_days` - Days from order to arrival, floored at 1.
    pub fn new(
        quantity: f64,
        reorder_point: f64,
        daily_mean: f64,
        daily_stdev: f64,
        lead_time_days: u32,
        config: SimulationConfig,
    ) -> Self {
        let lead_time_days = lead_time_days.max(1);
        let demand = DailyDemand::new(daily_mean, daily_stdev, config.variability, config.seed);

        let mut pipeline = ShipmentPipeline::new();
        let mut trace = SimulationTrace::default();

        let on_hand = match config.start_mode {
            StartMode::Steady => {
                // A lot ordered "now" is already on its way.
                pipeline.push_departure(Shipment {
                    arrival_day: lead_time_days,
                    quantity,
                });
                trace.order_days.push(0);
                reorder_point.max(0.0)
            }
            StartMode::Lot => quantity.max(0.0),
        };

        trace.points.push(TracePoint {
            day: 0,
            on_hand,
            position: on_hand + pipeline.on_order(),
        });

        Self {
            config,
            quantity,
            reorder_point,
            lead_time_days,
            on_hand,
            pipeline,
            demand,
            current_day: 1,
            trace,
        }
    }

    pub fn run(&mut self) {
        // Run until we exceed the horizon
        while self.current_day <= self.config.horizon_days {
            self.step();
            match self.current_day.checked_add(1) {
                Some(next) => self.current_day = next,
                None => break,
            }
        }
        debug!(
            horizon = self.config.horizon_days,
            orders = self.trace.order_days.len(),
            arrivals = self.trace.arrival_days.len(),
            stockout_days = self.trace.stockout_days,
            "simulation finished"
        );
    }

    /// Runs to the horizon and hands back the trace.
    pub fn into_trace(mut self) -> SimulationTrace {
        self.run();
        self.trace
    }

    fn step(&mut self) {
        let day = self.current_day;

        // 1. Arrivals
        for shipment in self.pipeline.pop_arrivals(day) {
            self.on_hand += shipment.quantity;
            self.trace.arrival_days.push(day);
            debug!(day, quantity = shipment.quantity, "shipment arrived");
        }

        // 2. Consumption (lost sales)
        self.on_hand -= self.demand.next_day();
        if self.on_hand < 0.0 {
            self.on_hand = 0.0;
            self.trace.stockout_days += 1;
        }

        // 3. Position check and reorder
        let position = self.on_hand + self.pipeline.on_order();
        if position <= self.reorder_point {
            self.pipeline.push_departure(Shipment {
                arrival_day: day.saturating_add(self.lead_time_days),
                quantity: self.quantity,
            });
            self.trace.order_days.push(day);
            debug!(day, position, quantity = self.quantity, "order placed");
        }

        self.trace.points.push(TracePoint {
            day,
            on_hand: self.on_hand,
            position,
        });
    }

    pub fn on_hand(&self) -> f64 {
        self.on_hand
    }

    pub fn in_transit(&self) -> usize {
        self.pipeline.len()
    }
}

/// One-shot helper: build, run and return the trace.
pub fn simulate(
    quantity: f64,
    reorder_point: f64,
    daily_mean: f64,
    daily_stdev: f64,
    lead_time_days: u32,
    config: SimulationConfig,
) -> SimulationTrace {
    InventorySimulation::new(
        quantity,
        reorder_point,
        daily_mean,
        daily_stdev,
        lead_time_days,
        config,
    )
    .into_trace()
}
