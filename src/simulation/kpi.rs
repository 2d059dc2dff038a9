// src/simulation/kpi.rs

use crate::simulation::engine::SimulationTrace;
use serde::Serialize;

/// Cycle indicators extracted from a trace.
///
/// "Stockout days" here counts days that ended with nothing on hand. The
/// simulator loses excess demand instead of backordering it, so read this as
/// a diagnostic of how adequate the policy is, not as a backorder count.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CycleKpis {
    /// Orders placed on days 1..=horizon. The lot already in transit at a
    /// steady start is not counted.
    pub orders_placed: usize,
    /// Mean gap between consecutive arrivals; NaN with fewer than two.
    pub mean_interarrival_days: f64,
    pub mean_on_hand: f64,
    pub pct_days_below_safety_stock: f64,
    pub pct_days_stockout: f64,
    pub min_on_hand: f64,
    pub max_on_hand: f64,
}

impl CycleKpis {
    /// Pure reduction over `trace`; `safety_stock` is the policy's SS.
    pub fn from_trace(trace: &SimulationTrace, safety_stock: f64) -> Self {
        let on_hand: Vec<f64> = trace.points.iter().map(|p| p.on_hand).collect();
        let n = on_hand.len() as f64;

        let mean_interarrival_days = if trace.arrival_days.len() > 1 {
            let gaps: Vec<f64> = trace
                .arrival_days
                .windows(2)
                .map(|w| f64::from(w[1]) - f64::from(w[0]))
                .collect();
            gaps.iter().sum::<f64>() / gaps.len() as f64
        } else {
            f64::NAN
        };

        let share = |pred: &dyn Fn(f64) -> bool| {
            if on_hand.is_empty() {
                f64::NAN
            } else {
                100.0 * on_hand.iter().filter(|&&v| pred(v)).count() as f64 / n
            }
        };

        Self {
            orders_placed: trace.order_days.iter().filter(|&&day| day > 0).count(),
            mean_interarrival_days,
            mean_on_hand: if on_hand.is_empty() {
                f64::NAN
            } else {
                on_hand.iter().sum::<f64>() / n
            },
            pct_days_below_safety_stock: share(&|v| v < safety_stock),
            pct_days_stockout: share(&|v| v <= 0.0),
            min_on_hand: on_hand.iter().copied().fold(f64::NAN, f64::min),
            max_on_hand: on_hand.iter().copied().fold(f64::NAN, f64::max),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::engine::TracePoint;

    fn trace_of(levels: &[f64], arrivals: Vec<u32>) -> SimulationTrace {
        SimulationTrace {
            points: levels
                .iter()
                .enumerate()
                .map(|(day, &on_hand)| TracePoint {
                    day: day as u32,
                    on_hand,
                    position: on_hand,
                })
                .collect(),
            order_days: vec![0, 3],
            arrival_days: arrivals,
            stockout_days: 0,
        }
    }

    #[test]
    fn reduces_levels() {
        let trace = trace_of(&[40.0, 20.0, 0.0, 10.0], vec![3, 9, 13]);
        let kpis = CycleKpis::from_trace(&trace, 15.0);

        assert_eq!(kpis.orders_placed, 1);
        assert_eq!(kpis.mean_interarrival_days, 5.0);
        assert_eq!(kpis.mean_on_hand, 17.5);
        assert_eq!(kpis.pct_days_below_safety_stock, 50.0);
        assert_eq!(kpis.pct_days_stockout, 25.0);
        assert_eq!(kpis.min_on_hand, 0.0);
        assert_eq!(kpis.max_on_hand, 40.0);
    }

    #[test]
    fn seeded_lot_is_not_an_order_in_horizon() {
        use crate::simulation::config::{SimulationConfig, StartMode};
        use crate::simulation::engine::simulate;

        // 10/day, Q = 100, r = 50, L = 5.
        let steady = simulate(100.0, 50.0, 10.0, 0.0, 5, SimulationConfig::new(30, false, 0, StartMode::Steady));
        assert_eq!(steady.order_days[0], 0);
        let kpis = CycleKpis::from_trace(&steady, 0.0);
        assert_eq!(kpis.orders_placed, steady.order_days.len() - 1);

        let lot = simulate(100.0, 50.0, 10.0, 0.0, 5, SimulationConfig::new(30, false, 0, StartMode::Lot));
        assert_eq!(CycleKpis::from_trace(&lot, 0.0).orders_placed, lot.order_days.len());
    }

    #[test]
    fn single_arrival_has_no_interval() {
        let trace = trace_of(&[5.0, 4.0], vec![1]);
        assert!(CycleKpis::from_trace(&trace, 0.0).mean_interarrival_days.is_nan());
    }

    #[test]
    fn empty_trace_is_nan() {
        let kpis = CycleKpis::from_trace(&SimulationTrace::default(), 0.0);
        assert!(kpis.mean_on_hand.is_nan());
        assert!(kpis.pct_days_stockout.is_nan());
        assert!(kpis.min_on_hand.is_nan());
    }
}
