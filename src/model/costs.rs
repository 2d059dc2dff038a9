// src/model/costs.rs

//! Periodic ordering and holding costs of a (Q, r) policy.
//!
//! Every amount here is per period (week or month, whatever base the demand
//! is expressed in). Annual figures are a plain multiplication done by the
//! callers.

use crate::model::demand::TimeBase;
use serde::{Deserialize, Serialize};

/// Price and cost inputs for one SKU.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CostParams {
    /// Purchase cost of one unit.
    pub unit_price: f64,
    /// Yearly carrying charge as a fraction of unit value (0.25 = 25%/year).
    pub annual_carrying_rate: f64,
    /// Fixed cost per replenishment order.
    pub order_cost: f64,
}

impl CostParams {
    /// Holding cost of one unit for one period: `i * v / periods_per_year`.
    ///
    /// Must be strictly positive for a finite EOQ to exist.
    pub fn holding_cost_per_period(&self, time_base: TimeBase) -> f64 {
        self.annual_carrying_rate * self.unit_price / time_base.periods_per_year()
    }
}

/// Cost of one period, split into its two components.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PeriodicCost {
    pub ordering: f64,
    pub holding: f64,
    pub total: f64,
}

impl PeriodicCost {
    pub fn undefined() -> Self {
        Self {
            ordering: f64::NAN,
            holding: f64::NAN,
            total: f64::NAN,
        }
    }

    pub fn is_finite(&self) -> bool {
        self.total.is_finite()
    }
}

/// Economic order quantity `sqrt(2KD/h)`.
///
/// Returns `NaN` unless `demand > 0`, `order_cost >= 0` and `holding > 0`.
pub fn eoq(demand: f64, order_cost: f64, holding: f64) -> f64 {
    if !(demand > 0.0) || !(order_cost >= 0.0) || !(holding > 0.0) {
        return f64::NAN;
    }
    (2.0 * order_cost * demand / holding).sqrt()
}

/// Ordering cost `K*D/Q` plus holding cost `h*(Q/2 + SS)`.
///
/// Holding charges for the average cycle stock plus the safety stock that is
/// carried all the time; a negative safety stock counts as zero, a NaN one
/// does not. Any input outside the model's domain gives an all-NaN result.
pub fn periodic_costs(
    quantity: f64,
    demand: f64,
    order_cost: f64,
    holding: f64,
    safety_stock: f64,
) -> PeriodicCost {
    if !(quantity > 0.0) || !(demand > 0.0) || !(holding >= 0.0) || !(order_cost >= 0.0) {
        return PeriodicCost::undefined();
    }
    if safety_stock.is_nan() {
        return PeriodicCost::undefined();
    }

    let ordering = order_cost * demand / quantity;
    let holding = holding * (quantity / 2.0 + safety_stock.max(0.0));

    PeriodicCost {
        ordering,
        holding,
        total: ordering + holding,
    }
}

/// One sample of the cost-vs-lot-size curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CostPoint {
    pub quantity: f64,
    pub cost: PeriodicCost,
}

/// Samples `periodic_costs` at `points` evenly spaced lot sizes in
/// `[q_min, q_max]`.
///
/// Fewer than two points, or a range that is empty or not finite, gives an
/// empty curve.
pub fn cost_curve(
    q_min: f64,
    q_max: f64,
    points: usize,
    demand: f64,
    order_cost: f64,
    holding: f64,
    safety_stock: f64,
) -> Vec<CostPoint> {
    if points < 2 || !q_min.is_finite() || !q_max.is_finite() || q_max <= q_min {
        return Vec::new();
    }

    let step = (q_max - q_min) / (points - 1) as f64;
    (0..points)
        .map(|i| {
            let quantity = q_min + step * i as f64;
            CostPoint {
                quantity,
                cost: periodic_costs(quantity, demand, order_cost, holding, safety_stock),
            }
        })
        .collect()
}

/// Lot-size range for plotting a curve around a policy.
///
/// Starts at a fifth of the reference lot (Q* when finite, else Q0) but not
/// below one unit, and ends at five times Q* (or five times Q0, at least 100).
pub fn curve_range(optimal_quantity: f64, baseline_quantity: f64) -> (f64, f64) {
    let reference = if optimal_quantity.is_finite() {
        optimal_quantity
    } else {
        baseline_quantity
    };
    let right = if optimal_quantity.is_finite() {
        optimal_quantity * 5.0
    } else {
        baseline_quantity.max(100.0) * 5.0
    };
    ((0.2 * reference).max(1.0), right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn eoq_matches_closed_form() {
        let q = eoq(600.0, 200.0, 1.5 / 52.0);
        let expected = (2.0_f64 * 200.0 * 600.0 / (1.5 / 52.0)).sqrt();
        assert!((q - expected).abs() < 1e-9);
    }

    #[test]
    fn eoq_rejects_degenerate_inputs() {
        assert!(eoq(0.0, 100.0, 1.0).is_nan());
        assert!(eoq(-5.0, 100.0, 1.0).is_nan());
        assert!(eoq(100.0, -1.0, 1.0).is_nan());
        assert!(eoq(100.0, 100.0, 0.0).is_nan());
        assert!(eoq(f64::NAN, 100.0, 1.0).is_nan());
        assert_eq!(eoq(100.0, 0.0, 1.0), 0.0);
    }

    #[test]
    fn ordering_equals_holding_at_eoq() {
        let (d, k, h) = (2500.0, 120.0, 1.0 / 52.0);
        let q = eoq(d, k, h);
        let cost = periodic_costs(q, d, k, h, 0.0);
        assert!((cost.ordering - cost.holding).abs() < 1e-9 * cost.total);
        assert!((cost.total - (cost.ordering + cost.holding)).abs() < 1e-12);
    }

    #[test]
    fn safety_stock_shifts_holding_only() {
        let base = periodic_costs(1000.0, 500.0, 50.0, 0.1, 0.0);
        let with_ss = periodic_costs(1000.0, 500.0, 50.0, 0.1, 200.0);
        assert_eq!(base.ordering, with_ss.ordering);
        assert!((with_ss.holding - base.holding - 20.0).abs() < 1e-9);

        let negative_ss = periodic_costs(1000.0, 500.0, 50.0, 0.1, -300.0);
        assert_eq!(negative_ss, base);
    }

    #[test]
    fn degenerate_costs_are_nan() {
        assert!(!periodic_costs(0.0, 500.0, 50.0, 0.1, 0.0).is_finite());
        assert!(!periodic_costs(100.0, 0.0, 50.0, 0.1, 0.0).is_finite());
        assert!(!periodic_costs(100.0, 500.0, -1.0, 0.1, 0.0).is_finite());
        assert!(!periodic_costs(100.0, 500.0, 50.0, -0.1, 0.0).is_finite());
        assert!(periodic_costs(f64::NAN, 500.0, 50.0, 0.1, 0.0).ordering.is_nan());
    }

    #[test]
    fn holding_cost_per_period_by_base() {
        let params = CostParams {
            unit_price: 5.0,
            annual_carrying_rate: 0.30,
            order_cost: 200.0,
        };
        let weekly = params.holding_cost_per_period(TimeBase::Weekly);
        assert!((weekly - 0.028846).abs() < 1e-5);
        let monthly = params.holding_cost_per_period(TimeBase::Monthly);
        assert!((monthly - 0.125).abs() < 1e-12);
    }

    #[test]
    fn cost_curve_spans_range() {
        let curve = cost_curve(100.0, 1100.0, 11, 500.0, 50.0, 0.1, 0.0);
        assert_eq!(curve.len(), 11);
        assert_eq!(curve[0].quantity, 100.0);
        assert!((curve[10].quantity - 1100.0).abs() < 1e-9);
        assert!(cost_curve(100.0, 100.0, 11, 500.0, 50.0, 0.1, 0.0).is_empty());
        assert!(cost_curve(100.0, 200.0, 1, 500.0, 50.0, 0.1, 0.0).is_empty());
    }

    #[test]
    fn nan_safety_stock_is_not_charged_as_zero() {
        let cost = periodic_costs(1000.0, 500.0, 50.0, 0.1, f64::NAN);
        assert!(cost.ordering.is_nan());
        assert!(cost.holding.is_nan());
        assert!(!cost.is_finite());
    }

    #[test]
    fn curve_range_follows_reference_lot() {
        assert_eq!(curve_range(2000.0, 5000.0), (400.0, 10_000.0));
        assert_eq!(curve_range(f64::NAN, 50.0), (10.0, 500.0));
        assert_eq!(curve_range(2.0, 5000.0), (1.0, 10.0));
    }
}
