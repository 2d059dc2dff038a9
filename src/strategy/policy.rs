// src/strategy/policy.rs

//! The (Q, r) calculator for a single SKU.
//!
//! Builds the optimal policy from the model, resolves the baseline policy
//! (supplied by the caller or derived from a heuristic), costs both on the
//! same lead-time statistics and reports the savings.

use crate::config::EngineConfig;
use crate::error::{PolicyError, Result};
use crate::model::constraints::OrderConstraints;
use crate::model::costs::{eoq, periodic_costs, CostParams, PeriodicCost};
use crate::model::demand::{DemandProfile, LeadTimeStats};
use crate::strategy::optimization::{reorder_point, safety_stock, service_level_z};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use tracing::debug;

// =========================================================================
// 1. Inputs
// =========================================================================

/// Everything known about one SKU.
#[derive(Debug, Clone, PartialEq)]
pub struct SkuParams {
    pub demand: DemandProfile,
    pub lead_time_days: f64,
    pub costs: CostParams,
    pub constraints: OrderConstraints,
    /// Target service level of the optimal policy, in percent.
    pub service_level: f64,
    /// Service level assumed for the baseline when its reorder point is not
    /// supplied. Falls back to `service_level`.
    pub baseline_service_level: Option<f64>,
    /// Lot size used today (Q0).
    pub baseline_quantity: Option<f64>,
    /// Reorder point used today (r0).
    pub baseline_reorder_point: Option<f64>,
}

/// How Q0 is derived when the caller does not supply it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineHeuristic {
    /// Q0 = one period of demand.
    #[default]
    DemandEqual,
    /// Q0 = two periods of demand.
    DoubleDemand,
    /// Q0 = EOQ after the order constraints.
    ConstrainedEoq,
}

impl BaselineHeuristic {
    pub fn quantity(self, demand: f64, raw_eoq: f64, constraints: &OrderConstraints) -> f64 {
        match self {
            BaselineHeuristic::DemandEqual => demand,
            BaselineHeuristic::DoubleDemand => 2.0 * demand,
            BaselineHeuristic::ConstrainedEoq => constraints.apply(raw_eoq),
        }
    }
}

/// Where a baseline figure came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BaselineSource {
    Supplied,
    Heuristic(BaselineHeuristic),
    ServiceLevel,
}

// =========================================================================
// 2. Outputs
// =========================================================================

/// A continuous-review rule: order `quantity` when the inventory position
/// drops to `reorder_point` or below.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Policy {
    pub quantity: f64,
    pub reorder_point: f64,
    pub safety_stock: f64,
}

/// Operational figures that explain a policy's cost.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyMetrics {
    /// Orders placed per period, `D / Q`.
    pub orders_per_period: f64,
    /// Average stock carried, `Q/2 + SS`.
    pub average_inventory: f64,
    /// Days one lot lasts at mean demand, `Q / d_day`.
    pub coverage_days: f64,
}

impl PolicyMetrics {
    fn for_policy(policy: &Policy, demand: f64, daily_mean: f64) -> Self {
        let q = policy.quantity;
        let usable = q.is_finite() && q > 0.0;

        Self {
            orders_per_period: if usable { demand / q } else { f64::NAN },
            average_inventory: if q.is_finite() {
                q / 2.0 + policy.safety_stock
            } else {
                f64::NAN
            },
            coverage_days: if q.is_finite() && daily_mean > 0.0 {
                q / daily_mean
            } else {
                f64::NAN
            },
        }
    }
}

/// A policy together with what it costs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolicyOutcome {
    pub policy: Policy,
    pub cost: PeriodicCost,
    pub annual_cost: f64,
    pub metrics: PolicyMetrics,
}

/// Baseline cost minus optimal cost, in total and per component.
///
/// Each difference is NaN unless both sides are finite. The percentage is
/// also NaN when the baseline total is not positive.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Savings {
    pub per_period: f64,
    pub annualized: f64,
    pub percent: f64,
    /// Ordering-cost part of `per_period`.
    pub ordering: f64,
    /// Holding-cost part of `per_period`.
    pub holding: f64,
}

fn difference(baseline: f64, optimal: f64) -> f64 {
    if baseline.is_finite() && optimal.is_finite() {
        baseline - optimal
    } else {
        f64::NAN
    }
}

impl Savings {
    pub fn between(baseline: &PeriodicCost, optimal: &PeriodicCost, periods_per_year: f64) -> Self {
        let per_period = difference(baseline.total, optimal.total);
        let annualized = if per_period.is_finite() {
            per_period * periods_per_year
        } else {
            f64::NAN
        };
        let percent = if baseline.total.is_finite() && baseline.total > 0.0 {
            per_period / baseline.total * 100.0
        } else {
            f64::NAN
        };

        Self {
            per_period,
            annualized,
            percent,
            ordering: difference(baseline.ordering, optimal.ordering),
            holding: difference(baseline.holding, optimal.holding),
        }
    }
}

/// Full result of the single-SKU calculation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyEvaluation {
    pub lead_time: LeadTimeStats,
    pub holding_cost_per_period: f64,
    pub periods_per_year: f64,
    /// EOQ before any order constraint.
    pub raw_eoq: f64,
    pub optimal: PolicyOutcome,
    pub baseline: PolicyOutcome,
    pub baseline_quantity_source: BaselineSource,
    pub baseline_reorder_source: BaselineSource,
    pub savings: Savings,
}

// =========================================================================
// 3. Calculator
// =========================================================================

/// Positive, finite values count as supplied; anything else means "derive it".
fn supplied(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite() && *v > 0.0)
}

/// Computes the optimal and baseline (Q, r) policies for one SKU.
///
/// Never fails: degenerate inputs show up as NaN fields in the result.
pub fn evaluate_policy(params: &SkuParams, config: &EngineConfig) -> PolicyEvaluation {
    let time_base = params.demand.time_base;
    let periods_per_year = time_base.periods_per_year();
    let demand = params.demand.mean_per_period;
    let order_cost = params.costs.order_cost;
    let holding = params.costs.holding_cost_per_period(time_base);

    // Both policies share the same lead-time statistics.
    let lead_time = params.demand.over_lead_time(params.lead_time_days);

    let active_constraints = if config.apply_constraints {
        params.constraints
    } else {
        OrderConstraints::none()
    };

    // Optimal
    let z_opt = service_level_z(params.service_level);
    let ss_opt = safety_stock(z_opt, lead_time.sigma_l);
    let r_opt = reorder_point(lead_time.mu_l, ss_opt);

    let raw_eoq = eoq(demand, order_cost, holding);
    let q_opt = active_constraints.apply(raw_eoq);

    let optimal_policy = Policy {
        quantity: q_opt,
        reorder_point: r_opt,
        safety_stock: ss_opt,
    };

    // Baseline quantity
    let (q_base, baseline_quantity_source) = match supplied(params.baseline_quantity) {
        Some(q) => (q, BaselineSource::Supplied),
        None => (
            config
                .baseline_heuristic
                .quantity(demand, raw_eoq, &active_constraints),
            BaselineSource::Heuristic(config.baseline_heuristic),
        ),
    };
    let q_base = active_constraints.apply(q_base);

    // Baseline reorder point
    let (r_base, ss_base, baseline_reorder_source) = match supplied(params.baseline_reorder_point)
    {
        Some(r) => (r, (r - lead_time.mu_l).max(0.0), BaselineSource::Supplied),
        None => {
            let z_base = service_level_z(
                params
                    .baseline_service_level
                    .unwrap_or(params.service_level),
            );
            let ss = safety_stock(z_base, lead_time.sigma_l);
            (
                reorder_point(lead_time.mu_l, ss),
                ss,
                BaselineSource::ServiceLevel,
            )
        }
    };

    let baseline_policy = Policy {
        quantity: q_base,
        reorder_point: r_base,
        safety_stock: ss_base,
    };

    let optimal = outcome(optimal_policy, demand, order_cost, holding, &lead_time, periods_per_year);
    let baseline = outcome(baseline_policy, demand, order_cost, holding, &lead_time, periods_per_year);
    let savings = Savings::between(&baseline.cost, &optimal.cost, periods_per_year);

    debug!(
        q_opt,
        r_opt,
        q_base,
        r_base,
        savings = savings.per_period,
        "policy evaluated"
    );

    PolicyEvaluation {
        lead_time,
        holding_cost_per_period: holding,
        periods_per_year,
        raw_eoq,
        optimal,
        baseline,
        baseline_quantity_source,
        baseline_reorder_source,
        savings,
    }
}

fn outcome(
    policy: Policy,
    demand: f64,
    order_cost: f64,
    holding: f64,
    lead_time: &LeadTimeStats,
    periods_per_year: f64,
) -> PolicyOutcome {
    let cost = periodic_costs(policy.quantity, demand, order_cost, holding, policy.safety_stock);
    PolicyOutcome {
        policy,
        cost,
        annual_cost: cost.total * periods_per_year,
        metrics: PolicyMetrics::for_policy(&policy, demand, lead_time.daily_mean),
    }
}

// =========================================================================
// 4. Reorder advice
// =========================================================================

/// Stock situation right now.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct InventoryStatus {
    pub on_hand: f64,
    pub on_order: f64,
    pub backorders: f64,
}

impl InventoryStatus {
    /// Inventory position: on-hand + on-order - backorders.
    pub fn position(&self) -> f64 {
        self.on_hand + self.on_order - self.backorders
    }
}

/// What to do today under the optimal policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ReorderAdvice {
    /// Position is at or below r: place an order of `quantity` now.
    OrderNow {
        quantity: f64,
        position: f64,
        reorder_point: f64,
    },
    /// Position is above r. `days_until_reorder` is `None` when mean daily
    /// demand is not positive.
    Wait {
        quantity: f64,
        position: f64,
        reorder_point: f64,
        days_until_reorder: Option<f64>,
    },
}

/// Answers "reorder now?" and "how long until we do?".
///
/// The suggested lot is Q* when finite, else Q0.
pub fn reorder_advice(
    evaluation: &PolicyEvaluation,
    status: &InventoryStatus,
) -> Result<ReorderAdvice> {
    let reorder_point = evaluation.optimal.policy.reorder_point;
    if !reorder_point.is_finite() {
        return Err(PolicyError::ReorderPointUndefined);
    }

    let q_opt = evaluation.optimal.policy.quantity;
    let quantity = if q_opt.is_finite() {
        q_opt
    } else {
        evaluation.baseline.policy.quantity
    };
    if !quantity.is_finite() {
        return Err(PolicyError::OrderQuantityUndefined);
    }

    let position = status.position();
    if position <= reorder_point {
        return Ok(ReorderAdvice::OrderNow {
            quantity,
            position,
            reorder_point,
        });
    }

    let daily_mean = evaluation.lead_time.daily_mean;
    let days_until_reorder = if daily_mean > 0.0 {
        Some(((position - reorder_point) / daily_mean).max(0.0))
    } else {
        None
    };

    Ok(ReorderAdvice::Wait {
        quantity,
        position,
        reorder_point,
        days_until_reorder,
    })
}
