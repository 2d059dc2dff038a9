// src/batch/evaluator.rs

//! Runs the single-SKU calculator over a table of SKUs and ranks the result.
//!
//! Rows are independent; order only matters for breaking ties in the ranking.

use crate::batch::ranking::{rank, BatchSummary};
use crate::config::EngineConfig;
use crate::model::constraints::OrderConstraints;
use crate::model::costs::CostParams;
use crate::model::demand::DemandProfile;
use crate::strategy::policy::{evaluate_policy, SkuParams};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// One SKU of a batch table. Demand figures are in the batch's time base.
///
/// Missing or empty constraint cells mean "no constraint".
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkuRow {
    pub sku: String,
    pub mean_per_period: f64,
    pub stdev_per_period: f64,
    pub unit_price: f64,
    pub annual_carrying_rate: f64,
    pub order_cost: f64,
    pub lead_time_days: f64,
    #[serde(default)]
    pub min_order_qty: Option<f64>,
    #[serde(default)]
    pub lot_multiple: Option<f64>,
    /// Percent.
    pub service_level: f64,
    #[serde(default)]
    pub q_base: Option<f64>,
    #[serde(default)]
    pub r_base: Option<f64>,
}

impl SkuRow {
    pub fn to_params(&self, config: &EngineConfig) -> SkuParams {
        SkuParams {
            demand: DemandProfile::new(self.mean_per_period, self.stdev_per_period, config.time_base),
            lead_time_days: self.lead_time_days,
            costs: CostParams {
                unit_price: self.unit_price,
                annual_carrying_rate: self.annual_carrying_rate,
                order_cost: self.order_cost,
            },
            constraints: OrderConstraints::new(
                self.min_order_qty.unwrap_or(0.0),
                self.lot_multiple.unwrap_or(0.0),
            ),
            service_level: self.service_level,
            baseline_service_level: None,
            baseline_quantity: self.q_base,
            baseline_reorder_point: self.r_base,
        }
    }
}

/// Flat per-SKU output line, ready for a table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatchResult {
    pub sku: String,
    /// Position of the row in the input table.
    pub input_index: usize,
    pub q_opt: f64,
    pub r_opt: f64,
    pub ss_opt: f64,
    pub q_base: f64,
    pub r_base: f64,
    pub ss_base: f64,
    pub cost_opt_per_period: f64,
    pub cost_base_per_period: f64,
    pub cost_opt_annual: f64,
    pub cost_base_annual: f64,
    pub savings_per_period: f64,
    pub savings_annual: f64,
    pub savings_pct: f64,
}

impl BatchResult {
    #[cfg(test)]
    pub(crate) fn empty() -> Self {
        Self {
            sku: String::new(),
            input_index: 0,
            q_opt: f64::NAN,
            r_opt: f64::NAN,
            ss_opt: f64::NAN,
            q_base: f64::NAN,
            r_base: f64::NAN,
            ss_base: f64::NAN,
            cost_opt_per_period: f64::NAN,
            cost_base_per_period: f64::NAN,
            cost_opt_annual: f64::NAN,
            cost_base_annual: f64::NAN,
            savings_per_period: f64::NAN,
            savings_annual: f64::NAN,
            savings_pct: f64::NAN,
        }
    }
}

/// Ranked results plus their totals.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    pub results: Vec<BatchResult>,
    pub summary: BatchSummary,
}

/// Evaluates one row.
pub fn evaluate_row(index: usize, row: &SkuRow, config: &EngineConfig) -> BatchResult {
    let eval = evaluate_policy(&row.to_params(config), config);

    if !eval.savings.per_period.is_finite() {
        warn!(
            sku = %row.sku,
            index,
            "savings undefined; check demand, holding cost and lot size"
        );
    }

    BatchResult {
        sku: row.sku.clone(),
        input_index: index,
        q_opt: eval.optimal.policy.quantity,
        r_opt: eval.optimal.policy.reorder_point,
        ss_opt: eval.optimal.policy.safety_stock,
        q_base: eval.baseline.policy.quantity,
        r_base: eval.baseline.policy.reorder_point,
        ss_base: eval.baseline.policy.safety_stock,
        cost_opt_per_period: eval.optimal.cost.total,
        cost_base_per_period: eval.baseline.cost.total,
        cost_opt_annual: eval.optimal.annual_cost,
        cost_base_annual: eval.baseline.annual_cost,
        savings_per_period: eval.savings.per_period,
        savings_annual: eval.savings.annualized,
        savings_pct: eval.savings.percent,
    }
}

/// Evaluates every row and ranks by `config.rank_by`, best savings first.
///
/// Rows with undefined savings are kept, ranked last.
pub fn evaluate_batch(rows: &[SkuRow], config: &EngineConfig) -> BatchReport {
    let mut results: Vec<BatchResult> = rows
        .iter()
        .enumerate()
        .map(|(i, row)| evaluate_row(i, row, config))
        .collect();

    rank(&mut results, config.rank_by);
    let summary = BatchSummary::from_results(&results);

    info!(
        rows = summary.rows,
        total_savings_annual = summary.total_savings_annual,
        excluded = summary.excluded_per_period,
        "batch evaluated"
    );

    BatchReport { results, summary }
}
