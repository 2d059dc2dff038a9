// src/batch/ranking.rs

use crate::batch::evaluator::BatchResult;
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Savings column a batch is ranked by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsField {
    PerPeriod,
    #[default]
    Annualized,
    Percent,
}

impl SavingsField {
    pub fn value(self, result: &BatchResult) -> f64 {
        match self {
            SavingsField::PerPeriod => result.savings_per_period,
            SavingsField::Annualized => result.savings_annual,
            SavingsField::Percent => result.savings_pct,
        }
    }
}

/// Descending order with every non-finite value after every finite one.
fn descending_finite_first(a: f64, b: f64) -> Ordering {
    match (a.is_finite(), b.is_finite()) {
        (true, true) => b.partial_cmp(&a).unwrap_or(Ordering::Equal),
        (true, false) => Ordering::Less,
        (false, true) => Ordering::Greater,
        (false, false) => Ordering::Equal,
    }
}

/// Sorts `results` by `field`, highest savings first.
///
/// The sort is stable, so ties keep their input order. Rows whose savings are
/// NaN or infinite stay in the output, at the bottom.
pub fn rank(results: &mut [BatchResult], field: SavingsField) {
    results.sort_by(|a, b| descending_finite_first(field.value(a), field.value(b)));
}

/// Totals over a batch, each taken over the finite entries only.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BatchSummary {
    pub rows: usize,
    pub total_savings_per_period: f64,
    pub total_savings_annual: f64,
    /// NaN when no row has a finite percentage.
    pub mean_savings_pct: f64,
    pub excluded_per_period: usize,
    pub excluded_annual: usize,
    pub excluded_pct: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[BatchResult]) -> Self {
        let finite = |field: SavingsField| -> Vec<f64> {
            results
                .iter()
                .map(|r| field.value(r))
                .filter(|v| v.is_finite())
                .collect()
        };

        let per_period = finite(SavingsField::PerPeriod);
        let annual = finite(SavingsField::Annualized);
        let pct = finite(SavingsField::Percent);

        let mean_savings_pct = if pct.is_empty() {
            f64::NAN
        } else {
            pct.iter().sum::<f64>() / pct.len() as f64
        };

        Self {
            rows: results.len(),
            total_savings_per_period: per_period.iter().sum(),
            total_savings_annual: annual.iter().sum(),
            mean_savings_pct,
            excluded_per_period: results.len() - per_period.len(),
            excluded_annual: results.len() - annual.len(),
            excluded_pct: results.len() - pct.len(),
        }
    }
}
