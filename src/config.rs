// src/config.rs

use crate::batch::ranking::SavingsField;
use crate::error::{PolicyError, Result};
use crate::model::demand::TimeBase;
use crate::strategy::policy::BaselineHeuristic;

/// Engine-wide options, passed explicitly to the calculator and the batch
/// evaluator.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Base of the demand figures in batch tables.
    pub time_base: TimeBase,
    /// Apply MOQ / lot-multiple rounding to both policies.
    pub apply_constraints: bool,
    /// Rule for Q0 when a row does not carry one.
    pub baseline_heuristic: BaselineHeuristic,
    /// Savings column used to rank batch output.
    pub rank_by: SavingsField,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            time_base: TimeBase::Monthly,
            apply_constraints: true,
            baseline_heuristic: BaselineHeuristic::DemandEqual,
            rank_by: SavingsField::Annualized,
        }
    }
}

/// Horizon used when the caller does not pick one.
pub const DEFAULT_HORIZON_DAYS: u32 = 180;
/// Seeds for the side-by-side optimal/baseline runs.
pub const DEFAULT_OPTIMAL_SEED: u64 = 1;
pub const DEFAULT_BASELINE_SEED: u64 = 2;

/// Checks a simulation horizon coming from the outside world.
pub fn validate_horizon(horizon_days: u32) -> Result<u32> {
    if horizon_days == 0 {
        return Err(PolicyError::InvalidConfig {
            field: "horizon_days",
            reason: "must be at least one day".to_string(),
        });
    }
    Ok(horizon_days)
}
