// src/error.rs

use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, PolicyError>;

/// Everything that can go wrong outside of plain arithmetic.
///
/// Degenerate numeric inputs (zero demand, zero holding cost, ...) are not
/// errors: they flow through the formulas as `NaN`. The variants here are for
/// the cases where a caller needs a hard "no" instead of a sentinel.
#[derive(Debug, Error)]
pub enum PolicyError {
    /// The reorder point came out as NaN or infinite, so there is no trigger
    /// level to compare the inventory position against.
    #[error("cannot compute a policy: reorder point is not finite (check demand, variability and lead time)")]
    ReorderPointUndefined,

    /// Neither the optimal nor the baseline lot size is usable.
    #[error("cannot compute a policy: no finite order quantity available")]
    OrderQuantityUndefined,

    #[error("invalid configuration for `{field}`: {reason}")]
    InvalidConfig { field: &'static str, reason: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
