//! (Q, r) inventory replenishment engine.
//!
//! Computes an economic order quantity and a service-level reorder point for
//! each SKU, compares that policy with the one in use today on a per-period
//! cost basis, and replays either policy day by day under random demand.

pub mod batch;
pub mod cli;
pub mod config;
pub mod error;
pub mod io;
pub mod model;
pub mod simulation;
pub mod strategy;

pub use config::EngineConfig;
pub use error::{PolicyError, Result};
