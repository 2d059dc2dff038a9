// src/simulation/config.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// How the first day of a run looks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StartMode {
    /// Already cycling: on-hand at r and one lot of Q landing on day L.
    Steady,
    /// Cold start right after a lot arrived: on-hand at Q, nothing in transit.
    Lot,
}

/// Parameters of one simulation run.
///
/// There is no `Default`: the seed always comes from the caller.
#[derive(Debug, Clone)]
pub struct SimulationConfig {
    pub horizon_days: u32,
    /// Draw daily demand from a normal distribution instead of using the mean.
    pub variability: bool,
    pub seed: u64,
    pub start_mode: StartMode,
}

impl SimulationConfig {
    pub fn new(horizon_days: u32, variability: bool, seed: u64, start_mode: StartMode) -> Self {
        Self {
            horizon_days,
            variability,
            seed,
            start_mode,
        }
    }
}
