// src/simulation/demand.rs

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

/// Source of daily demand for the simulator.
///
/// Either the fixed daily mean, or a seeded draw from a Normal (Bell Curve)
/// distribution floored at zero.
#[derive(Debug, Clone)]
pub enum DailyDemand {
    Constant(f64),
    Normal { dist: Normal<f64>, rng: StdRng },
}

impl DailyDemand {
    /// # Arguments
    /// * `mean` - Mean daily demand.
    /// * `std_dev` - Daily standard deviation. Zero (or less) means no noise.
    /// * `variability` - Whether to sample at all.
    /// * `seed` - Seed for the generator; the same seed replays the same days.
    pub fn new(mean: f64, std_dev: f64, variability: bool, seed: u64) -> Self {
        if !variability || !(std_dev > 0.0) {
            return DailyDemand::Constant(mean);
        }

        // Normal::new only rejects a bad std_dev; a NaN mean would still
        // poison every draw, so treat both the same way.
        match Normal::new(mean, std_dev) {
            Ok(dist) if mean.is_finite() => DailyDemand::Normal {
                dist,
                rng: StdRng::seed_from_u64(seed),
            },
            _ => DailyDemand::Constant(mean),
        }
    }

    /// Demand for the next day. Never negative unless the constant mean is.
    pub fn next_day(&mut self) -> f64 {
        match self {
            DailyDemand::Constant(mean) => *mean,
            DailyDemand::Normal { dist, rng } => dist.sample(rng).max(0.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_when_variability_off() {
        let mut demand = DailyDemand::new(85.0, 20.0, false, 7);
        assert!((0..50).all(|_| demand.next_day() == 85.0));
    }

    #[test]
    fn constant_when_no_spread() {
        let mut demand = DailyDemand::new(85.0, 0.0, true, 7);
        assert_eq!(demand.next_day(), 85.0);
    }

    #[test]
    fn sampled_demand_is_non_negative() {
        // Mean close to zero so plenty of raw draws are negative.
        let mut demand = DailyDemand::new(1.0, 10.0, true, 3);
        for _ in 0..1000 {
            assert!(demand.next_day() >= 0.0);
        }
    }

    #[test]
    fn same_seed_same_draws() {
        let mut a = DailyDemand::new(50.0, 10.0, true, 42);
        let mut b = DailyDemand::new(50.0, 10.0, true, 42);
        let xs: Vec<f64> = (0..100).map(|_| a.next_day()).collect();
        let ys: Vec<f64> = (0..100).map(|_| b.next_day()).collect();
        assert_eq!(xs, ys);
    }

    #[test]
    fn nan_mean_falls_back_to_constant() {
        let demand = DailyDemand::new(f64::NAN, 10.0, true, 1);
        assert!(matches!(demand, DailyDemand::Constant(m) if m.is_nan()));
    }
}
