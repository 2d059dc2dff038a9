// src/model/demand.rs

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// The coarse period the demand figures are expressed in.
///
/// All period-based outputs (costs, savings) come out in this same base and
/// are projected to a year with `periods_per_year`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TimeBase {
    Weekly,
    #[default]
    Monthly,
}

impl TimeBase {
    /// Days in one period (7 or 30).
    pub fn days_per_period(self) -> f64 {
        match self {
            TimeBase::Weekly => 7.0,
            TimeBase::Monthly => 30.0,
        }
    }

    /// Periods in one year (52 or 12).
    pub fn periods_per_year(self) -> f64 {
        match self {
            TimeBase::Weekly => 52.0,
            TimeBase::Monthly => 12.0,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            TimeBase::Weekly => "week",
            TimeBase::Monthly => "month",
        }
    }
}

/// Demand mean and standard deviation per period.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DemandProfile {
    pub mean_per_period: f64,
    pub stdev_per_period: f64,
    pub time_base: TimeBase,
}

impl DemandProfile {
    pub fn new(mean_per_period: f64, stdev_per_period: f64, time_base: TimeBase) -> Self {
        Self {
            mean_per_period,
            stdev_per_period,
            time_base,
        }
    }

    /// Statistics of demand accumulated over `lead_time_days`.
    pub fn over_lead_time(&self, lead_time_days: f64) -> LeadTimeStats {
        lead_time_stats(
            self.mean_per_period,
            self.stdev_per_period,
            lead_time_days,
            self.time_base,
        )
    }
}

/// Demand statistics over the replenishment lead time, plus the daily figures
/// they were built from.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeadTimeStats {
    /// Mean demand during the lead time.
    pub mu_l: f64,
    /// Standard deviation of demand during the lead time.
    pub sigma_l: f64,
    /// Mean daily demand.
    pub daily_mean: f64,
    /// Standard deviation of daily demand.
    pub daily_stdev: f64,
}

/// Converts per-period demand into daily demand and lead-time demand.
///
/// Daily variance is assumed i.i.d., so the standard deviation scales with the
/// square root of the number of days. The lead time is floored at one day in
/// the variance term only; `mu_l` keeps the raw lead time.
///
/// Never fails. Garbage in (negative or NaN inputs) comes back out as NaN or a
/// meaningless number, and the caller checks finiteness.
pub fn lead_time_stats(
    mean: f64,
    stdev: f64,
    lead_time_days: f64,
    time_base: TimeBase,
) -> LeadTimeStats {
    let days = time_base.days_per_period();
    let daily_mean = mean / days;
    let daily_stdev = stdev / days.sqrt();

    let mu_l = daily_mean * lead_time_days;
    let sigma_l = daily_stdev * lead_time_days.max(1.0).sqrt();

    LeadTimeStats {
        mu_l,
        sigma_l,
        daily_mean,
        daily_stdev,
    }
}
