// src/cli.rs

use crate::batch::ranking::SavingsField;
use crate::config::{EngineConfig, DEFAULT_BASELINE_SEED, DEFAULT_HORIZON_DAYS, DEFAULT_OPTIMAL_SEED};
use crate::model::constraints::OrderConstraints;
use crate::model::costs::CostParams;
use crate::model::demand::{DemandProfile, TimeBase};
use crate::simulation::config::StartMode;
use crate::strategy::policy::{BaselineHeuristic, InventoryStatus, SkuParams};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "reorder-policy", version, about = "EOQ / (Q, r) replenishment policy calculator")]
pub struct Cli {
    #[command(flatten)]
    pub engine: EngineArgs,

    #[command(subcommand)]
    pub command: Command,
}

/// Options shared by every command.
#[derive(Debug, Args)]
pub struct EngineArgs {
    /// Period the demand figures are expressed in.
    #[arg(long, global = true, value_enum, default_value_t = TimeBase::Monthly, env = "REORDER_TIME_BASE")]
    pub time_base: TimeBase,

    /// Ignore MOQ and lot-multiple columns.
    #[arg(long, global = true, env = "REORDER_NO_CONSTRAINTS")]
    pub no_constraints: bool,

    /// Rule for the baseline lot size when none is given.
    #[arg(long, global = true, value_enum, default_value_t = BaselineHeuristic::DemandEqual, env = "REORDER_BASELINE")]
    pub baseline: BaselineHeuristic,

    /// Savings column used to rank batch output.
    #[arg(long, global = true, value_enum, default_value_t = SavingsField::Annualized, env = "REORDER_RANK_BY")]
    pub rank_by: SavingsField,
}

impl EngineArgs {
    pub fn to_config(&self) -> EngineConfig {
        EngineConfig {
            time_base: self.time_base,
            apply_constraints: !self.no_constraints,
            baseline_heuristic: self.baseline,
            rank_by: self.rank_by,
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute the policy for one SKU and compare it with the current one.
    Calc(CalcArgs),
    /// Evaluate and rank every SKU of a CSV table.
    Batch(BatchArgs),
}

#[derive(Debug, Args)]
pub struct CalcArgs {
    /// Mean demand per period.
    #[arg(long)]
    pub mean: f64,
    /// Standard deviation of demand per period.
    #[arg(long, default_value_t = 0.0)]
    pub stdev: f64,
    /// Lead time in days.
    #[arg(long, default_value_t = 10)]
    pub lead_time: u32,
    #[arg(long)]
    pub unit_price: f64,
    /// Yearly carrying rate as a fraction (0.25 = 25%).
    #[arg(long, default_value_t = 0.25)]
    pub carrying_rate: f64,
    /// Fixed cost per order.
    #[arg(long)]
    pub order_cost: f64,
    #[arg(long, default_value_t = 0.0)]
    pub moq: f64,
    #[arg(long, default_value_t = 0.0)]
    pub multiple: f64,
    /// Target service level of the optimal policy, percent.
    #[arg(long, default_value_t = 95.0)]
    pub service_level: f64,
    /// Service level of the current policy, percent.
    #[arg(long)]
    pub baseline_service_level: Option<f64>,
    /// Current lot size.
    #[arg(long)]
    pub q_base: Option<f64>,
    /// Current reorder point.
    #[arg(long)]
    pub r_base: Option<f64>,

    #[arg(long, default_value_t = 0.0)]
    pub on_hand: f64,
    #[arg(long, default_value_t = 0.0)]
    pub on_order: f64,
    #[arg(long, default_value_t = 0.0)]
    pub backorders: f64,

    /// Replay both policies day by day.
    #[arg(long)]
    pub simulate: bool,
    #[arg(long, default_value_t = DEFAULT_HORIZON_DAYS)]
    pub horizon: u32,
    /// Use mean daily demand instead of sampling it.
    #[arg(long)]
    pub no_variability: bool,
    #[arg(long, value_enum, default_value_t = StartMode::Steady)]
    pub start_mode: StartMode,
    #[arg(long, default_value_t = DEFAULT_OPTIMAL_SEED)]
    pub seed_optimal: u64,
    #[arg(long, default_value_t = DEFAULT_BASELINE_SEED)]
    pub seed_baseline: u64,
    /// Write the optimal-policy trace to this CSV file.
    #[arg(long)]
    pub trace_out: Option<PathBuf>,

    /// Write cost per period against lot size to this CSV file.
    #[arg(long)]
    pub curve_out: Option<PathBuf>,
    #[arg(long, default_value_t = 200)]
    pub curve_points: usize,
}

impl CalcArgs {
    pub fn to_params(&self, time_base: TimeBase) -> SkuParams {
        SkuParams {
            demand: DemandProfile::new(self.mean, self.stdev, time_base),
            lead_time_days: f64::from(self.lead_time),
            costs: CostParams {
                unit_price: self.unit_price,
                annual_carrying_rate: self.carrying_rate,
                order_cost: self.order_cost,
            },
            constraints: OrderConstraints::new(self.moq, self.multiple),
            service_level: self.service_level,
            baseline_service_level: self.baseline_service_level,
            baseline_quantity: self.q_base,
            baseline_reorder_point: self.r_base,
        }
    }

    pub fn status(&self) -> InventoryStatus {
        InventoryStatus {
            on_hand: self.on_hand,
            on_order: self.on_order,
            backorders: self.backorders,
        }
    }
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// CSV table of SKUs.
    #[arg(long, short)]
    pub input: PathBuf,
    /// Where to write the ranked table.
    #[arg(long, short)]
    pub output: Option<PathBuf>,
    /// Only print SKUs whose name contains this text (case-insensitive).
    #[arg(long)]
    pub filter: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_calc_with_globals() {
        let cli = Cli::try_parse_from([
            "reorder-policy",
            "calc",
            "--mean",
            "600",
            "--stdev",
            "180",
            "--unit-price",
            "5",
            "--carrying-rate",
            "0.3",
            "--order-cost",
            "200",
            "--q-base",
            "5000",
            "--time-base",
            "weekly",
            "--curve-out",
            "curve.csv",
        ])
        .unwrap();

        let config = cli.engine.to_config();
        assert_eq!(config.time_base, TimeBase::Weekly);
        assert!(config.apply_constraints);

        match cli.command {
            Command::Calc(args) => {
                let params = args.to_params(config.time_base);
                assert_eq!(params.baseline_quantity, Some(5000.0));
                assert_eq!(params.lead_time_days, 10.0);
                assert_eq!(params.demand.time_base, TimeBase::Weekly);
                assert_eq!(args.curve_out, Some(PathBuf::from("curve.csv")));
                assert_eq!(args.curve_points, 200);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn parses_batch_options() {
        let cli = Cli::try_parse_from([
            "reorder-policy",
            "--no-constraints",
            "--baseline",
            "double-demand",
            "--rank-by",
            "percent",
            "batch",
            "--input",
            "skus.csv",
        ])
        .unwrap();

        let config = cli.engine.to_config();
        assert!(!config.apply_constraints);
        assert_eq!(config.baseline_heuristic, BaselineHeuristic::DoubleDemand);
        assert_eq!(config.rank_by, SavingsField::Percent);
        assert!(matches!(cli.command, Command::Batch(ref b) if b.input == PathBuf::from("skus.csv")));
    }
}
