use clap::Parser;
use reorder_policy::batch::evaluator::evaluate_batch;
use reorder_policy::cli::{BatchArgs, CalcArgs, Cli, Command};
use reorder_policy::config::{validate_horizon, EngineConfig};
use reorder_policy::io::{reporting, sku_table};
use reorder_policy::model::costs::{cost_curve, curve_range};
use reorder_policy::simulation::config::SimulationConfig;
use reorder_policy::simulation::engine::simulate;
use reorder_policy::simulation::kpi::CycleKpis;
use reorder_policy::strategy::policy::{
    evaluate_policy, reorder_advice, PolicyEvaluation, PolicyOutcome, ReorderAdvice,
};
use reorder_policy::Result;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    let _ = dotenvy::dotenv();

    // ---- Logging ----
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = cli.engine.to_config();

    let outcome = match &cli.command {
        Command::Calc(args) => run_calc(args, &config),
        Command::Batch(args) => run_batch(args, &config),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run_calc(args: &CalcArgs, config: &EngineConfig) -> Result<()> {
    let params = args.to_params(config.time_base);
    let eval = evaluate_policy(&params, config);
    let period = config.time_base.label();

    println!("=== (Q, r) Policy ===");
    println!(
        "Lead time {} days: mean demand {:.1}, std dev {:.1} (daily {:.2} ± {:.2})",
        args.lead_time,
        eval.lead_time.mu_l,
        eval.lead_time.sigma_l,
        eval.lead_time.daily_mean,
        eval.lead_time.daily_stdev
    );
    println!("Holding cost: {:.4} per unit per {}", eval.holding_cost_per_period, period);
    print_outcome("Optimal", &eval.optimal, period);
    print_outcome("Baseline", &eval.baseline, period);
    print_savings(&eval, period);

    if let Some(path) = &args.curve_out {
        let (q_min, q_max) = curve_range(eval.optimal.policy.quantity, eval.baseline.policy.quantity);
        let curve = cost_curve(
            q_min,
            q_max,
            args.curve_points,
            params.demand.mean_per_period,
            params.costs.order_cost,
            eval.holding_cost_per_period,
            eval.optimal.policy.safety_stock,
        );
        reporting::write_cost_curve_file(path, &curve)?;
    }

    println!("\n=== Reorder check ===");
    match reorder_advice(&eval, &args.status()) {
        Ok(ReorderAdvice::OrderNow {
            quantity,
            position,
            reorder_point,
        }) => println!(
            "Position {position:.0} <= r {reorder_point:.0}: place an order of {quantity:.0} units now."
        ),
        Ok(ReorderAdvice::Wait {
            quantity,
            position,
            reorder_point,
            days_until_reorder,
        }) => match days_until_reorder {
            Some(days) => println!(
                "Position {position:.0} > r {reorder_point:.0}: wait ~{days:.1} days, then order {quantity:.0} units."
            ),
            None => println!(
                "Position {position:.0} > r {reorder_point:.0}: wait until the position drops to r, then order {quantity:.0} units."
            ),
        },
        Err(e) => println!("WARNING: {e}"),
    }

    if args.simulate {
        run_simulation(args, &eval)?;
    }
    Ok(())
}

fn run_simulation(args: &CalcArgs, eval: &PolicyEvaluation) -> Result<()> {
    let horizon = validate_horizon(args.horizon)?;
    let variability = !args.no_variability;

    let optimal_q = if eval.optimal.policy.quantity.is_finite() {
        eval.optimal.policy.quantity
    } else {
        eval.baseline.policy.quantity
    };

    let optimal_trace = simulate(
        optimal_q,
        eval.optimal.policy.reorder_point,
        eval.lead_time.daily_mean,
        eval.lead_time.daily_stdev,
        args.lead_time,
        SimulationConfig::new(horizon, variability, args.seed_optimal, args.start_mode),
    );
    let baseline_trace = simulate(
        eval.baseline.policy.quantity,
        eval.baseline.policy.reorder_point,
        eval.lead_time.daily_mean,
        eval.lead_time.daily_stdev,
        args.lead_time,
        SimulationConfig::new(horizon, variability, args.seed_baseline, args.start_mode),
    );

    let kpi_opt = CycleKpis::from_trace(&optimal_trace, eval.optimal.policy.safety_stock);
    let kpi_base = CycleKpis::from_trace(&baseline_trace, eval.baseline.policy.safety_stock);

    println!("\n=== Simulation ({horizon} days) ===");
    print_kpis("Optimal", &kpi_opt);
    print_kpis("Baseline", &kpi_base);

    if let Some(path) = &args.trace_out {
        reporting::write_trace_file(path, &optimal_trace)?;
    }
    Ok(())
}

fn run_batch(args: &BatchArgs, config: &EngineConfig) -> Result<()> {
    let rows = sku_table::read_sku_table(&args.input, config.time_base)?;
    let report = evaluate_batch(&rows, config);
    let period = config.time_base.label();

    println!("=== Savings ranking ({:?}) ===", config.rank_by);
    let needle = args.filter.as_ref().map(|f| f.to_lowercase());
    for (rank, result) in report.results.iter().enumerate() {
        if let Some(needle) = &needle {
            if !result.sku.to_lowercase().contains(needle) {
                continue;
            }
        }
        println!(
            "{:>3}. {:<20} Q* {:>9.0}  r {:>8.0}  Q0 {:>9.0}  saves {:>10.2}/{}  {:>12.2}/year  ({:.2}%)",
            rank + 1,
            result.sku,
            result.q_opt,
            result.r_opt,
            result.q_base,
            result.savings_per_period,
            period,
            result.savings_annual,
            result.savings_pct
        );
    }

    let summary = &report.summary;
    println!("\nTotal savings per {}: {:.2}", period, summary.total_savings_per_period);
    println!("Total savings per year: {:.2}", summary.total_savings_annual);
    println!("Mean savings: {:.2}%", summary.mean_savings_pct);
    if summary.excluded_per_period > 0 {
        println!(
            "WARNING: {} of {} SKUs have undefined savings and were left out of the totals.",
            summary.excluded_per_period, summary.rows
        );
    }

    if let Some(path) = &args.output {
        reporting::write_ranking_file(path, &report.results)?;
    }
    Ok(())
}

fn print_outcome(label: &str, outcome: &PolicyOutcome, period: &str) {
    let p = &outcome.policy;
    println!("\n--- {label} ---");
    println!("  Order quantity Q: {:.0}", p.quantity);
    println!("  Reorder point r:  {:.0}", p.reorder_point);
    println!("  Safety stock SS:  {:.0}", p.safety_stock);
    println!(
        "  Cost per {}: ordering {:.2} + holding {:.2} = {:.2} ({:.2}/year)",
        period, outcome.cost.ordering, outcome.cost.holding, outcome.cost.total, outcome.annual_cost
    );
    println!(
        "  Orders per {}: {:.2}, average stock {:.0}, lot covers {:.1} days",
        period,
        outcome.metrics.orders_per_period,
        outcome.metrics.average_inventory,
        outcome.metrics.coverage_days
    );
}

fn print_savings(eval: &PolicyEvaluation, period: &str) {
    let s = &eval.savings;
    println!();
    if !s.per_period.is_finite() {
        println!("WARNING: savings undefined; check demand, costs and lot sizes.");
    } else if s.per_period > 0.0 {
        println!(
            "Savings per {}: {:.2} ({:.2}%), about {:.0} per year",
            period, s.per_period, s.percent, s.annualized
        );
    } else if s.per_period < 0.0 {
        println!(
            "Extra cost vs baseline per {}: {:.2} ({:.2}%), about {:.0} per year",
            period,
            s.per_period.abs(),
            s.percent.abs(),
            s.annualized.abs()
        );
    } else {
        println!("No cost difference per {period}.");
    }
    if s.ordering.is_finite() && s.holding.is_finite() {
        println!(
            "  of which ordering {:+.2} and holding {:+.2} per {}",
            s.ordering, s.holding, period
        );
    }
}

fn print_kpis(label: &str, kpis: &CycleKpis) {
    println!("--- {label} ---");
    println!("  Orders in horizon: {}", kpis.orders_placed);
    println!("  Mean interval between arrivals: {:.1} days", kpis.mean_interarrival_days);
    println!("  Mean on-hand: {:.0}", kpis.mean_on_hand);
    println!("  Days below SS: {:.1}%", kpis.pct_days_below_safety_stock);
    println!("  Days at stockout: {:.1}%", kpis.pct_days_stockout);
    println!("  On-hand min/max: {:.0} / {:.0}", kpis.min_on_hand, kpis.max_on_hand);
}
