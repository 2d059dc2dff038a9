// tests/end_to_end.rs

use reorder_policy::batch::evaluator::{evaluate_batch, SkuRow};
use reorder_policy::batch::ranking::SavingsField;
use reorder_policy::io::{reporting, sku_table};
use reorder_policy::model::constraints::OrderConstraints;
use reorder_policy::model::costs::CostParams;
use reorder_policy::model::demand::{DemandProfile, TimeBase};
use reorder_policy::simulation::config::{SimulationConfig, StartMode};
use reorder_policy::simulation::engine::simulate;
use reorder_policy::simulation::kpi::CycleKpis;
use reorder_policy::strategy::policy::{evaluate_policy, BaselineSource, SkuParams};
use reorder_policy::{EngineConfig, PolicyError};

fn weekly_soap() -> SkuParams {
    SkuParams {
        demand: DemandProfile::new(600.0, 180.0, TimeBase::Weekly),
        lead_time_days: 10.0,
        costs: CostParams {
            unit_price: 5.0,
            annual_carrying_rate: 0.30,
            order_cost: 200.0,
        },
        constraints: OrderConstraints::none(),
        service_level: 95.0,
        baseline_service_level: None,
        baseline_quantity: Some(5000.0),
        baseline_reorder_point: None,
    }
}

fn weekly_config() -> EngineConfig {
    EngineConfig {
        time_base: TimeBase::Weekly,
        ..EngineConfig::default()
    }
}

#[test]
fn weekly_worked_example() {
    let eval = evaluate_policy(&weekly_soap(), &weekly_config());

    assert!((eval.holding_cost_per_period - 0.028846).abs() < 1e-5);
    let expected_q = (2.0 * 200.0 * 600.0 / (5.0 * 0.30 / 52.0_f64)).sqrt();
    assert!((eval.optimal.policy.quantity - expected_q).abs() < 1e-6);
    assert!((eval.optimal.policy.quantity - 2884.0).abs() < 1.0);

    assert!((eval.lead_time.daily_mean - 85.714).abs() < 1e-3);
    assert!((eval.lead_time.mu_l - 857.14).abs() < 1e-2);
    assert!((eval.lead_time.sigma_l - 180.0 * (10.0_f64 / 7.0).sqrt()).abs() < 1e-9);

    let ss = eval.optimal.policy.safety_stock;
    assert!((ss - 1.6449 * eval.lead_time.sigma_l).abs() < 0.05);
    assert!((eval.optimal.policy.reorder_point - (eval.lead_time.mu_l + ss)).abs() < 1e-9);

    // Matched safety stock: only the lot size differs.
    assert_eq!(eval.baseline.policy.quantity, 5000.0);
    assert_eq!(eval.baseline.policy.safety_stock, ss);
    assert_eq!(eval.baseline_quantity_source, BaselineSource::Supplied);
    assert_eq!(eval.baseline_reorder_source, BaselineSource::ServiceLevel);

    assert!(eval.baseline.cost.total > eval.optimal.cost.total);
    assert!(eval.savings.per_period > 0.0);
    assert!((eval.savings.annualized - 52.0 * eval.savings.per_period).abs() < 1e-9);
    assert!(eval.savings.percent > 0.0 && eval.savings.percent < 100.0);
}

#[test]
fn worked_example_replays_without_stockouts_at_mean_demand() {
    let eval = evaluate_policy(&weekly_soap(), &weekly_config());
    let policy = eval.optimal.policy;

    let trace = simulate(
        policy.quantity,
        policy.reorder_point,
        eval.lead_time.daily_mean,
        eval.lead_time.daily_stdev,
        10,
        SimulationConfig::new(180, false, 1, StartMode::Steady),
    );
    let kpis = CycleKpis::from_trace(&trace, policy.safety_stock);

    assert_eq!(trace.points.len(), 181);
    assert_eq!(trace.stockout_days, 0);
    assert_eq!(kpis.pct_days_stockout, 0.0);
    assert!(kpis.orders_placed >= 4);
    // One lot lasts Q / d days at constant demand.
    let cycle = policy.quantity / eval.lead_time.daily_mean;
    assert!((kpis.mean_interarrival_days - cycle).abs() <= 1.0);
}

#[test]
fn seeded_runs_repeat() {
    let eval = evaluate_policy(&weekly_soap(), &weekly_config());
    let run = |seed| {
        simulate(
            eval.optimal.policy.quantity,
            eval.optimal.policy.reorder_point,
            eval.lead_time.daily_mean,
            eval.lead_time.daily_stdev,
            10,
            SimulationConfig::new(120, true, seed, StartMode::Lot),
        )
    };
    assert_eq!(run(7), run(7));
    assert_ne!(run(1).points, run(2).points);
}

fn batch_row(sku: &str, q_base: Option<f64>) -> SkuRow {
    SkuRow {
        sku: sku.to_string(),
        mean_per_period: 1500.0,
        stdev_per_period: 300.0,
        unit_price: 3.5,
        annual_carrying_rate: 0.25,
        order_cost: 80.0,
        lead_time_days: 10.0,
        min_order_qty: None,
        lot_multiple: None,
        service_level: 95.0,
        q_base,
        r_base: None,
    }
}

#[test]
fn batch_ranks_undefined_rows_last() {
    let mut undefined = batch_row("undefined", Some(500.0));
    undefined.unit_price = 0.0;
    let rows = vec![
        undefined,
        batch_row("small-gain", Some(700.0)),
        batch_row("big-gain", Some(9000.0)),
    ];

    let config = EngineConfig {
        rank_by: SavingsField::PerPeriod,
        ..EngineConfig::default()
    };
    let report = evaluate_batch(&rows, &config);
    let order: Vec<&str> = report.results.iter().map(|r| r.sku.as_str()).collect();

    assert_eq!(order, vec!["big-gain", "small-gain", "undefined"]);
    assert!(report.results[2].savings_per_period.is_nan());
    assert_eq!(report.summary.rows, 3);
    assert_eq!(report.summary.excluded_per_period, 1);
    let total: f64 = report.results[..2].iter().map(|r| r.savings_per_period).sum();
    assert!((report.summary.total_savings_per_period - total).abs() < 1e-9);
}

#[test]
fn csv_table_in_ranking_out() {
    let table = "\
sku,mean_per_period_monthly,stdev_per_period_monthly,unit_price,annual_carrying_rate,order_cost,lead_time_days,min_order_qty,lot_multiple,service_level,q_base,r_base
alpha,1500,300,3.5,0.25,80,10,0,0,95,9000,
beta,1500,300,3.5,0.25,80,10,1000,500,95,,
";
    let rows = sku_table::read_sku_rows(table.as_bytes(), TimeBase::Monthly).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].mean_per_period, 1500.0);

    let report = evaluate_batch(&rows, &EngineConfig::default());
    // beta's heuristic baseline (one month of demand) snaps to 1500, a multiple of 500.
    assert_eq!(report.results[1].q_base, 1500.0);

    let mut out = Vec::new();
    reporting::write_ranking(&mut out, &report.results).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    let header = lines.next().unwrap();
    assert!(header.starts_with("sku,input_index,q_opt,r_opt,ss_opt,q_base"));
    assert!(header.ends_with("savings_per_period,savings_annual,savings_pct"));
    assert!(lines.next().unwrap().starts_with("alpha,0,"));
    assert!(lines.next().unwrap().starts_with("beta,1,"));
    assert!(lines.next().is_none());
}

#[test]
fn weekly_table_needs_weekly_config() {
    let table = "\
sku,mean_per_period_weekly,stdev_per_period_weekly,unit_price,annual_carrying_rate,order_cost,lead_time_days,min_order_qty,lot_multiple,service_level,q_base
soap,600,180,5.0,0.30,200,10,,,95,5000
";
    assert!(matches!(
        sku_table::read_sku_rows(table.as_bytes(), TimeBase::Monthly),
        Err(PolicyError::InvalidConfig { .. })
    ));

    let rows = sku_table::read_sku_rows(table.as_bytes(), TimeBase::Weekly).unwrap();
    let report = evaluate_batch(&rows, &weekly_config());
    assert!((report.results[0].q_opt - 2884.0).abs() < 1.0);
    assert!(report.results[0].savings_per_period > 0.0);
}
