// src/io/sku_table.rs

use crate::batch::evaluator::SkuRow;
use crate::error::{PolicyError, Result};
use crate::model::demand::TimeBase;
use csv::StringRecord;
use std::io::Read;
use std::path::Path;
use tracing::info;

/// Demand column names a table must carry for `time_base`.
fn demand_columns(time_base: TimeBase) -> (&'static str, &'static str) {
    match time_base {
        TimeBase::Weekly => ("mean_per_period_weekly", "stdev_per_period_weekly"),
        TimeBase::Monthly => ("mean_per_period_monthly", "stdev_per_period_monthly"),
    }
}

/// Reads SKU rows from CSV with a header line.
///
/// Expected columns: `sku, mean_per_period_<base>, stdev_per_period_<base>,
/// unit_price, annual_carrying_rate, order_cost, lead_time_days,
/// service_level`, where `<base>` is `weekly` or `monthly` to match
/// `time_base`. Optional columns: `min_order_qty, lot_multiple, q_base,
/// r_base`; empty cells there mean "not supplied". Demand columns of the
/// other time base are ignored.
pub fn read_sku_rows<R: Read>(reader: R, time_base: TimeBase) -> Result<Vec<SkuRow>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let (mean_col, stdev_col) = demand_columns(time_base);
    let headers = rdr.headers()?.clone();
    for column in [mean_col, stdev_col] {
        if !headers.iter().any(|h| h == column) {
            return Err(PolicyError::InvalidConfig {
                field: "time_base",
                reason: format!(
                    "{} table is missing the `{column}` column (found: {})",
                    time_base.label(),
                    headers.iter().collect::<Vec<_>>().join(", ")
                ),
            });
        }
    }

    let renamed: StringRecord = headers
        .iter()
        .map(|h| {
            if h == mean_col {
                "mean_per_period"
            } else if h == stdev_col {
                "stdev_per_period"
            } else {
                h
            }
        })
        .collect();
    rdr.set_headers(renamed);

    let mut rows = Vec::new();
    for record in rdr.deserialize() {
        let row: SkuRow = record?;
        rows.push(row);
    }
    Ok(rows)
}

/// Reads the SKU table at `file_path`.
pub fn read_sku_table<P: AsRef<Path>>(file_path: P, time_base: TimeBase) -> Result<Vec<SkuRow>> {
    let path = file_path.as_ref();
    let file = std::fs::File::open(path)?;
    let rows = read_sku_rows(file, time_base)?;
    info!(rows = rows.len(), path = %path.display(), "loaded SKU table");
    Ok(rows)
}
