// src/io/reporting.rs

use crate::batch::evaluator::BatchResult;
use crate::error::Result;
use crate::model::costs::CostPoint;
use crate::simulation::engine::SimulationTrace;
use serde::Serialize;
use std::io::Write;
use std::path::Path;
use tracing::info;

/// Serializes `records` as CSV rows, header first.
fn write_records<W: Write, T: Serialize>(writer: W, records: &[T]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    // Flush the buffer to ensure all data is written
    wtr.flush()?;
    Ok(())
}

/// Writes the ranked batch table.
pub fn write_ranking<W: Write>(writer: W, results: &[BatchResult]) -> Result<()> {
    write_records(writer, results)
}

/// Writes the ranked batch table to a file.
///
/// # Arguments
/// * `file_path` - The path to save the file (e.g., "results/ranking.csv").
/// * `results` - Ranked output of the batch evaluator.
pub fn write_ranking_file<P: AsRef<Path>>(file_path: P, results: &[BatchResult]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_ranking(file, results)?;
    info!(rows = results.len(), path = %path.display(), "ranking exported");
    Ok(())
}

/// Writes a simulation trace as `day,on_hand,position` rows.
pub fn write_trace<W: Write>(writer: W, trace: &SimulationTrace) -> Result<()> {
    write_records(writer, &trace.points)
}

pub fn write_trace_file<P: AsRef<Path>>(file_path: P, trace: &SimulationTrace) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_trace(file, trace)?;
    info!(days = trace.points.len(), path = %path.display(), "trace exported");
    Ok(())
}

/// Flat CSV line of a cost curve.
#[derive(Serialize)]
struct CurveRow {
    quantity: f64,
    ordering: f64,
    holding: f64,
    total: f64,
}

/// Writes a cost curve as `quantity,ordering,holding,total` rows.
pub fn write_cost_curve<W: Write>(writer: W, curve: &[CostPoint]) -> Result<()> {
    let rows: Vec<CurveRow> = curve
        .iter()
        .map(|p| CurveRow {
            quantity: p.quantity,
            ordering: p.cost.ordering,
            holding: p.cost.holding,
            total: p.cost.total,
        })
        .collect();
    write_records(writer, &rows)
}

pub fn write_cost_curve_file<P: AsRef<Path>>(file_path: P, curve: &[CostPoint]) -> Result<()> {
    let path = file_path.as_ref();
    let file = std::fs::File::create(path)?;
    write_cost_curve(file, curve)?;
    info!(points = curve.len(), path = %path.display(), "cost curve exported");
    Ok(())
}
