//! CSV output
//!
//! Serializes the three tables next to the input file, deriving each output
//! name from the dataset's file stem.

use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::error::TabulateError;
use crate::tables::{EffortDialRow, EffortSliderRow, PerformanceRow, TrialTables};

/// Destination paths for the three tables
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub performance: PathBuf,
    pub effort_slider: PathBuf,
    pub effort_dial: PathBuf,
}

/// Derive output paths from the dataset path: the extension is replaced by
/// `_performance.csv`, `_effort_slider.csv`, `_effort_dial.csv`, alongside
/// the input.
pub fn output_paths(dataset: &Path) -> OutputPaths {
    let stem = dataset
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let named = |suffix: &str| dataset.with_file_name(format!("{stem}_{suffix}.csv"));
    OutputPaths {
        performance: named("performance"),
        effort_slider: named("effort_slider"),
        effort_dial: named("effort_dial"),
    }
}

/// Write all three tables to disk
pub fn write_tables(tables: &TrialTables, paths: &OutputPaths) -> Result<(), TabulateError> {
    write_rows(
        File::create(&paths.performance)?,
        &tables.performance,
        &PerformanceRow::HEADERS,
    )?;
    write_rows(
        File::create(&paths.effort_slider)?,
        &tables.effort_slider,
        &EffortSliderRow::HEADERS,
    )?;
    write_rows(
        File::create(&paths.effort_dial)?,
        &tables.effort_dial,
        &EffortDialRow::HEADERS,
    )?;
    Ok(())
}

/// Serialize rows as CSV with a header line. The header is written even for
/// an empty table, which serde-based serialization alone would skip.
fn write_rows<W: Write, T: Serialize>(
    out: W,
    rows: &[T],
    headers: &[&str],
) -> Result<(), TabulateError> {
    let mut writer = csv::Writer::from_writer(out);
    if rows.is_empty() {
        writer.write_record(headers)?;
    }
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}
