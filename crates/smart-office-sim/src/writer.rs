//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "CSV and JSON serialisation of generated readings."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use serde::Serialize;
use smart_office_common::config::{OutputFormat, OutputLayout};
use tracing::debug;

use crate::readings::{SensorReading, SensorRecord};

/// Output path that selects stdout instead of a file.
pub const STDOUT_PATH: &str = "-";

/// Pick the output format from an explicit override or the path extension.
pub fn determine_format(path: &Path, override_format: Option<OutputFormat>) -> OutputFormat {
    if let Some(format) = override_format {
        return format;
    }
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => OutputFormat::Json,
        _ => OutputFormat::Csv,
    }
}

/// Explode readings into per-channel records ordered by timestamp, then sensor id.
pub fn long_records(readings: &[SensorReading]) -> Vec<SensorRecord> {
    let mut records: Vec<SensorRecord> = readings.iter().flat_map(|r| r.records()).collect();
    records.sort_by(|a, b| {
        a.timestamp
            .cmp(&b.timestamp)
            .then_with(|| a.sensor_id.cmp(&b.sensor_id))
    });
    records
}

/// Serialise readings in the requested layout. Returns the number of data rows written.
pub fn write_readings<W: Write>(
    writer: W,
    readings: &[SensorReading],
    layout: OutputLayout,
    format: OutputFormat,
) -> Result<usize> {
    match (format, layout) {
        (OutputFormat::Csv, OutputLayout::Wide) => write_csv(writer, readings),
        (OutputFormat::Csv, OutputLayout::Long) => write_csv(writer, &long_records(readings)),
        (OutputFormat::Json, OutputLayout::Wide) => write_json(writer, readings),
        (OutputFormat::Json, OutputLayout::Long) => write_json(writer, &long_records(readings)),
    }
}

/// Create or truncate `path` (or use stdout for `-`) and write the readings to it.
pub fn write_to_path(
    path: &Path,
    readings: &[SensorReading],
    layout: OutputLayout,
    format: OutputFormat,
) -> Result<usize> {
    if path.as_os_str() == STDOUT_PATH {
        let stdout = io::stdout();
        return write_readings(stdout.lock(), readings, layout, format)
            .context("failed to write readings to stdout");
    }
    let file = File::create(path)
        .with_context(|| format!("failed to create output file {}", path.display()))?;
    let rows = write_readings(BufWriter::new(file), readings, layout, format)
        .with_context(|| format!("failed to write output file {}", path.display()))?;
    debug!(path = %path.display(), rows, "output file written");
    Ok(rows)
}

fn write_csv<W: Write, T: Serialize>(writer: W, rows: &[T]) -> Result<usize> {
    let mut writer = csv::Writer::from_writer(writer);
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(rows.len())
}

fn write_json<W: Write, T: Serialize>(mut writer: W, rows: &[T]) -> Result<usize> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writer.write_all(b"\n")?;
    writer.flush()?;
    Ok(rows.len())
}
