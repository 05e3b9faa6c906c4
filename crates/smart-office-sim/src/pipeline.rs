//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Single generate-and-write pass driven by an application config."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDateTime};
use smart_office_common::config::{AppConfig, OutputFormat, OutputLayout};
use tracing::info;

use crate::generator::SensorDataGenerator;
use crate::time_index::start_of_week;
use crate::writer::{determine_format, write_to_path};

/// Outcome of a generation run.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationSummary {
    pub destination: PathBuf,
    pub format: OutputFormat,
    pub layout: OutputLayout,
    pub first_timestamp: NaiveDateTime,
    pub last_timestamp: NaiveDateTime,
    pub steps: usize,
    pub rooms: u32,
    pub readings: usize,
    /// Data rows in the output, excluding the header.
    pub rows: usize,
}

/// Configured start, or Monday 00:00 of the current local week.
pub fn resolve_start(config: &AppConfig) -> NaiveDateTime {
    config
        .simulation
        .start
        .unwrap_or_else(|| start_of_week(Local::now().naive_local()))
}

/// Generate every reading for the configured window and write them out.
pub fn generate_dataset(config: &AppConfig) -> Result<GenerationSummary> {
    config.validate()?;
    let start = resolve_start(config);
    let generator = SensorDataGenerator::from_config(&config.simulation, start)
        .context("invalid simulation window")?;
    let readings = generator.generate();

    let output = &config.output;
    let format = determine_format(&output.path, output.format);
    let rows = write_to_path(&output.path, &readings, output.layout, format)?;

    let summary = GenerationSummary {
        destination: output.path.clone(),
        format,
        layout: output.layout,
        first_timestamp: generator.window().start(),
        last_timestamp: generator.window().last(),
        steps: generator.window().len(),
        rooms: generator.rooms(),
        readings: readings.len(),
        rows,
    };
    info!(
        destination = %summary.destination.display(),
        format = ?summary.format,
        layout = ?summary.layout,
        rows = summary.rows,
        "sensor dataset written"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, NaiveDate, Timelike, Weekday};
    use std::time::Duration;
    use tempfile::tempdir;

    #[test]
    fn default_start_is_a_monday_midnight() {
        let start = resolve_start(&AppConfig::default());
        assert_eq!(start.weekday(), Weekday::Mon);
        assert_eq!(start.hour(), 0);
        assert_eq!(start.minute(), 0);
    }

    #[test]
    fn generate_dataset_summarises_the_run() -> Result<()> {
        let dir = tempdir()?;
        let mut config = AppConfig::default();
        config.simulation.start = NaiveDate::from_ymd_opt(2025, 3, 3)
            .and_then(|d| d.and_hms_opt(0, 0, 0));
        config.simulation.duration = Duration::from_secs(86_400);
        config.simulation.rooms = 2;
        config.output.path = dir.path().join("office.json");
        config.output.layout = OutputLayout::Long;

        let summary = generate_dataset(&config)?;
        assert_eq!(summary.format, OutputFormat::Json);
        assert_eq!(summary.steps, 96);
        assert_eq!(summary.readings, 192);
        assert_eq!(summary.rows, 192 * 4);
        assert_eq!(summary.last_timestamp.to_string(), "2025-03-03 23:45:00");
        assert!(summary.destination.exists());
        Ok(())
    }

    #[test]
    fn default_config_writes_one_row_per_interval() -> Result<()> {
        let dir = tempdir()?;
        let mut config = AppConfig::default();
        config.simulation.duration = Duration::from_secs(86_400);
        config.output.path = dir.path().join("default.csv");

        let summary = generate_dataset(&config)?;
        assert_eq!(summary.rooms, 1);
        assert_eq!(summary.rows, 96);

        let text = std::fs::read_to_string(&config.output.path)?;
        let data_lines = text.lines().skip(1).count();
        assert_eq!(data_lines, 96);
        Ok(())
    }

    #[test]
    fn generate_dataset_rejects_invalid_config() {
        let mut config = AppConfig::default();
        config.simulation.interval = Duration::from_secs(11 * 60);
        assert!(generate_dataset(&config).is_err());
    }
}
