//! ---
//! so_section: "11-simulation"
//! so_subsection: "01-bootstrap"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Command-line entry point for the sensor data generator."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use clap::{ArgAction, Parser, ValueEnum};
use smart_office_common::config::{
    AppConfig, LoadedAppConfig, OutputFormat, OutputLayout, SimulationConfig,
};
use smart_office_common::{init_tracing, VersionInfo};
use smart_office_sim::{generate_dataset, STDOUT_PATH};
use tracing::info;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

const START_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Csv,
    Json,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LayoutArg {
    /// One row per room and timestep with a column per channel
    Wide,
    /// One `timestamp,sensor_id,value` row per channel value
    Long,
}

#[derive(Debug, Parser)]
#[command(
    author,
    disable_version_flag = true,
    about = "Generate synthetic Smart Office sensor readings",
    long_about = None
)]
struct Cli {
    /// TOML configuration file (otherwise smart-office.toml or configs/smart-office.toml when present)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Output file path. Use '-' for stdout.
    #[arg(long)]
    output: Option<PathBuf>,

    /// Explicit output format when the extension is ambiguous
    #[arg(long, value_enum)]
    format: Option<FormatArg>,

    /// Row layout of the output
    #[arg(long, value_enum)]
    layout: Option<LayoutArg>,

    /// First timestamp; defaults to Monday 00:00 of the current week
    #[arg(long, value_parser = parse_start, value_name = "DATETIME")]
    start: Option<NaiveDateTime>,

    /// Number of days to simulate
    #[arg(long)]
    days: Option<u64>,

    /// Window length in minutes (overrides --days)
    #[arg(long)]
    duration_mins: Option<u64>,

    /// Minutes between consecutive readings
    #[arg(long)]
    interval_mins: Option<u64>,

    /// Number of rooms to simulate
    #[arg(long)]
    rooms: Option<u32>,

    /// Random seed for the generator
    #[arg(long)]
    seed: Option<u64>,

    /// Print extended version information and exit
    #[arg(short = 'V', long = "version", action = ArgAction::SetTrue)]
    version: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let version = VersionInfo::for_package(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    if cli.version {
        println!("{}", version.extended(&SimulationConfig::default()));
        return Ok(());
    }

    let LoadedAppConfig { mut config, source } = load_config(&cli)?;
    apply_overrides(&mut config, &cli);
    config.validate()?;

    let _guard = init_tracing(env!("CARGO_PKG_NAME"), &config.logging)?;
    info!(
        version = %version.banner(),
        config = ?source,
        "starting sensor data generation"
    );

    let summary = generate_dataset(&config)?;

    if summary.destination.as_os_str() != STDOUT_PATH {
        eprintln!(
            "generated {} rows ({} rooms x {} steps) -> {}",
            summary.rows,
            summary.rooms,
            summary.steps,
            summary.destination.display()
        );
    }
    Ok(())
}

fn load_config(cli: &Cli) -> Result<LoadedAppConfig> {
    match &cli.config {
        Some(path) => Ok(LoadedAppConfig {
            config: AppConfig::from_path(path)?,
            source: Some(path.clone()),
        }),
        None => AppConfig::load_with_source(&AppConfig::DEFAULT_CANDIDATES),
    }
}

/// Command-line flags take precedence over file values.
fn apply_overrides(config: &mut AppConfig, cli: &Cli) {
    let simulation = &mut config.simulation;
    if let Some(start) = cli.start {
        simulation.start = Some(start);
    }
    if let Some(minutes) = cli.duration_mins {
        simulation.duration = Duration::from_secs(minutes.saturating_mul(60));
    } else if let Some(days) = cli.days {
        simulation.duration = Duration::from_secs(days.saturating_mul(SECONDS_PER_DAY));
    }
    if let Some(minutes) = cli.interval_mins {
        simulation.interval = Duration::from_secs(minutes.saturating_mul(60));
    }
    if let Some(rooms) = cli.rooms {
        simulation.rooms = rooms;
    }
    if let Some(seed) = cli.seed {
        simulation.seed = seed;
    }

    let output = &mut config.output;
    if let Some(path) = &cli.output {
        output.path = path.clone();
    }
    if let Some(format) = cli.format {
        output.format = Some(match format {
            FormatArg::Csv => OutputFormat::Csv,
            FormatArg::Json => OutputFormat::Json,
        });
    }
    if let Some(layout) = cli.layout {
        output.layout = match layout {
            LayoutArg::Wide => OutputLayout::Wide,
            LayoutArg::Long => OutputLayout::Long,
        };
    }
}

fn parse_start(raw: &str) -> Result<NaiveDateTime, String> {
    let raw = raw.trim();
    for format in START_FORMATS {
        if let Ok(ts) = NaiveDateTime::parse_from_str(raw, format) {
            return Ok(ts);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN))
        .map_err(|_| format!("unrecognised start '{raw}'; expected YYYY-MM-DD[THH:MM[:SS]]"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use tempfile::tempdir;

    fn base_cli() -> Cli {
        Cli {
            config: None,
            output: None,
            format: None,
            layout: None,
            start: None,
            days: None,
            duration_mins: None,
            interval_mins: None,
            rooms: None,
            seed: None,
            version: false,
        }
    }

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_flags_from_arguments() {
        let cli = Cli::try_parse_from([
            "smart-office-simgen",
            "--output",
            "-",
            "--layout",
            "long",
            "--start",
            "2025-03-03",
            "--days",
            "1",
            "--seed",
            "9",
        ])
        .unwrap();
        assert_eq!(cli.output, Some(PathBuf::from("-")));
        assert!(matches!(cli.layout, Some(LayoutArg::Long)));
        assert_eq!(cli.start.unwrap().to_string(), "2025-03-03 00:00:00");
        assert_eq!(cli.days, Some(1));
        assert_eq!(cli.seed, Some(9));
    }

    #[test]
    fn rejects_malformed_start() {
        assert!(Cli::try_parse_from(["smart-office-simgen", "--start", "next monday"]).is_err());
    }

    #[test]
    fn parse_start_accepts_common_shapes() {
        assert_eq!(
            parse_start("2025-03-03T08:30").unwrap().to_string(),
            "2025-03-03 08:30:00"
        );
        assert_eq!(
            parse_start("2025-03-03 08:30:15").unwrap().to_string(),
            "2025-03-03 08:30:15"
        );
        assert_eq!(
            parse_start("2025-03-03").unwrap().to_string(),
            "2025-03-03 00:00:00"
        );
    }

    #[test]
    fn overrides_leave_unset_values_alone() {
        let mut config = AppConfig::default();
        apply_overrides(&mut config, &base_cli());
        assert_eq!(config.simulation.duration, Duration::from_secs(7 * SECONDS_PER_DAY));
        assert_eq!(config.simulation.rooms, 1);
        assert_eq!(config.output.path, PathBuf::from("smart_office_data.csv"));
    }

    #[test]
    fn duration_minutes_take_precedence_over_days() {
        let mut config = AppConfig::default();
        let mut cli = base_cli();
        cli.days = Some(2);
        cli.duration_mins = Some(90);
        cli.interval_mins = Some(30);
        apply_overrides(&mut config, &cli);
        assert_eq!(config.simulation.duration, Duration::from_secs(90 * 60));
        assert_eq!(config.simulation.steps(), 3);
    }

    #[test]
    fn output_overrides_map_to_config() {
        let mut config = AppConfig::default();
        let mut cli = base_cli();
        cli.output = Some(PathBuf::from("week.json"));
        cli.format = Some(FormatArg::Csv);
        cli.layout = Some(LayoutArg::Long);
        cli.rooms = Some(3);
        apply_overrides(&mut config, &cli);
        assert_eq!(config.output.format, Some(OutputFormat::Csv));
        assert_eq!(config.output.layout, OutputLayout::Long);
        assert_eq!(config.simulation.rooms, 3);
    }

    #[test]
    fn explicit_config_must_exist() {
        let dir = tempdir().unwrap();
        let mut cli = base_cli();
        cli.config = Some(dir.path().join("absent.toml"));
        assert!(load_config(&cli).is_err());
    }
}
