//! ---
//! so_section: "01-core-functionality"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Configuration model and TOML loading for the simulator."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DurationSeconds};
use tracing::debug;

use crate::logging::LogFormat;

const SECONDS_PER_DAY: u64 = 24 * 60 * 60;

fn default_duration() -> Duration {
    Duration::from_secs(7 * SECONDS_PER_DAY)
}

fn default_interval() -> Duration {
    Duration::from_secs(15 * 60)
}

fn default_rooms() -> u32 {
    1
}

fn default_seed() -> u64 {
    2025
}

fn default_output_path() -> PathBuf {
    PathBuf::from("smart_office_data.csv")
}

fn default_log_level() -> String {
    "info".to_owned()
}

fn default_log_format() -> LogFormat {
    LogFormat::Pretty
}

fn default_temperature_bounds() -> ChannelBounds {
    ChannelBounds::new(17.0, 28.0)
}

fn default_luminosity_bounds() -> ChannelBounds {
    ChannelBounds::new(0.0, 2000.0)
}

fn default_humidity_bounds() -> ChannelBounds {
    ChannelBounds::new(20.0, 80.0)
}

/// Primary configuration object for the simulator.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Metadata describing where an [`AppConfig`] was loaded from.
#[derive(Debug, Clone)]
pub struct LoadedAppConfig {
    pub config: AppConfig,
    /// `None` when no candidate existed and built-in defaults were used.
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Files inspected, in order, when no explicit configuration is given.
    pub const DEFAULT_CANDIDATES: [&'static str; 2] =
        ["smart-office.toml", "configs/smart-office.toml"];

    /// Load the first existing candidate, falling back to built-in defaults.
    pub fn load_with_source<P: AsRef<Path>>(candidates: &[P]) -> Result<LoadedAppConfig> {
        for candidate in candidates {
            if candidate.as_ref().exists() {
                let path = candidate.as_ref().to_path_buf();
                let config = Self::from_path(&path)?;
                return Ok(LoadedAppConfig {
                    config,
                    source: Some(path),
                });
            }
        }
        debug!("no configuration file found; using built-in defaults");
        Ok(LoadedAppConfig {
            config: Self::default(),
            source: None,
        })
    }

    /// Load and validate a configuration file that must exist.
    pub fn from_path(path: &Path) -> Result<Self> {
        debug!(config_path = %path.display(), "loading configuration");
        let contents = fs::read_to_string(path)
            .with_context(|| format!("unable to read config file {}", path.display()))?;
        let config = toml::from_str::<AppConfig>(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate structural invariants.
    pub fn validate(&self) -> Result<()> {
        self.simulation.validate()?;
        if self.output.path.as_os_str().is_empty() {
            return Err(anyhow!("output path cannot be empty"));
        }
        Ok(())
    }
}

impl std::str::FromStr for AppConfig {
    type Err = anyhow::Error;

    fn from_str(content: &str) -> std::result::Result<Self, Self::Err> {
        let config: AppConfig =
            toml::from_str(content).with_context(|| "failed to parse configuration")?;
        config.validate()?;
        Ok(config)
    }
}

/// Parameters of the generated time series.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// First timestamp. Defaults to Monday 00:00 of the current week when unset.
    #[serde(default)]
    pub start: Option<NaiveDateTime>,
    #[serde(default = "default_duration")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub duration: Duration,
    #[serde(default = "default_interval")]
    #[serde_as(as = "DurationSeconds<u64>")]
    pub interval: Duration,
    #[serde(default = "default_rooms")]
    pub rooms: u32,
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub bounds: SensorBounds,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            start: None,
            duration: default_duration(),
            interval: default_interval(),
            rooms: default_rooms(),
            seed: default_seed(),
            bounds: SensorBounds::default(),
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<()> {
        if self.interval.is_zero() {
            return Err(anyhow!("sampling interval must be greater than zero"));
        }
        if self.duration.is_zero() {
            return Err(anyhow!("simulation duration must be greater than zero"));
        }
        if self.duration.as_nanos() % self.interval.as_nanos() != 0 {
            return Err(anyhow!(
                "duration of {}s is not a whole multiple of the {}s interval",
                self.duration.as_secs(),
                self.interval.as_secs()
            ));
        }
        if self.rooms == 0 {
            return Err(anyhow!("at least one room must be simulated"));
        }
        self.bounds.validate()
    }

    /// Number of timesteps covered by the window.
    pub fn steps(&self) -> u64 {
        if self.interval.is_zero() {
            return 0;
        }
        (self.duration.as_nanos() / self.interval.as_nanos()) as u64
    }
}

/// Inclusive plausible range for a numeric sensor channel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ChannelBounds {
    pub min: f64,
    pub max: f64,
}

impl ChannelBounds {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    fn validate(&self, channel: &str) -> Result<()> {
        if !self.min.is_finite() || !self.max.is_finite() {
            return Err(anyhow!("{} bounds must be finite", channel));
        }
        if self.min > self.max {
            return Err(anyhow!(
                "{} bounds are inverted: min {} > max {}",
                channel,
                self.min,
                self.max
            ));
        }
        Ok(())
    }
}

/// Bounds for every numeric channel.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SensorBounds {
    #[serde(default = "default_temperature_bounds")]
    pub temperature: ChannelBounds,
    #[serde(default = "default_luminosity_bounds")]
    pub luminosity: ChannelBounds,
    #[serde(default = "default_humidity_bounds")]
    pub humidity: ChannelBounds,
}

impl Default for SensorBounds {
    fn default() -> Self {
        Self {
            temperature: default_temperature_bounds(),
            luminosity: default_luminosity_bounds(),
            humidity: default_humidity_bounds(),
        }
    }
}

impl SensorBounds {
    pub fn validate(&self) -> Result<()> {
        self.temperature.validate("temperature")?;
        self.luminosity.validate("luminosity")?;
        self.humidity.validate("humidity")?;
        if self.luminosity.min < 0.0 {
            return Err(anyhow!("luminosity cannot be negative"));
        }
        if self.humidity.min < 0.0 || self.humidity.max > 100.0 {
            return Err(anyhow!("humidity bounds must lie within [0, 100]"));
        }
        Ok(())
    }
}

/// Serialisation format of the output file.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Csv,
    Json,
}

/// Row shape of the output file.
#[derive(Debug, Copy, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OutputLayout {
    /// One row per reading with a column per channel.
    #[default]
    Wide,
    /// One `timestamp,sensor_id,value` row per channel value.
    Long,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Destination file; `-` writes to stdout.
    #[serde(default = "default_output_path")]
    pub path: PathBuf,
    /// Explicit format, otherwise inferred from the path extension.
    #[serde(default)]
    pub format: Option<OutputFormat>,
    #[serde(default)]
    pub layout: OutputLayout,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            path: default_output_path(),
            format: None,
            layout: OutputLayout::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive when no environment override is present.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: LogFormat,
    /// Enables a daily rolling JSON log file in this directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    #[serde(default)]
    pub file_prefix: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
            directory: None,
            file_prefix: None,
        }
    }
}
