//! ---
//! so_section: "01-core-functionality"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Shared primitives for the Smart Office simulator workspace."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
//! Shared primitives for the Smart Office simulator workspace.
//! This crate exposes configuration loading, tracing initialisation and
//! version metadata consumed by the generator library and its CLI.

pub mod config;
pub mod logging;
pub mod version;

pub use config::{
    AppConfig, ChannelBounds, LoadedAppConfig, LoggingConfig, OutputConfig, OutputFormat,
    OutputLayout, SensorBounds, SimulationConfig,
};
pub use logging::{init_tracing, LogFormat, TracingGuard};
pub use version::VersionInfo;
