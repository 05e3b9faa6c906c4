//! ---
//! so_section: "11-simulation"
//! so_subsection: "01-bootstrap"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Simulation module exports and shared types."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
//! Synthetic sensor data for the Smart Office: a fixed-cadence time index,
//! seeded per-room channel models and CSV/JSON writers.

pub mod calendar;
pub mod error;
pub mod generator;
pub mod pipeline;
pub mod readings;
pub mod time_index;
pub mod writer;

pub use error::SimError;
pub use generator::SensorDataGenerator;
pub use pipeline::{generate_dataset, resolve_start, GenerationSummary};
pub use readings::{SensorChannel, SensorReading, SensorRecord, TIMESTAMP_FORMAT};
pub use time_index::{start_of_week, TimeWindow};
pub use writer::{determine_format, long_records, write_readings, write_to_path, STDOUT_PATH};
