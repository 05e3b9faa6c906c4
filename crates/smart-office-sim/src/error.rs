//! ---
//! so_section: "11-simulation"
//! so_subsection: "module"
//! so_type: "source"
//! so_scope: "code"
//! so_description: "Error type for window and generator construction."
//! so_version: "v0.1.0"
//! so_owner: "tbd"
//! ---
use std::time::Duration;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SimError {
    #[error("sampling interval must be greater than zero")]
    ZeroInterval,

    #[error("window duration must be greater than zero")]
    ZeroDuration,

    #[error("window duration {duration:?} is not a whole multiple of the interval {interval:?}")]
    UnevenWindow { duration: Duration, interval: Duration },

    #[error("window starting at {0} does not fit in the calendar range")]
    OutOfRange(String),

    #[error("at least one room must be simulated")]
    NoRooms,
}
