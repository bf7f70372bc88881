//! Error types for slot-engine operations.
//!
//! These cover malformed input only. A schedule that is well-formed but not
//! ready for submission is reported as a [`crate::validator::ValidationFailure`].

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlotError {
    #[error("Invalid time of day: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday index: {0} (expected 0-6, 0 = Sunday)")]
    InvalidWeekday(u8),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read configuration file {path}: {source}")]
    ConfigRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Date range is incomplete: both a start date and an end date are required")]
    IncompleteRange,
}

pub type Result<T> = std::result::Result<T, SlotError>;
