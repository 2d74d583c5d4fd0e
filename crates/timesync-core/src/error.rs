//! Error types for timesync-core operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TimeSyncError {
    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    #[error("Invalid interval: end time {end} is earlier than start time {start}")]
    InvalidInterval { start: String, end: String },

    #[error("Duplicate timeframe: a timeframe with ID \"{0}\" already exists")]
    DuplicateId(String),

    #[error("Unknown timeframe: a timeframe with ID \"{0}\" does not exist")]
    UnknownId(String),

    #[error("Insufficient timeframes: {found} timeframe(s) provided, at least {required} required")]
    InsufficientFrames { found: usize, required: usize },

    #[error(
        "Visualization too large: a span of {span_minutes} minutes cannot be drawn in {max_columns} columns"
    )]
    VisualizationTooLarge { span_minutes: i64, max_columns: usize },

    #[error("Datetime out of range: {0}")]
    DatetimeOutOfRange(String),
}

pub type Result<T> = std::result::Result<T, TimeSyncError>;
