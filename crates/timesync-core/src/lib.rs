//! # timesync-core
//!
//! Deterministic common-window computation across fixed UTC offsets.
//!
//! Each timeframe is a local wall-clock interval in a fixed numeric offset
//! (no IANA database, no DST). Frames are normalized to UTC so that the
//! longest window shared by all of them is a simple max-of-starts /
//! min-of-ends reduction, and so they can be drawn on one shared timeline.
//!
//! ## Modules
//!
//! - [`offset`]: `±HH:MM` offsets validated against the real-world allow-list
//! - [`timeframe`]: local intervals and their UTC-normalized form
//! - [`registry`]: insertion-ordered id → timeframe store
//! - [`intersection`]: common window search and localization
//! - [`duration`]: `"D days H hours M minutes"` formatting
//! - [`visualize`]: adaptive-scale timeline rendering
//! - [`table`] / [`report`]: fixed-width text tables and the reports built on them
//! - [`session`]: the command surface driven by a shell
//! - [`error`]: Error types

pub mod duration;
pub mod error;
pub mod intersection;
pub mod offset;
pub mod registry;
pub mod report;
pub mod session;
pub mod table;
pub mod timeframe;
pub mod visualize;

pub use duration::format_duration;
pub use error::TimeSyncError;
pub use intersection::{find_common_window, localize, CommonWindow, LocalizedWindow};
pub use offset::{UtcOffset, ALLOWED_OFFSETS};
pub use registry::{AddOutcome, Registry};
pub use session::{Session, MIN_FRAMES};
pub use table::Table;
pub use timeframe::{TimeFrame, DATETIME_FORMAT};
pub use visualize::{
    render, select_weight, Visualization, VisualizationRow, DEFAULT_MAX_COLUMNS,
};
