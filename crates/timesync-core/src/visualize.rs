//! Side-by-side timeline rendering.
//!
//! All frames share one horizontal axis starting at the earliest normalized
//! start. Each column stands for `weight` minutes; the weight is the finest
//! "round" value that keeps the whole span inside the column budget.

use chrono::{Duration, NaiveDateTime};
use serde::Serialize;
use tracing::debug;

use crate::error::TimeSyncError;
use crate::timeframe::TimeFrame;

/// Marker for a column the frame occupies.
pub const FILLED: char = '#';
/// Marker for a column before the frame starts.
pub const EMPTY: char = ' ';

/// Default column budget for one timeline row.
pub const DEFAULT_MAX_COLUMNS: usize = 100;

/// Weights tried first, finest to coarsest, in minutes.
const PREFERRED_WEIGHTS: [i64; 8] = [1, 5, 10, 15, 20, 25, 30, 45];
/// Coarser weights step by this many minutes (1h, 1h30, 2h, ...).
const ESCALATION_STEP: i64 = 30;
const MAX_ESCALATIONS: i64 = 48;

/// One rendered row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VisualizationRow {
    pub id: String,
    pub markers: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Visualization {
    /// Minutes represented by one column.
    pub weight: i64,
    /// Earliest normalized start; column 0 begins here.
    pub origin: NaiveDateTime,
    /// Minutes between the earliest start and the latest end.
    pub span_minutes: i64,
    pub rows: Vec<VisualizationRow>,
}

// ── select_weight ────────────────────────────────────────────────────────────

/// Pick minutes-per-column for a span.
///
/// Returns the first preferred weight `w` with `span / w < max_columns`,
/// then tries multiples of 30 minutes from 60 upwards for a bounded number
/// of steps.
///
/// # Errors
///
/// Returns [`TimeSyncError::VisualizationTooLarge`] if no candidate fits.
pub fn select_weight(span_minutes: i64, max_columns: usize) -> Result<i64, TimeSyncError> {
    let budget = i64::try_from(max_columns).unwrap_or(i64::MAX);
    let fits = |weight: i64| span_minutes < budget.saturating_mul(weight);

    PREFERRED_WEIGHTS
        .into_iter()
        .chain((2..2 + MAX_ESCALATIONS).map(|multiplier| ESCALATION_STEP * multiplier))
        .find(|weight| fits(*weight))
        .ok_or(TimeSyncError::VisualizationTooLarge {
            span_minutes,
            max_columns,
        })
}

// ── render ───────────────────────────────────────────────────────────────────

/// Render one marker row per frame, in the given order.
///
/// Each row walks from the shared origin in `weight` steps and stops at its
/// own frame's end, so rows have independent lengths. A column is filled
/// when its instant lies in `[start, end)` of the frame.
///
/// # Errors
///
/// Returns [`TimeSyncError::InsufficientFrames`] for an empty input and
/// [`TimeSyncError::VisualizationTooLarge`] when the span exceeds
/// `max_columns` days or no weight fits.
pub fn render<'a, I>(frames: I, max_columns: usize) -> Result<Visualization, TimeSyncError>
where
    I: IntoIterator<Item = (&'a str, &'a TimeFrame)>,
{
    let frames: Vec<(&str, &TimeFrame)> = frames.into_iter().collect();

    let (origin, global_end) = frames
        .iter()
        .map(|(_, frame)| (frame.normalized_start(), frame.normalized_end()))
        .reduce(|(start_a, end_a), (start_b, end_b)| (start_a.min(start_b), end_a.max(end_b)))
        .ok_or(TimeSyncError::InsufficientFrames {
            found: 0,
            required: 1,
        })?;

    let span_minutes = (global_end - origin).num_minutes();
    let too_large = TimeSyncError::VisualizationTooLarge {
        span_minutes,
        max_columns,
    };
    let max_span = i64::try_from(max_columns)
        .ok()
        .and_then(|columns| columns.checked_mul(24 * 60))
        .unwrap_or(i64::MAX);
    if span_minutes > max_span {
        return Err(too_large);
    }

    let weight = select_weight(span_minutes, max_columns)?;
    debug!(span_minutes, weight, max_columns, "visualization weight selected");

    let rows = frames
        .into_iter()
        .map(|(id, frame)| VisualizationRow {
            id: id.to_string(),
            markers: render_row(frame, origin, weight),
        })
        .collect();

    Ok(Visualization {
        weight,
        origin,
        span_minutes,
        rows,
    })
}

// ── Internal helpers ─────────────────────────────────────────────────────────

fn render_row(frame: &TimeFrame, origin: NaiveDateTime, weight: i64) -> String {
    let start = frame.normalized_start();
    let end = frame.normalized_end();
    let step = Duration::minutes(weight);

    let mut markers = String::new();
    let mut cursor = origin;
    while cursor < end {
        markers.push(if cursor >= start { FILLED } else { EMPTY });
        match cursor.checked_add_signed(step) {
            Some(next) => cursor = next,
            None => break,
        }
    }
    markers
}
