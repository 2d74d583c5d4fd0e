//! Longest common window across timeframes.
//!
//! Every frame is reduced to its UTC-normalized `(start, end)` pair; the
//! common window runs from the latest start to the earliest end. The
//! reduction is a plain max/min fold, so input order never matters.
//!
//! A window must have positive length: frames that merely touch (one ends
//! exactly where the other begins) share no usable time and yield `None`.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::duration::format_duration;
use crate::error::TimeSyncError;
use crate::offset::UtcOffset;
use crate::timeframe::TimeFrame;

/// A shared window in UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommonWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    /// `end - start`, truncated to whole minutes.
    pub duration_minutes: u64,
}

impl CommonWindow {
    fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        let duration_minutes = u64::try_from((end - start).num_minutes()).unwrap_or(0);
        CommonWindow {
            start,
            end,
            duration_minutes,
        }
    }

    /// The duration as text, e.g. `"3 hours"`.
    pub fn human_duration(&self) -> String {
        format_duration(self.duration_minutes).trim_end().to_string()
    }
}

/// A common window expressed in one frame's local time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocalizedWindow {
    pub id: String,
    pub offset: UtcOffset,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

// ── find_common_window ───────────────────────────────────────────────────────

/// Find the window shared by every frame.
///
/// Returns `None` when `frames` is empty or when the latest start is not
/// strictly before the earliest end. With a single frame the window is
/// that frame (if it has positive length).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use timesync_core::{find_common_window, TimeFrame, UtcOffset};
///
/// let day = NaiveDate::from_ymd_opt(2026, 3, 16).unwrap();
/// let nine = day.and_hms_opt(9, 0, 0).unwrap();
/// let five = day.and_hms_opt(17, 0, 0).unwrap();
///
/// let london = TimeFrame::new(UtcOffset::parse("+00:00").unwrap(), nine, five).unwrap();
/// let karachi = TimeFrame::new(UtcOffset::parse("+05:00").unwrap(), nine, five).unwrap();
///
/// let window = find_common_window([&london, &karachi]).unwrap();
/// assert_eq!(window.start, nine);
/// assert_eq!(window.end, day.and_hms_opt(12, 0, 0).unwrap());
/// assert_eq!(window.human_duration(), "3 hours");
/// ```
pub fn find_common_window<'a, I>(frames: I) -> Option<CommonWindow>
where
    I: IntoIterator<Item = &'a TimeFrame>,
{
    let (latest_start, earliest_end) = frames
        .into_iter()
        .map(|frame| (frame.normalized_start(), frame.normalized_end()))
        .reduce(|(start_a, end_a), (start_b, end_b)| (start_a.max(start_b), end_a.min(end_b)))?;

    if latest_start >= earliest_end {
        debug!(%latest_start, %earliest_end, "no common window");
        return None;
    }

    let window = CommonWindow::new(latest_start, earliest_end);
    debug!(
        start = %window.start,
        end = %window.end,
        minutes = window.duration_minutes,
        "common window found"
    );
    Some(window)
}

// ── localize ─────────────────────────────────────────────────────────────────

/// Express `window` in the local time of each `(id, frame)` pair.
pub fn localize<'a, I>(window: &CommonWindow, frames: I) -> Result<Vec<LocalizedWindow>, TimeSyncError>
where
    I: IntoIterator<Item = (&'a str, &'a TimeFrame)>,
{
    frames
        .into_iter()
        .map(|(id, frame)| {
            Ok(LocalizedWindow {
                id: id.to_string(),
                offset: frame.offset(),
                start: frame.to_local(window.start)?,
                end: frame.to_local(window.end)?,
            })
        })
        .collect()
}
