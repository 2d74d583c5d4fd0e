//! Local time intervals anchored to a fixed UTC offset.

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::TimeSyncError;
use crate::offset::UtcOffset;

/// Display format for wall-clock datetimes (`DD-MM-YY HH:MM`).
pub const DATETIME_FORMAT: &str = "%d-%m-%y %H:%M";

/// A local interval plus its UTC-normalized equivalent.
///
/// Normalized times live in one shared UTC coordinate system, so frames in
/// different offsets compare with plain datetime comparison. A `TimeFrame`
/// is immutable; changing one means building a new frame and replacing the
/// old one in the [`Registry`](crate::Registry).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimeFrame {
    offset: UtcOffset,
    local_start: NaiveDateTime,
    local_end: NaiveDateTime,
    normalized_start: NaiveDateTime,
    normalized_end: NaiveDateTime,
}

impl TimeFrame {
    /// Build a frame from local wall-clock times in `offset`.
    ///
    /// `local_end == local_start` is allowed (an empty frame).
    ///
    /// # Errors
    ///
    /// Returns [`TimeSyncError::InvalidInterval`] if `local_end` is earlier
    /// than `local_start`, or [`TimeSyncError::DatetimeOutOfRange`] if
    /// normalizing either end leaves chrono's representable range.
    pub fn new(
        offset: UtcOffset,
        local_start: NaiveDateTime,
        local_end: NaiveDateTime,
    ) -> Result<TimeFrame, TimeSyncError> {
        if local_end < local_start {
            return Err(TimeSyncError::InvalidInterval {
                start: local_start.format(DATETIME_FORMAT).to_string(),
                end: local_end.format(DATETIME_FORMAT).to_string(),
            });
        }

        Ok(TimeFrame {
            offset,
            local_start,
            local_end,
            normalized_start: normalize(local_start, offset)?,
            normalized_end: normalize(local_end, offset)?,
        })
    }

    pub fn offset(&self) -> UtcOffset {
        self.offset
    }

    pub fn local_start(&self) -> NaiveDateTime {
        self.local_start
    }

    pub fn local_end(&self) -> NaiveDateTime {
        self.local_end
    }

    /// Start of the frame in UTC.
    pub fn normalized_start(&self) -> NaiveDateTime {
        self.normalized_start
    }

    /// End of the frame in UTC.
    pub fn normalized_end(&self) -> NaiveDateTime {
        self.normalized_end
    }

    /// Express a UTC instant in this frame's local time.
    pub fn to_local(&self, utc: NaiveDateTime) -> Result<NaiveDateTime, TimeSyncError> {
        to_local(utc, self.offset)
    }
}

/// Map a local instant in `offset` to UTC (`local - offset`).
pub fn normalize(local: NaiveDateTime, offset: UtcOffset) -> Result<NaiveDateTime, TimeSyncError> {
    local
        .checked_sub_signed(offset.as_duration())
        .ok_or_else(|| {
            TimeSyncError::DatetimeOutOfRange(format!(
                "{} at UTC{offset} cannot be expressed in UTC",
                local.format(DATETIME_FORMAT)
            ))
        })
}

/// Map a UTC instant to local time in `offset` (`utc + offset`).
pub fn to_local(utc: NaiveDateTime, offset: UtcOffset) -> Result<NaiveDateTime, TimeSyncError> {
    utc.checked_add_signed(offset.as_duration()).ok_or_else(|| {
        TimeSyncError::DatetimeOutOfRange(format!(
            "{} UTC cannot be expressed at UTC{offset}",
            utc.format(DATETIME_FORMAT)
        ))
    })
}
