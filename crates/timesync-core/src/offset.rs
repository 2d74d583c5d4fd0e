//! Fixed numeric UTC offsets.
//!
//! An offset is a signed whole, half, or quarter hour difference from UTC.
//! Only offsets actually used by real-world zones are accepted: the
//! canonical `±HH:MM` text must appear in [`ALLOWED_OFFSETS`]. There is no
//! Daylight Saving Time handling; an offset never changes.

use std::fmt;
use std::str::FromStr;

use chrono::Duration;
use serde::{Serialize, Serializer};

use crate::error::TimeSyncError;

/// Every offset accepted by [`UtcOffset::parse`], in canonical `±HH:MM` form.
///
/// `-00:00` is listed alongside `+00:00`; both denote UTC itself.
pub const ALLOWED_OFFSETS: [&str; 39] = [
    "-12:00", "-11:00", "-10:00", "-09:30", "-09:00", "-08:00", "-07:00", "-06:00", "-05:00",
    "-04:00", "-03:30", "-03:00", "-02:00", "-01:00", "+00:00", "-00:00", "+01:00", "+02:00",
    "+03:00", "+03:30", "+04:00", "+04:30", "+05:00", "+05:30", "+05:45", "+06:00", "+06:30",
    "+07:00", "+08:00", "+08:45", "+09:00", "+09:30", "+10:00", "+10:30", "+11:00", "+12:00",
    "+12:45", "+13:00", "+14:00",
];

/// A validated UTC offset, stored as signed total minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct UtcOffset {
    minutes: i32,
}

impl UtcOffset {
    /// UTC itself.
    pub const UTC: UtcOffset = UtcOffset { minutes: 0 };

    /// Parse a canonical `±HH:MM` offset.
    ///
    /// The sign is mandatory here; shells that let users omit it must add
    /// the `+` before calling this.
    ///
    /// # Errors
    ///
    /// Returns [`TimeSyncError::InvalidOffset`] if the text is not shaped
    /// like `±HH:MM`, or if it is well formed but not one of
    /// [`ALLOWED_OFFSETS`] (e.g. `+05:15`).
    ///
    /// # Examples
    ///
    /// ```
    /// use timesync_core::UtcOffset;
    ///
    /// assert_eq!(UtcOffset::parse("+05:30").unwrap().to_minutes(), 330);
    /// assert_eq!(UtcOffset::parse("-03:00").unwrap().to_minutes(), -180);
    /// assert!(UtcOffset::parse("+05:15").is_err());
    /// ```
    pub fn parse(text: &str) -> Result<UtcOffset, TimeSyncError> {
        let bytes = text.as_bytes();
        let well_formed = bytes.len() == 6
            && matches!(bytes[0], b'+' | b'-')
            && bytes[1].is_ascii_digit()
            && bytes[2].is_ascii_digit()
            && bytes[3] == b':'
            && bytes[4].is_ascii_digit()
            && bytes[5].is_ascii_digit();
        if !well_formed {
            return Err(TimeSyncError::InvalidOffset(format!(
                "'{text}' is not in the format ±HH:MM"
            )));
        }

        if !ALLOWED_OFFSETS.iter().any(|allowed| *allowed == text) {
            return Err(TimeSyncError::InvalidOffset(format!(
                "'{text}' is not an offset used by any timezone"
            )));
        }

        let sign = if bytes[0] == b'-' { -1 } else { 1 };
        let hours = i32::from(bytes[1] - b'0') * 10 + i32::from(bytes[2] - b'0');
        let minutes = i32::from(bytes[4] - b'0') * 10 + i32::from(bytes[5] - b'0');

        Ok(UtcOffset {
            minutes: sign * (hours * 60 + minutes),
        })
    }

    /// Signed total minutes east of UTC, e.g. `+05:30` is `330`.
    pub fn to_minutes(self) -> i32 {
        self.minutes
    }

    /// The offset as a chrono duration.
    pub fn as_duration(self) -> Duration {
        Duration::minutes(i64::from(self.minutes))
    }

    /// Iterate over every distinct allowed offset, west to east.
    pub fn all() -> impl Iterator<Item = UtcOffset> {
        ALLOWED_OFFSETS
            .iter()
            .filter(|text| **text != "-00:00")
            .filter_map(|text| UtcOffset::parse(text).ok())
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minutes >= 0 { '+' } else { '-' };
        let abs = self.minutes.unsigned_abs();
        write!(f, "{sign}{:02}:{:02}", abs / 60, abs % 60)
    }
}

impl FromStr for UtcOffset {
    type Err = TimeSyncError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UtcOffset::parse(s)
    }
}

impl Serialize for UtcOffset {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_half_hour_offset() {
        let offset = UtcOffset::parse("+05:30").unwrap();
        assert_eq!(offset.to_minutes(), 330);
        assert_eq!(offset.to_string(), "+05:30");
    }

    #[test]
    fn test_parse_negative_offset() {
        let offset = UtcOffset::parse("-03:00").unwrap();
        assert_eq!(offset.to_minutes(), -180);
        assert_eq!(offset.to_string(), "-03:00");
    }

    #[test]
    fn test_parse_negative_half_hour_keeps_sign_on_minutes() {
        assert_eq!(UtcOffset::parse("-09:30").unwrap().to_minutes(), -570);
        assert_eq!(UtcOffset::parse("-03:30").unwrap().to_minutes(), -210);
    }

    #[test]
    fn test_parse_quarter_hour_offsets() {
        assert_eq!(UtcOffset::parse("+05:45").unwrap().to_minutes(), 345);
        assert_eq!(UtcOffset::parse("+08:45").unwrap().to_minutes(), 525);
        assert_eq!(UtcOffset::parse("+12:45").unwrap().to_minutes(), 765);
    }

    #[test]
    fn test_parse_extremes() {
        assert_eq!(UtcOffset::parse("-12:00").unwrap().to_minutes(), -720);
        assert_eq!(UtcOffset::parse("+14:00").unwrap().to_minutes(), 840);
    }

    #[test]
    fn test_negative_zero_is_utc() {
        let offset = UtcOffset::parse("-00:00").unwrap();
        assert_eq!(offset, UtcOffset::UTC);
        assert_eq!(offset.to_string(), "+00:00");
    }

    #[test]
    fn test_parse_unlisted_offset_rejected() {
        let err = UtcOffset::parse("+05:15").unwrap_err();
        assert!(matches!(err, TimeSyncError::InvalidOffset(_)));
        assert!(err.to_string().contains("not an offset used"), "got: {err}");
        assert!(UtcOffset::parse("+15:00").is_err());
        assert!(UtcOffset::parse("-13:00").is_err());
    }

    #[test]
    fn test_parse_malformed_rejected() {
        for text in ["05:30", "+0530", "+5:30", "+05:3", "+05-30", "", "+aa:bb", "+05:30 "] {
            let err = UtcOffset::parse(text).unwrap_err();
            assert!(err.to_string().contains("format"), "{text:?} got: {err}");
        }
    }

    #[test]
    fn test_allow_list_has_38_distinct_values() {
        let all: Vec<UtcOffset> = UtcOffset::all().collect();
        assert_eq!(all.len(), 38);
        assert!(all.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn test_every_listed_offset_parses_and_displays_canonically() {
        for text in ALLOWED_OFFSETS {
            let offset = UtcOffset::parse(text).unwrap();
            if text != "-00:00" {
                assert_eq!(offset.to_string(), text);
            }
        }
    }

    #[test]
    fn test_from_str() {
        let offset: UtcOffset = "+09:00".parse().unwrap();
        assert_eq!(offset.as_duration(), Duration::hours(9));
    }

    #[test]
    fn test_serializes_as_text() {
        let offset = UtcOffset::parse("-04:00").unwrap();
        assert_eq!(serde_json::to_string(&offset).unwrap(), "\"-04:00\"");
    }
}
