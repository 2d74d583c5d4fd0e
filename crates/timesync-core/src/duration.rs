//! Human-readable minute counts.

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 24 * MINUTES_PER_HOUR;

/// Format a number of minutes as `"D days H hours M minutes"`.
///
/// Each unit is taken from what remains after the larger units, and is
/// left out entirely when it is zero. The day and hour segments end with a
/// space; the minute segment does not. Zero minutes formats as `""`.
///
/// # Examples
///
/// ```
/// use timesync_core::format_duration;
///
/// assert_eq!(format_duration(90), "1 hour 30 minutes");
/// assert_eq!(format_duration(2880), "2 days ");
/// assert_eq!(format_duration(1), "1 minute");
/// assert_eq!(format_duration(0), "");
/// ```
pub fn format_duration(total_minutes: u64) -> String {
    let mut out = String::new();

    if total_minutes >= MINUTES_PER_DAY {
        let days = total_minutes / MINUTES_PER_DAY;
        let unit = if total_minutes >= 2 * MINUTES_PER_DAY {
            "days"
        } else {
            "day"
        };
        out.push_str(&format!("{days} {unit} "));
    }

    let remainder = total_minutes % MINUTES_PER_DAY;
    if remainder >= MINUTES_PER_HOUR {
        let hours = remainder / MINUTES_PER_HOUR;
        let unit = if remainder >= 2 * MINUTES_PER_HOUR {
            "hours"
        } else {
            "hour"
        };
        out.push_str(&format!("{hours} {unit} "));
    }

    let minutes = remainder % MINUTES_PER_HOUR;
    if minutes >= 1 {
        let unit = if minutes >= 2 { "minutes" } else { "minute" };
        out.push_str(&format!("{minutes} {unit}"));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_is_empty() {
        assert_eq!(format_duration(0), "");
    }

    #[test]
    fn test_minutes_only() {
        assert_eq!(format_duration(1), "1 minute");
        assert_eq!(format_duration(2), "2 minutes");
        assert_eq!(format_duration(59), "59 minutes");
    }

    #[test]
    fn test_hours_and_minutes() {
        assert_eq!(format_duration(60), "1 hour ");
        assert_eq!(format_duration(61), "1 hour 1 minute");
        assert_eq!(format_duration(90), "1 hour 30 minutes");
        assert_eq!(format_duration(120), "2 hours ");
        assert_eq!(format_duration(180), "3 hours ");
    }

    #[test]
    fn test_hour_pluralization_uses_remainder() {
        // 1 day + 119 minutes: the hour segment is judged on the remainder.
        assert_eq!(format_duration(1440 + 119), "1 day 1 hour 59 minutes");
        assert_eq!(format_duration(1440 + 120), "1 day 2 hours ");
    }

    #[test]
    fn test_days() {
        assert_eq!(format_duration(1440), "1 day ");
        assert_eq!(format_duration(2880), "2 days ");
        assert_eq!(format_duration(2879), "1 day 23 hours 59 minutes");
        assert_eq!(format_duration(3 * 1440 + 1), "3 days 1 minute");
    }
}
