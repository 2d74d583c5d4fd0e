//! Raw argument normalization for the shell.
//!
//! Users may type offsets as `+0530`, `+05:30`, `0530` or `5:30` and times
//! as `0930` or `09:30`. Everything is normalized to the canonical forms
//! the core accepts before any core call is made.

use anyhow::{anyhow, bail, Result};
use chrono::NaiveDateTime;
use timesync_core::UtcOffset;

const INPUT_DATETIME_FORMAT: &str = "%d-%m-%y %H:%M";

/// Normalize a user-typed offset to `±HH:MM` and validate it.
pub fn parse_offset(raw: &str) -> Result<UtcOffset> {
    let (sign, rest) = match raw.chars().next() {
        Some(sign @ ('+' | '-')) => (sign, &raw[1..]),
        _ => ('+', raw),
    };
    let (hours, minutes) = split_clock(rest)
        .ok_or_else(|| anyhow!("Incorrect format of UTC offset '{raw}'. Expected format: ±HH:MM."))?;
    Ok(UtcOffset::parse(&format!("{sign}{hours}:{minutes}"))?)
}

/// Normalize `HHMM` or `HH:MM` to `HH:MM`.
pub fn normalize_time(raw: &str) -> Result<String> {
    let (hours, minutes) = split_clock(raw)
        .ok_or_else(|| anyhow!("Incorrect format of time '{raw}'. Expected format: HH:MM."))?;
    Ok(format!("{hours}:{minutes}"))
}

/// Parse `DD-MM-YY` plus a time into a wall-clock datetime.
pub fn parse_datetime(date: &str, time: &str) -> Result<NaiveDateTime> {
    if !is_date_shaped(date) {
        bail!("Incorrect format of date '{date}'. Expected format: DD-MM-YY.");
    }
    let text = format!("{date} {}", normalize_time(time)?);
    NaiveDateTime::parse_from_str(&text, INPUT_DATETIME_FORMAT)
        .map_err(|e| anyhow!("Illegal datetime '{text}': {e}"))
}

/// Split `HHMM`, `HH:MM` or `H:MM` into two-digit hour and minute strings.
fn split_clock(raw: &str) -> Option<(String, String)> {
    if !raw.is_ascii() {
        return None;
    }
    let (hours, minutes) = match raw.split_once(':') {
        Some(parts) => parts,
        None if raw.len() == 4 => raw.split_at(2),
        None => return None,
    };
    let digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if !digits(hours) || !digits(minutes) || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    Some((format!("{hours:0>2}"), minutes.to_string()))
}

fn is_date_shaped(date: &str) -> bool {
    let bytes = date.as_bytes();
    bytes.len() == 8
        && bytes[2] == b'-'
        && bytes[5] == b'-'
        && [0, 1, 3, 4, 6, 7].iter().all(|&i| bytes[i].is_ascii_digit())
}
