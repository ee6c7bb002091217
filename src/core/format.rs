//! # Time Formatting
//!
//! Renders an elapsed duration as `HH:MM:SS.mmm`.
//!
//! Hours are unbounded (no wraparound at 24h) and always at least two
//! digits wide. Everything below the millisecond is truncated, never rounded.

use std::time::Duration;

/// The display value of a stopwatch that has not started (or was reset).
pub const ZERO_TIME: &str = "00:00:00.000";

const MS_PER_SECOND: u64 = 1000;
const MS_PER_MINUTE: u64 = 60 * MS_PER_SECOND;
const MS_PER_HOUR: u64 = 60 * MS_PER_MINUTE;

/// Format milliseconds as "HH:MM:SS.mmm"
pub fn format_millis(elapsed_ms: u64) -> String {
    let hours = elapsed_ms / MS_PER_HOUR;
    let minutes = (elapsed_ms % MS_PER_HOUR) / MS_PER_MINUTE;
    let seconds = (elapsed_ms % MS_PER_MINUTE) / MS_PER_SECOND;
    let millis = elapsed_ms % MS_PER_SECOND;
    format!("{:02}:{:02}:{:02}.{:03}", hours, minutes, seconds, millis)
}

/// Format a duration, dropping sub-millisecond precision.
pub fn format_elapsed(elapsed: Duration) -> String {
    // u128 millis only overflows u64 after ~584 million years
    format_millis(u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX))
}

/// Parse a string produced by [`format_millis`] back into milliseconds.
///
/// Returns `None` for anything that isn't `H+:MM:SS.mmm` with in-range fields.
pub fn parse_millis(formatted: &str) -> Option<u64> {
    let (hms, millis) = formatted.split_once('.')?;
    let mut parts = hms.split(':');
    let hours = parts.next()?;
    let minutes = parts.next()?;
    let seconds = parts.next()?;
    if parts.next().is_some() {
        return None;
    }

    if hours.len() < 2 || minutes.len() != 2 || seconds.len() != 2 || millis.len() != 3 {
        return None;
    }

    let hours: u64 = hours.parse().ok()?;
    let minutes: u64 = minutes.parse().ok()?;
    let seconds: u64 = seconds.parse().ok()?;
    let millis: u64 = millis.parse().ok()?;
    if minutes > 59 || seconds > 59 {
        return None;
    }

    hours
        .checked_mul(MS_PER_HOUR)?
        .checked_add(minutes * MS_PER_MINUTE + seconds * MS_PER_SECOND + millis)
}

/// Fraction of the current minute that has elapsed, in `0.0..1.0`.
///
/// Drives the seconds gauge in the TUI.
pub fn minute_progress(elapsed_ms: u64) -> f64 {
    (elapsed_ms % MS_PER_MINUTE) as f64 / MS_PER_MINUTE as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_zero() {
        assert_eq!(format_millis(0), "00:00:00.000");
        assert_eq!(format_millis(0), ZERO_TIME);
    }

    #[test]
    fn test_format_minutes_seconds_millis() {
        assert_eq!(format_millis(61_234), "00:01:01.234");
    }

    #[test]
    fn test_format_hours() {
        assert_eq!(format_millis(3_661_000), "01:01:01.000");
    }

    #[test]
    fn test_format_pads_each_field() {
        assert_eq!(format_millis(7), "00:00:00.007");
        assert_eq!(format_millis(42), "00:00:00.042");
        assert_eq!(format_millis(9_005), "00:00:09.005");
    }

    #[test]
    fn test_format_field_boundaries() {
        assert_eq!(format_millis(59_999), "00:00:59.999");
        assert_eq!(format_millis(60_000), "00:01:00.000");
        assert_eq!(format_millis(3_599_999), "00:59:59.999");
        assert_eq!(format_millis(3_600_000), "01:00:00.000");
    }

    #[test]
    fn test_hours_do_not_wrap_at_a_day() {
        assert_eq!(format_millis(24 * MS_PER_HOUR), "24:00:00.000");
        assert_eq!(format_millis(100 * MS_PER_HOUR + 1), "100:00:00.001");
    }

    #[test]
    fn test_format_elapsed_truncates_sub_millisecond() {
        let d = Duration::from_micros(1_999);
        assert_eq!(format_elapsed(d), "00:00:00.001");
        let d = Duration::from_nanos(61_234_999_999);
        assert_eq!(format_elapsed(d), "00:01:01.234");
    }

    #[test]
    fn test_format_shape_and_parse_back() {
        // Sample across several orders of magnitude below 100h
        let samples = [
            0u64, 1, 999, 1_000, 59_999, 61_234, 3_599_999, 3_661_000, 86_399_999,
            359_999_999,
        ];
        for ms in samples {
            let s = format_millis(ms);
            assert_eq!(s.len(), 12, "unexpected width for {ms}: {s}");
            assert_eq!(&s[2..3], ":");
            assert_eq!(&s[5..6], ":");
            assert_eq!(&s[8..9], ".");
            assert_eq!(parse_millis(&s), Some(ms));
        }
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert_eq!(parse_millis(""), None);
        assert_eq!(parse_millis("00:00:00"), None);
        assert_eq!(parse_millis("0:00:00.000"), None);
        assert_eq!(parse_millis("00:60:00.000"), None);
        assert_eq!(parse_millis("00:00:60.000"), None);
        assert_eq!(parse_millis("00:00:00.00"), None);
        assert_eq!(parse_millis("00:00:00:00.000"), None);
        assert_eq!(parse_millis("aa:00:00.000"), None);
    }

    #[test]
    fn test_minute_progress() {
        assert_eq!(minute_progress(0), 0.0);
        assert_eq!(minute_progress(30_000), 0.5);
        assert_eq!(minute_progress(60_000), 0.0);
        assert!(minute_progress(59_999) < 1.0);
    }
}
