//! Go-style duration strings
//!
//! Topology files declare timeouts the way Go services configure them:
//! `"3s"`, `"100ms"`, `"1m30s"`, `"2.5s"`. This module parses those strings
//! into signed nanoseconds and formats nanoseconds back into the same
//! notation so rule messages and diagram labels stay stable.

use std::time::Duration;
use thiserror::Error;

/// Nanoseconds per unit, matching Go's `time` package.
const NANOS_PER_US: i64 = 1_000;
const NANOS_PER_MS: i64 = 1_000_000;
const NANOS_PER_SEC: i64 = 1_000_000_000;
const NANOS_PER_MIN: i64 = 60 * NANOS_PER_SEC;
const NANOS_PER_HOUR: i64 = 60 * NANOS_PER_MIN;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid duration {0:?}")]
pub struct InvalidDuration(pub String);

/// Parse a Go-style duration string into signed nanoseconds.
///
/// Accepts an optional sign, one or more `<number><unit>` components
/// (units: `ns`, `us`, `µs`, `ms`, `s`, `m`, `h`), fractional numbers,
/// and the bare string `"0"`.
pub fn parse_duration(input: &str) -> Result<i64, InvalidDuration> {
    let err = || InvalidDuration(input.to_string());

    let mut s = input;
    let mut negative = false;
    if let Some(rest) = s.strip_prefix('-') {
        negative = true;
        s = rest;
    } else if let Some(rest) = s.strip_prefix('+') {
        s = rest;
    }

    if s == "0" {
        return Ok(0);
    }
    if s.is_empty() {
        return Err(err());
    }

    let mut total: i64 = 0;
    while !s.is_empty() {
        let (value, rest) = take_number(s).ok_or_else(err)?;
        let (unit, rest) = take_unit(rest).ok_or_else(err)?;
        let scale = unit_nanos(unit).ok_or_else(err)?;
        let component = (value * scale as f64).round() as i64;
        total = total.checked_add(component).ok_or_else(err)?;
        s = rest;
    }

    Ok(if negative { -total } else { total })
}

/// Parse directly into a [`Duration`], rejecting negative values.
pub fn parse_non_negative(input: &str) -> Result<Duration, InvalidDuration> {
    let nanos = parse_duration(input)?;
    if nanos < 0 {
        return Err(InvalidDuration(input.to_string()));
    }
    Ok(Duration::from_nanos(nanos as u64))
}

fn take_number(s: &str) -> Option<(f64, &str)> {
    let end = s
        .find(|c: char| !c.is_ascii_digit() && c != '.')
        .unwrap_or(s.len());
    if end == 0 {
        return None;
    }
    let (num, rest) = s.split_at(end);
    num.parse::<f64>().ok().map(|v| (v, rest))
}

fn take_unit(s: &str) -> Option<(&str, &str)> {
    for unit in ["ns", "us", "µs", "μs", "ms", "h", "m", "s"] {
        if let Some(rest) = s.strip_prefix(unit) {
            // "m" must not swallow the "m" of "ms"; the list order above
            // tries the two-byte units first, so a bare match is final.
            return Some((unit, rest));
        }
    }
    None
}

fn unit_nanos(unit: &str) -> Option<i64> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(NANOS_PER_US),
        "ms" => Some(NANOS_PER_MS),
        "s" => Some(NANOS_PER_SEC),
        "m" => Some(NANOS_PER_MIN),
        "h" => Some(NANOS_PER_HOUR),
        _ => None,
    }
}

/// Format a [`Duration`] the way Go's `time.Duration` prints itself:
/// `0s`, `500ms`, `2.5s`, `1m30s`, `1h0m0s`.
pub fn format_duration(d: Duration) -> String {
    let nanos = d.as_nanos();
    if nanos == 0 {
        return "0s".to_string();
    }
    if nanos < NANOS_PER_US as u128 {
        return format!("{nanos}ns");
    }
    if nanos < NANOS_PER_MS as u128 {
        return format_frac(nanos, NANOS_PER_US as u128, "µs");
    }
    if nanos < NANOS_PER_SEC as u128 {
        return format_frac(nanos, NANOS_PER_MS as u128, "ms");
    }

    let total_secs = nanos / NANOS_PER_SEC as u128;
    let sub_secs = nanos % NANOS_PER_SEC as u128;
    let secs_part = format_frac(
        (total_secs % 60) * NANOS_PER_SEC as u128 + sub_secs,
        NANOS_PER_SEC as u128,
        "s",
    );

    let mins = total_secs / 60;
    if mins == 0 {
        return secs_part;
    }
    let hours = mins / 60;
    if hours == 0 {
        return format!("{}m{}", mins % 60, secs_part);
    }
    format!("{}h{}m{}", hours, mins % 60, secs_part)
}

/// Render `value / scale` with the fractional part trimmed of trailing zeros.
fn format_frac(value: u128, scale: u128, unit: &str) -> String {
    let whole = value / scale;
    let frac = value % scale;
    if frac == 0 {
        return format!("{whole}{unit}");
    }
    let width = scale.ilog10() as usize;
    let digits = format!("{frac:0width$}");
    let trimmed = digits.trim_end_matches('0');
    format!("{whole}.{trimmed}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_units() {
        assert_eq!(parse_duration("3s").unwrap(), 3 * NANOS_PER_SEC);
        assert_eq!(parse_duration("100ms").unwrap(), 100 * NANOS_PER_MS);
        assert_eq!(parse_duration("250us").unwrap(), 250 * NANOS_PER_US);
        assert_eq!(parse_duration("7ns").unwrap(), 7);
        assert_eq!(parse_duration("2m").unwrap(), 2 * NANOS_PER_MIN);
        assert_eq!(parse_duration("1h").unwrap(), NANOS_PER_HOUR);
    }

    #[test]
    fn test_parse_compound() {
        assert_eq!(parse_duration("1m30s").unwrap(), 90 * NANOS_PER_SEC);
        assert_eq!(
            parse_duration("1h2m3s").unwrap(),
            NANOS_PER_HOUR + 2 * NANOS_PER_MIN + 3 * NANOS_PER_SEC
        );
    }

    #[test]
    fn test_parse_fractional() {
        assert_eq!(parse_duration("2.5s").unwrap(), 2_500 * NANOS_PER_MS);
        assert_eq!(parse_duration("0.5ms").unwrap(), 500 * NANOS_PER_US);
    }

    #[test]
    fn test_parse_zero_and_signs() {
        assert_eq!(parse_duration("0").unwrap(), 0);
        assert_eq!(parse_duration("-3s").unwrap(), -3 * NANOS_PER_SEC);
        assert_eq!(parse_duration("+1s").unwrap(), NANOS_PER_SEC);
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["", "3", "s", "3x", "abc", "1.2.3s", "--1s"] {
            assert!(parse_duration(bad).is_err(), "expected error for {bad:?}");
        }
    }

    #[test]
    fn test_parse_non_negative_rejects_negative() {
        assert!(parse_non_negative("-1s").is_err());
        assert_eq!(parse_non_negative("1s").unwrap(), Duration::from_secs(1));
    }

    #[test]
    fn test_format_round_values() {
        assert_eq!(format_duration(Duration::ZERO), "0s");
        assert_eq!(format_duration(Duration::from_secs(3)), "3s");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_micros(250)), "250µs");
        assert_eq!(format_duration(Duration::from_nanos(7)), "7ns");
    }

    #[test]
    fn test_format_fractional_and_compound() {
        assert_eq!(format_duration(Duration::from_millis(2_500)), "2.5s");
        assert_eq!(format_duration(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_duration(Duration::from_secs(3_600)), "1h0m0s");
        assert_eq!(format_duration(Duration::from_secs(3_723)), "1h2m3s");
    }

    #[test]
    fn test_round_trip() {
        for s in ["3s", "100ms", "1m30s", "2.5s", "1h0m0s"] {
            let nanos = parse_duration(s).unwrap();
            assert_eq!(format_duration(Duration::from_nanos(nanos as u64)), s);
        }
    }
}
