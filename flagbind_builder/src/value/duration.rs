use std::time::Duration;

use crate::value::{ConvertError, Kind};

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;
const MAX_NANOS: u128 = i64::MAX as u128;

/// Convert a duration literal such as `300ms`, `-0s`, `1.5h` or `2h45m`.
///
/// A literal is an optional sign followed by one or more groups of a decimal number (with optional fraction) and a unit.
/// Valid units are `ns`, `us` (or `µs`/`μs`), `ms`, `s`, `m`, `h`.
/// The bare literal `0` is also accepted.
///
/// Results are limited to `i64::MAX` nanoseconds.
/// Negative non-zero durations cannot be represented and are [`ConvertError::OutOfRange`].
///
/// ### Example
/// ```
/// # use flagbind_builder as flagbind;
/// use flagbind::parse_duration;
/// use std::time::Duration;
///
/// assert_eq!(parse_duration("1m30s").unwrap(), Duration::from_secs(90));
/// assert!(parse_duration("90").is_err());
/// ```
pub fn parse_duration(literal: &str) -> Result<Duration, ConvertError> {
    let malformed = || ConvertError::malformed(literal, Kind::Duration);
    let out_of_range = || ConvertError::out_of_range(literal, Kind::Duration);
    let (negative, mut rest) = match literal.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, literal.strip_prefix('+').unwrap_or(literal)),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }

    if rest.is_empty() {
        return Err(malformed());
    }

    let mut total: u128 = 0;

    while !rest.is_empty() {
        let (whole, after) = split_digits(rest);
        rest = after;
        let mut fraction = "";

        if let Some(after) = rest.strip_prefix('.') {
            let (digits, after) = split_digits(after);
            fraction = digits;
            rest = after;
        }

        if whole.is_empty() && fraction.is_empty() {
            return Err(malformed());
        }

        let unit_length = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        let (unit, after) = rest.split_at(unit_length);
        rest = after;
        let scale = unit_scale(unit).ok_or_else(malformed)?;

        let whole = if whole.is_empty() {
            0
        } else {
            whole.parse::<u128>().map_err(|_| out_of_range())?
        };
        total = whole
            .checked_mul(scale)
            .and_then(|nanos| nanos.checked_add(total))
            .ok_or_else(out_of_range)?;
        total += fraction_nanos(fraction, scale);

        if total > MAX_NANOS {
            return Err(out_of_range());
        }
    }

    if negative && total != 0 {
        return Err(out_of_range());
    }

    // Bounded by `MAX_NANOS` above.
    Ok(Duration::from_nanos(total as u64))
}

fn split_digits(text: &str) -> (&str, &str) {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    text.split_at(end)
}

fn unit_scale(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "\u{00b5}s" | "\u{03bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

fn fraction_nanos(fraction: &str, scale: u128) -> u128 {
    let mut numerator: u64 = 0;
    let mut denominator: f64 = 1.0;

    for digit in fraction.bytes() {
        // Digits past the precision of the accumulator are dropped.
        if numerator > (u64::MAX - 9) / 10 {
            break;
        }

        numerator = numerator * 10 + u64::from(digit - b'0');
        denominator *= 10.0;
    }

    (numerator as f64 * (scale as f64 / denominator)) as u128
}
