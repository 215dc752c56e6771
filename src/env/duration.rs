// Duration string parsing
// Unit-suffixed decimal components in the usual config notation: "1h", "30m", "5s", "100ms"

use std::time::Duration;

use thiserror::Error;

/// Errors from [`parse_duration`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseDurationError {
    /// Input was empty.
    #[error("empty duration string")]
    Empty,

    /// Negative durations have no meaning for timeouts or cleanup windows.
    #[error("negative durations are not supported: {0:?}")]
    Negative(String),

    /// A unit suffix appeared with no number in front of it.
    #[error("missing number in duration {0:?}")]
    MissingNumber(String),

    /// A number appeared with no unit suffix after it.
    #[error("missing unit in duration {0:?} (examples: 1h, 30m, 5s, 100ms)")]
    MissingUnit(String),

    /// Unit suffix is not one of ns, us, ms, s, m, h.
    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { input: String, unit: String },

    /// The value does not fit in a `Duration`.
    #[error("duration {0:?} is out of range")]
    OutOfRange(String),
}

const NANOS_PER_SEC: u128 = 1_000_000_000;

// Recognized unit suffixes and their length in nanoseconds. Both the micro
// sign and the Greek mu are accepted for microseconds.
const NANOS_PER_UNIT: &[(&str, u128)] = &[
    ("ns", 1),
    ("us", 1_000),
    ("\u{00b5}s", 1_000),
    ("\u{03bc}s", 1_000),
    ("ms", 1_000_000),
    ("s", NANOS_PER_SEC),
    ("m", 60 * NANOS_PER_SEC),
    ("h", 3_600 * NANOS_PER_SEC),
];

/// Parse a duration literal such as "5s", "100ms", "1.5h" or "2h45m".
///
/// A duration is a sequence of decimal numbers, each with an optional
/// fraction and a mandatory unit suffix (ns, us, ms, s, m, h). The bare
/// string "0" is allowed. Negative durations and whitespace anywhere in
/// the input are rejected.
pub fn parse_duration(input: &str) -> Result<Duration, ParseDurationError> {
    if input.is_empty() {
        return Err(ParseDurationError::Empty);
    }
    if input.starts_with('-') {
        return Err(ParseDurationError::Negative(input.to_string()));
    }

    let mut rest = input.strip_prefix('+').unwrap_or(input);
    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(ParseDurationError::MissingNumber(input.to_string()));
    }

    let mut total_nanos: u128 = 0;
    while !rest.is_empty() {
        let (component, next) = parse_component(input, rest)?;
        total_nanos = total_nanos
            .checked_add(component)
            .ok_or_else(|| ParseDurationError::OutOfRange(input.to_string()))?;
        rest = next;
    }

    if total_nanos > u64::MAX as u128 {
        return Err(ParseDurationError::OutOfRange(input.to_string()));
    }
    let secs = (total_nanos / NANOS_PER_SEC) as u64;
    let nanos = (total_nanos % NANOS_PER_SEC) as u32;
    Ok(Duration::new(secs, nanos))
}

// Parse one "<number>[.fraction]<unit>" component, returning its length in
// nanoseconds and the unparsed remainder.
fn parse_component<'a>(
    input: &str,
    rest: &'a str,
) -> Result<(u128, &'a str), ParseDurationError> {
    let digits_end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    let (int_part, after_int) = rest.split_at(digits_end);

    let (frac_part, after_number) = match after_int.strip_prefix('.') {
        Some(after_dot) => {
            let frac_end = after_dot
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(after_dot.len());
            after_dot.split_at(frac_end)
        }
        None => ("", after_int),
    };

    if int_part.is_empty() && frac_part.is_empty() {
        return Err(ParseDurationError::MissingNumber(input.to_string()));
    }

    let unit_end = after_number
        .find(|c: char| c.is_ascii_digit() || c == '.')
        .unwrap_or(after_number.len());
    let (unit, next) = after_number.split_at(unit_end);
    if unit.is_empty() {
        return Err(ParseDurationError::MissingUnit(input.to_string()));
    }

    let scale = NANOS_PER_UNIT
        .iter()
        .find(|(name, _)| *name == unit)
        .map(|(_, nanos)| *nanos)
        .ok_or_else(|| ParseDurationError::UnknownUnit {
            input: input.to_string(),
            unit: unit.to_string(),
        })?;

    let mut nanos: u128 = match int_part {
        "" => 0,
        digits => digits
            .parse::<u128>()
            .ok()
            .and_then(|value| value.checked_mul(scale))
            .ok_or_else(|| ParseDurationError::OutOfRange(input.to_string()))?,
    };

    if !frac_part.is_empty() {
        // Fractions only carry float precision; digits past the 15th cannot
        // change the result.
        let digits = &frac_part[..frac_part.len().min(15)];
        let mut numerator: u64 = 0;
        let mut denominator: f64 = 1.0;
        for digit in digits.bytes() {
            numerator = numerator * 10 + u64::from(digit - b'0');
            denominator *= 10.0;
        }
        let fraction_nanos = (numerator as f64 / denominator * scale as f64) as u128;
        nanos = nanos
            .checked_add(fraction_nanos)
            .ok_or_else(|| ParseDurationError::OutOfRange(input.to_string()))?;
    }

    Ok((nanos, next))
}
