//! Compact unit-suffixed durations: `"12m10s"`, `"1.5h"`, `"-300ms"`.
//!
//! Grammar: an optional sign followed by one or more `<number><unit>`
//! components, where number is a decimal with optional fraction and unit is
//! one of `ns`, `us` (or `µs`), `ms`, `s`, `m`, `h`. The bare string `"0"`
//! is also accepted.

use chrono::TimeDelta;

const NANOSECOND: u128 = 1;
const MICROSECOND: u128 = 1_000 * NANOSECOND;
const MILLISECOND: u128 = 1_000 * MICROSECOND;
const SECOND: u128 = 1_000 * MILLISECOND;
const MINUTE: u128 = 60 * SECOND;
const HOUR: u128 = 60 * MINUTE;

/// Errors from `parse_duration`.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DurationError {
    #[error("invalid duration {input:?}")]
    Invalid { input: String },

    #[error("missing unit in duration {input:?}")]
    MissingUnit { input: String },

    #[error("unknown unit {unit:?} in duration {input:?}")]
    UnknownUnit { unit: String, input: String },

    #[error("duration {input:?} out of range")]
    Overflow { input: String },
}

fn unit_nanos(unit: &str) -> Option<u128> {
    match unit {
        "ns" => Some(NANOSECOND),
        "us" | "µs" | "μs" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a compact duration string.
///
/// ```rust
/// use csvhandler::parse_duration;
///
/// let d = parse_duration("12m10s").unwrap();
/// assert_eq!(d.num_seconds(), 730);
/// ```
pub fn parse_duration(input: &str) -> Result<TimeDelta, DurationError> {
    let invalid = || DurationError::Invalid {
        input: input.to_string(),
    };

    let (negative, mut rest) = match input.as_bytes().first() {
        Some(b'-') => (true, &input[1..]),
        Some(b'+') => (false, &input[1..]),
        _ => (false, input),
    };

    if rest == "0" {
        return Ok(TimeDelta::zero());
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    // Kept well above i64 range so overflow is caught once at the end.
    let limit = i64::MAX as u128 + 1;
    let mut total: u128 = 0;

    while !rest.is_empty() {
        let int_len = rest.bytes().take_while(u8::is_ascii_digit).count();
        let (int_digits, after_int) = rest.split_at(int_len);

        let (frac_digits, after_number) = match after_int.strip_prefix('.') {
            Some(tail) => {
                let frac_len = tail.bytes().take_while(u8::is_ascii_digit).count();
                tail.split_at(frac_len)
            }
            None => ("", after_int),
        };
        if int_digits.is_empty() && frac_digits.is_empty() {
            return Err(invalid());
        }

        let unit_len = after_number
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(after_number.len());
        let (unit, tail) = after_number.split_at(unit_len);
        if unit.is_empty() {
            return Err(DurationError::MissingUnit {
                input: input.to_string(),
            });
        }
        let scale = unit_nanos(unit).ok_or_else(|| DurationError::UnknownUnit {
            unit: unit.to_string(),
            input: input.to_string(),
        })?;

        let overflow = || DurationError::Overflow {
            input: input.to_string(),
        };

        let mut whole: u128 = 0;
        for digit in int_digits.bytes() {
            whole = whole * 10 + u128::from(digit - b'0');
            if whole > limit {
                return Err(overflow());
            }
        }

        // Digits past nanosecond precision cannot change the result.
        let mut numerator: u128 = 0;
        let mut denominator: u128 = 1;
        for digit in frac_digits.bytes().take(18) {
            numerator = numerator * 10 + u128::from(digit - b'0');
            denominator *= 10;
        }

        total += whole * scale + numerator * scale / denominator;
        if total > limit {
            return Err(overflow());
        }
        rest = tail;
    }

    let nanos = if negative {
        -(total as i128)
    } else {
        if total > i64::MAX as u128 {
            return Err(DurationError::Overflow {
                input: input.to_string(),
            });
        }
        total as i128
    };
    Ok(TimeDelta::nanoseconds(nanos as i64))
}

/// Render a duration in the compact grammar accepted by `parse_duration`.
///
/// Values of one second or more print hours, minutes and seconds, omitting
/// leading zero units (`"1h0m0s"`, `"12m10s"`, `"1.5s"`). Shorter values use
/// the largest fitting sub-second unit (`"1.5ms"`, `"800ns"`).
pub fn format_duration(duration: TimeDelta) -> String {
    let nanos = i128::from(duration.num_seconds()) * SECOND as i128
        + i128::from(duration.subsec_nanos());
    let sign = if nanos < 0 { "-" } else { "" };
    let nanos = nanos.unsigned_abs();

    if nanos == 0 {
        return "0s".to_string();
    }

    if nanos < SECOND {
        let (unit, name) = if nanos < MICROSECOND {
            (NANOSECOND, "ns")
        } else if nanos < MILLISECOND {
            (MICROSECOND, "µs")
        } else {
            (MILLISECOND, "ms")
        };
        return format!("{}{}{}", sign, decimal(nanos, unit), name);
    }

    let seconds = nanos / SECOND;
    let sub = nanos % SECOND;
    let hours = seconds / 3600;
    let minutes = (seconds / 60) % 60;
    let secs = decimal((seconds % 60) * SECOND + sub, SECOND);

    if hours > 0 {
        format!("{}{}h{}m{}s", sign, hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}{}m{}s", sign, minutes, secs)
    } else {
        format!("{}{}s", sign, secs)
    }
}

/// `value / unit` as a decimal with trailing fractional zeros trimmed.
fn decimal(value: u128, unit: u128) -> String {
    let whole = value / unit;
    let remainder = value % unit;
    if remainder == 0 {
        return whole.to_string();
    }
    let width = unit.ilog10() as usize;
    let fraction = format!("{:0width$}", remainder, width = width);
    format!("{}.{}", whole, fraction.trim_end_matches('0'))
}
