//! Human duration strings such as `1d 2h 30m`.
//!
//! The configuration file stores the time adjustment in this form, and the CLI
//! renders balances with the same units so the two read alike.

use thiserror::Error;

const SECONDS_PER_MINUTE: i64 = 60;
const SECONDS_PER_HOUR: i64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: i64 = 24 * SECONDS_PER_HOUR;

/// Errors produced while parsing a duration string.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DurationParseError {
    /// The token has no leading integer (e.g. `h` or `xh`).
    #[error("invalid duration token `{token}`: expected <int><unit>")]
    MissingAmount { token: String },

    /// The token's unit is not one of `d`, `h`, `m`, `s`.
    #[error("invalid duration token `{token}`: unknown unit `{unit}` (expected d, h, m or s)")]
    UnknownUnit { token: String, unit: String },

    /// The summed duration does not fit into an `i64` of seconds.
    #[error("duration `{input}` is out of range")]
    Overflow { input: String },
}

/// Parses a whitespace-separated list of `<int><unit>` tokens into seconds.
///
/// Units are `d` (24 hours), `h`, `m` and `s`. Tokens are summed, so
/// `"1h 1h"` is two hours. The integer may be negative. An empty string is
/// zero.
pub fn parse_duration(input: &str) -> Result<i64, DurationParseError> {
    let overflow = || DurationParseError::Overflow {
        input: input.to_string(),
    };

    input.split_whitespace().try_fold(0_i64, |total, token| {
        let seconds = parse_token(token)?;
        total.checked_add(seconds).ok_or_else(overflow)
    })
}

fn parse_token(token: &str) -> Result<i64, DurationParseError> {
    let split = token
        .char_indices()
        .find(|&(i, c)| !(c.is_ascii_digit() || (i == 0 && c == '-')))
        .map_or(token.len(), |(i, _)| i);
    let (amount, unit) = token.split_at(split);

    let amount: i64 = amount
        .parse()
        .map_err(|_| DurationParseError::MissingAmount {
            token: token.to_string(),
        })?;

    let multiplier = match unit {
        "d" => SECONDS_PER_DAY,
        "h" => SECONDS_PER_HOUR,
        "m" => SECONDS_PER_MINUTE,
        "s" => 1,
        _ => {
            return Err(DurationParseError::UnknownUnit {
                token: token.to_string(),
                unit: unit.to_string(),
            });
        }
    };

    amount
        .checked_mul(multiplier)
        .ok_or_else(|| DurationParseError::Overflow {
            input: token.to_string(),
        })
}

/// Formats seconds as `1d 2h 3m 4s`, omitting zero components.
///
/// Negative values carry a `-` on every component, so the output parses back
/// with [`parse_duration`]. Zero is rendered as `0s`.
pub fn format_duration(seconds: i64) -> String {
    let sign = if seconds < 0 { "-" } else { "" };
    let mut rest = seconds.unsigned_abs();

    let days = rest / SECONDS_PER_DAY.unsigned_abs();
    rest %= SECONDS_PER_DAY.unsigned_abs();
    let hours = rest / SECONDS_PER_HOUR.unsigned_abs();
    rest %= SECONDS_PER_HOUR.unsigned_abs();
    let minutes = rest / SECONDS_PER_MINUTE.unsigned_abs();
    rest %= SECONDS_PER_MINUTE.unsigned_abs();

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{sign}{days}d"));
    }
    if hours > 0 {
        parts.push(format!("{sign}{hours}h"));
    }
    if minutes > 0 {
        parts.push(format!("{sign}{minutes}m"));
    }
    if rest > 0 || parts.is_empty() {
        parts.push(format!("{sign}{rest}s"));
    }

    parts.join(" ")
}
