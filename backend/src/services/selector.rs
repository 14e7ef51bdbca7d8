//! Week and day selector parsing.
//!
//! Raw path tokens are turned into a [`WeekParity`] / [`Weekday`] before any
//! storage access. Parsing is pure; failures carry a human-readable reason.

use crate::models::{WeekParity, Weekday};

/// Smallest and largest accepted numeric token, for both weeks and days.
pub const MIN_NUMERIC_TOKEN: u32 = 1;
pub const MAX_NUMERIC_TOKEN: u32 = 7;

/// Which selector a token was supplied for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorField {
    Week,
    Day,
}

impl SelectorField {
    pub fn as_str(&self) -> &'static str {
        match self {
            SelectorField::Week => "WEEK",
            SelectorField::Day => "DAY",
        }
    }
}

impl std::fmt::Display for SelectorField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A week or day token that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SelectorError {
    #[error("Invalid {field} value '{token}': numeric value must be between 1 and 7")]
    OutOfRange { field: SelectorField, token: String },

    #[error("Invalid {field} value '{token}': {expected}")]
    Unrecognized {
        field: SelectorField,
        token: String,
        expected: &'static str,
    },
}

impl SelectorError {
    pub fn field(&self) -> SelectorField {
        match self {
            SelectorError::OutOfRange { field, .. } | SelectorError::Unrecognized { field, .. } => {
                *field
            }
        }
    }

    pub fn token(&self) -> &str {
        match self {
            SelectorError::OutOfRange { token, .. } | SelectorError::Unrecognized { token, .. } => {
                token
            }
        }
    }
}

/// A token that is a plain decimal number (ASCII digits only, no sign).
enum Numeric {
    InRange(u32),
    OutOfRange,
}

fn numeric_token(token: &str) -> Option<Numeric> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    // Overlong digit strings do not fit u32 and are out of range anyway.
    match token.parse::<u32>() {
        Ok(n) if (MIN_NUMERIC_TOKEN..=MAX_NUMERIC_TOKEN).contains(&n) => Some(Numeric::InRange(n)),
        _ => Some(Numeric::OutOfRange),
    }
}

/// Parse a week selector.
///
/// Accepts `EVEN` / `ODD` in any case, or a week number in `1..=7` whose
/// parity picks the bucket: odd numbers (including 1 and 7) select
/// [`WeekParity::Odd`], even numbers select [`WeekParity::Even`].
pub fn parse_week(token: &str) -> Result<WeekParity, SelectorError> {
    match numeric_token(token) {
        Some(Numeric::InRange(week)) => return Ok(WeekParity::of_week_number(week)),
        Some(Numeric::OutOfRange) => {
            return Err(SelectorError::OutOfRange {
                field: SelectorField::Week,
                token: token.to_string(),
            })
        }
        None => {}
    }

    if token.eq_ignore_ascii_case("even") {
        Ok(WeekParity::Even)
    } else if token.eq_ignore_ascii_case("odd") {
        Ok(WeekParity::Odd)
    } else {
        Err(SelectorError::Unrecognized {
            field: SelectorField::Week,
            token: token.to_string(),
            expected: "expected EVEN, ODD or a week number",
        })
    }
}

/// Parse a day selector.
///
/// Accepts a full weekday name in any case, or a 1-based position in the
/// canonical monday..sunday list.
pub fn parse_day(token: &str) -> Result<Weekday, SelectorError> {
    match numeric_token(token) {
        Some(Numeric::InRange(position)) => {
            return Weekday::from_position(position).ok_or_else(|| SelectorError::OutOfRange {
                field: SelectorField::Day,
                token: token.to_string(),
            })
        }
        Some(Numeric::OutOfRange) => {
            return Err(SelectorError::OutOfRange {
                field: SelectorField::Day,
                token: token.to_string(),
            })
        }
        None => {}
    }

    Weekday::from_name(token).ok_or_else(|| SelectorError::Unrecognized {
        field: SelectorField::Day,
        token: token.to_string(),
        expected: "expected a weekday name or a day number",
    })
}
