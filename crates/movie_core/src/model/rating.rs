//! User-supplied rating parsing and bounds checking.
//!
//! Re-prompting on invalid input is a caller concern; this module only
//! classifies a single raw value.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Lowest accepted rating value.
pub const RATING_MIN: f64 = 0.0;
/// Highest accepted rating value.
pub const RATING_MAX: f64 = 10.0;

/// Validation error for raw rating input.
#[derive(Debug, Clone, PartialEq)]
pub enum RatingError {
    /// Input is not a finite number.
    NotANumber(String),
    /// Input parsed, but falls outside `[RATING_MIN, RATING_MAX]`.
    OutOfRange(f64),
}

impl Display for RatingError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotANumber(raw) => write!(f, "rating value must be a number, got `{raw}`"),
            Self::OutOfRange(value) => write!(
                f,
                "rating {value} is out of range; expected {RATING_MIN} ... {RATING_MAX}"
            ),
        }
    }
}

impl Error for RatingError {}

/// Parses raw text into a rating in `[0, 10]`.
///
/// Surrounding whitespace is ignored. `NaN` and infinities are rejected as
/// non-numeric input.
pub fn parse_rating(raw: &str) -> Result<f64, RatingError> {
    let trimmed = raw.trim();
    let value = trimmed
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| RatingError::NotANumber(trimmed.to_string()))?;
    check_rating(value)
}

/// Bounds-checks an already numeric rating.
pub fn check_rating(value: f64) -> Result<f64, RatingError> {
    if !value.is_finite() {
        return Err(RatingError::NotANumber(value.to_string()));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&value) {
        return Err(RatingError::OutOfRange(value));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::{check_rating, parse_rating, RatingError};

    #[test]
    fn parse_rating_accepts_bounds_and_trims() {
        assert_eq!(parse_rating("0").unwrap(), 0.0);
        assert_eq!(parse_rating(" 10 ").unwrap(), 10.0);
        assert_eq!(parse_rating("7.5\n").unwrap(), 7.5);
    }

    #[test]
    fn parse_rating_rejects_non_numeric_input() {
        assert_eq!(
            parse_rating("great").unwrap_err(),
            RatingError::NotANumber("great".to_string())
        );
        assert!(matches!(parse_rating(""), Err(RatingError::NotANumber(_))));
        assert!(matches!(parse_rating("NaN"), Err(RatingError::NotANumber(_))));
        assert!(matches!(parse_rating("inf"), Err(RatingError::NotANumber(_))));
    }

    #[test]
    fn parse_rating_rejects_out_of_range_values() {
        assert_eq!(parse_rating("10.1").unwrap_err(), RatingError::OutOfRange(10.1));
        assert_eq!(parse_rating("-0.5").unwrap_err(), RatingError::OutOfRange(-0.5));
    }

    #[test]
    fn check_rating_rejects_nan() {
        assert!(matches!(check_rating(f64::NAN), Err(RatingError::NotANumber(_))));
    }
}
