//! Rating-floor and year-range filtering.
//!
//! Raw menu input is turned into [`FilterCriteria`] here so that blank
//! answers fall back to defaults while garbage is reported, never ignored.

use crate::model::movie::Movie;
use chrono::Datelike;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterError {
    /// A non-blank answer did not parse as a number.
    InvalidNumber { field: &'static str, value: String },
}

impl Display for FilterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidNumber { field, value } => {
                write!(f, "{field} should be a number, got `{value}`")
            }
        }
    }
}

impl Error for FilterError {}

/// Inclusive filter bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterCriteria {
    pub min_rating: f64,
    pub start_year: i32,
    pub end_year: i32,
}

impl FilterCriteria {
    /// No rating floor, years `0..=end_year`.
    pub fn with_end_year(end_year: i32) -> Self {
        Self {
            min_rating: 0.0,
            start_year: 0,
            end_year,
        }
    }

    /// Builds criteria from raw answers; blank answers use the defaults
    /// (`0`, `0`, `current_year`).
    ///
    /// # Errors
    /// - `InvalidNumber` for any non-blank answer that does not parse.
    pub fn from_raw(
        min_rating: &str,
        start_year: &str,
        end_year: &str,
        current_year: i32,
    ) -> Result<Self, FilterError> {
        let defaults = Self::with_end_year(current_year);
        Ok(Self {
            min_rating: parse_or_default(min_rating, "minimum rating", defaults.min_rating)?,
            start_year: parse_or_default(start_year, "start year", defaults.start_year)?,
            end_year: parse_or_default(end_year, "end year", defaults.end_year)?,
        })
    }

    /// Same as [`FilterCriteria::from_raw`] with the local calendar year.
    pub fn from_raw_today(
        min_rating: &str,
        start_year: &str,
        end_year: &str,
    ) -> Result<Self, FilterError> {
        Self::from_raw(min_rating, start_year, end_year, current_year())
    }

    pub fn matches(&self, movie: &Movie) -> bool {
        movie.rating >= self.min_rating
            && self.start_year <= movie.year
            && movie.year <= self.end_year
    }
}

/// Returns the movies satisfying `criteria`, in collection order.
pub fn filter_movies(movies: &[Movie], criteria: &FilterCriteria) -> Vec<Movie> {
    movies
        .iter()
        .filter(|movie| criteria.matches(movie))
        .cloned()
        .collect()
}

pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

fn parse_or_default<T: std::str::FromStr>(
    raw: &str,
    field: &'static str,
    default: T,
) -> Result<T, FilterError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(default);
    }
    trimmed.parse::<T>().map_err(|_| FilterError::InvalidNumber {
        field,
        value: trimmed.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::{FilterCriteria, FilterError};

    #[test]
    fn blank_answers_use_defaults() {
        let criteria = FilterCriteria::from_raw("", " ", "", 2026).unwrap();
        assert_eq!(criteria, FilterCriteria::with_end_year(2026));
    }

    #[test]
    fn numeric_answers_are_parsed() {
        let criteria = FilterCriteria::from_raw("7.5", "1990", "2000", 2026).unwrap();
        assert_eq!(criteria.min_rating, 7.5);
        assert_eq!(criteria.start_year, 1990);
        assert_eq!(criteria.end_year, 2000);
    }

    #[test]
    fn garbage_is_reported_not_defaulted() {
        let err = FilterCriteria::from_raw("", "nineties", "", 2026).unwrap_err();
        assert_eq!(
            err,
            FilterError::InvalidNumber {
                field: "start year",
                value: "nineties".to_string()
            }
        );
    }
}
