//! Field-based ordering of a movie collection.

use crate::model::movie::Movie;
use std::cmp::Ordering;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Sortable movie fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Title,
    Year,
    Rating,
    PosterUrl,
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    Ascending,
    /// Highest first. Matches the menu default for ratings.
    #[default]
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortError {
    /// Field name is not part of the movie schema.
    UnknownField(String),
}

impl Display for SortError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownField(name) => write!(
                f,
                "cannot sort by `{name}`; expected title|year|rating|poster_url"
            ),
        }
    }
}

impl Error for SortError {}

impl FromStr for SortField {
    type Err = SortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "year" => Ok(Self::Year),
            "rating" => Ok(Self::Rating),
            "poster_url" => Ok(Self::PosterUrl),
            _ => Err(SortError::UnknownField(value.trim().to_string())),
        }
    }
}

impl SortField {
    fn compare(self, left: &Movie, right: &Movie) -> Ordering {
        match self {
            Self::Title => left.title.cmp(&right.title),
            Self::Year => left.year.cmp(&right.year),
            Self::Rating => left.rating.total_cmp(&right.rating),
            Self::PosterUrl => left.poster_url.cmp(&right.poster_url),
        }
    }
}

/// Returns a sorted copy of `movies`.
///
/// The sort is stable in both directions: equal keys keep collection order,
/// so the first-inserted movie stays first among ties even when descending.
pub fn sort_movies(movies: &[Movie], field: SortField, order: SortOrder) -> Vec<Movie> {
    let mut sorted = movies.to_vec();
    match order {
        SortOrder::Ascending => sorted.sort_by(|a, b| field.compare(a, b)),
        SortOrder::Descending => sorted.sort_by(|a, b| field.compare(b, a)),
    }
    sorted
}

/// Parses `field_name` and sorts; the string entry point used by callers that
/// take field names from user input.
pub fn sort_movies_by(
    movies: &[Movie],
    field_name: &str,
    order: SortOrder,
) -> Result<Vec<Movie>, SortError> {
    let field = field_name.parse::<SortField>()?;
    Ok(sort_movies(movies, field, order))
}
