//! Movie domain model.
//!
//! # Responsibility
//! - Define the persisted movie record.
//! - Validate records before they reach storage.
//!
//! # Invariants
//! - `title` is non-blank and unique across the collection.
//! - `rating` is within `[0, 10]`.
//! - Only `rating` is mutated after creation.

use crate::model::rating::{check_rating, RatingError};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Persisted favorite movie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// Natural key; unique in the backing store.
    pub title: String,
    pub year: i32,
    pub rating: f64,
    /// Poster image URL. OMDb may have none.
    pub poster_url: Option<String>,
}

/// Validation error for a `Movie` record.
#[derive(Debug, Clone, PartialEq)]
pub enum MovieValidationError {
    EmptyTitle,
    Rating(RatingError),
}

impl Display for MovieValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "empty movie titles are not allowed"),
            Self::Rating(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MovieValidationError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::EmptyTitle => None,
            Self::Rating(err) => Some(err),
        }
    }
}

impl From<RatingError> for MovieValidationError {
    fn from(value: RatingError) -> Self {
        Self::Rating(value)
    }
}

impl Movie {
    pub fn new(
        title: impl Into<String>,
        year: i32,
        rating: f64,
        poster_url: Option<String>,
    ) -> Self {
        Self {
            title: title.into(),
            year,
            rating,
            poster_url,
        }
    }

    /// Checks record invariants before persistence.
    ///
    /// # Errors
    /// - `EmptyTitle` when the title is blank.
    /// - `Rating` when the rating is not finite or outside `[0, 10]`.
    pub fn validate(&self) -> Result<(), MovieValidationError> {
        validate_title(&self.title)?;
        check_rating(self.rating)?;
        Ok(())
    }
}

/// Rejects blank titles. Shared by the service pre-checks.
pub fn validate_title(title: &str) -> Result<(), MovieValidationError> {
    if title.trim().is_empty() {
        return Err(MovieValidationError::EmptyTitle);
    }
    Ok(())
}
