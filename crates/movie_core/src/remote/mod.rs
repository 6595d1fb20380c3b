//! Remote movie metadata.
//!
//! # Responsibility
//! - Define the metadata-source contract used by the add flow.
//! - Provide the OMDb HTTP implementation.
//!
//! # Invariants
//! - An unknown title is `Ok(None)`, not an error.
//! - Transport, status and decoding failures are `RemoteError`.

use crate::model::rating::check_rating;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod omdb;

pub use omdb::{OmdbClient, DEFAULT_OMDB_URL};

static LEADING_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d{4})").expect("valid year regex"));
static RATING_VALUE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\s*(\d+(?:\.\d+)?)\s*(?:/\s*\d+(?:\.\d+)?)?\s*$").expect("valid rating regex")
});

pub type RemoteResult<T> = Result<T, RemoteError>;

#[derive(Debug)]
pub enum RemoteError {
    /// Connection, timeout or body read failure.
    Transport(reqwest::Error),
    /// Non-success HTTP status.
    Status { code: u16, message: Option<String> },
    /// Body was not the expected JSON shape.
    Decode(String),
}

impl Display for RemoteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Transport(err) => write!(f, "could not connect to the movie API: {err}"),
            Self::Status { code, message } => match message {
                Some(message) => write!(f, "movie API answered {code}: {message}"),
                None => write!(f, "movie API answered {code}"),
            },
            Self::Decode(message) => write!(f, "unexpected movie API response: {message}"),
        }
    }
}

impl Error for RemoteError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Transport(err) => Some(err),
            Self::Status { .. } | Self::Decode(_) => None,
        }
    }
}

impl From<reqwest::Error> for RemoteError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_decode() {
            return Self::Decode(value.to_string());
        }
        Self::Transport(value)
    }
}

/// One third-party rating, e.g. `Internet Movie Database` / `8.8/10`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingSource {
    pub source: String,
    pub value: String,
}

/// Metadata for one movie as reported by the remote source.
#[derive(Debug, Clone, PartialEq)]
pub struct RemoteMovie {
    /// Canonical title; this is what gets stored.
    pub title: String,
    /// `None` when the remote year is not a plain year; the caller must ask.
    pub year: Option<i32>,
    pub ratings: Vec<RatingSource>,
    pub poster_url: Option<String>,
}

impl RemoteMovie {
    /// Numeric rating to offer the user.
    ///
    /// Only set when exactly one source rated the movie and its value reads
    /// as `<number>` or `<number>/<scale>` within `[0, 10]`.
    pub fn suggested_rating(&self) -> Option<f64> {
        match self.ratings.as_slice() {
            [only] => parse_rating_value(&only.value),
            _ => None,
        }
    }
}

/// Contract for looking up metadata by free-text title.
pub trait MetadataSource {
    fn fetch_movie(&self, title: &str) -> RemoteResult<Option<RemoteMovie>>;
}

/// Extracts the first year from values such as `2010` or `2013–2017`.
pub fn parse_year(raw: &str) -> Option<i32> {
    LEADING_YEAR_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|year| year.as_str().parse().ok())
}

fn parse_rating_value(raw: &str) -> Option<f64> {
    RATING_VALUE_RE
        .captures(raw)
        .and_then(|caps| caps.get(1))
        .and_then(|value| value.as_str().parse::<f64>().ok())
        .and_then(|value| check_rating(value).ok())
}

#[cfg(test)]
mod tests {
    use super::{parse_rating_value, parse_year, RatingSource, RemoteMovie};

    fn remote(ratings: &[(&str, &str)]) -> RemoteMovie {
        RemoteMovie {
            title: "Inception".to_string(),
            year: Some(2010),
            ratings: ratings
                .iter()
                .map(|(source, value)| RatingSource {
                    source: source.to_string(),
                    value: value.to_string(),
                })
                .collect(),
            poster_url: None,
        }
    }

    #[test]
    fn parse_year_takes_first_year_of_ranges() {
        assert_eq!(parse_year("2010"), Some(2010));
        assert_eq!(parse_year("2013–2017"), Some(2013));
        assert_eq!(parse_year("N/A"), None);
    }

    #[test]
    fn rating_values_parse_with_or_without_scale() {
        assert_eq!(parse_rating_value("8.8/10"), Some(8.8));
        assert_eq!(parse_rating_value("7"), Some(7.0));
        assert_eq!(parse_rating_value("87%"), None);
        assert_eq!(parse_rating_value("74/100"), None);
    }

    #[test]
    fn suggested_rating_requires_a_single_source() {
        assert_eq!(
            remote(&[("Internet Movie Database", "8.8/10")]).suggested_rating(),
            Some(8.8)
        );
        assert_eq!(
            remote(&[("Internet Movie Database", "8.8/10"), ("Metacritic", "74/100")])
                .suggested_rating(),
            None
        );
        assert_eq!(remote(&[]).suggested_rating(), None);
    }
}
