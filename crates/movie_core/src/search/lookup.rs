//! Substring-first title lookup with an Indel-ratio fallback.
//!
//! # Invariants
//! - Substring matches, when any exist, are the whole result.
//! - Fuzzy suggestions only engage when no title contains the query.
//! - Result order follows collection order in both phases.
//! - Lookup is pure: it never touches storage or the network.

use crate::model::movie::Movie;
use rapidfuzz::fuzz;

/// Fuzzy suggestions must score strictly above this ratio (0-100 scale).
pub const SIMILARITY_THRESHOLD: f64 = 50.0;

/// Which phase produced a lookup result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    /// At least one title contains the query (case-insensitive).
    Substring,
    /// No literal hit; movies above the similarity threshold.
    Fuzzy,
    /// Neither phase produced anything.
    NoMatch,
}

/// Outcome of [`lookup_movies`].
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub kind: MatchKind,
    pub movies: Vec<Movie>,
}

impl LookupResult {
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

/// Similarity between two strings on a 0-100 scale.
///
/// Indel ratio: `100 * (1 - d / (len(left) + len(right)))`, where `d` counts
/// only insertions and deletions. Case-sensitive and symmetric; identical
/// strings score 100.
pub fn similarity_ratio(left: &str, right: &str) -> f64 {
    fuzz::ratio(left.chars(), right.chars()) * 100.0
}

/// Finds movies for a partial title.
///
/// An empty query is a substring of every title, so it returns the whole
/// collection as substring matches.
pub fn lookup_movies(query: &str, movies: &[Movie]) -> LookupResult {
    let needle = query.to_lowercase();
    let substring_hits = movies
        .iter()
        .filter(|movie| movie.title.to_lowercase().contains(&needle))
        .cloned()
        .collect::<Vec<_>>();

    if !substring_hits.is_empty() {
        return LookupResult {
            kind: MatchKind::Substring,
            movies: substring_hits,
        };
    }

    let fuzzy_hits = movies
        .iter()
        .filter(|movie| similarity_ratio(query, &movie.title) > SIMILARITY_THRESHOLD)
        .cloned()
        .collect::<Vec<_>>();

    let kind = if fuzzy_hits.is_empty() {
        MatchKind::NoMatch
    } else {
        MatchKind::Fuzzy
    };

    LookupResult {
        kind,
        movies: fuzzy_hits,
    }
}
