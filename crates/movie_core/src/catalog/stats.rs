//! Rating statistics.
//!
//! # Invariants
//! - Empty input is an explicit error, never a division by zero.
//! - Median works on a sorted copy; the caller's data keeps its order.
//! - Ties for best/worst resolve in collection order.

use crate::catalog::sort::{sort_movies, SortField, SortOrder};
use crate::model::movie::Movie;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatsError {
    EmptyCollection,
}

impl Display for StatsError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyCollection => write!(f, "the movie collection is empty"),
        }
    }
}

impl Error for StatsError {}

/// Aggregate view over a non-empty collection.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingStats {
    pub count: usize,
    pub average: f64,
    pub median: f64,
    pub best: Movie,
    pub worst: Movie,
}

impl RatingStats {
    /// Average rounded for display, e.g. `8.0`.
    pub fn average_display(&self) -> String {
        format!("{:.1}", self.average)
    }
}

impl Display for RatingStats {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Average rating: {}", self.average_display())?;
        writeln!(f, "Median rating: {}", self.median)?;
        writeln!(f, "Best movie: {}, {}", self.best.title, self.best.rating)?;
        write!(f, "Worst movie: {}, {}", self.worst.title, self.worst.rating)
    }
}

pub fn average(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyCollection);
    }
    Ok(values.iter().sum::<f64>() / values.len() as f64)
}

pub fn median(values: &[f64]) -> Result<f64, StatsError> {
    if values.is_empty() {
        return Err(StatsError::EmptyCollection);
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let mid = sorted.len() / 2;
    if sorted.len() % 2 == 0 {
        Ok((sorted[mid - 1] + sorted[mid]) / 2.0)
    } else {
        Ok(sorted[mid])
    }
}

/// Computes average, median, best and worst over `movies`.
pub fn compute_stats(movies: &[Movie]) -> Result<RatingStats, StatsError> {
    let ratings = movies.iter().map(|movie| movie.rating).collect::<Vec<_>>();
    let average = average(&ratings)?;
    let median = median(&ratings)?;

    let by_rating = sort_movies(movies, SortField::Rating, SortOrder::Descending);
    let (Some(best), Some(worst)) = (by_rating.first(), by_rating.last()) else {
        return Err(StatsError::EmptyCollection);
    };

    Ok(RatingStats {
        count: movies.len(),
        average,
        median,
        best: best.clone(),
        worst: worst.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::{average, median, StatsError};

    #[test]
    fn median_of_odd_and_even_counts() {
        assert_eq!(median(&[3.0, 1.0, 2.0]).unwrap(), 2.0);
        assert_eq!(median(&[4.0, 1.0, 3.0, 2.0]).unwrap(), 2.5);
    }

    #[test]
    fn median_does_not_reorder_input() {
        let values = vec![3.0, 1.0, 2.0];
        median(&values).unwrap();
        assert_eq!(values, vec![3.0, 1.0, 2.0]);
    }

    #[test]
    fn empty_input_is_an_error() {
        assert_eq!(average(&[]), Err(StatsError::EmptyCollection));
        assert_eq!(median(&[]), Err(StatsError::EmptyCollection));
    }
}
