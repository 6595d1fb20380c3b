//! Random "movie for tonight" selection.

use crate::model::movie::Movie;
use rand::seq::SliceRandom;
use rand::Rng;

/// Picks one movie uniformly at random; `None` for an empty collection.
pub fn pick_random(movies: &[Movie]) -> Option<&Movie> {
    pick_random_with(movies, &mut rand::thread_rng())
}

/// Same as [`pick_random`] with a caller-provided generator.
pub fn pick_random_with<'a, R: Rng + ?Sized>(movies: &'a [Movie], rng: &mut R) -> Option<&'a Movie> {
    movies.choose(rng)
}
