//! Movie collection use-case service.
//!
//! # Responsibility
//! - Run add/delete/update flows with existence pre-checks.
//! - Read the collection fresh from the repository for every query and hand
//!   it to the in-memory catalog, lookup and render routines.
//! - Map collaborator errors onto one user-facing error taxonomy.
//!
//! # Invariants
//! - Failed add/delete/update never partially apply.
//! - Titles are compared case-sensitively for existence checks.
//! - No collection state is cached between calls.

use crate::catalog::filter::{filter_movies, FilterCriteria, FilterError};
use crate::catalog::pick::pick_random;
use crate::catalog::sort::{sort_movies, sort_movies_by, SortError, SortField, SortOrder};
use crate::catalog::stats::{compute_stats, RatingStats, StatsError};
use crate::model::movie::{validate_title, Movie, MovieValidationError};
use crate::model::rating::{check_rating, RatingError};
use crate::remote::{MetadataSource, RemoteError, RemoteMovie};
use crate::render::histogram::{RatingHistogram, DEFAULT_BINS};
use crate::render::html::write_website;
use crate::render::RenderError;
use crate::repo::movie_repo::{MovieRepository, RepoError};
use crate::search::lookup::{lookup_movies, LookupResult};
use log::{error, info};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub type ServiceResult<T> = Result<T, MovieServiceError>;

/// Service error for movie use-cases.
#[derive(Debug)]
pub enum MovieServiceError {
    /// Bad user input: blank title, bad rating, unparsable filter bound.
    Validation(String),
    /// An existing title was expected.
    NotFound(String),
    /// An absent title was expected.
    AlreadyExists(String),
    /// The metadata API could not be reached or answered garbage.
    RemoteUnavailable(RemoteError),
    UnknownField(String),
    EmptyCollection,
    Repo(RepoError),
    Render(RenderError),
}

impl Display for MovieServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(message) => write!(f, "{message}"),
            Self::NotFound(title) => write!(f, "movie `{title}` doesn't exist"),
            Self::AlreadyExists(title) => write!(f, "movie `{title}` already exists"),
            Self::RemoteUnavailable(err) => write!(f, "{err}"),
            Self::UnknownField(field) => write!(f, "the key `{field}` cannot be used for sorting"),
            Self::EmptyCollection => write!(f, "there are no movies in the collection"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
        }
    }
}

impl Error for MovieServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::RemoteUnavailable(err) => Some(err),
            Self::Repo(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for MovieServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(title) => Self::NotFound(title),
            RepoError::AlreadyExists(title) => Self::AlreadyExists(title),
            RepoError::Validation(err) => Self::Validation(err.to_string()),
            other => Self::Repo(other),
        }
    }
}

impl From<MovieValidationError> for MovieServiceError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<RatingError> for MovieServiceError {
    fn from(value: RatingError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<FilterError> for MovieServiceError {
    fn from(value: FilterError) -> Self {
        Self::Validation(value.to_string())
    }
}

impl From<SortError> for MovieServiceError {
    fn from(value: SortError) -> Self {
        match value {
            SortError::UnknownField(field) => Self::UnknownField(field),
        }
    }
}

impl From<StatsError> for MovieServiceError {
    fn from(value: StatsError) -> Self {
        match value {
            StatsError::EmptyCollection => Self::EmptyCollection,
        }
    }
}

impl From<RemoteError> for MovieServiceError {
    fn from(value: RemoteError) -> Self {
        Self::RemoteUnavailable(value)
    }
}

impl From<RenderError> for MovieServiceError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

/// Movie service facade over a repository implementation.
pub struct MovieService<R: MovieRepository> {
    repo: R,
}

impl<R: MovieRepository> MovieService<R> {
    /// Creates a service using the provided repository implementation.
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Reads the whole collection in insertion order.
    pub fn list_movies(&self) -> ServiceResult<Vec<Movie>> {
        Ok(self.repo.list_all()?)
    }

    /// Returns the stored movie or `NotFound`.
    ///
    /// Lets the CLI confirm a title before asking for a new rating.
    pub fn require_existing(&self, title: &str) -> ServiceResult<Movie> {
        validate_title(title)?;
        self.repo
            .get_movie(title)?
            .ok_or_else(|| MovieServiceError::NotFound(title.to_string()))
    }

    /// Looks `query` up remotely, for the first half of the add flow.
    ///
    /// # Errors
    /// - `Validation` for a blank query.
    /// - `AlreadyExists` when the query or the canonical remote title is
    ///   already stored.
    /// - `NotFound` when the remote source does not know the title.
    /// - `RemoteUnavailable` on transport or decoding failure.
    pub fn fetch_candidate<S: MetadataSource>(
        &self,
        source: &S,
        query: &str,
    ) -> ServiceResult<RemoteMovie> {
        validate_title(query)?;
        self.ensure_absent(query)?;

        let remote = source
            .fetch_movie(query)?
            .ok_or_else(|| MovieServiceError::NotFound(query.to_string()))?;
        self.ensure_absent(&remote.title)?;
        Ok(remote)
    }

    /// Stores a new movie after checking the title is free.
    ///
    /// The UNIQUE constraint backs up the pre-check; either way the caller
    /// sees `AlreadyExists` and nothing is written.
    pub fn add_movie(&self, movie: &Movie) -> ServiceResult<()> {
        movie.validate()?;
        self.ensure_absent(&movie.title)?;

        match self.repo.insert(movie) {
            Ok(()) => {
                info!("event=movie_add module=service status=ok");
                Ok(())
            }
            Err(err) => {
                error!(
                    "event=movie_add module=service status=error error_code={}",
                    err.code()
                );
                Err(err.into())
            }
        }
    }

    /// Deletes a movie by exact title.
    pub fn delete_movie(&self, title: &str) -> ServiceResult<()> {
        self.require_existing(title)?;
        self.repo.delete(title)?;
        info!("event=movie_delete module=service status=ok");
        Ok(())
    }

    /// Replaces the rating of an existing movie.
    pub fn update_rating(&self, title: &str, rating: f64) -> ServiceResult<()> {
        check_rating(rating)?;
        self.require_existing(title)?;
        self.repo.update_rating(title, rating)?;
        info!("event=movie_update module=service status=ok");
        Ok(())
    }

    pub fn stats(&self) -> ServiceResult<RatingStats> {
        Ok(compute_stats(&self.list_movies()?)?)
    }

    pub fn random_movie(&self) -> ServiceResult<Movie> {
        let movies = self.list_movies()?;
        pick_random(&movies)
            .cloned()
            .ok_or(MovieServiceError::EmptyCollection)
    }

    /// Substring-first lookup with fuzzy suggestions.
    pub fn search(&self, query: &str) -> ServiceResult<LookupResult> {
        Ok(lookup_movies(query, &self.list_movies()?))
    }

    pub fn sorted(&self, field: SortField, order: SortOrder) -> ServiceResult<Vec<Movie>> {
        Ok(sort_movies(&self.list_movies()?, field, order))
    }

    /// Sorts by a field named in free text; unknown names are `UnknownField`.
    pub fn sorted_by_name(&self, field: &str, order: SortOrder) -> ServiceResult<Vec<Movie>> {
        Ok(sort_movies_by(&self.list_movies()?, field, order)?)
    }

    pub fn filter(&self, criteria: &FilterCriteria) -> ServiceResult<Vec<Movie>> {
        Ok(filter_movies(&self.list_movies()?, criteria))
    }

    /// Draws the rating histogram to `path` (PNG).
    pub fn export_histogram(&self, path: &Path) -> ServiceResult<RatingHistogram> {
        let ratings = self
            .list_movies()?
            .iter()
            .map(|movie| movie.rating)
            .collect::<Vec<_>>();
        let histogram = RatingHistogram::from_ratings(&ratings, DEFAULT_BINS)?;
        histogram.render_png(path)?;
        info!(
            "event=histogram_export module=service status=ok bins={} movies={}",
            histogram.counts.len(),
            histogram.total()
        );
        Ok(histogram)
    }

    /// Renders the collection into `template` and writes `index.html`.
    pub fn generate_website(
        &self,
        template: &str,
        page_title: &str,
        output_dir: &Path,
    ) -> ServiceResult<PathBuf> {
        let movies = self.list_movies()?;
        let target = write_website(template, page_title, &movies, output_dir)?;
        info!(
            "event=website_render module=service status=ok movies={}",
            movies.len()
        );
        Ok(target)
    }

    fn ensure_absent(&self, title: &str) -> ServiceResult<()> {
        if self.repo.get_movie(title)?.is_some() {
            return Err(MovieServiceError::AlreadyExists(title.to_string()));
        }
        Ok(())
    }
}
