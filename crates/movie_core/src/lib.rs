//! Core domain logic for the movie collection manager.
//! This crate is the single source of truth for collection invariants.

pub mod catalog;
pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod remote;
pub mod render;
pub mod repo;
pub mod search;
pub mod service;

pub use catalog::filter::{filter_movies, FilterCriteria, FilterError};
pub use catalog::pick::pick_random;
pub use catalog::sort::{sort_movies, sort_movies_by, SortError, SortField, SortOrder};
pub use catalog::stats::{compute_stats, RatingStats, StatsError};
pub use config::{AppConfig, ConfigError, FileConfig};
pub use logging::{absolute_log_dir, default_log_level, init_logging, logging_status};
pub use model::movie::{Movie, MovieValidationError};
pub use model::rating::{parse_rating, RatingError};
pub use remote::{MetadataSource, OmdbClient, RatingSource, RemoteError, RemoteMovie};
pub use render::histogram::RatingHistogram;
pub use render::html::{load_template, render_page, DEFAULT_TEMPLATE};
pub use render::RenderError;
pub use repo::movie_repo::{MovieRepository, RepoError, RepoResult, SqliteMovieRepository};
pub use search::lookup::{lookup_movies, similarity_ratio, LookupResult, MatchKind};
pub use service::movie_service::{MovieService, MovieServiceError, ServiceResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
