//! Movie repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide CRUD APIs over the `movies` table keyed by title.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths call `Movie::validate()` before SQL mutations.
//! - Read paths reject invalid persisted rows instead of masking them.
//! - Listing order is insertion order (`id ASC`).

use crate::db::DbError;
use crate::model::movie::{Movie, MovieValidationError};
use crate::model::rating::check_rating;
use rusqlite::{params, Connection, ErrorCode, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};

const MOVIE_SELECT_SQL: &str = "SELECT
    title,
    year,
    rating,
    poster_url
FROM movies";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for movie persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(MovieValidationError),
    Db(DbError),
    /// No row carries the given title.
    NotFound(String),
    /// The UNIQUE title constraint rejected a write.
    AlreadyExists(String),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(title) => write!(f, "movie `{title}` doesn't exist"),
            Self::AlreadyExists(title) => write!(f, "movie `{title}` already exists"),
            Self::InvalidData(message) => write!(f, "invalid persisted movie data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::AlreadyExists(_) | Self::InvalidData(_) => None,
        }
    }
}

impl RepoError {
    /// Stable, title-free identifier for log lines.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation_failed",
            Self::Db(_) => "db_failed",
            Self::NotFound(_) => "not_found",
            Self::AlreadyExists(_) => "already_exists",
            Self::InvalidData(_) => "invalid_data",
        }
    }
}

impl From<MovieValidationError> for RepoError {
    fn from(value: MovieValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for movie persistence.
pub trait MovieRepository {
    /// Reads the whole collection in insertion order.
    fn list_all(&self) -> RepoResult<Vec<Movie>>;
    /// Looks up one movie by exact (case-sensitive) title.
    fn get_movie(&self, title: &str) -> RepoResult<Option<Movie>>;
    fn insert(&self, movie: &Movie) -> RepoResult<()>;
    fn delete(&self, title: &str) -> RepoResult<()>;
    fn update_rating(&self, title: &str, rating: f64) -> RepoResult<()>;
}

/// SQLite-backed movie repository.
///
/// Borrows an explicitly opened connection; there is no global engine.
pub struct SqliteMovieRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteMovieRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl MovieRepository for SqliteMovieRepository<'_> {
    fn list_all(&self) -> RepoResult<Vec<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} ORDER BY id ASC;"))?;
        let mut rows = stmt.query([])?;
        let mut movies = Vec::new();

        while let Some(row) = rows.next()? {
            movies.push(parse_movie_row(row)?);
        }

        Ok(movies)
    }

    fn get_movie(&self, title: &str) -> RepoResult<Option<Movie>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{MOVIE_SELECT_SQL} WHERE title = ?1;"))?;
        let mut rows = stmt.query([title])?;
        if let Some(row) = rows.next()? {
            return Ok(Some(parse_movie_row(row)?));
        }

        Ok(None)
    }

    fn insert(&self, movie: &Movie) -> RepoResult<()> {
        movie.validate()?;

        self.conn
            .execute(
                "INSERT INTO movies (title, year, rating, poster_url)
                 VALUES (?1, ?2, ?3, ?4);",
                params![
                    movie.title.as_str(),
                    movie.year,
                    movie.rating,
                    movie.poster_url.as_deref(),
                ],
            )
            .map_err(|err| map_unique_violation(err, &movie.title))?;

        Ok(())
    }

    fn delete(&self, title: &str) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM movies WHERE title = ?1;", [title])?;

        if changed == 0 {
            return Err(RepoError::NotFound(title.to_string()));
        }

        Ok(())
    }

    fn update_rating(&self, title: &str, rating: f64) -> RepoResult<()> {
        check_rating(rating).map_err(MovieValidationError::from)?;

        let changed = self.conn.execute(
            "UPDATE movies SET rating = ?1 WHERE title = ?2;",
            params![rating, title],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound(title.to_string()));
        }

        Ok(())
    }
}

fn parse_movie_row(row: &Row<'_>) -> RepoResult<Movie> {
    let year: i64 = row.get("year")?;
    let year = i32::try_from(year)
        .map_err(|_| RepoError::InvalidData(format!("invalid year `{year}` in movies.year")))?;

    let movie = Movie {
        title: row.get("title")?,
        year,
        rating: row.get("rating")?,
        poster_url: row.get("poster_url")?,
    };
    movie.validate().map_err(|err| {
        RepoError::InvalidData(format!("row `{}` failed validation: {err}", movie.title))
    })?;
    Ok(movie)
}

fn map_unique_violation(err: rusqlite::Error, title: &str) -> RepoError {
    match &err {
        rusqlite::Error::SqliteFailure(failure, _)
            if failure.code == ErrorCode::ConstraintViolation
                && failure.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE =>
        {
            RepoError::AlreadyExists(title.to_string())
        }
        _ => RepoError::from(err),
    }
}
