//! Domain model for the movie collection.
//!
//! # Responsibility
//! - Define the canonical movie record shared by storage, search and rendering.
//! - Own the rating bounds used by every write path.
//!
//! # Invariants
//! - A movie is identified by its `title` (natural key).
//! - `rating` always lies in the closed range `[0, 10]`.

pub mod movie;
pub mod rating;
