//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define use-case oriented data access contracts.
//! - Isolate SQLite query details from service orchestration.
//!
//! # Invariants
//! - Repository writes enforce `Movie::validate()` before persistence.
//! - Repository APIs return semantic errors (`NotFound`, `AlreadyExists`) in
//!   addition to DB transport errors.

pub mod movie_repo;
