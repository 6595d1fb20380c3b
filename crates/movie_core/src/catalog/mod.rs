//! In-memory passes over a movie collection.
//!
//! # Responsibility
//! - Order, filter, summarize and sample a collection read from storage.
//!
//! # Invariants
//! - Every routine borrows the caller's slice and returns new values; the
//!   caller's ordering is never mutated.

pub mod filter;
pub mod pick;
pub mod sort;
pub mod stats;
