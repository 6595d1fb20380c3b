//! Title lookup with fuzzy suggestions.
//!
//! # Responsibility
//! - Resolve a partial title against the stored collection.
//! - Offer "did you mean" suggestions when nothing matches literally.

pub mod lookup;
