//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository, remote and catalog calls into use-case APIs.
//! - Keep the CLI decoupled from storage details.

pub mod movie_service;
