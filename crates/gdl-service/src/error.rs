//! # Resolution Errors
//!
//! The caller-facing error taxonomy. Everything that prevents resolution
//! collapses into a single uniform `NotFound` — an unknown identifier, an
//! inactive record, and an empty precedence ladder all look the same to
//! the client; partial results are never surfaced. Configuration errors
//! are fatal at startup. Store failures during fetch surface with their
//! backend diagnostic; store failures during cleanup never reach here
//! (they are logged and dropped by the detached task).

use thiserror::Error;

use gdl_core::ConfigError;

use crate::store::StoreError;

/// Errors surfaced by [`crate::Resolver::resolve`].
#[derive(Error, Debug)]
pub enum ResolveError {
    /// The identifier cannot be resolved: nothing stored, record
    /// inactive, or no link satisfies the request.
    #[error("cannot resolve identifier")]
    NotFound,

    /// Invalid resolver configuration.
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The record store failed while fetching.
    #[error("record store error: {0}")]
    Store(#[from] StoreError),
}
