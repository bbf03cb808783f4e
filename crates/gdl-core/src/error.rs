//! # Error Types
//!
//! Error enums for the core data model and configuration loading. All
//! errors use `thiserror` for derive-based `Display` and `Error`
//! implementations.
//!
//! Configuration errors are fatal at startup and never recovered; record
//! errors surface invalid lifecycle operations to the caller.

use thiserror::Error;

/// Errors raised while validating resolver configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The resolver domain is required and has no default.
    #[error("resolver domain is required and has no default")]
    MissingResolverDomain,

    /// The link-header budget contained something other than ASCII digits.
    ///
    /// Signs and decimal points are rejected here as well: the budget is
    /// string-validated as a plain unsigned integer.
    #[error("link header max size must be a positive integer, got: {0:?}")]
    HeaderBudgetNotNumeric(String),

    /// The link-header budget parsed to zero.
    #[error("link header max size must be greater than zero, got: {0:?}")]
    HeaderBudgetNotPositive(String),
}

/// Errors raised by link-record lifecycle operations.
#[derive(Error, Debug)]
pub enum RecordError {
    /// No link with the given identity exists on the record.
    #[error("no link with id {link_id} on this identifier record")]
    UnknownLink {
        /// The link identity that failed to resolve.
        link_id: String,
    },

    /// A timestamp string failed to parse.
    #[error("invalid timestamp {value:?}: {reason}")]
    InvalidTimestamp {
        /// The rejected input.
        value: String,
        /// Parser diagnostic.
        reason: String,
    },
}
