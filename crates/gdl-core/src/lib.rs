//! # gdl-core — Foundational Types for the Digital Link Resolver
//!
//! This crate is the leaf of the workspace DAG. It defines the data model
//! shared by every other crate: identifier primitives, link records with
//! their scoped default flags, append-only version history, and resolver
//! configuration.
//!
//! ## Key Design Principles
//!
//! 1. **Newtype wrappers for domain primitives.** `LinkId`, `LinkType`,
//!    `QualifierPath` — no bare strings where the token has structure.
//!
//! 2. **The scope-default invariant lives with the data.** Every mutation
//!    of an [`IdentifierRecord`]'s link collection re-runs
//!    [`defaults::enforce_scope_defaults`] before returning. The invariant
//!    is maintained eagerly, never checked lazily at read time.
//!
//! 3. **UTC-only timestamps.** [`Timestamp`] enforces UTC with Z suffix at
//!    seconds precision, so audit trails and version history serialize
//!    identically everywhere.
//!
//! 4. **Append-only history.** Link mutations append
//!    [`VersionHistoryEntry`] values; nothing ever rewrites an entry.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `gdl-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - All public types derive `Debug`, `Clone`, and implement
//!   `Serialize`/`Deserialize`.

pub mod config;
pub mod defaults;
pub mod error;
pub mod identity;
pub mod record;
pub mod temporal;

// Re-export primary types for ergonomic imports.
pub use config::ResolverConfig;
pub use defaults::enforce_scope_defaults;
pub use error::{ConfigError, RecordError};
pub use identity::{LinkId, LinkType, QualifierPath};
pub use record::{
    ChangeAction, IdentifierRecord, LinkChange, LinkRecord, VersionHistoryEntry,
};
pub use temporal::Timestamp;
