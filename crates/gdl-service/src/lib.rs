//! # gdl-service — Resolution Façade
//!
//! Wires the pure engine to its collaborators: a normalised request
//! arrives, the identifier record is fetched through the [`RecordStore`]
//! trait, access-role filtering and the precedence matcher run over the
//! in-memory snapshot, and a [`ResolvedLink`] goes back with the linkset
//! payload and both forms of the `Link:` header.
//!
//! Resolution itself is synchronous over the fetched snapshot. The one
//! async edge is opportunistic cleanup: a fetched document still carrying
//! a materialised linkset from an older writer gets that field stripped
//! by a detached save which never gates the response.
//!
//! ## Crate Policy
//!
//! - Persistence backends live elsewhere; [`MemoryStore`] exists for
//!   tests and the CLI.
//! - No `unwrap()`/`expect()` outside tests.

pub mod error;
pub mod request;
pub mod resolver;
pub mod store;

pub use error::ResolveError;
pub use request::{
    DescriptiveAttributes, IdentifierPart, RequestIdentifiers, ResolutionRequest, ResolvedLink,
};
pub use resolver::Resolver;
pub use store::{MemoryStore, RecordKey, RecordStore, StoreError};
