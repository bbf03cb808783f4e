//! # gdl-engine — The Resolution Engine
//!
//! Pure, synchronous algorithms over the `gdl-core` data model. Given a
//! snapshot of registered links and a client's content-negotiation
//! preferences, this crate picks the single best-matching target (or
//! decides to show everything) and renders the two wire artifacts clients
//! parse: the JSON linkset document and the HTTP `Link:` header.
//!
//! ## Modules
//!
//! - **access** — access-role filtering with permissive shorthand
//!   expansion.
//! - **linkset** — groups and serialises link records into the nested
//!   linkset document and its flat HTTP-Link string, including
//!   `predecessor-version` entries recovered from version history.
//! - **header** — canonical identifier URLs, ancestor linkset references,
//!   and `Link:` header assembly under a byte budget with an
//!   all-or-nothing truncation policy.
//! - **matcher** — the eight-level precedence ladder that selects one
//!   link record, scanning in reverse registration order.
//!
//! ## Crate Policy
//!
//! - No I/O and no async: everything here computes over an
//!   already-fetched snapshot.
//! - No `unwrap()`/`expect()` outside tests.

pub mod access;
pub mod header;
pub mod linkset;
pub mod matcher;

pub use access::{filter_by_access_role, normalise_role};
pub use header::{assemble_link_header, build_ancestor_refs, build_canonical_url, LinkHeader, ResolutionContext};
pub use linkset::{
    build_http_link_line, build_link_set, build_link_set_from, LinkContext, LinkSet, LinkTarget,
    LocalizedTitle,
};
pub use matcher::{select_record, LanguageContext};
