//! # gdl-cli — Resolver Toolchain
//!
//! Subcommand handlers for the `gdl` binary. Each module owns one
//! subcommand's argument struct and handler; `main.rs` assembles and
//! dispatches them.

pub mod corpus;
pub mod defaults;
pub mod linkset;
pub mod resolve;
