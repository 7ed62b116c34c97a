//! # katello-common
//!
//! Shared error definitions, resource identities, edge types, and constants
//! used across the Katello catalog compiler workspace.
//!
//! This crate is the leaf of the dependency graph — it depends on no other
//! internal crate and provides the foundational primitives that the compiler
//! builds upon.

pub mod constants;
pub mod error;
pub mod types;
