//! # katello-catalog
//!
//! Deterministic catalog compiler for the Katello content-management
//! configuration module.
//!
//! Handles:
//! - **Params**: Layered parameter resolution (explicit > inherited > defaults).
//! - **Platform**: Mapping of platform facts to package-name profiles.
//! - **External**: The registry of externally declared edge endpoints.
//! - **Builder**: Construction of resource nodes and typed dependency edges.
//! - **Render**: Stable rendering of the plugin configuration document.
//! - **Graph**: Referential-integrity and acyclicity validation.
//! - **Compile**: The single-pass entry point producing a compiled catalog.
//!
//! Compilation is a pure function over immutable inputs: no I/O, no clock,
//! no randomness. Identical inputs produce byte-identical catalogs.

pub mod builder;
pub mod compile;
pub mod external;
pub mod graph;
pub mod params;
pub mod platform;
pub mod render;
