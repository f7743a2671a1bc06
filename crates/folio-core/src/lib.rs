//! Shared error type, configuration trait, and file utilities for Folio.
//!
//! This crate provides the foundational pieces used across all Folio crates.
//! It has no internal Folio dependencies.
//!
//! # Modules
//!
//! - [`error`]: Error types and Result alias
//! - [`traits`]: Configuration abstraction shared by the CLI and site build
//! - [`util`]: Async file discovery and path helpers

pub mod error;
pub mod traits;
pub mod util;

// Re-export key types at crate root for convenience
pub use error::{Error, Result};
pub use traits::ConfigProvider;
