//! Utility modules for file operations and path handling.
//!
//! # Modules
//!
//! - [`files`]: Async page discovery and reading utilities
//! - [`paths`]: Path helpers (marker search, tilde expansion, slugs)

pub mod files;
pub mod paths;
