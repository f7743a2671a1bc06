//! Error types for Folio operations.
//!
//! This module provides a common `Error` type and `Result<T>` alias used across
//! all Folio crates. Uses `thiserror` for derive macros.
//!
//! The only error the page assembler itself raises is
//! [`Error::InvalidMetadata`]; the remaining variants belong to the loading,
//! rendering, and configuration layers around it.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in Folio operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error, optionally tagged with the path being accessed.
    #[error("I/O error{}: {source}", display_path(.path))]
    Io {
        /// Path involved in the failed operation, if known.
        path: Option<PathBuf>,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Content not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A required metadata field is missing or empty.
    #[error("Invalid metadata: `{field}` {reason}")]
    InvalidMetadata {
        /// Name of the offending field.
        field: &'static str,
        /// What is wrong with it.
        reason: String,
    },

    /// Frontmatter could not be located or parsed.
    #[error("Frontmatter error: {0}")]
    Frontmatter(String),

    /// A renderer failed to produce output.
    #[error("Render error: {0}")]
    Render(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Site validation reported errors.
    #[error("Validation failed: {0}")]
    Validation(String),
}

impl Error {
    /// Wrap an I/O error without path context.
    pub fn io(source: std::io::Error) -> Self {
        Self::Io { path: None, source }
    }

    /// Wrap an I/O error with the path that caused it.
    pub fn io_with_path(source: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::Io {
            path: Some(path.as_ref().to_path_buf()),
            source,
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid metadata error for `field`.
    pub fn invalid_metadata(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidMetadata {
            field,
            reason: reason.into(),
        }
    }

    /// Create a frontmatter error.
    pub fn frontmatter(msg: impl Into<String>) -> Self {
        Self::Frontmatter(msg.into())
    }

    /// Create a render error.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Whether this is an [`Error::InvalidMetadata`].
    pub fn is_invalid_metadata(&self) -> bool {
        matches!(self, Self::InvalidMetadata { .. })
    }
}

impl From<std::io::Error> for Error {
    fn from(source: std::io::Error) -> Self {
        Self::io(source)
    }
}

fn display_path(path: &Option<PathBuf>) -> String {
    path.as_ref()
        .map(|p| format!(" at {}", p.display()))
        .unwrap_or_default()
}

/// Result type alias using Folio's Error type.
pub type Result<T> = std::result::Result<T, Error>;
