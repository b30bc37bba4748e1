//! Error types for TibiaDex.
//!
//! Library crates use [`TibiaDexError`] via `thiserror`.
//! The CLI wraps this with `color-eyre` for rich diagnostics.

use std::path::PathBuf;

/// Top-level error type for all TibiaDex operations.
#[derive(Debug, thiserror::Error)]
pub enum TibiaDexError {
    /// The requested character does not exist on the source site.
    #[error("character not found")]
    NotFound,

    /// An element, attribute, or pattern the page format assumes is missing.
    #[error("structural parse error: {message}")]
    StructuralParse { message: String },

    /// The raw input could not be turned into a navigable document.
    #[error("malformed document: {message}")]
    MalformedDocument { message: String },

    /// Configuration loading or validation error.
    #[error("config error: {message}")]
    Config { message: String },

    /// Filesystem I/O error.
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Convenience alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, TibiaDexError>;

impl TibiaDexError {
    /// Create a structural parse error from any displayable message.
    pub fn structural(msg: impl Into<String>) -> Self {
        Self::StructuralParse {
            message: msg.into(),
        }
    }

    /// Create a malformed-document error from any displayable message.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedDocument {
            message: msg.into(),
        }
    }

    /// Create a config error from any displayable message.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config {
            message: msg.into(),
        }
    }

    /// Wrap a `std::io::Error` with a path for context.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Whether this error means the character does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound)
    }
}
