//! Error types for mesh parsing.

use thiserror::Error;

/// Errors that can occur when working with `.tri` files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (bad magic, truncated input, negative length).
    #[error("{0}")]
    Common(#[from] fgbin_common::Error),
}

impl Error {
    /// Whether the input is not a mesh file at all.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_format_error())
    }

    /// Whether the input ended before a declared section was complete.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for mesh operations.
pub type Result<T> = std::result::Result<T, Error>;
