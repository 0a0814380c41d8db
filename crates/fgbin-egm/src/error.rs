//! Error types for expression geometry parsing.

use thiserror::Error;

/// Errors that can occur when working with `.egm` files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (bad magic, truncated input).
    #[error("{0}")]
    Common(#[from] fgbin_common::Error),
}

impl Error {
    /// Whether the input is not an expression geometry file at all.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_format_error())
    }

    /// Whether the input ended before every declared mode was read.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for expression geometry operations.
pub type Result<T> = std::result::Result<T, Error>;
