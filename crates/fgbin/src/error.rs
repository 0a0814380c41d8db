//! Errors for cross-format operations and CSV conversion.

use thiserror::Error;

/// Errors raised by the facade crate.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Common(#[from] fgbin_common::Error),

    #[error("{0}")]
    Fg(#[from] fgbin_fg::Error),

    #[error("{0}")]
    Ctl(#[from] fgbin_ctl::Error),

    /// A CSV row has the wrong number of values.
    #[error("row has {actual} values, expected {expected}")]
    RowLength { expected: &'static str, actual: usize },

    /// A CSV cell is not a number.
    #[error("column {column}: invalid number {value:?}")]
    InvalidNumber { column: usize, value: String },

    /// A CSV row has no name or label cell.
    #[error("row is empty")]
    EmptyRow,
}

impl Error {
    /// Whether an underlying file had the wrong magic.
    pub fn is_format_error(&self) -> bool {
        match self {
            Error::Common(e) => e.is_format_error(),
            Error::Fg(e) => e.is_format_error(),
            Error::Ctl(e) => e.is_format_error(),
            _ => false,
        }
    }

    /// Whether an underlying file ended early.
    pub fn is_truncated(&self) -> bool {
        match self {
            Error::Common(e) => e.is_truncated(),
            Error::Fg(e) => e.is_truncated(),
            Error::Ctl(e) => e.is_truncated(),
            _ => false,
        }
    }
}

/// Result type for facade operations.
pub type Result<T> = std::result::Result<T, Error>;
