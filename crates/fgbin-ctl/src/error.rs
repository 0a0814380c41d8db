//! Error types for control file handling.

use thiserror::Error;

use crate::SliderKind;

/// Errors that can occur when working with `.ctl` files.
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Common library error (bad magic, truncated input, degenerate vector).
    #[error("{0}")]
    Common(#[from] fgbin_common::Error),

    /// A weight vector does not match the basis dimension of its category.
    #[error("{kind} slider needs {expected} weights, got {actual}")]
    SizeMismatch {
        kind: SliderKind,
        expected: usize,
        actual: usize,
    },

    /// No slider with the requested label exists.
    #[error("no {kind} slider labelled {label:?}")]
    SliderNotFound { kind: SliderKind, label: String },

    /// A slider with the requested label already exists.
    #[error("{kind} slider {label:?} already exists")]
    SliderExists { kind: SliderKind, label: String },

    /// Unrecognized slider category code.
    #[error("unknown slider category {0:?}: expected GS, GA, TS or TA")]
    UnknownKind(String),

    /// The category's entry count cannot grow any further.
    #[error("{0} slider count overflow")]
    CountOverflow(SliderKind),
}

impl Error {
    /// Whether the input is not a control file at all.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_format_error())
    }

    /// Whether the input ended before the declared entry counts.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::Common(e) if e.is_truncated())
    }
}

/// Result type for control file operations.
pub type Result<T> = std::result::Result<T, Error>;
