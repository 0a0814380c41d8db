//! Error types for fgbin-common.

use thiserror::Error;

/// Common error type for fgbin operations.
#[derive(Debug, Error)]
pub enum Error {
    /// End of buffer reached while reading.
    #[error("unexpected end of buffer: needed {needed} bytes but only {available} available")]
    UnexpectedEof { needed: usize, available: usize },

    /// Invalid magic bytes encountered.
    #[error("invalid magic: expected {expected:?}, got {actual:?}")]
    InvalidMagic {
        expected: Vec<u8>,
        actual: Vec<u8>,
    },

    /// A length field held a value that cannot describe a byte count.
    #[error("invalid length field: {0}")]
    InvalidLength(i64),

    /// Vector math on a zero-norm vector or a zero dot product.
    #[error("degenerate vector: {0}")]
    DegenerateVector(&'static str),

    /// Two vectors that must share a dimension did not.
    #[error("vector dimension mismatch: {left} vs {right}")]
    DimensionMismatch { left: usize, right: usize },

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error means the input is not the expected file type.
    pub fn is_format_error(&self) -> bool {
        matches!(self, Error::InvalidMagic { .. })
    }

    /// Whether this error means the input ended before a declared count was met.
    pub fn is_truncated(&self) -> bool {
        matches!(self, Error::UnexpectedEof { .. })
    }
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
