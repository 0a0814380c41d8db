//! Common utilities for fgbin.
//!
//! This crate provides foundational types and utilities used across all fgbin crates:
//!
//! - [`BinaryReader`] - Bounds-checked little-endian reading from byte slices
//! - [`BinaryWriter`] - Little-endian writing to any `Write` sink
//! - [`linalg`] - Slider vector math (normalize, orthogonalize)
//! - [`fs`] - Staged (temp file + rename) file replacement

mod error;
mod reader;
mod writer;

pub mod fs;
pub mod linalg;

pub use error::{Error, Result};
pub use reader::BinaryReader;
pub use writer::BinaryWriter;

/// Render an opaque label as text, dropping trailing NUL padding.
///
/// Labels are stored as raw bytes with no declared encoding; invalid UTF-8 is
/// replaced rather than rejected.
pub fn label_to_string(label: &[u8]) -> String {
    let end = label
        .iter()
        .rposition(|&b| b != 0)
        .map_or(0, |i| i + 1);
    String::from_utf8_lossy(&label[..end]).into_owned()
}
