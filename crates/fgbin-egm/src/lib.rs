//! FaceGen expression geometry (`.egm`) reader.
//!
//! An `.egm` file holds the statistical shape modes of a face model as
//! per-vertex offsets from the base mesh. Each mode is an independent basis
//! vector; a face's shape is the base mesh plus the coefficient-weighted sum
//! of the modes.
//!
//! # File Format
//!
//! All values are little-endian:
//! - 8 bytes: Magic (`FREGM002`)
//! - 4 x u32: vertex count V, symmetric mode count S, asymmetric mode count A,
//!   geometry basis version
//! - 40 reserved bytes
//! - S symmetric modes, then A asymmetric modes; each mode is an f32 scale
//!   followed by V x `i16[3]` deltas

mod error;
mod geometry;

pub use error::{Error, Result};
pub use geometry::{ExpressionGeometry, ExpressionMode};

/// Expression geometry magic bytes.
pub const EGM_MAGIC: &[u8; 8] = b"FREGM002";
