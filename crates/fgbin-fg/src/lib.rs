//! FaceGen face descriptor (`.fg`) reader and writer.
//!
//! A face descriptor stores one face as integer coefficients over the
//! statistical model's bases: symmetric shape (SS), asymmetric shape (SA),
//! symmetric texture (TS) and asymmetric texture (TA).
//!
//! # File Format
//!
//! All values are little-endian:
//! - 8 bytes: Magic (`FRFG0001`)
//! - 8 x u32: geometry basis version, texture basis version, SS, SA, TS, TA
//!   counts, a reserved zero, and the detail texture flag
//! - SS + SA + TS + TA x i16: the coefficient arrays, in that order
//!
//! Files written by this crate always declare 50/30/50/0 coefficients (see
//! [`DescriptorLayout`]); shorter inputs are zero-padded and longer inputs are
//! truncated with a warning.
//!
//! # Example
//!
//! ```no_run
//! use fgbin_fg::FaceDescriptor;
//!
//! let face = FaceDescriptor::open("face.fg")?;
//! println!("{} shape coefficients", face.symmetric_shape.len());
//!
//! let average = FaceDescriptor::new(vec![0; 50], vec![0; 30], vec![0; 50]);
//! average.write("average.fg")?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod descriptor;
mod error;

pub use descriptor::{encode, quantize_coefficients, DescriptorLayout, FaceDescriptor};
pub use error::{Error, Result};

/// Face descriptor magic bytes.
pub const FG_MAGIC: &[u8; 8] = b"FRFG0001";
