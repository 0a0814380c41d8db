//! FaceGen control file (`.ctl`) reader and slider editor.
//!
//! Control files define named sliders: unit vectors over the face model's
//! shape and texture bases. This crate can parse them, look sliders up by
//! label, and insert new sliders while keeping every untouched byte of the
//! file intact.
//!
//! # File Format
//!
//! All values are little-endian:
//! - 8 bytes: Magic (`FRCTL001`)
//! - 6 x u32: geometry basis version, texture basis version, and the basis
//!   dimensions GS, GA, TS, TA
//! - For each category in the order GS, GA, TS, TA:
//!   - u32: entry count
//!   - per entry: `f32[dim]` weights, u32 label length, label bytes
//! - Any remaining bytes are preserved as-is
//!
//! # Example
//!
//! ```no_run
//! use fgbin_ctl::{insert_slider, ControlFile, SliderKind};
//!
//! let ctl = ControlFile::open("si.ctl")?;
//! for (kind, slider) in ctl.iter_sliders() {
//!     println!("{} {}", kind, slider.label_str());
//! }
//!
//! let dim = ctl.basis_dim(SliderKind::GeometrySymmetric);
//! insert_slider("si.ctl", SliderKind::GeometrySymmetric, b"Wide jaw", &vec![0.1; dim])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod control;
mod error;
mod insert;
mod lookup;

pub use control::{ControlFile, SliderEntry, SliderKind};
pub use error::{Error, Result};
pub use insert::{insert_slider, insert_slider_bytes};
pub use lookup::{get_slider_vector, insert_orthogonal_slider, slider_exists, OrthogonalSlider};

/// Control file magic bytes.
pub const CTL_MAGIC: &[u8; 8] = b"FRCTL001";
