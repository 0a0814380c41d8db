//! fgbin - FaceGen binary format toolkit.
//!
//! This crate provides a unified interface to the fgbin crates and the
//! operations that span more than one format.
//!
//! # Crates
//!
//! - [`fgbin_common`] - Common utilities (binary reading and writing, vector math)
//! - [`fgbin_fg`] - Face descriptor (`.fg`) reading and writing
//! - [`fgbin_ctl`] - Control file (`.ctl`) parsing and slider insertion
//! - [`fgbin_tri`] - Triangle mesh (`.tri`) parsing
//! - [`fgbin_egm`] - Expression geometry (`.egm`) parsing
//!
//! # Example
//!
//! ```no_run
//! use fgbin::prelude::*;
//!
//! // Turn a face into a shape slider
//! let label = fgbin::insert_slider_from_fg("si.ctl", "average.fg", None)?;
//!
//! let ctl = ControlFile::open("si.ctl")?;
//! assert!(ctl.find(SliderKind::GeometrySymmetric, label.as_bytes()).is_some());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod sliders;
pub mod table;

// Re-export all sub-crates
pub use fgbin_common as common;
pub use fgbin_ctl as ctl;
pub use fgbin_egm as egm;
pub use fgbin_fg as fg;
pub use fgbin_tri as tri;

pub use error::{Error, Result};
pub use sliders::{insert_slider_from_fg, insert_slider_row, normalized_weights};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use fgbin_common::{linalg, BinaryReader, BinaryWriter};
    pub use fgbin_ctl::{insert_orthogonal_slider, insert_slider, ControlFile, SliderEntry, SliderKind};
    pub use fgbin_egm::{ExpressionGeometry, ExpressionMode};
    pub use fgbin_fg::{DescriptorLayout, FaceDescriptor};
    pub use fgbin_tri::{MorphTarget, TriMesh};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
