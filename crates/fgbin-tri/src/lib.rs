//! FaceGen triangle mesh (`.tri`) reader.
//!
//! A `.tri` file holds the base mesh of a face model: vertex positions,
//! triangle and quad faces, optional labels and texture coordinates, and a set
//! of differential morph targets.
//!
//! # File Format
//!
//! All values are little-endian:
//! - 8 bytes: Magic (`FRTRI` followed by three version bytes)
//! - 10 x u32: V, T, Q, LV, LS, X, ext, Md, Ms, K
//! - 16 reserved bytes
//! - (V + K) x `f32[3]` vertex positions
//! - T x `i32[3]` triangles, Q x `i32[4]` quads
//! - LV vertex labels, LS surface labels
//! - texture coordinates and per-face texture indices when `ext & 1` is set
//! - Md morph targets
//!
//! Anything after the morph targets (stat morphs, for instance) is kept as an
//! opaque trailer.
//!
//! # Example
//!
//! ```no_run
//! use fgbin_tri::TriMesh;
//!
//! let mesh = TriMesh::open("head.tri")?;
//! println!("{} vertices, {} morphs", mesh.vertex_count(), mesh.morphs.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod mesh;

pub use error::{Error, Result};
pub use mesh::{MorphDelta, MorphTarget, SurfaceLabel, TriMesh, VertexLabel};

/// Every mesh magic starts with these bytes; the remaining three are a
/// version tag.
pub const TRI_MAGIC_PREFIX: &[u8; 5] = b"FRTRI";
