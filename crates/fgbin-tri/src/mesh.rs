//! Mesh data structures and decoding.

use std::fs;
use std::path::Path;

use fgbin_common::{label_to_string, BinaryReader};
use tracing::debug;
use zerocopy::byteorder::{LE, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Error, Result, TRI_MAGIC_PREFIX};

/// Header fields that follow the 8-byte magic.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct TriHeader {
    vertex_count: U32<LE>,
    triangle_count: U32<LE>,
    quad_count: U32<LE>,
    vertex_label_count: U32<LE>,
    surface_label_count: U32<LE>,
    texture_coord_count: U32<LE>,
    extension_flags: U32<LE>,
    morph_count: U32<LE>,
    stat_morph_count: U32<LE>,
    extra_vertex_count: U32<LE>,
    reserved: [u8; 16],
}

/// A label attached to a vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VertexLabel {
    pub vertex: i32,
    pub label: Vec<u8>,
}

/// A label attached to a point on a triangle.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SurfaceLabel {
    pub triangle: i32,
    pub point: [f32; 3],
    pub label: Vec<u8>,
}

/// One quantized vertex offset of a morph target.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MorphDelta {
    pub scale: f32,
    pub direction: [i16; 3],
}

impl MorphDelta {
    /// The real offset: each component multiplied by the scale.
    pub fn displacement(&self) -> [f32; 3] {
        self.direction.map(|c| c as f32 * self.scale)
    }
}

/// A named differential morph with one delta per base vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct MorphTarget {
    pub label: Vec<u8>,
    pub deltas: Vec<MorphDelta>,
}

impl MorphTarget {
    /// The label as text, with invalid UTF-8 replaced.
    pub fn label_str(&self) -> String {
        label_to_string(&self.label)
    }
}

/// A decoded FaceGen triangle mesh.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TriMesh {
    /// Full 8-byte magic, including the version tag.
    pub magic: [u8; 8],
    /// Base vertices followed by the extra (K) vertices.
    pub vertices: Vec<[f32; 3]>,
    pub triangles: Vec<[i32; 3]>,
    pub quads: Vec<[i32; 4]>,
    pub vertex_labels: Vec<VertexLabel>,
    pub surface_labels: Vec<SurfaceLabel>,
    pub texture_coords: Vec<[f32; 2]>,
    /// Present only when the file carries its own texture coordinate list.
    pub triangle_texture_indices: Vec<[i32; 3]>,
    pub quad_texture_indices: Vec<[i32; 4]>,
    pub morphs: Vec<MorphTarget>,
    /// Raw `ext` bitmask from the header.
    pub extension_flags: u32,
    /// Declared stat morph count. The stat morphs themselves stay in
    /// [`TriMesh::trailing`].
    pub stat_morph_count: u32,
    pub extra_vertex_count: u32,
    /// Bytes after the morph targets.
    pub trailing: Vec<u8>,
}

impl TriMesh {
    /// Texture coordinates are present when bit 0 of the extension flags is set.
    pub const EXT_TEXTURE: u32 = 1;

    /// Read a mesh from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a mesh from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        let magic: [u8; 8] = reader.read_array()?;
        if !magic.starts_with(TRI_MAGIC_PREFIX) {
            return Err(fgbin_common::Error::InvalidMagic {
                expected: TRI_MAGIC_PREFIX.to_vec(),
                actual: magic.to_vec(),
            }
            .into());
        }

        let header: TriHeader = reader.read_struct()?;
        let v = header.vertex_count.get() as usize;
        let t = header.triangle_count.get() as usize;
        let q = header.quad_count.get() as usize;
        let x = header.texture_coord_count.get() as usize;
        let ext = header.extension_flags.get();
        let extra = header.extra_vertex_count.get();
        debug!(
            vertices = v,
            extra,
            triangles = t,
            quads = q,
            texture_coords = x,
            ext,
            morphs = header.morph_count.get(),
            "reading mesh"
        );

        let vertices = reader.read_records(v.saturating_add(extra as usize), 12, |r| {
            r.read_f32xn::<3>()
        })?;
        let triangles = reader.read_records(t, 12, |r| r.read_i32xn::<3>())?;
        let quads = reader.read_records(q, 16, |r| r.read_i32xn::<4>())?;

        let vertex_labels =
            reader.read_records(header.vertex_label_count.get() as usize, 8, |r| {
                Ok::<_, Error>(VertexLabel {
                    vertex: r.read_i32()?,
                    label: r.read_signed_prefixed_bytes()?.to_vec(),
                })
            })?;
        let surface_labels =
            reader.read_records(header.surface_label_count.get() as usize, 20, |r| {
                Ok::<_, Error>(SurfaceLabel {
                    triangle: r.read_i32()?,
                    point: r.read_f32xn::<3>()?,
                    label: r.read_signed_prefixed_bytes()?.to_vec(),
                })
            })?;

        let mut texture_coords = Vec::new();
        let mut triangle_texture_indices = Vec::new();
        let mut quad_texture_indices = Vec::new();
        if ext & Self::EXT_TEXTURE != 0 {
            if x == 0 {
                // coordinates are per vertex, faces index them directly
                texture_coords = reader.read_records(v, 8, |r| r.read_f32xn::<2>())?;
            } else {
                texture_coords = reader.read_records(x, 8, |r| r.read_f32xn::<2>())?;
                triangle_texture_indices = reader.read_records(t, 12, |r| r.read_i32xn::<3>())?;
                quad_texture_indices = reader.read_records(q, 16, |r| r.read_i32xn::<4>())?;
            }
        }

        let morphs = reader.read_records(header.morph_count.get() as usize, 4, |r| {
            // label length is signed on disk
            let label = r.read_signed_prefixed_bytes()?.to_vec();
            let deltas = r.read_records(v, 10, |r| {
                Ok::<_, Error>(MorphDelta {
                    scale: r.read_f32()?,
                    direction: r.read_i16x3()?,
                })
            })?;
            Ok::<_, Error>(MorphTarget { label, deltas })
        })?;

        let trailing = reader.remaining_bytes().to_vec();
        if !trailing.is_empty() {
            debug!(bytes = trailing.len(), "keeping unparsed mesh trailer");
        }

        Ok(Self {
            magic,
            vertices,
            triangles,
            quads,
            vertex_labels,
            surface_labels,
            texture_coords,
            triangle_texture_indices,
            quad_texture_indices,
            morphs,
            extension_flags: ext,
            stat_morph_count: header.stat_morph_count.get(),
            extra_vertex_count: extra,
            trailing,
        })
    }

    /// Number of base vertices (V), excluding the extra vertices.
    pub fn vertex_count(&self) -> usize {
        self.vertices
            .len()
            .saturating_sub(self.extra_vertex_count as usize)
    }

    /// Find a morph target by label.
    pub fn morph(&self, label: &[u8]) -> Option<&MorphTarget> {
        self.morphs.iter().find(|m| m.label == label)
    }
}
