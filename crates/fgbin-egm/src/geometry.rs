//! Expression geometry decoding.

use std::fs;
use std::path::Path;

use fgbin_common::BinaryReader;
use tracing::debug;
use zerocopy::byteorder::{LE, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Result, EGM_MAGIC};

#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct EgmHeader {
    vertex_count: U32<LE>,
    symmetric_count: U32<LE>,
    asymmetric_count: U32<LE>,
    geometry_basis_version: U32<LE>,
    reserved: [u8; 40],
}

/// One shape mode: a scale shared by every vertex and a quantized delta per
/// vertex.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionMode {
    pub scale: f32,
    pub deltas: Vec<[i16; 3]>,
}

impl ExpressionMode {
    /// Per-vertex offsets with the scale applied.
    pub fn displacements(&self) -> Vec<[f32; 3]> {
        self.deltas
            .iter()
            .map(|d| d.map(|c| c as f32 * self.scale))
            .collect()
    }

    fn read(reader: &mut BinaryReader<'_>, vertex_count: usize) -> Result<Self> {
        let scale = reader.read_f32()?;
        let deltas = reader.read_records(vertex_count, 6, |r| r.read_i16x3())?;
        Ok(Self { scale, deltas })
    }
}

/// A decoded `.egm` file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExpressionGeometry {
    pub vertex_count: u32,
    pub geometry_basis_version: u32,
    pub symmetric: Vec<ExpressionMode>,
    pub asymmetric: Vec<ExpressionMode>,
}

impl ExpressionGeometry {
    /// Read expression geometry from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse expression geometry from bytes.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(EGM_MAGIC)?;

        let header: EgmHeader = reader.read_struct()?;
        let v = header.vertex_count.get() as usize;
        let s = header.symmetric_count.get() as usize;
        let a = header.asymmetric_count.get() as usize;
        debug!(vertices = v, symmetric = s, asymmetric = a, "reading expression geometry");

        let mode_size = v.saturating_mul(6).saturating_add(4);
        let symmetric = reader.read_records(s, mode_size, |r| ExpressionMode::read(r, v))?;
        let asymmetric = reader.read_records(a, mode_size, |r| ExpressionMode::read(r, v))?;

        Ok(Self {
            vertex_count: header.vertex_count.get(),
            geometry_basis_version: header.geometry_basis_version.get(),
            symmetric,
            asymmetric,
        })
    }

    /// Offset every vertex of `base` by the coefficient-weighted sum of the
    /// symmetric and asymmetric modes.
    ///
    /// Missing coefficients count as zero; extra ones are ignored.
    pub fn apply(&self, base: &[[f32; 3]], symmetric: &[f32], asymmetric: &[f32]) -> Vec<[f32; 3]> {
        let mut out = base.to_vec();
        let weighted = self
            .symmetric
            .iter()
            .zip(symmetric)
            .chain(self.asymmetric.iter().zip(asymmetric));
        for (mode, &coefficient) in weighted {
            let factor = mode.scale * coefficient;
            for (vertex, delta) in out.iter_mut().zip(&mode.deltas) {
                for (c, &d) in vertex.iter_mut().zip(delta) {
                    *c += d as f32 * factor;
                }
            }
        }
        out
    }
}
