//! Face descriptor (`.fg`) handling.

use std::fs;
use std::path::Path;

use fgbin_common::BinaryReader;
use tracing::{debug, warn};
use zerocopy::byteorder::{LE, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

use crate::{Result, FG_MAGIC};

/// Fixed-width header that follows the magic.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
struct FgHeader {
    geometry_basis_version: U32<LE>,
    texture_basis_version: U32<LE>,
    symmetric_shape_count: U32<LE>,
    asymmetric_shape_count: U32<LE>,
    symmetric_texture_count: U32<LE>,
    asymmetric_texture_count: U32<LE>,
    /// Always zero in files seen so far.
    reserved: U32<LE>,
    detail_texture_flag: U32<LE>,
}

/// Basis versions and coefficient capacities used when writing `.fg` files.
///
/// The default matches the FaceGen 3.x statistical model: 50 symmetric shape,
/// 30 asymmetric shape and 50 symmetric texture coefficients.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DescriptorLayout {
    /// Geometry basis version stamped into the header.
    pub geometry_basis_version: u32,
    /// Texture basis version stamped into the header.
    pub texture_basis_version: u32,
    /// Symmetric shape capacity.
    pub symmetric_shape: usize,
    /// Asymmetric shape capacity.
    pub asymmetric_shape: usize,
    /// Symmetric texture capacity.
    pub symmetric_texture: usize,
}

impl DescriptorLayout {
    /// Geometry basis version written by default.
    pub const GEOMETRY_BASIS_VERSION: u32 = 2001060901;
    /// Texture basis version written by default.
    pub const TEXTURE_BASIS_VERSION: u32 = 81;
    /// Default symmetric shape capacity.
    pub const SYMMETRIC_SHAPE: usize = 50;
    /// Default asymmetric shape capacity.
    pub const ASYMMETRIC_SHAPE: usize = 30;
    /// Default symmetric texture capacity.
    pub const SYMMETRIC_TEXTURE: usize = 50;

    /// Total number of coefficients in the payload.
    pub const fn coefficient_count(&self) -> usize {
        self.symmetric_shape + self.asymmetric_shape + self.symmetric_texture
    }
}

impl Default for DescriptorLayout {
    fn default() -> Self {
        Self {
            geometry_basis_version: Self::GEOMETRY_BASIS_VERSION,
            texture_basis_version: Self::TEXTURE_BASIS_VERSION,
            symmetric_shape: Self::SYMMETRIC_SHAPE,
            asymmetric_shape: Self::ASYMMETRIC_SHAPE,
            symmetric_texture: Self::SYMMETRIC_TEXTURE,
        }
    }
}

/// A FaceGen face descriptor: one face as coefficients over the model bases.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FaceDescriptor {
    /// Geometry basis version from the header.
    pub geometry_basis_version: u32,
    /// Texture basis version from the header.
    pub texture_basis_version: u32,
    /// Symmetric shape coefficients (SS).
    pub symmetric_shape: Vec<i16>,
    /// Asymmetric shape coefficients (SA).
    pub asymmetric_shape: Vec<i16>,
    /// Symmetric texture coefficients (TS).
    pub symmetric_texture: Vec<i16>,
    /// Asymmetric texture coefficients (TA).
    pub asymmetric_texture: Vec<i16>,
    /// Non-zero when a detail texture image follows the coefficients.
    pub detail_texture_flag: u32,
}

impl FaceDescriptor {
    /// Create a descriptor from shape and texture coefficients using the
    /// default basis versions.
    ///
    /// Lengths are not checked here; [`encode_with`](Self::encode_with) fits
    /// every array to the layout capacities.
    pub fn new(
        symmetric_shape: Vec<i16>,
        asymmetric_shape: Vec<i16>,
        symmetric_texture: Vec<i16>,
    ) -> Self {
        Self {
            geometry_basis_version: DescriptorLayout::GEOMETRY_BASIS_VERSION,
            texture_basis_version: DescriptorLayout::TEXTURE_BASIS_VERSION,
            symmetric_shape,
            asymmetric_shape,
            symmetric_texture,
            asymmetric_texture: Vec::new(),
            detail_texture_flag: 0,
        }
    }

    /// Read a face descriptor from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a face descriptor from bytes.
    ///
    /// Any detail texture image after the coefficient arrays is ignored.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(FG_MAGIC)?;

        let header: FgHeader = reader.read_struct()?;
        let ss = header.symmetric_shape_count.get() as usize;
        let sa = header.asymmetric_shape_count.get() as usize;
        let ts = header.symmetric_texture_count.get() as usize;
        let ta = header.asymmetric_texture_count.get() as usize;
        debug!(ss, sa, ts, ta, "parsing face descriptor");

        Ok(Self {
            geometry_basis_version: header.geometry_basis_version.get(),
            texture_basis_version: header.texture_basis_version.get(),
            symmetric_shape: reader.read_i16_vec(ss)?,
            asymmetric_shape: reader.read_i16_vec(sa)?,
            symmetric_texture: reader.read_i16_vec(ts)?,
            asymmetric_texture: reader.read_i16_vec(ta)?,
            detail_texture_flag: header.detail_texture_flag.get(),
        })
    }

    /// Encode with the default layout.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.encode_with(&DescriptorLayout::default())
    }

    /// Encode with an explicit layout.
    ///
    /// The header always declares the layout capacities and an asymmetric
    /// texture count of zero. Short arrays are zero-padded and long arrays are
    /// truncated; both are logged as warnings. Basis versions come from the
    /// layout, not from `self`.
    pub fn encode_with(&self, layout: &DescriptorLayout) -> Vec<u8> {
        let header = FgHeader {
            geometry_basis_version: U32::new(layout.geometry_basis_version),
            texture_basis_version: U32::new(layout.texture_basis_version),
            symmetric_shape_count: U32::new(layout.symmetric_shape as u32),
            asymmetric_shape_count: U32::new(layout.asymmetric_shape as u32),
            symmetric_texture_count: U32::new(layout.symmetric_texture as u32),
            asymmetric_texture_count: U32::new(0),
            reserved: U32::new(0),
            detail_texture_flag: U32::new(0),
        };

        let mut output =
            Vec::with_capacity(FG_MAGIC.len() + header.as_bytes().len() + 2 * layout.coefficient_count());
        output.extend_from_slice(FG_MAGIC);
        output.extend_from_slice(header.as_bytes());

        for (name, values, capacity) in [
            ("symmetric shape", &self.symmetric_shape, layout.symmetric_shape),
            ("asymmetric shape", &self.asymmetric_shape, layout.asymmetric_shape),
            ("symmetric texture", &self.symmetric_texture, layout.symmetric_texture),
        ] {
            for value in fit_to_capacity(name, values, capacity) {
                output.extend_from_slice(&value.to_le_bytes());
            }
        }

        if !self.asymmetric_texture.is_empty() {
            warn!(
                count = self.asymmetric_texture.len(),
                "asymmetric texture coefficients are not written"
            );
        }

        output
    }

    /// Write to an `.fg` file using the default layout.
    pub fn write<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_bytes())?;
        Ok(())
    }
}

/// Encode shape and texture coefficients with the default layout.
pub fn encode(symmetric_shape: &[i16], asymmetric_shape: &[i16], symmetric_texture: &[i16]) -> Vec<u8> {
    FaceDescriptor::new(
        symmetric_shape.to_vec(),
        asymmetric_shape.to_vec(),
        symmetric_texture.to_vec(),
    )
    .to_bytes()
}

/// Round floating-point coefficients to the nearest i16, saturating at the
/// type bounds. NaN maps to zero.
pub fn quantize_coefficients(values: &[f64]) -> Vec<i16> {
    values
        .iter()
        .map(|v| v.round().clamp(i16::MIN as f64, i16::MAX as f64) as i16)
        .collect()
}

/// Pad with zeros or truncate `values` to exactly `capacity` entries.
fn fit_to_capacity(name: &str, values: &[i16], capacity: usize) -> Vec<i16> {
    match values.len() {
        n if n < capacity => {
            warn!("{} should have {} values, got {}; padding with zeros", name, capacity, n)
        }
        n if n > capacity => {
            warn!("{} should have {} values, got {}; truncating", name, capacity, n)
        }
        _ => {}
    }
    let mut fitted = values.to_vec();
    fitted.resize(capacity, 0);
    fitted
}
