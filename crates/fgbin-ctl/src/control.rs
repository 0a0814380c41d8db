//! Control file data structures.
//!
//! A control file holds named sliders in four categories. Each slider is a
//! weight vector over one basis space, so its length is fixed by the basis
//! dimension declared in the header.

use std::fs;
use std::path::Path;
use std::str::FromStr;

use fgbin_common::{label_to_string, BinaryReader};
use tracing::debug;

use crate::{Error, Result, CTL_MAGIC};

/// Slider categories, in file order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[repr(u8)]
pub enum SliderKind {
    /// Symmetric geometry (shape).
    GeometrySymmetric = 0,
    /// Asymmetric geometry (shape).
    GeometryAsymmetric = 1,
    /// Symmetric texture.
    TextureSymmetric = 2,
    /// Asymmetric texture.
    TextureAsymmetric = 3,
}

impl SliderKind {
    /// Get all categories in the order they appear in a control file.
    pub const fn all() -> [SliderKind; 4] {
        [
            SliderKind::GeometrySymmetric,
            SliderKind::GeometryAsymmetric,
            SliderKind::TextureSymmetric,
            SliderKind::TextureAsymmetric,
        ]
    }

    /// Two-letter category code.
    pub const fn code(&self) -> &'static str {
        match self {
            SliderKind::GeometrySymmetric => "GS",
            SliderKind::GeometryAsymmetric => "GA",
            SliderKind::TextureSymmetric => "TS",
            SliderKind::TextureAsymmetric => "TA",
        }
    }

    pub(crate) const fn index(&self) -> usize {
        *self as usize
    }
}

impl FromStr for SliderKind {
    type Err = Error;

    /// Parse a category code. `SS` and `SA` are accepted as aliases for the
    /// geometry categories, matching `.fg` naming.
    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_uppercase().as_str() {
            "GS" | "SS" => Ok(SliderKind::GeometrySymmetric),
            "GA" | "SA" => Ok(SliderKind::GeometryAsymmetric),
            "TS" => Ok(SliderKind::TextureSymmetric),
            "TA" => Ok(SliderKind::TextureAsymmetric),
            _ => Err(Error::UnknownKind(s.to_string())),
        }
    }
}

impl std::fmt::Display for SliderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// A named slider.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct SliderEntry {
    /// Raw label bytes. No encoding is assumed.
    pub label: Vec<u8>,
    /// One weight per basis dimension.
    pub weights: Vec<f32>,
}

impl SliderEntry {
    /// Create a new slider entry.
    pub fn new(label: impl Into<Vec<u8>>, weights: Vec<f32>) -> Self {
        Self {
            label: label.into(),
            weights,
        }
    }

    /// The label as text, with invalid UTF-8 replaced.
    pub fn label_str(&self) -> String {
        label_to_string(&self.label)
    }

    /// Read an entry whose weight vector has `dim` elements.
    ///
    /// Format: `f32[dim]` weights, u32 label length, label bytes.
    pub fn read(reader: &mut BinaryReader<'_>, dim: usize) -> Result<Self> {
        let weights = reader.read_f32_vec(dim)?;
        let label = reader.read_prefixed_bytes()?.to_vec();
        Ok(Self { label, weights })
    }

    /// Append the on-disk form of this entry to `out`.
    pub fn write_to(&self, out: &mut Vec<u8>) {
        for weight in &self.weights {
            out.extend_from_slice(&weight.to_le_bytes());
        }
        out.extend_from_slice(&(self.label.len() as u32).to_le_bytes());
        out.extend_from_slice(&self.label);
    }
}

/// A FaceGen control file.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ControlFile {
    /// Geometry basis version from the header.
    pub geometry_basis_version: u32,
    /// Texture basis version from the header.
    pub texture_basis_version: u32,
    /// Basis dimension per category, indexed by [`SliderKind`].
    basis: [u32; 4],
    /// Sliders per category, in file order.
    sliders: [Vec<SliderEntry>; 4],
    /// Unmodelled bytes after the last category.
    trailing: Vec<u8>,
}

impl ControlFile {
    /// Create an empty control file with the given basis dimensions
    /// (`[GS, GA, TS, TA]`).
    pub fn new(geometry_basis_version: u32, texture_basis_version: u32, basis: [u32; 4]) -> Self {
        Self {
            geometry_basis_version,
            texture_basis_version,
            basis,
            sliders: Default::default(),
            trailing: Vec::new(),
        }
    }

    /// Read a control file from disk.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let data = fs::read(path)?;
        Self::parse(&data)
    }

    /// Parse a control file from bytes.
    ///
    /// Each category is preceded by its own entry count; the first count
    /// directly follows the header.
    pub fn parse(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader.expect_magic(CTL_MAGIC)?;

        let geometry_basis_version = reader.read_u32()?;
        let texture_basis_version = reader.read_u32()?;
        let mut basis = [0u32; 4];
        for dim in &mut basis {
            *dim = reader.read_u32()?;
        }

        let mut sliders: [Vec<SliderEntry>; 4] = Default::default();
        for kind in SliderKind::all() {
            let count = reader.read_u32()? as usize;
            let dim = basis[kind.index()] as usize;
            debug!(%kind, count, dim, "reading slider category");

            let entry_size = dim.saturating_mul(4).saturating_add(4);
            sliders[kind.index()] =
                reader.read_records(count, entry_size, |r| SliderEntry::read(r, dim))?;
        }

        Ok(Self {
            geometry_basis_version,
            texture_basis_version,
            basis,
            sliders,
            trailing: reader.remaining_bytes().to_vec(),
        })
    }

    /// Basis dimension declared for a category.
    pub fn basis_dim(&self, kind: SliderKind) -> usize {
        self.basis[kind.index()] as usize
    }

    /// Sliders of one category, in file order.
    pub fn sliders(&self, kind: SliderKind) -> &[SliderEntry] {
        &self.sliders[kind.index()]
    }

    /// Iterate over every slider with its category, in file order.
    pub fn iter_sliders(&self) -> impl Iterator<Item = (SliderKind, &SliderEntry)> {
        SliderKind::all()
            .into_iter()
            .flat_map(move |kind| self.sliders(kind).iter().map(move |s| (kind, s)))
    }

    /// Find the first slider of a category with the given label.
    pub fn find(&self, kind: SliderKind, label: &[u8]) -> Option<&SliderEntry> {
        self.sliders(kind).iter().find(|s| s.label == label)
    }

    /// Total number of sliders across all categories.
    pub fn slider_count(&self) -> usize {
        self.sliders.iter().map(Vec::len).sum()
    }

    /// Bytes following the last category, kept verbatim.
    pub fn trailing(&self) -> &[u8] {
        &self.trailing
    }

    /// Replace the trailing bytes.
    pub fn set_trailing(&mut self, trailing: Vec<u8>) {
        self.trailing = trailing;
    }

    /// Append a slider to the end of its category.
    pub fn push_slider(&mut self, kind: SliderKind, entry: SliderEntry) -> Result<()> {
        let expected = self.basis_dim(kind);
        if entry.weights.len() != expected {
            return Err(Error::SizeMismatch {
                kind,
                expected,
                actual: entry.weights.len(),
            });
        }
        self.sliders[kind.index()].push(entry);
        Ok(())
    }

    /// Convert to bytes for writing.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::new();
        bytes.extend_from_slice(CTL_MAGIC);
        bytes.extend_from_slice(&self.geometry_basis_version.to_le_bytes());
        bytes.extend_from_slice(&self.texture_basis_version.to_le_bytes());
        for dim in &self.basis {
            bytes.extend_from_slice(&dim.to_le_bytes());
        }

        for entries in &self.sliders {
            bytes.extend_from_slice(&(entries.len() as u32).to_le_bytes());
            for entry in entries {
                entry.write_to(&mut bytes);
            }
        }

        bytes.extend_from_slice(&self.trailing);
        bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ControlFile {
        let mut ctl = ControlFile::new(7, 8, [2, 1, 0, 3]);
        ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("Age", vec![0.5, 0.25]))
            .unwrap();
        ctl.push_slider(SliderKind::GeometryAsymmetric, SliderEntry::new("Tilt", vec![1.0]))
            .unwrap();
        ctl.push_slider(SliderKind::TextureSymmetric, SliderEntry::new("Flat", vec![]))
            .unwrap();
        ctl
    }

    #[test]
    fn test_kind_codes() {
        assert_eq!("SS".parse::<SliderKind>().unwrap(), SliderKind::GeometrySymmetric);
        assert_eq!("ga".parse::<SliderKind>().unwrap(), SliderKind::GeometryAsymmetric);
        assert_eq!("TA".parse::<SliderKind>().unwrap(), SliderKind::TextureAsymmetric);
        assert!("XX".parse::<SliderKind>().is_err());
        assert_eq!(SliderKind::TextureSymmetric.to_string(), "TS");
    }

    #[test]
    fn test_parse_to_bytes_roundtrip() {
        let mut ctl = sample();
        ctl.set_trailing(vec![0xDE, 0xAD]);

        let bytes = ctl.to_bytes();
        let parsed = ControlFile::parse(&bytes).unwrap();

        assert_eq!(parsed, ctl);
        assert_eq!(parsed.to_bytes(), bytes);
    }

    #[test]
    fn test_iter_sliders_file_order() {
        let ctl = sample();
        let labels: Vec<_> = ctl
            .iter_sliders()
            .map(|(kind, s)| format!("{} {}", kind, s.label_str()))
            .collect();

        assert_eq!(labels, vec!["GS Age", "GA Tilt", "TS Flat"]);
        assert_eq!(ctl.slider_count(), 3);
    }

    #[test]
    fn test_push_slider_checks_dimension() {
        let mut ctl = sample();
        let err = ctl
            .push_slider(SliderKind::TextureAsymmetric, SliderEntry::new("Bad", vec![1.0]))
            .unwrap_err();

        assert!(matches!(
            err,
            Error::SizeMismatch {
                expected: 3,
                actual: 1,
                ..
            }
        ));
    }

    #[test]
    fn test_find() {
        let ctl = sample();
        assert_eq!(
            ctl.find(SliderKind::GeometrySymmetric, b"Age").map(|s| s.weights.clone()),
            Some(vec![0.5, 0.25])
        );
        assert!(ctl.find(SliderKind::GeometryAsymmetric, b"Age").is_none());
    }
}
