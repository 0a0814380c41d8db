//! Slider insertion.
//!
//! Insertion rewrites a control file without decoding the entries it does not
//! touch: every existing entry is copied through as raw bytes, so unusual
//! float bit patterns and label bytes survive exactly.

use std::fs;
use std::path::Path;

use fgbin_common::{fs::write_atomic, BinaryReader, BinaryWriter};
use tracing::info;

use crate::{Error, Result, SliderKind, CTL_MAGIC};

/// Insert a slider at the front of its category in an in-memory control file.
///
/// Returns the rewritten file. The header, the other categories and the
/// trailing bytes are copied verbatim; only the target category's count
/// changes and the new entry is placed before its existing entries.
///
/// Fails with [`Error::SizeMismatch`] if `weights` does not match the basis
/// dimension declared for `kind`.
pub fn insert_slider_bytes(
    original: &[u8],
    kind: SliderKind,
    label: &[u8],
    weights: &[f32],
) -> Result<Vec<u8>> {
    let mut reader = BinaryReader::new(original);
    reader.expect_magic(CTL_MAGIC)?;

    // geometry and texture basis versions
    reader.read_u32()?;
    reader.read_u32()?;
    let mut basis = [0usize; 4];
    for dim in &mut basis {
        *dim = reader.read_u32()? as usize;
    }

    let expected = basis[kind.index()];
    if weights.len() != expected {
        return Err(Error::SizeMismatch {
            kind,
            expected,
            actual: weights.len(),
        });
    }

    let added = weights.len() * 4 + 4 + label.len();
    let mut writer = BinaryWriter::with_capacity(original.len() + added);
    writer.write_bytes(&original[..reader.position()])?;

    for category in SliderKind::all() {
        let count = reader.read_u32()?;
        let entries = raw_entries(&mut reader, count, basis[category.index()])?;

        if category == kind {
            let count = count.checked_add(1).ok_or(Error::CountOverflow(kind))?;
            writer.write_u32(count)?;
            writer.write_f32_slice(weights)?;
            writer.write_prefixed_bytes(label)?;
        } else {
            writer.write_u32(count)?;
        }
        writer.write_bytes(entries)?;
    }

    writer.write_bytes(reader.remaining_bytes())?;
    Ok(writer.into_inner())
}

/// Insert a slider into a control file on disk.
///
/// The new contents are built fully in memory and then staged through a
/// temporary file, so the original is untouched on any error.
pub fn insert_slider<P: AsRef<Path>>(
    path: P,
    kind: SliderKind,
    label: &[u8],
    weights: &[f32],
) -> Result<()> {
    let path = path.as_ref();
    let original = fs::read(path)?;
    let updated = insert_slider_bytes(&original, kind, label, weights)?;
    write_atomic(path, &updated)?;

    info!(
        "inserted {} slider {:?} into {}",
        kind,
        String::from_utf8_lossy(label),
        path.display()
    );
    Ok(())
}

/// Skip over `count` entries and return the bytes they occupy.
fn raw_entries<'a>(reader: &mut BinaryReader<'a>, count: u32, dim: usize) -> Result<&'a [u8]> {
    let rest = reader.remaining_bytes();
    let start = reader.position();
    for _ in 0..count {
        reader.read_bytes(dim.saturating_mul(4))?;
        reader.read_prefixed_bytes()?;
    }
    Ok(&rest[..reader.position() - start])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{ControlFile, SliderEntry};

    fn sample() -> Vec<u8> {
        let mut ctl = ControlFile::new(1, 2, [2, 1, 1, 0]);
        ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("A", vec![1.0, 0.0]))
            .unwrap();
        ctl.push_slider(SliderKind::TextureSymmetric, SliderEntry::new("T", vec![0.5]))
            .unwrap();
        ctl.set_trailing(b"tail".to_vec());
        ctl.to_bytes()
    }

    #[test]
    fn test_insert_front_of_category() {
        let updated =
            insert_slider_bytes(&sample(), SliderKind::GeometrySymmetric, b"B", &[0.0, 1.0])
                .unwrap();
        let ctl = ControlFile::parse(&updated).unwrap();

        let labels: Vec<_> = ctl
            .sliders(SliderKind::GeometrySymmetric)
            .iter()
            .map(SliderEntry::label_str)
            .collect();
        assert_eq!(labels, vec!["B", "A"]);
        assert_eq!(ctl.trailing(), b"tail");
    }

    #[test]
    fn test_insert_into_empty_category() {
        let updated =
            insert_slider_bytes(&sample(), SliderKind::TextureAsymmetric, b"Empty", &[]).unwrap();
        let ctl = ControlFile::parse(&updated).unwrap();

        assert_eq!(ctl.sliders(SliderKind::TextureAsymmetric).len(), 1);
        assert_eq!(ctl.sliders(SliderKind::TextureSymmetric).len(), 1);
    }

    #[test]
    fn test_size_mismatch() {
        let err = insert_slider_bytes(&sample(), SliderKind::GeometryAsymmetric, b"X", &[1.0, 2.0])
            .unwrap_err();
        assert!(matches!(
            err,
            Error::SizeMismatch {
                kind: SliderKind::GeometryAsymmetric,
                expected: 1,
                actual: 2,
            }
        ));
    }

    #[test]
    fn test_truncated_input() {
        let bytes = sample();
        let err = insert_slider_bytes(
            &bytes[..bytes.len() - 10],
            SliderKind::GeometrySymmetric,
            b"B",
            &[0.0, 1.0],
        )
        .unwrap_err();
        assert!(err.is_truncated());
    }

    #[test]
    fn test_bad_magic() {
        let mut bytes = sample();
        bytes[..8].copy_from_slice(b"FRFG0001");
        let err = insert_slider_bytes(&bytes, SliderKind::GeometrySymmetric, b"B", &[0.0, 1.0])
            .unwrap_err();
        assert!(err.is_format_error());
    }
}
