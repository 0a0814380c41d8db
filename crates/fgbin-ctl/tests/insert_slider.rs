use std::fs;
use std::path::{Path, PathBuf};

use approx::assert_relative_eq;
use fgbin_ctl::{
    get_slider_vector, insert_orthogonal_slider, insert_slider, slider_exists, ControlFile, Error,
    SliderEntry, SliderKind,
};

const HEADER_LEN: usize = 8 + 6 * 4;

fn weights(len: usize, seed: f32) -> Vec<f32> {
    (0..len).map(|i| seed + i as f32 * 0.01).collect()
}

/// GS 50, GA 30, TS 50, TA 0 with two GS sliders, one entry in every other
/// non-empty category and an opaque trailer.
fn sample_control() -> ControlFile {
    let mut ctl = ControlFile::new(2001060901, 81, [50, 30, 50, 0]);
    ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("A", weights(50, 0.1)))
        .unwrap();
    ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("B", weights(50, -0.2)))
        .unwrap();
    // label bytes that are not valid UTF-8 must survive untouched
    ctl.push_slider(
        SliderKind::GeometryAsymmetric,
        SliderEntry::new(vec![b'L', 0xE9, b'v', 0x00], weights(30, 0.3)),
    )
    .unwrap();
    ctl.push_slider(SliderKind::TextureSymmetric, SliderEntry::new("Pale", weights(50, 0.4)))
        .unwrap();
    ctl.set_trailing(vec![0x01, 0x02, 0x03, 0xFF, 0x00, 0x7F]);
    ctl
}

fn write_sample(dir: &Path) -> PathBuf {
    let path = dir.join("si.ctl");
    fs::write(&path, sample_control().to_bytes()).unwrap();
    path
}

fn labels(ctl: &ControlFile, kind: SliderKind) -> Vec<String> {
    ctl.sliders(kind).iter().map(SliderEntry::label_str).collect()
}

#[test]
fn insert_symmetric_shape_slider_keeps_rest_identical() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let original = fs::read(&path).unwrap();

    let new_weights = weights(50, 0.9);
    insert_slider(&path, "SS".parse().unwrap(), b"C", &new_weights).unwrap();
    let updated = fs::read(&path).unwrap();

    let ctl = ControlFile::parse(&updated).unwrap();
    assert_eq!(labels(&ctl, SliderKind::GeometrySymmetric), vec!["C", "A", "B"]);
    assert_eq!(ctl.sliders(SliderKind::GeometrySymmetric)[0].weights, new_weights);

    // header unchanged, count bumped from 2 to 3
    assert_eq!(&updated[..HEADER_LEN], &original[..HEADER_LEN]);
    assert_eq!(&original[HEADER_LEN..HEADER_LEN + 4], &2u32.to_le_bytes());
    assert_eq!(&updated[HEADER_LEN..HEADER_LEN + 4], &3u32.to_le_bytes());

    // everything after the new entry is byte-identical to the original
    let new_entry_len = 50 * 4 + 4 + 1;
    assert_eq!(
        &updated[HEADER_LEN + 4 + new_entry_len..],
        &original[HEADER_LEN + 4..]
    );
    assert_eq!(updated.len(), original.len() + new_entry_len);
}

#[test]
fn insert_texture_slider_keeps_prefix_and_suffix() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let original = fs::read(&path).unwrap();
    let before = ControlFile::parse(&original).unwrap();

    insert_slider(&path, SliderKind::TextureSymmetric, b"Dark", &weights(50, -0.5)).unwrap();
    let updated = fs::read(&path).unwrap();
    let after = ControlFile::parse(&updated).unwrap();

    assert_eq!(labels(&after, SliderKind::TextureSymmetric), vec!["Dark", "Pale"]);
    for kind in [
        SliderKind::GeometrySymmetric,
        SliderKind::GeometryAsymmetric,
        SliderKind::TextureAsymmetric,
    ] {
        assert_eq!(after.sliders(kind), before.sliders(kind));
    }
    assert_eq!(after.trailing(), before.trailing());

    // bytes up to the TS count are untouched
    let ts_count_offset = HEADER_LEN
        + 4
        + 2 * (50 * 4 + 4 + 1)
        + 4
        + (30 * 4 + 4 + 4);
    assert_eq!(&updated[..ts_count_offset], &original[..ts_count_offset]);
    assert!(updated.ends_with(&original[ts_count_offset + 4..]));
}

#[test]
fn size_mismatch_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let original = fs::read(&path).unwrap();

    let err = insert_slider(&path, SliderKind::GeometrySymmetric, b"Short", &weights(49, 0.0))
        .unwrap_err();

    assert!(matches!(
        err,
        Error::SizeMismatch {
            expected: 50,
            actual: 49,
            ..
        }
    ));
    assert_eq!(fs::read(&path).unwrap(), original);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn bad_magic_leaves_file_unchanged() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("not.ctl");
    let mut bytes = sample_control().to_bytes();
    bytes[..8].copy_from_slice(b"FREGM002");
    fs::write(&path, &bytes).unwrap();

    let err = insert_slider(&path, SliderKind::GeometrySymmetric, b"C", &weights(50, 0.0))
        .unwrap_err();

    assert!(err.is_format_error());
    assert_eq!(fs::read(&path).unwrap(), bytes);
    assert!(ControlFile::open(&path).unwrap_err().is_format_error());
}

#[test]
fn lookup_by_label() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    assert_eq!(
        get_slider_vector(&path, "B", SliderKind::GeometrySymmetric).unwrap(),
        weights(50, -0.2)
    );
    assert!(slider_exists(&path, "Pale", "TS".parse().unwrap()).unwrap());
    assert!(!slider_exists(&path, "Pale", SliderKind::GeometrySymmetric).unwrap());
    assert!(matches!(
        get_slider_vector(&path, "Missing", SliderKind::GeometrySymmetric),
        Err(Error::SliderNotFound { .. })
    ));
}

#[test]
fn orthogonal_slider_is_inserted_first() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());

    let inserted =
        insert_orthogonal_slider(&path, SliderKind::GeometrySymmetric, "A", "B", None).unwrap();
    assert!(inserted.label.starts_with("B orthogonal to A ("));

    let ctl = ControlFile::open(&path).unwrap();
    let first = &ctl.sliders(SliderKind::GeometrySymmetric)[0];
    assert_eq!(first.label_str(), inserted.label);
    assert_eq!(first.weights, inserted.vector);

    let a = weights(50, 0.1);
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let dot: f32 = a.iter().zip(&first.weights).map(|(x, y)| x * y).sum::<f32>() / norm_a;
    assert_relative_eq!(dot, 0.0, epsilon = 1e-5);

    // the same derivation again collides with the label just inserted
    assert!(matches!(
        insert_orthogonal_slider(&path, SliderKind::GeometrySymmetric, "A", "B", None),
        Err(Error::SliderExists { .. })
    ));
}

#[test]
fn orthogonal_slider_missing_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path());
    let original = fs::read(&path).unwrap();

    let err = insert_orthogonal_slider(&path, SliderKind::GeometrySymmetric, "A", "Nope", Some("X"))
        .unwrap_err();

    assert!(matches!(err, Error::SliderNotFound { ref label, .. } if label == "Nope"));
    assert_eq!(fs::read(&path).unwrap(), original);
}

#[test]
fn orthogonal_label_uses_normalized_weights() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("small.ctl");
    let mut ctl = ControlFile::new(1, 1, [2, 0, 0, 0]);
    // (1, 0) and (0.6, 0.8) stored at lengths 2 and 5
    ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("A", vec![2.0, 0.0]))
        .unwrap();
    ctl.push_slider(SliderKind::GeometrySymmetric, SliderEntry::new("B", vec![3.0, 4.0]))
        .unwrap();
    fs::write(&path, ctl.to_bytes()).unwrap();

    let inserted =
        insert_orthogonal_slider(&path, SliderKind::GeometrySymmetric, "A", "B", None).unwrap();

    assert_eq!(inserted.label, "B orthogonal to A (0.5145 * A + -0.8575 * B)");
    assert_relative_eq!(inserted.vector[0], 0.0, epsilon = 1e-6);
    assert_relative_eq!(inserted.vector[1].abs(), 1.0, epsilon = 1e-6);
}
