//! Operations that turn other data into control file sliders.

use std::fs;
use std::path::Path;

use fgbin_common::fs::write_atomic;
use fgbin_common::linalg;
use fgbin_ctl::{insert_slider, insert_slider_bytes, ControlFile, SliderKind};
use fgbin_fg::FaceDescriptor;
use tracing::info;

use crate::table::SliderRow;
use crate::Result;

/// Normalize a weight vector to unit length, as stored in a control file.
pub fn normalized_weights(values: &[f64]) -> Result<Vec<f32>> {
    let unit = linalg::normalize(values)?;
    Ok(unit.into_iter().map(|x| x as f32).collect())
}

/// Insert a face's symmetric shape as a new GS slider.
///
/// The coefficients are normalized first. Without an explicit label the
/// slider is called `"Vector based on <fg path>"`. Returns the label used.
pub fn insert_slider_from_fg<P: AsRef<Path>, Q: AsRef<Path>>(
    ctl_path: P,
    fg_path: Q,
    label: Option<&str>,
) -> Result<String> {
    let ctl_path = ctl_path.as_ref();
    let fg_path = fg_path.as_ref();

    let face = FaceDescriptor::open(fg_path)?;
    let values: Vec<f64> = face.symmetric_shape.iter().map(|&c| c as f64).collect();
    let weights = normalized_weights(&values)?;

    let label = match label {
        Some(label) => label.to_string(),
        None => format!("Vector based on {}", fg_path.display()),
    };

    let kind = SliderKind::GeometrySymmetric;
    if ControlFile::open(ctl_path)?.find(kind, label.as_bytes()).is_some() {
        return Err(fgbin_ctl::Error::SliderExists { kind, label }.into());
    }

    insert_slider(ctl_path, kind, label.as_bytes(), &weights)?;
    Ok(label)
}

/// Insert a CSV slider row as a GS slider and a TS slider of the same name.
///
/// Both vectors are normalized and both inserts are applied in memory before
/// the file is replaced once, so the control file never holds half a pair.
pub fn insert_slider_row<P: AsRef<Path>>(ctl_path: P, row: &SliderRow) -> Result<()> {
    let ctl_path = ctl_path.as_ref();
    let geometry = normalized_weights(&row.geometry)?;
    let texture = normalized_weights(&row.texture)?;
    let label = row.label.as_bytes();

    let original = fs::read(ctl_path)?;
    let updated = insert_slider_bytes(&original, SliderKind::GeometrySymmetric, label, &geometry)?;
    let updated = insert_slider_bytes(&updated, SliderKind::TextureSymmetric, label, &texture)?;
    write_atomic(ctl_path, &updated)?;

    info!(label = %row.label, "inserted shape and texture sliders");
    Ok(())
}
