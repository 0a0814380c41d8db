//! Slider lookup and derived-slider insertion.

use std::path::Path;

use fgbin_common::linalg;
use tracing::info;

use crate::{insert_slider, ControlFile, Error, Result, SliderKind};

/// A slider derived by [`insert_orthogonal_slider`].
#[derive(Debug, Clone, PartialEq)]
pub struct OrthogonalSlider {
    /// Label the slider was inserted under.
    pub label: String,
    /// Blend weights applied to the first and second source slider.
    pub weights: [f64; 2],
    /// The inserted unit vector.
    pub vector: Vec<f32>,
}

/// Get the weight vector of a slider by label.
pub fn get_slider_vector<P: AsRef<Path>>(path: P, label: &str, kind: SliderKind) -> Result<Vec<f32>> {
    let ctl = ControlFile::open(path)?;
    ctl.find(kind, label.as_bytes())
        .map(|s| s.weights.clone())
        .ok_or_else(|| Error::SliderNotFound {
            kind,
            label: label.to_string(),
        })
}

/// Check whether a slider with the given label exists.
pub fn slider_exists<P: AsRef<Path>>(path: P, label: &str, kind: SliderKind) -> Result<bool> {
    let ctl = ControlFile::open(path)?;
    Ok(ctl.find(kind, label.as_bytes()).is_some())
}

/// Insert a slider orthogonal to `first` within the plane of `first` and
/// `second`.
///
/// Without an explicit label the slider is named after its derivation, e.g.
/// `"B orthogonal to A (0.7071 * A + -0.7071 * B)"`.
///
/// The weights in the label apply to the *normalized* sources. For sliders
/// that are already unit length (the usual case) they are the blend of the
/// stored vectors; for non-unit sources they differ from a blend of the raw
/// stored weights.
pub fn insert_orthogonal_slider<P: AsRef<Path>>(
    path: P,
    kind: SliderKind,
    first: &str,
    second: &str,
    label: Option<&str>,
) -> Result<OrthogonalSlider> {
    let path = path.as_ref();
    let ctl = ControlFile::open(path)?;

    let lookup = |name: &str| {
        ctl.find(kind, name.as_bytes())
            .map(|s| to_f64(&s.weights))
            .ok_or_else(|| Error::SliderNotFound {
                kind,
                label: name.to_string(),
            })
    };
    let v1 = lookup(first)?;
    let v2 = lookup(second)?;

    let result = linalg::orthogonalize(&v1, &v2)?;
    let [w0, w1] = result.weights;
    info!(
        "{} orthogonal to {} ({:.4} * {} + {:.4} * {})",
        second, first, w0, first, w1, second
    );

    let label = match label {
        Some(label) => label.to_string(),
        None => format!(
            "{} orthogonal to {} ({:.4} * {} + {:.4} * {})",
            second, first, w0, first, w1, second
        ),
    };
    if ctl.find(kind, label.as_bytes()).is_some() {
        return Err(Error::SliderExists { kind, label });
    }

    let vector: Vec<f32> = result.vector.iter().map(|&x| x as f32).collect();
    insert_slider(path, kind, label.as_bytes(), &vector)?;

    Ok(OrthogonalSlider {
        label,
        weights: result.weights,
        vector,
    })
}

fn to_f64(weights: &[f32]) -> Vec<f64> {
    weights.iter().map(|&w| w as f64).collect()
}
