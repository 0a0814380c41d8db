//! Vector math used to derive new slider directions.
//!
//! Sliders are unit vectors in a basis space. New sliders are derived by
//! normalizing a coefficient vector or by orthogonalizing one slider against
//! another within the plane the two span.

use crate::{Error, Result};

/// The result of [`orthogonalize`].
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Orthogonalized {
    /// Unit vector orthogonal to the first input.
    pub vector: Vec<f64>,
    /// Normalized blend weights applied to the first and second input.
    pub weights: [f64; 2],
}

/// Dot product of two equal-length vectors.
pub fn dot(a: &[f64], b: &[f64]) -> Result<f64> {
    if a.len() != b.len() {
        return Err(Error::DimensionMismatch {
            left: a.len(),
            right: b.len(),
        });
    }
    Ok(a.iter().zip(b).map(|(x, y)| x * y).sum())
}

/// Euclidean norm.
pub fn norm(v: &[f64]) -> f64 {
    v.iter().map(|x| x * x).sum::<f64>().sqrt()
}

/// Scale `v` to unit length.
///
/// A zero-norm vector has no direction and fails with
/// [`Error::DegenerateVector`].
pub fn normalize(v: &[f64]) -> Result<Vec<f64>> {
    let length = norm(v);
    if length == 0.0 || !length.is_finite() {
        return Err(Error::DegenerateVector("vector has zero or non-finite norm"));
    }
    Ok(v.iter().map(|x| x / length).collect())
}

/// Orthogonalize `v2` against `v1` within the plane spanned by both.
///
/// Both inputs are first scaled to unit length. The blend weights are then
/// `normalize([1, -1 / (v1 . v2)])` and the result is
/// `normalize(w0 * v1 + w1 * v2)`, which is orthogonal to `v1` for any input
/// scale.
pub fn orthogonalize(v1: &[f64], v2: &[f64]) -> Result<Orthogonalized> {
    if v1.len() != v2.len() {
        return Err(Error::DimensionMismatch {
            left: v1.len(),
            right: v2.len(),
        });
    }
    let v1 = &normalize(v1).map_err(|_| Error::DegenerateVector("input vector has zero norm"))?;
    let v2 = &normalize(v2).map_err(|_| Error::DegenerateVector("input vector has zero norm"))?;

    let d = dot(v1, v2)?;
    if d == 0.0 {
        return Err(Error::DegenerateVector("input vectors have zero dot product"));
    }

    let w = normalize(&[1.0, -1.0 / d])?;
    let weights = [w[0], w[1]];

    let blended: Vec<f64> = v1
        .iter()
        .zip(v2)
        .map(|(a, b)| weights[0] * a + weights[1] * b)
        .collect();

    Ok(Orthogonalized {
        vector: normalize(&blended)?,
        weights,
    })
}
