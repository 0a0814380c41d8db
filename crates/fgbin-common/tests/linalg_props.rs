//! Property-based tests for slider vector math using the `proptest` crate.

use proptest::prelude::*;

use fgbin_common::linalg::{dot, norm, normalize, orthogonalize};

// ---------------------------------------------------------------------------
// Strategy helpers
// ---------------------------------------------------------------------------

/// Arbitrary coefficient vector in the dimension of a symmetric shape basis.
fn arb_basis_vector() -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(-10.0f64..10.0, 50)
}

const NORM_TOL: f64 = 1e-6;
const ORTHO_TOL: f64 = 1e-5;

// ---------------------------------------------------------------------------
// 1. normalize yields unit length for any non-zero vector
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn normalize_yields_unit_length(v in arb_basis_vector()) {
        prop_assume!(norm(&v) > 1e-9);
        let unit = normalize(&v).unwrap();
        prop_assert!((norm(&unit) - 1.0).abs() < NORM_TOL,
            "|normalize(v)| = {}", norm(&unit));
    }
}

// ---------------------------------------------------------------------------
// 2. orthogonalize(v1, v2) is orthogonal to v1 and has unit length
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn orthogonalize_is_orthogonal_to_first(
        v1 in arb_basis_vector(),
        v2 in arb_basis_vector(),
    ) {
        prop_assume!(norm(&v1) > 1e-6 && norm(&v2) > 1e-6);
        let cos = dot(&v1, &v2).unwrap() / (norm(&v1) * norm(&v2));
        // near-parallel inputs leave no plane to work in
        prop_assume!(cos.abs() > 1e-3 && cos.abs() < 0.999);

        let result = orthogonalize(&v1, &v2).unwrap();
        let unit_v1 = normalize(&v1).unwrap();
        let d = dot(&result.vector, &unit_v1).unwrap();

        prop_assert!(d.abs() < ORTHO_TOL, "orthovec . v1 = {}", d);
        prop_assert!((norm(&result.vector) - 1.0).abs() < NORM_TOL);
        prop_assert!((norm(&result.weights) - 1.0).abs() < NORM_TOL);
    }
}

// ---------------------------------------------------------------------------
// 3. zero vectors are reported, never turned into NaN
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn zero_vector_is_degenerate(len in 1usize..64) {
        let zero = vec![0.0; len];
        prop_assert!(normalize(&zero).is_err());
        prop_assert!(orthogonalize(&zero, &vec![1.0; len]).is_err());
    }
}
