//! Reference value tests.
//!
//! Published matrices and curve values, checked through the public API of
//! the math, primaries and transfer crates. Matrix agreement is measured as
//! bits of precision, `-log2(inf_norm(actual - expected))`.

use ccm_math::{precision_bits, Mat3};

/// BT.709 to BT.2020 linear RGB, ITU-R BT.2087 Table 2.
pub const BT709_TO_BT2020: Mat3 = Mat3::from_rows([
    [0.6274, 0.3293, 0.0433],
    [0.0691, 0.9195, 0.0114],
    [0.0164, 0.0880, 0.8956],
]);

/// Bradford D65 to D50, as published by B. Lindbloom.
pub const BRADFORD_D65_TO_D50: Mat3 = Mat3::from_rows([
    [1.0478112, 0.0228866, -0.0501270],
    [0.0295424, 0.9904844, -0.0170491],
    [-0.0092345, 0.0150436, 0.7521316],
]);

/// Bits of agreement between two matrices.
pub fn matrix_precision(actual: &Mat3, expected: &Mat3) -> f32 {
    precision_bits((*actual - *expected).inf_norm())
}

/// Evenly spaced samples of `[0, 1]`, both ends included.
pub fn ramp(n: usize) -> Vec<f32> {
    (0..n).map(|i| i as f32 / (n - 1) as f32).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ccm_core::CIExy;
    use ccm_lut::{find_neighbors, inverse_evaluate_lut1d, Lut1D};
    use ccm_math::{bradford_adaptation, Vec3};
    use ccm_primaries::{gamut_to_gamut_matrix, normalized_primary_matrix, NamedPrimaries, NpmDirection};
    use ccm_transfer::ToneCurve;

    #[test]
    fn test_bt709_to_bt2020() {
        let m = gamut_to_gamut_matrix(
            &NamedPrimaries::Srgb.gamut(),
            &NamedPrimaries::Bt2020.gamut(),
            false,
        )
        .unwrap();
        // table is given to 4 decimals
        assert!(matrix_precision(&m, &BT709_TO_BT2020) >= 11.0);
    }

    #[test]
    fn test_bradford_from_chromaticities() {
        // xy white points differ from the published XYZ whites in the 4th
        // decimal, which caps agreement just under 12 bits
        let m = bradford_adaptation(CIExy::D65, CIExy::D50).unwrap();
        let bits = matrix_precision(&m, &BRADFORD_D65_TO_D50);
        assert!(bits >= 11.0, "{} bits", bits);
    }

    #[test]
    fn test_npm_white_for_every_named_set() {
        for p in NamedPrimaries::ALL {
            let g = p.gamut();
            let white = Vec3::from_array(g.white_point.to_xyz().unwrap());
            let fwd = normalized_primary_matrix(&g, NpmDirection::Forward).unwrap();
            let inv = normalized_primary_matrix(&g, NpmDirection::Inverse).unwrap();

            let err = (fwd * Vec3::ONE - white).abs().max_element();
            assert!(precision_bits(err.max(f32::MIN_POSITIVE)) >= 18.0, "{}: {}", p, err);
            let err = (inv * white - Vec3::ONE).abs().max_element();
            assert!(precision_bits(err.max(f32::MIN_POSITIVE)) >= 18.0, "{}: {}", p, err);
        }
    }

    #[test]
    fn test_curve_reference_points() {
        // 100 cd/m² in PQ
        assert_abs_diff_eq!(ToneCurve::St2084PqEotf.apply(0.508078).unwrap(), 0.01, epsilon = 1e-5);
        assert_abs_diff_eq!(ToneCurve::HlgOetf.apply(1.0 / 12.0).unwrap(), 0.5, epsilon = 1e-6);
        assert_abs_diff_eq!(ToneCurve::SrgbEotf.apply(0.5).unwrap(), 0.214041, epsilon = 1e-5);
        assert!(ToneCurve::Power22Eotf.apply(1.5).is_err());
    }

    #[test]
    fn test_find_neighbors_table() {
        let lut = [0.0, 2.0, 3.0, 6.0, 9.0, 12.0, 15.0, 16.0, 20.0, 25.0];
        for (value, expected) in [
            (0.0, (0, 1)),
            (25.0, (8, 9)),
            (6.0, (2, 3)),
            (10.0, (4, 5)),
            (-3.0, (0, 1)),
            (99.0, (8, 9)),
        ] {
            assert_eq!(find_neighbors(&lut, value).unwrap(), expected, "value {}", value);
        }
    }

    #[test]
    fn test_lut_inverse_recovers_input() {
        for curve in [ToneCurve::Power22Eotf, ToneCurve::Power22EotfInverse] {
            let lut = Lut1D::from_curve(curve, 1024).unwrap();
            // offsets keep the inputs off the sample grid
            for t in ramp(97).into_iter().map(|t| (t * 0.98 + 0.0101).min(1.0)) {
                let y = curve.apply(t).unwrap();
                let back = inverse_evaluate_lut1d(lut.as_slice(), y).unwrap();
                assert_abs_diff_eq!(back, t, epsilon = 1e-3);
            }
        }
    }

    #[test]
    fn test_ramp() {
        let r = ramp(5);
        assert_eq!(r, vec![0.0, 0.25, 0.5, 0.75, 1.0]);
    }
}
