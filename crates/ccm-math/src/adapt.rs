//! Chromatic adaptation.
//!
//! Adapts XYZ tristimulus values seen under one reference white so that they
//! appear the same under another, using the Bradford cone response model:
//!
//! ```text
//! M = B^-1 * diag(B * W_dst / B * W_src) * B
//! ```
//!
//! # Usage
//!
//! ```rust
//! use ccm_core::CIExy;
//! use ccm_math::bradford_adaptation;
//!
//! let d65_to_d50 = bradford_adaptation(CIExy::D65, CIExy::D50).unwrap();
//! ```

use crate::{Mat3, Vec3};
use ccm_core::CIExy;

/// Bradford cone response matrix.
///
/// Lam, K.M. (1985). Metamerism and Colour Constancy.
pub const BRADFORD: Mat3 = Mat3::from_rows([
    [0.8951, 0.2664, -0.1614],
    [-0.7502, 1.7135, 0.0367],
    [0.0389, -0.0685, 1.0296],
]);

/// Computes the Bradford adaptation matrix between two XYZ white points.
///
/// Returns `None` when a white point maps to a zero cone response.
pub fn bradford_adaptation_xyz(src_white: Vec3, dst_white: Vec3) -> Option<Mat3> {
    let bradford_inv = BRADFORD.invert()?;

    let src_cone = BRADFORD * src_white;
    let dst_cone = BRADFORD * dst_white;
    if src_cone.x == 0.0 || src_cone.y == 0.0 || src_cone.z == 0.0 {
        return None;
    }

    let gain = dst_cone / src_cone;
    let scale = Mat3::diagonal(gain.x, gain.y, gain.z);

    let m = bradford_inv * scale * BRADFORD;
    m.is_finite().then_some(m)
}

/// Computes the Bradford adaptation matrix from `src_white` to `dst_white`.
///
/// The result maps XYZ under `src_white` to XYZ under `dst_white`. Returns
/// `None` for degenerate white points (`y == 0`).
pub fn bradford_adaptation(src_white: CIExy, dst_white: CIExy) -> Option<Mat3> {
    let src = Vec3::from_array(src_white.to_xyz().ok()?);
    let dst = Vec3::from_array(dst_white.to_xyz().ok()?);
    bradford_adaptation_xyz(src, dst)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precision_bits;

    // Lindbloom reference white points and matrix
    const D65_XYZ: Vec3 = Vec3::new(0.95047, 1.0, 1.08883);
    const D50_XYZ: Vec3 = Vec3::new(0.96422, 1.0, 0.82521);
    const D65_TO_D50: Mat3 = Mat3::from_rows([
        [1.0478112, 0.0228866, -0.0501270],
        [0.0295424, 0.9904844, -0.0170491],
        [-0.0092345, 0.0150436, 0.7521316],
    ]);

    #[test]
    fn test_bradford_reference() {
        let m = bradford_adaptation_xyz(D65_XYZ, D50_XYZ).unwrap();
        let err = (m - D65_TO_D50).inf_norm();
        assert!(precision_bits(err) >= 13.0, "error {} ({} bits)", err, precision_bits(err));
    }

    // same construction from the xy whites of CIExy::D65 and CIExy::D50,
    // evaluated in exact rational arithmetic
    const D65_TO_D50_XY: Mat3 = Mat3::from_rows([
        [1.0479298, 0.0229469, -0.0501923],
        [0.0296278, 0.9904344, -0.0170738],
        [-0.0092430, 0.0150552, 0.7518743],
    ]);

    #[test]
    fn test_bradford_reference_from_chromaticities() {
        let m = bradford_adaptation(CIExy::D65, CIExy::D50).unwrap();
        let err = (m - D65_TO_D50_XY).inf_norm();
        assert!(precision_bits(err) >= 13.0, "error {} ({} bits)", err, precision_bits(err));
    }

    #[test]
    fn test_bradford_maps_white() {
        let m = bradford_adaptation(CIExy::D65, CIExy::D50).unwrap();
        let src = Vec3::from_array(CIExy::D65.to_xyz().unwrap());
        let dst = Vec3::from_array(CIExy::D50.to_xyz().unwrap());
        let diff = (m * src - dst).abs();
        assert!(diff.max_element() < 1e-5);
    }

    #[test]
    fn test_bradford_roundtrip() {
        let fwd = bradford_adaptation(CIExy::D65, CIExy::D50).unwrap();
        let back = bradford_adaptation(CIExy::D50, CIExy::D65).unwrap();
        assert!((back * fwd - Mat3::IDENTITY).inf_norm() < 1e-5);
    }

    #[test]
    fn test_bradford_identity() {
        let same = bradford_adaptation(CIExy::D65, CIExy::D65).unwrap();
        assert!((same - Mat3::IDENTITY).inf_norm() < 1e-5);
    }

    #[test]
    fn test_bradford_degenerate() {
        assert!(bradford_adaptation(CIExy::new(0.3, 0.0), CIExy::D50).is_none());
    }
}
