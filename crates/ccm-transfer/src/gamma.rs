//! Pure power-law curves.
//!
//! Covers gamma 2.2, 2.4, 2.8, the Adobe RGB (1998) exponent and the
//! parametric `tf_power` curve.

/// Adobe RGB (1998) EOTF exponent, `563 / 256`.
pub const ADOBE_RGB_GAMMA: f32 = 563.0 / 256.0;

/// Power EOTF: `v^gamma`, zero for non-positive input.
///
/// ```rust
/// use ccm_transfer::gamma::eotf;
///
/// assert!((eotf(0.5, 2.2) - 0.2176).abs() < 1e-3);
/// ```
#[inline]
pub fn eotf(v: f32, gamma: f32) -> f32 {
    if v <= 0.0 { 0.0 } else { v.powf(gamma) }
}

/// Inverse power EOTF: `l^(1/gamma)`, zero for non-positive input.
#[inline]
pub fn eotf_inverse(l: f32, gamma: f32) -> f32 {
    if l <= 0.0 { 0.0 } else { l.powf(1.0 / gamma) }
}

/// Power EOTF mirrored around zero.
#[inline]
pub fn eotf_mirrored(v: f32, gamma: f32) -> f32 {
    v.signum() * eotf(v.abs(), gamma)
}

/// Inverse power EOTF mirrored around zero.
#[inline]
pub fn eotf_inverse_mirrored(l: f32, gamma: f32) -> f32 {
    l.signum() * eotf_inverse(l.abs(), gamma)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for g in [2.2, 2.4, 2.8, ADOBE_RGB_GAMMA] {
            for i in 0..=50 {
                let v = i as f32 / 50.0;
                assert!((eotf_inverse(eotf(v, g), g) - v).abs() < 1e-5);
            }
        }
    }

    #[test]
    fn test_non_positive() {
        assert_eq!(eotf(-0.1, 2.2), 0.0);
        assert_eq!(eotf_inverse(0.0, 2.2), 0.0);
        assert_eq!(eotf_mirrored(-0.5, 2.0), -0.25);
    }
}
