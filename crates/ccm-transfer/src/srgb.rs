//! sRGB transfer function (IEC 61966-2-1).
//!
//! Piecewise: a linear segment near black, a 2.4 power above it.
//! The `ext_*` variants mirror the curve around zero for extended-range
//! signals.

/// sRGB EOTF: encoded `[0, 1]` to linear `[0, 1]`.
///
/// ```rust
/// use ccm_transfer::srgb::eotf;
///
/// assert!((eotf(0.5) - 0.214).abs() < 0.01);
/// ```
#[inline]
pub fn eotf(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// Inverse sRGB EOTF: linear `[0, 1]` to encoded `[0, 1]`.
#[inline]
pub fn eotf_inverse(l: f32) -> f32 {
    if l <= 0.0031308 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Extended sRGB EOTF, odd-symmetric around zero.
#[inline]
pub fn ext_eotf(v: f32) -> f32 {
    v.signum() * eotf(v.abs())
}

/// Extended inverse sRGB EOTF, odd-symmetric around zero.
#[inline]
pub fn ext_eotf_inverse(l: f32) -> f32 {
    l.signum() * eotf_inverse(l.abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roundtrip() {
        for i in 0..=100 {
            let v = i as f32 / 100.0;
            let back = eotf_inverse(eotf(v));
            assert!((v - back).abs() < 1e-5, "v={}, back={}", v, back);
        }
    }

    #[test]
    fn test_boundaries() {
        assert_eq!(eotf(0.0), 0.0);
        assert!((eotf(1.0) - 1.0).abs() < 1e-6);
        assert!((eotf_inverse(1.0) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_extended_mirrors() {
        assert_eq!(ext_eotf(-0.5), -eotf(0.5));
        assert_eq!(ext_eotf_inverse(-0.2), -eotf_inverse(0.2));
        assert!(ext_eotf(1.5) > 1.0);
    }
}
