//! ITU-R BT.1886 reference EOTF.
//!
//! The full form takes display white and black luminance. The normalized
//! form used by [`crate::ToneCurve::Bt1886Eotf`] fixes white at 1 and black at
//! [`DEFAULT_BLACK`], then rescales so that `0 -> 0` and `1 -> 1`.

/// BT.1886 exponent.
pub const GAMMA: f32 = 2.4;

/// Normalized black level of the reference display (1000:1 contrast).
pub const DEFAULT_BLACK: f32 = 0.001;

fn coefficients(lw: f32, lb: f32) -> (f32, f32) {
    let wg = lw.powf(1.0 / GAMMA);
    let bg = lb.powf(1.0 / GAMMA);
    let a = (wg - bg).powf(GAMMA);
    let b = bg / (wg - bg);
    (a, b)
}

/// BT.1886 EOTF: signal to luminance, for a display with white `lw` and
/// black `lb` (same unit).
///
/// ```rust
/// use ccm_transfer::bt1886::eotf;
///
/// assert!((eotf(1.0, 100.0, 0.1) - 100.0).abs() < 1e-3);
/// assert!((eotf(0.0, 100.0, 0.1) - 0.1).abs() < 1e-5);
/// ```
#[inline]
pub fn eotf(v: f32, lw: f32, lb: f32) -> f32 {
    let (a, b) = coefficients(lw, lb);
    a * (v + b).max(0.0).powf(GAMMA)
}

/// Inverse BT.1886 EOTF.
#[inline]
pub fn eotf_inverse(l: f32, lw: f32, lb: f32) -> f32 {
    let (a, b) = coefficients(lw, lb);
    (l.max(0.0) / a).powf(1.0 / GAMMA) - b
}

/// Normalized BT.1886 EOTF on `[0, 1]`.
#[inline]
pub fn eotf_normalized(v: f32) -> f32 {
    (eotf(v, 1.0, DEFAULT_BLACK) - DEFAULT_BLACK) / (1.0 - DEFAULT_BLACK)
}

/// Inverse of [`eotf_normalized`].
#[inline]
pub fn eotf_inverse_normalized(y: f32) -> f32 {
    eotf_inverse(y * (1.0 - DEFAULT_BLACK) + DEFAULT_BLACK, 1.0, DEFAULT_BLACK)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalized_endpoints() {
        assert!(eotf_normalized(0.0).abs() < 1e-6);
        assert!((eotf_normalized(1.0) - 1.0).abs() < 1e-5);
        assert!(eotf_inverse_normalized(0.0).abs() < 1e-5);
    }

    #[test]
    fn test_roundtrip() {
        for i in 0..=50 {
            let v = i as f32 / 50.0;
            let back = eotf_inverse_normalized(eotf_normalized(v));
            assert!((back - v).abs() < 1e-4, "v={}, back={}", v, back);
        }
    }

    #[test]
    fn test_zero_black_is_pure_gamma() {
        assert!((eotf(0.5, 1.0, 0.0) - 0.5f32.powf(2.4)).abs() < 1e-6);
    }
}
