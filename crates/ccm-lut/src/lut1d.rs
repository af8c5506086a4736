//! Uniformly sampled 1D lookup table.

use crate::{find_neighbors, inverse_evaluate_lut1d, LutError, LutResult};
use ccm_transfer::ToneCurve;

/// A single-channel 1D LUT over the input domain `[0, 1]`.
///
/// Entry `i` holds the curve value at `i / (len - 1)`.
///
/// # Example
///
/// ```rust
/// use ccm_lut::Lut1D;
/// use ccm_transfer::ToneCurve;
///
/// let lut = Lut1D::from_curve(ToneCurve::Power22Eotf, 1024).unwrap();
/// let y = lut.apply(0.5);
/// assert!((lut.inverse_apply(y).unwrap() - 0.5).abs() < 1e-3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Lut1D {
    data: Vec<f32>,
}

impl Lut1D {
    /// Wraps raw samples. Needs at least two.
    pub fn from_data(data: Vec<f32>) -> LutResult<Self> {
        if data.len() < 2 {
            return Err(LutError::InvalidSize(data.len()));
        }
        Ok(Self { data })
    }

    /// Identity ramp with `len` entries.
    pub fn identity(len: usize) -> LutResult<Self> {
        Self::from_curve(ToneCurve::Identity, len)
    }

    /// Samples `curve` uniformly with `len` entries.
    pub fn from_curve(curve: ToneCurve, len: usize) -> LutResult<Self> {
        if len < 2 {
            return Err(LutError::InvalidSize(len));
        }
        let scale = 1.0 / (len - 1) as f32;
        let data = (0..len)
            .map(|i| curve.apply(i as f32 * scale))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self { data })
    }

    /// Number of entries.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Always false; a LUT has at least two entries.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Sample slice.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Evaluates with linear interpolation. Input is clamped to `[0, 1]`.
    pub fn apply(&self, x: f32) -> f32 {
        let last = self.data.len() - 1;
        let pos = x.clamp(0.0, 1.0) * last as f32;
        let i = (pos.floor() as usize).min(last - 1);
        let frac = pos - i as f32;
        self.data[i] + (self.data[i + 1] - self.data[i]) * frac
    }

    /// Finds the normalized input mapping to `y`. See
    /// [`inverse_evaluate_lut1d`].
    #[inline]
    pub fn inverse_apply(&self, y: f32) -> LutResult<f32> {
        inverse_evaluate_lut1d(&self.data, y)
    }

    /// Bracketing indices for `y`. See [`find_neighbors`].
    #[inline]
    pub fn neighbors(&self, y: f32) -> LutResult<(usize, usize)> {
        find_neighbors(&self.data, y)
    }

    /// Builds a LUT of the inverse curve by inverse evaluation at `len`
    /// uniformly spaced output values spanning this LUT's range.
    pub fn inverted(&self, len: usize) -> LutResult<Self> {
        if len < 2 {
            return Err(LutError::InvalidSize(len));
        }
        let first = self.data[0];
        let last = self.data[self.data.len() - 1];
        let step = (last - first) / (len - 1) as f32;
        let data = (0..len)
            .map(|i| self.inverse_apply(first + step * i as f32))
            .collect::<LutResult<Vec<_>>>()?;
        Ok(Self { data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    // deliberately off-grid inputs
    fn probe_points() -> impl Iterator<Item = f32> {
        (0..=97).map(|i| i as f32 / 97.0)
    }

    #[test]
    fn test_from_curve_endpoints() {
        let lut = Lut1D::from_curve(ToneCurve::SrgbEotf, 256).unwrap();
        assert_eq!(lut.len(), 256);
        assert_eq!(lut.as_slice()[0], 0.0);
        assert_abs_diff_eq!(lut.as_slice()[255], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Lut1D::from_curve(ToneCurve::Identity, 1), Err(LutError::InvalidSize(1)));
        assert_eq!(Lut1D::from_data(vec![]), Err(LutError::InvalidSize(0)));
        let lut = Lut1D::identity(4).unwrap();
        assert!(lut.inverted(0).is_err());
    }

    #[test]
    fn test_apply_interpolates() {
        let lut = Lut1D::from_data(vec![0.0, 1.0, 4.0]).unwrap();
        assert_abs_diff_eq!(lut.apply(0.25), 0.5);
        assert_abs_diff_eq!(lut.apply(0.75), 2.5);
        assert_abs_diff_eq!(lut.apply(1.0), 4.0);
        assert_abs_diff_eq!(lut.apply(-1.0), 0.0);
    }

    #[test]
    fn test_inverse_roundtrip_power22() {
        let curve = ToneCurve::Power22Eotf;
        let lut = Lut1D::from_curve(curve, 1024).unwrap();
        for t in probe_points() {
            let y = curve.apply(t).unwrap();
            let back = lut.inverse_apply(y).unwrap();
            assert!((back - t).abs() < 1e-3, "t={}, back={}", t, back);
        }
    }

    #[test]
    fn test_inverse_roundtrip_power22_inverse() {
        let curve = ToneCurve::Power22EotfInverse;
        let lut = Lut1D::from_curve(curve, 1024).unwrap();
        for t in probe_points() {
            let y = curve.apply(t).unwrap();
            let back = lut.inverse_apply(y).unwrap();
            assert!((back - t).abs() < 1e-3, "t={}, back={}", t, back);
        }
    }

    #[test]
    fn test_inverted_matches_inverse_curve() {
        let lut = Lut1D::from_curve(ToneCurve::SrgbEotf, 1024).unwrap();
        let inv = lut.inverted(1024).unwrap();
        for t in probe_points() {
            let expected = ToneCurve::SrgbEotfInverse.apply(t).unwrap();
            assert!((inv.apply(t) - expected).abs() < 2e-3, "t={}", t);
        }
    }
}
