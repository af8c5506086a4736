//! Neighbor search and inverse evaluation over monotonic sample arrays.

use crate::{LutError, LutResult};

/// Finds the pair of adjacent indices whose samples bracket `value`.
///
/// `lut` must be monotonic, ascending or descending (decided by comparing the
/// first and last samples). Inside the sampled range the right index is the
/// first sample reaching `value`. Outside it the result clamps to the first or
/// last pair.
///
/// # Example
///
/// ```rust
/// use ccm_lut::find_neighbors;
///
/// let lut = [0.0, 2.0, 3.0, 6.0, 9.0, 12.0, 15.0, 16.0, 20.0, 25.0];
/// assert_eq!(find_neighbors(&lut, 10.0).unwrap(), (4, 5));
/// assert_eq!(find_neighbors(&lut, 6.0).unwrap(), (2, 3));
/// assert_eq!(find_neighbors(&lut, 30.0).unwrap(), (8, 9));
/// ```
pub fn find_neighbors(lut: &[f32], value: f32) -> LutResult<(usize, usize)> {
    let len = lut.len();
    if len < 2 {
        return Err(LutError::InvalidSize(len));
    }
    let last = len - 1;
    let ascending = lut[0] <= lut[last];

    // reached: sample at i is at or past value in the curve's direction
    let reached = |i: usize| {
        if ascending { lut[i] >= value } else { lut[i] <= value }
    };

    if reached(0) {
        return Ok((0, 1));
    }
    if !reached(last) {
        return Ok((last - 1, last));
    }

    let (mut left, mut right) = (0, last);
    while right - left > 1 {
        let mid = left + (right - left) / 2;
        if reached(mid) {
            right = mid;
        } else {
            left = mid;
        }
    }
    Ok((left, right))
}

/// Approximates the normalized input that produces `value` under `lut`.
///
/// The LUT's index is linearly interpolated between the bracketing samples
/// and mapped to `[0, 1]` as `index / (len - 1)`. Values outside the sampled
/// range clamp to the ends.
///
/// # Example
///
/// ```rust
/// use ccm_lut::inverse_evaluate_lut1d;
///
/// let lut = [0.0, 0.25, 0.5, 0.75, 1.0];
/// assert_eq!(inverse_evaluate_lut1d(&lut, 0.625).unwrap(), 0.625);
/// ```
pub fn inverse_evaluate_lut1d(lut: &[f32], value: f32) -> LutResult<f32> {
    let (a, b) = find_neighbors(lut, value)?;
    let (va, vb) = (lut[a], lut[b]);

    let t = if vb == va { 0.0 } else { ((value - va) / (vb - va)).clamp(0.0, 1.0) };
    let index = a as f32 + t * (b - a) as f32;

    Ok((index / (lut.len() - 1) as f32).clamp(0.0, 1.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ASCENDING: [f32; 10] = [0.0, 2.0, 3.0, 6.0, 9.0, 12.0, 15.0, 16.0, 20.0, 25.0];

    #[test]
    fn test_find_neighbors_ascending() {
        assert_eq!(find_neighbors(&ASCENDING, 0.0).unwrap(), (0, 1));
        assert_eq!(find_neighbors(&ASCENDING, 25.0).unwrap(), (8, 9));
        assert_eq!(find_neighbors(&ASCENDING, 6.0).unwrap(), (2, 3));
        assert_eq!(find_neighbors(&ASCENDING, 10.0).unwrap(), (4, 5));
        assert_eq!(find_neighbors(&ASCENDING, 2.5).unwrap(), (1, 2));
        assert_eq!(find_neighbors(&ASCENDING, 24.9).unwrap(), (8, 9));
    }

    #[test]
    fn test_find_neighbors_clamps() {
        assert_eq!(find_neighbors(&ASCENDING, -3.0).unwrap(), (0, 1));
        assert_eq!(find_neighbors(&ASCENDING, 100.0).unwrap(), (8, 9));
    }

    #[test]
    fn test_find_neighbors_descending() {
        let mut lut = ASCENDING;
        lut.reverse();
        assert_eq!(find_neighbors(&lut, 25.0).unwrap(), (0, 1));
        assert_eq!(find_neighbors(&lut, 0.0).unwrap(), (8, 9));
        assert_eq!(find_neighbors(&lut, 10.0).unwrap(), (4, 5));
        assert_eq!(find_neighbors(&lut, -1.0).unwrap(), (8, 9));
        assert_eq!(find_neighbors(&lut, 40.0).unwrap(), (0, 1));
    }

    #[test]
    fn test_find_neighbors_too_short() {
        assert_eq!(find_neighbors(&[], 0.5), Err(LutError::InvalidSize(0)));
        assert_eq!(find_neighbors(&[1.0], 0.5), Err(LutError::InvalidSize(1)));
    }

    #[test]
    fn test_inverse_evaluate_linear() {
        let lut: Vec<f32> = (0..11).map(|i| i as f32 / 10.0).collect();
        for &v in &[0.0, 0.05, 0.33, 0.5, 0.999, 1.0] {
            let x = inverse_evaluate_lut1d(&lut, v).unwrap();
            assert!((x - v).abs() < 1e-6, "v={}, x={}", v, x);
        }
    }

    #[test]
    fn test_inverse_evaluate_clamps() {
        let lut = [0.1, 0.2, 0.4, 0.8];
        assert_eq!(inverse_evaluate_lut1d(&lut, 0.0).unwrap(), 0.0);
        assert_eq!(inverse_evaluate_lut1d(&lut, 2.0).unwrap(), 1.0);
    }

    #[test]
    fn test_inverse_evaluate_descending() {
        let lut = [1.0, 0.75, 0.5, 0.25, 0.0];
        let x = inverse_evaluate_lut1d(&lut, 0.375).unwrap();
        assert!((x - 0.625).abs() < 1e-6);
    }
}
