//! 3x3 single precision matrix.
//!
//! Holds normalized primary matrices, Bradford adaptation and gamut
//! conversions. Inversion uses the adjugate scaled by `1/det`.
//!
//! # Convention
//!
//! Elements are stored in one flat **column-major** array and multiply
//! **column vectors**:
//!
//! ```text
//! | m00 m01 m02 |   | x |   | m00*x + m01*y + m02*z |
//! | m10 m11 m12 | * | y | = | m10*x + m11*y + m12*z |
//! | m20 m21 m22 |   | z |   | m20*x + m21*y + m22*z |
//!
//! flat = [m00, m10, m20, m01, m11, m21, m02, m12, m22]
//! ```

use crate::{Vec3, SINGULAR_EPSILON};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// 3x3 matrix over a flat column-major array.
///
/// Use [`Mat3::from_rows`] or [`Mat3::from_cols`] to construct from component
/// arrays; index with `m[(row, col)]` or through [`Mat3::as_flat`].
///
/// # Example
///
/// ```rust
/// use ccm_math::{Mat3, Vec3};
///
/// let identity = Mat3::IDENTITY;
/// let v = Vec3::new(1.0, 2.0, 3.0);
/// assert_eq!(identity * v, v);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat3 {
    flat: [f32; 9],
}

impl Mat3 {
    /// Zero matrix.
    pub const ZERO: Self = Self { flat: [0.0; 9] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::diagonal(1.0, 1.0, 1.0);

    /// Creates a matrix from a flat column-major array.
    #[inline]
    pub const fn from_flat(flat: [f32; 9]) -> Self {
        Self { flat }
    }

    /// Creates a matrix from row arrays.
    #[inline]
    pub const fn from_rows(rows: [[f32; 3]; 3]) -> Self {
        Self::from_flat([
            rows[0][0], rows[1][0], rows[2][0],
            rows[0][1], rows[1][1], rows[2][1],
            rows[0][2], rows[1][2], rows[2][2],
        ])
    }

    /// Creates a matrix from column arrays.
    #[inline]
    pub const fn from_cols(cols: [[f32; 3]; 3]) -> Self {
        Self::from_flat([
            cols[0][0], cols[0][1], cols[0][2],
            cols[1][0], cols[1][1], cols[1][2],
            cols[2][0], cols[2][1], cols[2][2],
        ])
    }

    /// Creates a matrix from Vec3 columns.
    #[inline]
    pub fn from_col_vecs(c0: Vec3, c1: Vec3, c2: Vec3) -> Self {
        Self::from_cols([c0.to_array(), c1.to_array(), c2.to_array()])
    }

    /// Creates a diagonal matrix.
    #[inline]
    pub const fn diagonal(d0: f32, d1: f32, d2: f32) -> Self {
        Self::from_rows([
            [d0, 0.0, 0.0],
            [0.0, d1, 0.0],
            [0.0, 0.0, d2],
        ])
    }

    /// Flat column-major view.
    #[inline]
    pub const fn as_flat(&self) -> &[f32; 9] {
        &self.flat
    }

    /// Mutable flat column-major view.
    #[inline]
    pub fn as_flat_mut(&mut self) -> &mut [f32; 9] {
        &mut self.flat
    }

    /// Returns a column as Vec3.
    #[inline]
    pub fn col(&self, i: usize) -> Vec3 {
        Vec3::new(self.flat[i * 3], self.flat[i * 3 + 1], self.flat[i * 3 + 2])
    }

    /// Array-of-columns view.
    #[inline]
    pub fn cols(&self) -> [[f32; 3]; 3] {
        [
            self.col(0).to_array(),
            self.col(1).to_array(),
            self.col(2).to_array(),
        ]
    }

    /// Returns a row as Vec3.
    #[inline]
    pub fn row(&self, i: usize) -> Vec3 {
        Vec3::new(self.flat[i], self.flat[3 + i], self.flat[6 + i])
    }

    /// Returns the transpose of this matrix.
    #[inline]
    pub fn transpose(&self) -> Self {
        Self::from_cols([
            self.row(0).to_array(),
            self.row(1).to_array(),
            self.row(2).to_array(),
        ])
    }

    /// Computes the determinant.
    pub fn determinant(&self) -> f32 {
        let (_, det) = self.cofactors();
        det as f32
    }

    // Cofactor matrix (row-major) and determinant, both in f64.
    fn cofactors(&self) -> ([[f64; 3]; 3], f64) {
        let a = |r: usize, c: usize| f64::from(self[(r, c)]);

        let c = [
            [
                a(1, 1) * a(2, 2) - a(1, 2) * a(2, 1),
                a(1, 2) * a(2, 0) - a(1, 0) * a(2, 2),
                a(1, 0) * a(2, 1) - a(1, 1) * a(2, 0),
            ],
            [
                a(0, 2) * a(2, 1) - a(0, 1) * a(2, 2),
                a(0, 0) * a(2, 2) - a(0, 2) * a(2, 0),
                a(0, 1) * a(2, 0) - a(0, 0) * a(2, 1),
            ],
            [
                a(0, 1) * a(1, 2) - a(0, 2) * a(1, 1),
                a(0, 2) * a(1, 0) - a(0, 0) * a(1, 2),
                a(0, 0) * a(1, 1) - a(0, 1) * a(1, 0),
            ],
        ];
        let det = a(0, 0) * c[0][0] + a(0, 1) * c[0][1] + a(0, 2) * c[0][2];
        (c, det)
    }

    /// Computes the inverse with the adjugate method.
    ///
    /// Returns `None` if the matrix is numerically singular: the determinant
    /// is not finite, or its magnitude is at most [`SINGULAR_EPSILON`] times the
    /// product of the column lengths (the Hadamard bound).
    ///
    /// # Example
    ///
    /// ```rust
    /// use ccm_math::Mat3;
    ///
    /// let m = Mat3::diagonal(2.0, 4.0, 0.5);
    /// let inv = m.invert().unwrap();
    /// assert!((m * inv - Mat3::IDENTITY).inf_norm() < 1e-6);
    /// ```
    pub fn invert(&self) -> Option<Self> {
        let (c, det) = self.cofactors();
        let bound: f64 = (0..3)
            .map(|col| {
                (0..3)
                    .map(|r| f64::from(self[(r, col)]).powi(2))
                    .sum::<f64>()
                    .sqrt()
            })
            .product();
        if !det.is_finite() || det.abs() <= SINGULAR_EPSILON * bound {
            return None;
        }

        let inv_det = 1.0 / det;
        let mut out = Self::ZERO;
        for r in 0..3 {
            for col in 0..3 {
                // adjugate is the transposed cofactor matrix
                out[(r, col)] = (c[col][r] * inv_det) as f32;
            }
        }
        out.is_finite().then_some(out)
    }

    /// Infinity norm: maximum absolute row sum.
    pub fn inf_norm(&self) -> f32 {
        (0..3)
            .map(|r| self.row(r).abs())
            .map(|row| row.x + row.y + row.z)
            .fold(0.0, f32::max)
    }

    /// Transforms a Vec3 by this matrix.
    #[inline]
    pub fn transform(&self, v: Vec3) -> Vec3 {
        self.col(0) * v.x + self.col(1) * v.y + self.col(2) * v.z
    }

    /// Multiplies two matrices.
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::from_col_vecs(
            self.transform(other.col(0)),
            self.transform(other.col(1)),
            self.transform(other.col(2)),
        )
    }

    /// Returns true if all elements are finite (not NaN or infinite).
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.flat.iter().all(|x| x.is_finite())
    }

    /// Converts to glam Mat3 (also column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat3 {
        glam::Mat3::from_cols_array(&self.flat)
    }

    /// Creates from glam Mat3.
    #[inline]
    pub fn from_glam(m: glam::Mat3) -> Self {
        Self::from_flat(m.to_cols_array())
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<(usize, usize)> for Mat3 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.flat[col * 3 + row]
    }
}

impl IndexMut<(usize, usize)> for Mat3 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.flat[col * 3 + row]
    }
}

impl Mul<Vec3> for Mat3 {
    type Output = Vec3;

    #[inline]
    fn mul(self, rhs: Vec3) -> Vec3 {
        self.transform(rhs)
    }
}

impl Mul for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Mul<f32> for Mat3 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: f32) -> Self {
        Self::from_flat(self.flat.map(|v| v * rhs))
    }
}

impl Add for Mat3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut flat = self.flat;
        flat.iter_mut().zip(rhs.flat).for_each(|(a, b)| *a += b);
        Self::from_flat(flat)
    }
}

impl Sub for Mat3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut flat = self.flat;
        flat.iter_mut().zip(rhs.flat).for_each(|(a, b)| *a -= b);
        Self::from_flat(flat)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_mat3_layout() {
        assert_eq!(std::mem::size_of::<Mat3>(), 9 * std::mem::size_of::<f32>());

        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        assert_eq!(m.as_flat(), &[1.0, 4.0, 7.0, 2.0, 5.0, 8.0, 3.0, 6.0, 9.0]);
        assert_eq!(m.cols()[1], [2.0, 5.0, 8.0]);
        assert_eq!(m[(0, 2)], 3.0);
        assert_eq!(m[(2, 0)], 7.0);
    }

    #[test]
    fn test_mat3_transpose() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        let t = m.transpose();
        assert_eq!(t[(0, 1)], 4.0);
        assert_eq!(t[(1, 0)], 2.0);
        assert_eq!(t.transpose(), m);
    }

    #[test]
    fn test_mat3_mul_vec() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [4.0, 5.0, 6.0],
            [7.0, 8.0, 9.0],
        ]);
        assert_eq!(m * Vec3::new(1.0, 0.0, -1.0), Vec3::new(-2.0, -2.0, -2.0));
    }

    #[test]
    fn test_mat3_mul_mat() {
        let a = Mat3::from_rows([
            [1.0, 2.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.0, 3.0],
        ]);
        let b = Mat3::from_rows([
            [1.0, 0.0, 0.0],
            [4.0, 1.0, 0.0],
            [0.0, 0.0, 2.0],
        ]);
        let expected = Mat3::from_rows([
            [9.0, 2.0, 0.0],
            [4.0, 1.0, 0.0],
            [0.0, 0.0, 6.0],
        ]);
        assert_eq!(a * b, expected);
    }

    #[test]
    fn test_mat3_inf_norm() {
        let m = Mat3::from_rows([
            [1.0, -2.0, 3.0],
            [-4.0, 5.0, -6.0],
            [0.5, 0.5, 0.5],
        ]);
        assert_eq!(m.inf_norm(), 15.0);
        assert_eq!(Mat3::ZERO.inf_norm(), 0.0);
    }

    #[test]
    fn test_mat3_determinant() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ]);
        assert_relative_eq!(m.determinant(), 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_mat3_invert() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ]);
        let inv = m.invert().unwrap();
        assert!((m * inv - Mat3::IDENTITY).inf_norm() < 1e-5);

        let expected = Mat3::from_rows([
            [-24.0, 18.0, 5.0],
            [20.0, -15.0, -4.0],
            [-5.0, 4.0, 1.0],
        ]);
        assert!((inv - expected).inf_norm() < 1e-4);
    }

    #[test]
    fn test_mat3_singular() {
        let m = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [2.0, 4.0, 6.0],
            [1.0, 1.0, 1.0],
        ]);
        assert!(m.invert().is_none());
        assert!(Mat3::ZERO.invert().is_none());
    }

    #[test]
    fn test_mat3_singular_after_rounding() {
        // row 2 is row 0 + row 1 before rounding to f32
        let m = Mat3::from_rows([
            [0.1, 0.2, 0.3],
            [0.3, 0.1, 0.7],
            [0.4, 0.3, 1.0],
        ]);
        assert!(m.invert().is_none());
        assert!((m * 1e-6).invert().is_none());
        assert!((m * 1e6).invert().is_none());
    }

    #[test]
    fn test_mat3_invert_badly_scaled() {
        // singularity is judged relative to scale, not absolute determinant
        let m = Mat3::diagonal(1e3, 1.0, 1e-3);
        assert!((m * m.invert().unwrap() - Mat3::IDENTITY).inf_norm() < 1e-6);

        let tiny = Mat3::from_rows([
            [1.0, 2.0, 3.0],
            [0.0, 1.0, 4.0],
            [5.0, 6.0, 0.0],
        ]) * 1e-4;
        assert!(tiny.determinant().abs() < 1e-11);
        assert!(tiny.invert().is_some());
    }

    #[test]
    fn test_mat3_matches_glam() {
        let m = Mat3::from_rows([
            [0.4124, 0.3576, 0.1805],
            [0.2126, 0.7152, 0.0722],
            [0.0193, 0.1192, 0.9505],
        ]);
        let ours = m.invert().unwrap();
        let theirs = Mat3::from_glam(m.to_glam().inverse());
        assert!((ours - theirs).inf_norm() < 1e-4);
    }
}
