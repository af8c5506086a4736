//! 4x4 matrix type.
//!
//! Same storage convention as [`crate::Mat3`]: one flat column-major array,
//! column vectors, `m[(row, col)]` indexing.

use crate::{Vec4, SINGULAR_EPSILON};
use serde::{Deserialize, Serialize};
use std::ops::{Add, Index, IndexMut, Mul, Sub};

/// A 4x4 matrix.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[repr(C)]
pub struct Mat4 {
    flat: [f32; 16],
}

impl Mat4 {
    /// Zero matrix.
    pub const ZERO: Self = Self { flat: [0.0; 16] };

    /// Identity matrix.
    pub const IDENTITY: Self = Self::from_rows([
        [1.0, 0.0, 0.0, 0.0],
        [0.0, 1.0, 0.0, 0.0],
        [0.0, 0.0, 1.0, 0.0],
        [0.0, 0.0, 0.0, 1.0],
    ]);

    /// Creates a matrix from a flat column-major array.
    #[inline]
    pub const fn from_flat(flat: [f32; 16]) -> Self {
        Self { flat }
    }

    /// Creates a matrix from row arrays.
    pub const fn from_rows(rows: [[f32; 4]; 4]) -> Self {
        let mut flat = [0.0; 16];
        let mut r = 0;
        while r < 4 {
            let mut c = 0;
            while c < 4 {
                flat[c * 4 + r] = rows[r][c];
                c += 1;
            }
            r += 1;
        }
        Self { flat }
    }

    /// Creates a matrix from column arrays.
    pub const fn from_cols(cols: [[f32; 4]; 4]) -> Self {
        let mut flat = [0.0; 16];
        let mut c = 0;
        while c < 4 {
            let mut r = 0;
            while r < 4 {
                flat[c * 4 + r] = cols[c][r];
                r += 1;
            }
            c += 1;
        }
        Self { flat }
    }

    /// Flat column-major view.
    #[inline]
    pub const fn as_flat(&self) -> &[f32; 16] {
        &self.flat
    }

    /// Returns a column.
    #[inline]
    pub fn col(&self, i: usize) -> Vec4 {
        Vec4::new(
            self.flat[i * 4],
            self.flat[i * 4 + 1],
            self.flat[i * 4 + 2],
            self.flat[i * 4 + 3],
        )
    }

    /// Array-of-columns view.
    pub fn cols(&self) -> [[f32; 4]; 4] {
        std::array::from_fn(|i| self.col(i).to_array())
    }

    /// Returns a row.
    #[inline]
    pub fn row(&self, i: usize) -> Vec4 {
        Vec4::new(self.flat[i], self.flat[4 + i], self.flat[8 + i], self.flat[12 + i])
    }

    /// Returns the transpose of this matrix.
    pub fn transpose(&self) -> Self {
        Self::from_cols(std::array::from_fn(|i| self.row(i).to_array()))
    }

    /// Infinity norm: maximum absolute row sum.
    pub fn inf_norm(&self) -> f32 {
        (0..4)
            .map(|r| {
                let row = self.row(r);
                row.x.abs() + row.y.abs() + row.z.abs() + row.w.abs()
            })
            .fold(0.0, f32::max)
    }

    /// Computes the inverse with Gauss-Jordan elimination and partial
    /// pivoting, carried out in `f64`.
    ///
    /// Returns `None` if the matrix is numerically singular: some pivot is
    /// at most [`SINGULAR_EPSILON`] times the infinity norm of the matrix.
    pub fn invert(&self) -> Option<Self> {
        let tolerance = SINGULAR_EPSILON * f64::from(self.inf_norm());
        // augmented [A | I], row-major
        let mut a = [[0.0f64; 8]; 4];
        for (r, row) in a.iter_mut().enumerate() {
            for c in 0..4 {
                row[c] = f64::from(self[(r, c)]);
            }
            row[4 + r] = 1.0;
        }

        for col in 0..4 {
            let pivot = (col..4).max_by(|&i, &j| a[i][col].abs().total_cmp(&a[j][col].abs()))?;
            let p = a[pivot][col];
            if !p.is_finite() || p.abs() <= tolerance {
                return None;
            }
            a.swap(col, pivot);

            for v in a[col].iter_mut() {
                *v /= p;
            }

            let pivot_row = a[col];
            for (r, row) in a.iter_mut().enumerate() {
                let f = row[col];
                if r == col || f == 0.0 {
                    continue;
                }
                for (v, pv) in row.iter_mut().zip(pivot_row) {
                    *v -= f * pv;
                }
            }
        }

        let mut out = Self::ZERO;
        for (r, row) in a.iter().enumerate() {
            for c in 0..4 {
                out[(r, c)] = row[4 + c] as f32;
            }
        }
        out.is_finite().then_some(out)
    }

    /// Transforms a Vec4 by this matrix.
    #[inline]
    pub fn transform(&self, v: Vec4) -> Vec4 {
        self.col(0) * v.x + self.col(1) * v.y + self.col(2) * v.z + self.col(3) * v.w
    }

    /// Multiplies two matrices.
    pub fn mul_mat(&self, other: &Self) -> Self {
        Self::from_cols(std::array::from_fn(|i| self.transform(other.col(i)).to_array()))
    }

    /// Returns true if all elements are finite.
    #[inline]
    pub fn is_finite(&self) -> bool {
        self.flat.iter().all(|x| x.is_finite())
    }

    /// Converts to glam Mat4 (also column-major).
    #[inline]
    pub fn to_glam(&self) -> glam::Mat4 {
        glam::Mat4::from_cols_array(&self.flat)
    }

    /// Creates from glam Mat4.
    #[inline]
    pub fn from_glam(m: glam::Mat4) -> Self {
        Self::from_flat(m.to_cols_array())
    }
}

impl Default for Mat4 {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Index<(usize, usize)> for Mat4 {
    type Output = f32;

    #[inline]
    fn index(&self, (row, col): (usize, usize)) -> &f32 {
        &self.flat[col * 4 + row]
    }
}

impl IndexMut<(usize, usize)> for Mat4 {
    #[inline]
    fn index_mut(&mut self, (row, col): (usize, usize)) -> &mut f32 {
        &mut self.flat[col * 4 + row]
    }
}

impl Mul<Vec4> for Mat4 {
    type Output = Vec4;

    #[inline]
    fn mul(self, rhs: Vec4) -> Vec4 {
        self.transform(rhs)
    }
}

impl Mul for Mat4 {
    type Output = Self;

    #[inline]
    fn mul(self, rhs: Self) -> Self {
        self.mul_mat(&rhs)
    }
}

impl Add for Mat4 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let mut flat = self.flat;
        flat.iter_mut().zip(rhs.flat).for_each(|(a, b)| *a += b);
        Self::from_flat(flat)
    }
}

impl Sub for Mat4 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        let mut flat = self.flat;
        flat.iter_mut().zip(rhs.flat).for_each(|(a, b)| *a -= b);
        Self::from_flat(flat)
    }
}
