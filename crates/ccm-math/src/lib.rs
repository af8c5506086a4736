//! # ccm-math
//!
//! Fixed-size linear algebra for color management:
//!
//! - [`Mat3`] / [`Vec3`] - RGB/XYZ transforms, normalized primary matrices
//! - [`Mat4`] / [`Vec4`] - affine color transforms
//! - [`bradford_adaptation`] - chromatic adaptation between white points
//!
//! # Convention
//!
//! Matrices are stored **column-major** in one flat array and multiply
//! **column vectors**:
//!
//! ```text
//! result = matrix * vector
//! flat[col * N + row] == m[(row, col)]
//! ```
//!
//! Both views are available: `m[(row, col)]` and `m.as_flat()[i]`, or whole
//! columns through [`Mat3::col`] / [`Mat3::cols`].
//!
//! # Usage
//!
//! ```rust
//! use ccm_math::{Mat3, Vec3};
//!
//! let m = Mat3::from_rows([
//!     [2.0, 0.0, 0.0],
//!     [0.0, 4.0, 0.0],
//!     [0.0, 0.0, 8.0],
//! ]);
//! let inv = m.invert().unwrap();
//! assert_eq!(inv * Vec3::new(2.0, 4.0, 8.0), Vec3::ONE);
//! ```
//!
//! # Precision
//!
//! Inversion runs in `f64` internally and rounds once at the end, so the
//! residual `inf_norm(M * M^-1 - I)` of well-conditioned single precision
//! matrices stays below `1e-5`.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod adapt;
mod mat3;
mod mat4;
mod vec3;
mod vec4;

pub use adapt::*;
pub use mat3::*;
pub use mat4::*;
pub use vec3::*;
pub use vec4::*;

/// Relative threshold below which [`Mat3::invert`] and [`Mat4::invert`]
/// treat a matrix as singular.
///
/// A matrix whose reciprocal condition is under single precision epsilon
/// has no meaningful `f32` inverse.
pub const SINGULAR_EPSILON: f64 = f32::EPSILON as f64;

/// Converts a matrix error into "bits of precision".
///
/// An error of `2^-n` yields `n`. Zero error maps to `f32::INFINITY`.
///
/// ```rust
/// assert_eq!(ccm_math::precision_bits(0.25), 2.0);
/// ```
#[inline]
pub fn precision_bits(error: f32) -> f32 {
    -error.log2()
}
