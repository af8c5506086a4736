//! CIE 1931 xy chromaticity coordinates.
//!
//! A [`CIExy`] is the projective part of an XYZ tristimulus value. Primaries
//! and white points are stored this way throughout the workspace; luminance is
//! carried separately.
//!
//! # Usage
//!
//! ```rust
//! use ccm_core::CIExy;
//!
//! let d65 = CIExy::D65;
//! let xyz = d65.to_xyz().unwrap();
//! assert_eq!(xyz[1], 1.0);
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A chromaticity coordinate `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CIExy {
    /// x chromaticity
    pub x: f32,
    /// y chromaticity
    pub y: f32,
}

impl CIExy {
    /// CIE standard illuminant D65.
    pub const D65: Self = Self::new(0.3127, 0.3290);

    /// CIE standard illuminant D50.
    pub const D50: Self = Self::new(0.3457, 0.3585);

    /// CIE standard illuminant C.
    pub const C: Self = Self::new(0.310, 0.316);

    /// Equal-energy illuminant E.
    pub const E: Self = Self::new(1.0 / 3.0, 1.0 / 3.0);

    /// DCI theatrical white.
    pub const DCI: Self = Self::new(0.314, 0.351);

    /// Creates a chromaticity coordinate.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Lifts the chromaticity to XYZ with `Y = 1`.
    ///
    /// Fails when `y` is zero, since such a point has no finite XYZ
    /// representation at unit luminance.
    pub fn to_xyz(self) -> Result<[f32; 3]> {
        if self.y == 0.0 || !self.y.is_finite() || !self.x.is_finite() {
            return Err(Error::DegenerateChromaticity {
                x: self.x,
                y: self.y,
            });
        }
        let x = f64::from(self.x);
        let y = f64::from(self.y);
        Ok([
            (x / y) as f32,
            1.0,
            ((1.0 - x - y) / y) as f32,
        ])
    }

    /// Returns true if both components are finite.
    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for CIExy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(x={:.6}, y={:.6})", self.x, self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_d65_xyz() {
        let xyz = CIExy::D65.to_xyz().unwrap();
        assert_relative_eq!(xyz[0], 0.95046, epsilon = 1e-4);
        assert_eq!(xyz[1], 1.0);
        assert_relative_eq!(xyz[2], 1.08906, epsilon = 1e-4);
    }

    #[test]
    fn test_zero_y_rejected() {
        let err = CIExy::new(0.3, 0.0).to_xyz().unwrap_err();
        assert!(matches!(err, Error::DegenerateChromaticity { .. }));
    }

    #[test]
    fn test_display() {
        assert_eq!(CIExy::new(0.5, 0.25).to_string(), "(x=0.500000, y=0.250000)");
    }
}
