//! HDR static metadata type 1 (CTA-861-G).
//!
//! Only the groups flagged in [`HdrMetadataType1::group_mask`] carry
//! meaning. Validation ignores every other field, whatever its value.

use bitflags::bitflags;
use ccm_core::CIExy;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Accepted range of maxDML, maxCLL and maxFALL in cd/m².
pub const LIGHT_LEVEL_RANGE: (f32, f32) = (0.0001, 65535.0);

/// Accepted range of minDML in cd/m².
pub const MIN_DML_RANGE: (f32, f32) = (0.0, 1.0);

/// Accepted range of chromaticity coordinates.
pub const CIE_RANGE: (f32, f32) = (0.0, 1.0);

bitflags! {
    /// Which parts of [`HdrMetadataType1`] are set.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct HdrGroups: u32 {
        /// Display primaries
        const PRIMARIES = 1 << 0;
        /// White point
        const WHITE = 1 << 1;
        /// Maximum display mastering luminance
        const MAXDML = 1 << 2;
        /// Minimum display mastering luminance
        const MINDML = 1 << 3;
        /// Maximum content light level
        const MAXCLL = 1 << 4;
        /// Maximum frame-average light level
        const MAXFALL = 1 << 5;
    }
}

/// A rejected metadata field.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum HdrMetadataError {
    /// A chromaticity coordinate outside `[0, 1]`.
    #[error("{point} {axis} = {value:.6} is out of range [0.0, 1.0]")]
    CoordinateOutOfRange {
        /// `red`, `green`, `blue` or `white`
        point: &'static str,
        /// `x` or `y`
        axis: &'static str,
        /// Offending value
        value: f32,
    },

    /// A luminance outside its range.
    #[error("{field} {value:.6} is out of range [{min}, {max}]")]
    OutOfRange {
        /// Config key of the field
        field: &'static str,
        /// Offending value
        value: f32,
        /// Lower bound
        min: f32,
        /// Upper bound
        max: f32,
    },

    /// minDML is not below maxDML.
    #[error("min_L {min:.6} must be less than max_L {max:.6}")]
    MinNotBelowMax {
        /// minDML
        min: f32,
        /// maxDML
        max: f32,
    },
}

/// HDR static metadata type 1.
///
/// # Example
///
/// ```rust
/// use ccm_output::{HdrGroups, HdrMetadataType1};
///
/// let mut md = HdrMetadataType1 { max_dml: -1.0, ..Default::default() };
/// assert!(md.is_valid());
///
/// md.group_mask = HdrGroups::MAXDML;
/// assert!(!md.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HdrMetadataType1 {
    /// Flagged groups
    pub group_mask: HdrGroups,
    /// Display primaries, R, G, B
    pub primary: [CIExy; 3],
    /// Display white point
    pub white: CIExy,
    /// Maximum display mastering luminance
    pub max_dml: f32,
    /// Minimum display mastering luminance
    pub min_dml: f32,
    /// Maximum content light level
    pub max_cll: f32,
    /// Maximum frame-average light level
    pub max_fall: f32,
}

fn in_range(v: f32, (lo, hi): (f32, f32)) -> bool {
    // NaN fails both comparisons
    v >= lo && v <= hi
}

impl HdrMetadataType1 {
    /// Every problem with the flagged fields, in field order.
    pub fn errors(&self) -> Vec<HdrMetadataError> {
        let mut errors = Vec::new();
        let g = self.group_mask;

        let mut check_xy = |point: &'static str, xy: CIExy| {
            for (axis, value) in [("x", xy.x), ("y", xy.y)] {
                if !in_range(value, CIE_RANGE) {
                    errors.push(HdrMetadataError::CoordinateOutOfRange { point, axis, value });
                }
            }
        };
        if g.contains(HdrGroups::PRIMARIES) {
            for (point, xy) in ["red", "green", "blue"].into_iter().zip(self.primary) {
                check_xy(point, xy);
            }
        }
        if g.contains(HdrGroups::WHITE) {
            check_xy("white", self.white);
        }

        let mut check_level = |flag: HdrGroups, field: &'static str, value: f32, range: (f32, f32)| {
            if g.contains(flag) && !in_range(value, range) {
                errors.push(HdrMetadataError::OutOfRange { field, value, min: range.0, max: range.1 });
            }
        };
        check_level(HdrGroups::MAXDML, "max_L", self.max_dml, LIGHT_LEVEL_RANGE);
        check_level(HdrGroups::MINDML, "min_L", self.min_dml, MIN_DML_RANGE);
        check_level(HdrGroups::MAXCLL, "maxCLL", self.max_cll, LIGHT_LEVEL_RANGE);
        check_level(HdrGroups::MAXFALL, "maxFALL", self.max_fall, LIGHT_LEVEL_RANGE);

        if g.contains(HdrGroups::MAXDML | HdrGroups::MINDML) && !(self.min_dml < self.max_dml) {
            errors.push(HdrMetadataError::MinNotBelowMax { min: self.min_dml, max: self.max_dml });
        }

        errors
    }

    /// Checks the flagged fields, reporting the first problem.
    pub fn validate(&self) -> Result<(), HdrMetadataError> {
        match self.errors().into_iter().next() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    /// True when every flagged field is in range.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}
