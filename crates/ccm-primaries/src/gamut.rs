//! Gamut representation and normalized primary matrices.

use ccm_core::CIExy;
use ccm_math::{bradford_adaptation, Mat3, Vec3};
use serde::{Deserialize, Serialize};

/// RGB primaries and white point as CIE xy chromaticities.
///
/// # Example
///
/// ```rust
/// use ccm_core::CIExy;
/// use ccm_primaries::ColorGamut;
///
/// let custom = ColorGamut {
///     primary: [
///         CIExy::new(0.64, 0.33),
///         CIExy::new(0.30, 0.60),
///         CIExy::new(0.15, 0.06),
///     ],
///     white_point: CIExy::D65,
/// };
/// assert!(custom.contains_white_point());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorGamut {
    /// Red, green and blue primaries, in that order.
    pub primary: [CIExy; 3],
    /// White point.
    pub white_point: CIExy,
}

/// Primaries whose triangle has a corner angle with a sine at or below this
/// are treated as collinear.
const COLLINEAR_SINE: f64 = 1e-6;

/// Direction of a normalized primary matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NpmDirection {
    /// Linear RGB to CIE XYZ.
    Forward,
    /// CIE XYZ to linear RGB.
    Inverse,
}

impl ColorGamut {
    /// Creates a gamut from `(x, y)` tuples.
    pub const fn from_xy(r: (f32, f32), g: (f32, f32), b: (f32, f32), w: (f32, f32)) -> Self {
        Self {
            primary: [CIExy::new(r.0, r.1), CIExy::new(g.0, g.1), CIExy::new(b.0, b.1)],
            white_point: CIExy::new(w.0, w.1),
        }
    }

    /// Returns true if the white point lies inside (or on the edge of) the
    /// triangle spanned by the primaries.
    ///
    /// A degenerate triangle (coincident or collinear primaries, up to
    /// rounding) contains nothing.
    pub fn contains_white_point(&self) -> bool {
        let [r, g, b] = self.primary;
        let w = self.white_point;

        let edge = |a: CIExy, b: CIExy, p: CIExy| -> f64 {
            let (ax, ay) = (f64::from(a.x), f64::from(a.y));
            let (bx, by) = (f64::from(b.x), f64::from(b.y));
            let (px, py) = (f64::from(p.x), f64::from(p.y));
            (bx - ax) * (py - ay) - (by - ay) * (px - ax)
        };

        let len = |a: CIExy, b: CIExy| f64::from(b.x - a.x).hypot(f64::from(b.y - a.y));

        // twice the signed area; relative to the two edges it is the sine of
        // the angle at the red primary
        let area = edge(r, g, b);
        if !area.is_finite() || area.abs() <= COLLINEAR_SINE * len(r, g) * len(r, b) {
            return false;
        }

        let d = [edge(r, g, w), edge(g, b, w), edge(b, r, w)];
        if area > 0.0 {
            d.iter().all(|&v| v >= 0.0)
        } else {
            d.iter().all(|&v| v <= 0.0)
        }
    }

    /// Iterates the four chromaticities with their names, in R, G, B, W order.
    pub fn named_points(&self) -> [(&'static str, CIExy); 4] {
        [
            ("red", self.primary[0]),
            ("green", self.primary[1]),
            ("blue", self.primary[2]),
            ("white", self.white_point),
        ]
    }
}

/// Returns true if the white point of `gamut` lies inside its primaries'
/// triangle. See [`ColorGamut::contains_white_point`].
#[inline]
pub fn white_point_in_gamut(gamut: &ColorGamut) -> bool {
    gamut.contains_white_point()
}

/// Builds the normalized primary matrix of `gamut`.
///
/// The forward matrix has the primaries' XYZ directions as columns, each
/// scaled so that RGB `(1, 1, 1)` maps to the white point's XYZ (`Y = 1`). The
/// inverse direction is the inverse of that matrix.
///
/// Returns `None` for degenerate input: a white point with `y == 0` or
/// collinear primaries.
pub fn normalized_primary_matrix(gamut: &ColorGamut, direction: NpmDirection) -> Option<Mat3> {
    // primary columns only need a direction, the white solve fixes the scale
    let column = |p: CIExy| Vec3::new(p.x, p.y, 1.0 - p.x - p.y);

    let r = column(gamut.primary[0]);
    let g = column(gamut.primary[1]);
    let b = column(gamut.primary[2]);
    let w = Vec3::from_array(gamut.white_point.to_xyz().ok()?);

    let primaries = Mat3::from_col_vecs(r, g, b);
    let s = primaries.invert()? * w;

    let npm = Mat3::from_col_vecs(r * s.x, g * s.y, b * s.z);
    if !npm.is_finite() {
        return None;
    }

    match direction {
        NpmDirection::Forward => Some(npm),
        NpmDirection::Inverse => npm.invert(),
    }
}

/// Computes a matrix converting linear RGB in `src` to linear RGB in `dst`.
///
/// The conversion goes `RGB_src -> XYZ -> RGB_dst`. With `adapt` set and
/// differing white points, a Bradford adaptation from the source white to the
/// destination white is inserted in XYZ.
pub fn gamut_to_gamut_matrix(src: &ColorGamut, dst: &ColorGamut, adapt: bool) -> Option<Mat3> {
    let to_xyz = normalized_primary_matrix(src, NpmDirection::Forward)?;
    let from_xyz = normalized_primary_matrix(dst, NpmDirection::Inverse)?;

    if adapt && src.white_point != dst.white_point {
        let cat = bradford_adaptation(src.white_point, dst.white_point)?;
        Some(from_xyz * cat * to_xyz)
    } else {
        Some(from_xyz * to_xyz)
    }
}
