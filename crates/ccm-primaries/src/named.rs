//! Standard primaries known to the color manager.

use crate::ColorGamut;
use ccm_core::CIExy;
use serde::{Deserialize, Serialize};
use std::fmt;

/// sRGB / BT.709 primaries, D65 white.
pub const SRGB: ColorGamut =
    ColorGamut::from_xy((0.64, 0.33), (0.30, 0.60), (0.15, 0.06), (0.3127, 0.3290));

/// PAL-M (BT.470 System M), illuminant C white.
pub const PAL_M: ColorGamut =
    ColorGamut::from_xy((0.67, 0.33), (0.21, 0.71), (0.14, 0.08), (0.310, 0.316));

/// PAL / SECAM (BT.601 625-line), D65 white.
pub const PAL: ColorGamut =
    ColorGamut::from_xy((0.64, 0.33), (0.29, 0.60), (0.15, 0.06), (0.3127, 0.3290));

/// NTSC (SMPTE 170M / BT.601 525-line), D65 white.
pub const NTSC: ColorGamut =
    ColorGamut::from_xy((0.630, 0.340), (0.310, 0.595), (0.155, 0.070), (0.3127, 0.3290));

/// Generic film (color filters using illuminant C).
pub const GENERIC_FILM: ColorGamut =
    ColorGamut::from_xy((0.681, 0.319), (0.243, 0.692), (0.145, 0.049), (0.310, 0.316));

/// BT.2020 / BT.2100, D65 white.
pub const BT2020: ColorGamut =
    ColorGamut::from_xy((0.708, 0.292), (0.170, 0.797), (0.131, 0.046), (0.3127, 0.3290));

/// CIE 1931 XYZ as RGB, equal-energy white.
pub const CIE1931_XYZ: ColorGamut = ColorGamut {
    primary: [CIExy::new(1.0, 0.0), CIExy::new(0.0, 1.0), CIExy::new(0.0, 0.0)],
    white_point: CIExy::E,
};

/// DCI-P3 (SMPTE RP 431-2), DCI white.
pub const DCI_P3: ColorGamut =
    ColorGamut::from_xy((0.680, 0.320), (0.265, 0.690), (0.150, 0.060), (0.314, 0.351));

/// Display P3 (SMPTE EG 432-1), D65 white.
pub const DISPLAY_P3: ColorGamut =
    ColorGamut::from_xy((0.680, 0.320), (0.265, 0.690), (0.150, 0.060), (0.3127, 0.3290));

/// Adobe RGB (1998), D65 white.
pub const ADOBE_RGB: ColorGamut =
    ColorGamut::from_xy((0.64, 0.33), (0.21, 0.71), (0.15, 0.06), (0.3127, 0.3290));

/// Identifier of a standard set of primaries.
///
/// The config token (`prim_named=`, `target_named=`) is [`NamedPrimaries::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedPrimaries {
    /// sRGB / BT.709
    Srgb,
    /// PAL-M
    PalM,
    /// PAL
    Pal,
    /// NTSC
    Ntsc,
    /// Generic film
    GenericFilm,
    /// BT.2020
    Bt2020,
    /// CIE 1931 XYZ
    Cie1931Xyz,
    /// DCI-P3
    DciP3,
    /// Display P3
    DisplayP3,
    /// Adobe RGB
    AdobeRgb,
}

impl NamedPrimaries {
    /// Every named set, in config table order.
    pub const ALL: [Self; 10] = [
        Self::Srgb,
        Self::PalM,
        Self::Pal,
        Self::Ntsc,
        Self::GenericFilm,
        Self::Bt2020,
        Self::Cie1931Xyz,
        Self::DciP3,
        Self::DisplayP3,
        Self::AdobeRgb,
    ];

    /// Returns the chromaticities.
    pub const fn gamut(self) -> ColorGamut {
        match self {
            Self::Srgb => SRGB,
            Self::PalM => PAL_M,
            Self::Pal => PAL,
            Self::Ntsc => NTSC,
            Self::GenericFilm => GENERIC_FILM,
            Self::Bt2020 => BT2020,
            Self::Cie1931Xyz => CIE1931_XYZ,
            Self::DciP3 => DCI_P3,
            Self::DisplayP3 => DISPLAY_P3,
            Self::AdobeRgb => ADOBE_RGB,
        }
    }

    /// Config token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Srgb => "srgb",
            Self::PalM => "pal_m",
            Self::Pal => "pal",
            Self::Ntsc => "ntsc",
            Self::GenericFilm => "generic_film",
            Self::Bt2020 => "bt2020",
            Self::Cie1931Xyz => "cie1931_xyz",
            Self::DciP3 => "dci_p3",
            Self::DisplayP3 => "display_p3",
            Self::AdobeRgb => "adobe_rgb",
        }
    }

    /// Looks up a config token. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Bit index used by capability masks.
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }
}

impl fmt::Display for NamedPrimaries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_name_roundtrip() {
        for p in NamedPrimaries::ALL {
            assert_eq!(NamedPrimaries::from_name(p.name()), Some(p));
        }
        assert_eq!(NamedPrimaries::from_name("SRGB"), None);
        assert_eq!(NamedPrimaries::from_name("rec709"), None);
    }

    #[test]
    fn test_display_p3_shares_dci_primaries() {
        let dci = NamedPrimaries::DciP3.gamut();
        let display = NamedPrimaries::DisplayP3.gamut();
        assert_eq!(dci.primary, display.primary);
        assert_abs_diff_eq!(dci.white_point.x, 0.314);
        assert_abs_diff_eq!(display.white_point.x, 0.3127);
    }

    #[test]
    fn test_all_named_contain_white() {
        for p in NamedPrimaries::ALL {
            assert!(p.gamut().contains_white_point(), "{}", p);
        }
    }

    #[test]
    fn test_index_is_dense() {
        for (i, p) in NamedPrimaries::ALL.iter().enumerate() {
            assert_eq!(p.index() as usize, i);
        }
    }
}
