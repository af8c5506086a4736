//! Capability descriptor of a color manager.
//!
//! The parameter builder consults this to reject named values and features
//! the manager cannot honor.

use bitflags::bitflags;
use ccm_primaries::NamedPrimaries;
use ccm_transfer::NamedTransferFunction;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Optional color manager features.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct Features: u32 {
        /// ICC v2/v4 profiles
        const ICC_V2_V4 = 1 << 0;
        /// Parametric profiles at all
        const PARAMETRIC = 1 << 1;
        /// Explicit primaries chromaticities
        const SET_PRIMARIES = 1 << 2;
        /// Power-law transfer functions
        const SET_TF_POWER = 1 << 3;
        /// Signaling luminances
        const SET_LUMINANCES = 1 << 4;
        /// Mastering display primaries and luminances, maxCLL, maxFALL
        const SET_MASTERING_DISPLAY_PRIMARIES = 1 << 5;
        /// Target volume exceeding the signaling primaries
        const EXTENDED_TARGET_VOLUME = 1 << 6;
        /// Windows scRGB
        const WINDOWS_SCRGB = 1 << 7;
    }
}

bitflags! {
    /// Supported rendering intents.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct RenderIntents: u32 {
        /// Perceptual
        const PERCEPTUAL = 1 << 0;
        /// Media-relative colorimetric
        const RELATIVE = 1 << 1;
        /// Saturation
        const SATURATION = 1 << 2;
        /// ICC-absolute colorimetric
        const ABSOLUTE = 1 << 3;
        /// Media-relative colorimetric with black point compensation
        const RELATIVE_BPC = 1 << 4;
    }
}

bitflags! {
    /// A set of [`NamedPrimaries`], one bit per [`NamedPrimaries::index`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct PrimariesSet: u32 {
        /// sRGB
        const SRGB = 1 << 0;
        /// PAL-M
        const PAL_M = 1 << 1;
        /// PAL
        const PAL = 1 << 2;
        /// NTSC
        const NTSC = 1 << 3;
        /// Generic film
        const GENERIC_FILM = 1 << 4;
        /// BT.2020
        const BT2020 = 1 << 5;
        /// CIE 1931 XYZ
        const CIE1931_XYZ = 1 << 6;
        /// DCI-P3
        const DCI_P3 = 1 << 7;
        /// Display P3
        const DISPLAY_P3 = 1 << 8;
        /// Adobe RGB
        const ADOBE_RGB = 1 << 9;
    }
}

bitflags! {
    /// A set of [`NamedTransferFunction`], one bit per
    /// [`NamedTransferFunction::index`].
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct TfSet: u32 {
        /// BT.1886
        const BT1886 = 1 << 0;
        /// Gamma 2.2
        const GAMMA22 = 1 << 1;
        /// Gamma 2.8
        const GAMMA28 = 1 << 2;
        /// ST 240
        const ST240 = 1 << 3;
        /// Extended linear
        const EXT_LINEAR = 1 << 4;
        /// Log 100:1
        const LOG_100 = 1 << 5;
        /// Log 316:1
        const LOG_316 = 1 << 6;
        /// xvYCC
        const XVYCC = 1 << 7;
        /// sRGB
        const SRGB = 1 << 8;
        /// Extended sRGB
        const EXT_SRGB = 1 << 9;
        /// ST 2084 PQ
        const ST2084_PQ = 1 << 10;
        /// ST 428
        const ST428 = 1 << 11;
        /// HLG
        const HLG = 1 << 12;
    }
}

impl PrimariesSet {
    /// Single-member set.
    pub const fn of(p: NamedPrimaries) -> Self {
        Self::from_bits_retain(1 << p.index())
    }

    /// Membership test.
    pub const fn has(self, p: NamedPrimaries) -> bool {
        self.contains(Self::of(p))
    }
}

impl TfSet {
    /// Single-member set.
    pub const fn of(tf: NamedTransferFunction) -> Self {
        Self::from_bits_retain(1 << tf.index())
    }

    /// Membership test.
    pub const fn has(self, tf: NamedTransferFunction) -> bool {
        self.contains(Self::of(tf))
    }
}

/// What a color manager can do with parametric profiles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Capabilities {
    /// Optional features
    pub features: Features,
    /// Rendering intents
    pub intents: RenderIntents,
    /// Named primaries accepted by `prim_named` / `target_named`
    pub primaries: PrimariesSet,
    /// Named transfer functions accepted by `tf_named`
    pub tfs: TfSet,
}

impl Capabilities {
    /// A manager supporting everything.
    pub const fn all() -> Self {
        Self {
            features: Features::all(),
            intents: RenderIntents::all(),
            primaries: PrimariesSet::all(),
            tfs: TfSet::all(),
        }
    }

    /// A manager with no optional support at all.
    pub const fn none() -> Self {
        Self {
            features: Features::empty(),
            intents: RenderIntents::empty(),
            primaries: PrimariesSet::empty(),
            tfs: TfSet::empty(),
        }
    }
}

impl Default for Capabilities {
    fn default() -> Self {
        Self::all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sets_match_indices() {
        assert_eq!(PrimariesSet::of(NamedPrimaries::Srgb), PrimariesSet::SRGB);
        assert_eq!(PrimariesSet::of(NamedPrimaries::AdobeRgb), PrimariesSet::ADOBE_RGB);
        assert_eq!(TfSet::of(NamedTransferFunction::Hlg), TfSet::HLG);
        assert_eq!(TfSet::of(NamedTransferFunction::Gamma22), TfSet::GAMMA22);

        for p in NamedPrimaries::ALL {
            assert!(PrimariesSet::all().has(p));
        }
        for tf in NamedTransferFunction::ALL {
            assert!(TfSet::all().has(tf));
        }
    }

    #[test]
    fn test_membership() {
        let set = PrimariesSet::SRGB | PrimariesSet::BT2020;
        assert!(set.has(NamedPrimaries::Bt2020));
        assert!(!set.has(NamedPrimaries::DciP3));
    }
}
