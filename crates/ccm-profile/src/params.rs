//! Parametric color profile description.

use ccm_primaries::{normalized_primary_matrix, ColorGamut, NamedPrimaries, NpmDirection};
use ccm_math::Mat3;
use ccm_transfer::{DefaultLuminance, NamedTransferFunction, TransferFunction};
use serde::{Deserialize, Serialize};

/// How the signaling primaries were given.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrimariesSpec {
    /// A standard set from the config table.
    Named(NamedPrimaries),
    /// Explicit chromaticities.
    Explicit(ColorGamut),
}

impl PrimariesSpec {
    /// Resolved chromaticities.
    pub const fn gamut(&self) -> ColorGamut {
        match self {
            Self::Named(p) => p.gamut(),
            Self::Explicit(g) => *g,
        }
    }

    /// The named set, if any.
    pub const fn named(&self) -> Option<NamedPrimaries> {
        match self {
            Self::Named(p) => Some(*p),
            Self::Explicit(_) => None,
        }
    }
}

/// A complete, validated parametric color profile.
///
/// Produced by [`crate::ParamBuilder::build`], by the `[color-profile]`
/// config parser, or by one of the preset constructors. Luminances are in
/// cd/m².
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColorProfileParams {
    /// Signaling primaries
    pub primaries: PrimariesSpec,
    /// Mastering / target primaries
    pub target_primaries: ColorGamut,
    /// Transfer function
    pub tf: TransferFunction,
    /// Signaling minimum luminance
    pub min_luminance: f32,
    /// Signaling maximum luminance
    pub max_luminance: f32,
    /// Reference white luminance
    pub reference_white_luminance: f32,
    /// Target minimum luminance
    pub target_min_luminance: f32,
    /// Target maximum luminance
    pub target_max_luminance: f32,
    /// Maximum content light level
    pub max_cll: Option<f32>,
    /// Maximum frame-average light level
    pub max_fall: Option<f32>,
}

impl ColorProfileParams {
    fn preset(primaries: NamedPrimaries, tf: NamedTransferFunction) -> Self {
        let DefaultLuminance { min, max, reference } = tf.default_luminance();
        Self {
            primaries: PrimariesSpec::Named(primaries),
            target_primaries: primaries.gamut(),
            tf: TransferFunction::Named(tf),
            min_luminance: min,
            max_luminance: max,
            reference_white_luminance: reference,
            target_min_luminance: min,
            target_max_luminance: max,
            max_cll: None,
            max_fall: None,
        }
    }

    /// sRGB primaries with the gamma 2.2 display curve.
    pub fn srgb() -> Self {
        Self::preset(NamedPrimaries::Srgb, NamedTransferFunction::Gamma22)
    }

    /// BT.2100 with the PQ transfer function.
    pub fn bt2100_pq() -> Self {
        Self::preset(NamedPrimaries::Bt2020, NamedTransferFunction::St2084Pq)
    }

    /// BT.2100 with the HLG transfer function.
    pub fn bt2100_hlg() -> Self {
        Self::preset(NamedPrimaries::Bt2020, NamedTransferFunction::Hlg)
    }

    /// Signaling gamut.
    #[inline]
    pub fn gamut(&self) -> ColorGamut {
        self.primaries.gamut()
    }

    /// Normalized primary matrix of the signaling gamut.
    pub fn npm(&self, direction: NpmDirection) -> Option<Mat3> {
        normalized_primary_matrix(&self.gamut(), direction)
    }
}
