//! Transfer functions selectable by name in configuration.

use crate::{bt1886, gamma, hlg, legacy, log, pq, srgb, ToneCurve};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A transfer function known to the color manager.
///
/// The config token (`tf_named=`) is [`NamedTransferFunction::name`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamedTransferFunction {
    /// ITU-R BT.1886
    Bt1886,
    /// Pure power 2.2
    Gamma22,
    /// Pure power 2.8
    Gamma28,
    /// SMPTE ST 240
    St240,
    /// Linear, unbounded
    ExtLinear,
    /// Logarithmic 100:1
    Log100,
    /// Logarithmic 316:1
    Log316,
    /// IEC 61966-2-4
    Xvycc,
    /// IEC 61966-2-1
    Srgb,
    /// sRGB extended to negative and above-one values
    ExtSrgb,
    /// SMPTE ST 2084 perceptual quantizer
    St2084Pq,
    /// SMPTE ST 428-1
    St428,
    /// Hybrid log-gamma
    Hlg,
}

/// Default signaling luminances of a transfer function, in cd/m².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DefaultLuminance {
    /// Minimum luminance
    pub min: f32,
    /// Maximum luminance
    pub max: f32,
    /// Reference white luminance
    pub reference: f32,
}

impl DefaultLuminance {
    /// PQ system: 0.005 / 10000 / 203.
    pub const PQ: Self = Self { min: 0.005, max: 10000.0, reference: 203.0 };
    /// HLG system: 0.005 / 1000 / 203.
    pub const HLG: Self = Self { min: 0.005, max: 1000.0, reference: 203.0 };
    /// Everything else: 0.2 / 80 / 80.
    pub const SDR: Self = Self { min: 0.2, max: 80.0, reference: 80.0 };
}

impl NamedTransferFunction {
    /// Every named transfer function, in config table order.
    pub const ALL: [Self; 13] = [
        Self::Bt1886,
        Self::Gamma22,
        Self::Gamma28,
        Self::St240,
        Self::ExtLinear,
        Self::Log100,
        Self::Log316,
        Self::Xvycc,
        Self::Srgb,
        Self::ExtSrgb,
        Self::St2084Pq,
        Self::St428,
        Self::Hlg,
    ];

    /// Config token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Bt1886 => "bt1886",
            Self::Gamma22 => "gamma22",
            Self::Gamma28 => "gamma28",
            Self::St240 => "st240",
            Self::ExtLinear => "ext_linear",
            Self::Log100 => "log_100",
            Self::Log316 => "log_316",
            Self::Xvycc => "xvycc",
            Self::Srgb => "srgb",
            Self::ExtSrgb => "ext_srgb",
            Self::St2084Pq => "st2084_pq",
            Self::St428 => "st428",
            Self::Hlg => "hlg",
        }
    }

    /// Looks up a config token. Matching is exact.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|tf| tf.name() == name)
    }

    /// Bit index used by capability masks.
    #[inline]
    pub const fn index(self) -> u32 {
        self as u32
    }

    /// True for curves defined beyond `[0, 1]`.
    pub const fn is_extended(self) -> bool {
        matches!(self, Self::ExtLinear | Self::Xvycc | Self::ExtSrgb)
    }

    /// The equivalent fixed tone curve (signal to linear), if there is one.
    pub const fn tone_curve(self) -> Option<ToneCurve> {
        match self {
            Self::Bt1886 => Some(ToneCurve::Bt1886Eotf),
            Self::Gamma22 => Some(ToneCurve::Power22Eotf),
            Self::ExtLinear => Some(ToneCurve::Identity),
            Self::Log100 => Some(ToneCurve::Log100Eotf),
            Self::Log316 => Some(ToneCurve::Log316Eotf),
            Self::Srgb => Some(ToneCurve::SrgbEotf),
            Self::St2084Pq => Some(ToneCurve::St2084PqEotf),
            Self::Hlg => Some(ToneCurve::HlgOetfInverse),
            Self::Gamma28 | Self::St240 | Self::Xvycc | Self::ExtSrgb | Self::St428 => None,
        }
    }

    /// Default signaling luminances.
    pub const fn default_luminance(self) -> DefaultLuminance {
        match self {
            Self::St2084Pq => DefaultLuminance::PQ,
            Self::Hlg => DefaultLuminance::HLG,
            _ => DefaultLuminance::SDR,
        }
    }

    /// Signal to linear. Extended curves accept any finite input; the rest
    /// treat negative input as zero.
    pub fn eval(self, v: f32) -> f32 {
        match self {
            Self::Bt1886 => bt1886::eotf_normalized(v.max(0.0)),
            Self::Gamma22 => gamma::eotf(v, 2.2),
            Self::Gamma28 => gamma::eotf(v, 2.8),
            Self::St240 => legacy::st240_eotf(v.max(0.0)),
            Self::ExtLinear => v,
            Self::Log100 => log::log100_eotf(v),
            Self::Log316 => log::log316_eotf(v),
            Self::Xvycc => legacy::xvycc_eotf(v),
            Self::Srgb => srgb::eotf(v.max(0.0)),
            Self::ExtSrgb => srgb::ext_eotf(v),
            Self::St2084Pq => pq::eotf(v),
            Self::St428 => legacy::st428_eotf(v),
            Self::Hlg => hlg::oetf_inverse(v),
        }
    }

    /// Linear to signal.
    pub fn eval_inverse(self, l: f32) -> f32 {
        match self {
            Self::Bt1886 => bt1886::eotf_inverse_normalized(l.max(0.0)),
            Self::Gamma22 => gamma::eotf_inverse(l, 2.2),
            Self::Gamma28 => gamma::eotf_inverse(l, 2.8),
            Self::St240 => legacy::st240_eotf_inverse(l.max(0.0)),
            Self::ExtLinear => l,
            Self::Log100 => log::log100_eotf_inverse(l),
            Self::Log316 => log::log316_eotf_inverse(l),
            Self::Xvycc => legacy::xvycc_eotf_inverse(l),
            Self::Srgb => srgb::eotf_inverse(l.max(0.0)),
            Self::ExtSrgb => srgb::ext_eotf_inverse(l),
            Self::St2084Pq => pq::eotf_inverse(l),
            Self::St428 => legacy::st428_eotf_inverse(l),
            Self::Hlg => hlg::oetf(l),
        }
    }
}

impl fmt::Display for NamedTransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
