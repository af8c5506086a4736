//! Tone curve identifiers.
//!
//! A [`ToneCurve`] is a fixed, parameterless 1D curve over `[0, 1]`. Every id
//! names its own inverse, so inverting a pipeline stage is a table lookup
//! rather than a flag that each evaluation has to check.

use crate::{bt1886, gamma, hlg, log, pq, srgb, TransferError, TransferResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How far outside `[0, 1]` an input may stray and still be clamped.
pub const DOMAIN_TOLERANCE: f32 = 1e-5;

/// A named 1D tone curve.
///
/// # Example
///
/// ```rust
/// use ccm_transfer::ToneCurve;
///
/// let fwd = ToneCurve::SrgbEotf;
/// let y = fwd.apply(0.5).unwrap();
/// let x = fwd.inverse().apply(y).unwrap();
/// assert!((x - 0.5).abs() < 1e-5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToneCurve {
    /// `y = x`
    Identity,
    /// sRGB piecewise EOTF
    SrgbEotf,
    /// Inverse of [`ToneCurve::SrgbEotf`]
    SrgbEotfInverse,
    /// Adobe RGB (1998), power 563/256
    AdobeRgbEotf,
    /// Inverse of [`ToneCurve::AdobeRgbEotf`]
    AdobeRgbEotfInverse,
    /// Power 2.2
    Power22Eotf,
    /// Inverse of [`ToneCurve::Power22Eotf`]
    Power22EotfInverse,
    /// Power 2.4
    Power24Eotf,
    /// Inverse of [`ToneCurve::Power24Eotf`]
    Power24EotfInverse,
    /// SMPTE ST 2084, normalized to 10000 cd/m²
    St2084PqEotf,
    /// Inverse of [`ToneCurve::St2084PqEotf`]
    St2084PqEotfInverse,
    /// BT.2100 HLG OETF
    HlgOetf,
    /// Inverse of [`ToneCurve::HlgOetf`]
    HlgOetfInverse,
    /// BT.1886, normalized
    Bt1886Eotf,
    /// Inverse of [`ToneCurve::Bt1886Eotf`]
    Bt1886EotfInverse,
    /// H.273 logarithmic, 100:1
    Log100Eotf,
    /// Inverse of [`ToneCurve::Log100Eotf`]
    Log100EotfInverse,
    /// H.273 logarithmic, 316:1
    Log316Eotf,
    /// Inverse of [`ToneCurve::Log316Eotf`]
    Log316EotfInverse,
}

impl ToneCurve {
    /// Every curve id.
    pub const ALL: [Self; 19] = [
        Self::Identity,
        Self::SrgbEotf,
        Self::SrgbEotfInverse,
        Self::AdobeRgbEotf,
        Self::AdobeRgbEotfInverse,
        Self::Power22Eotf,
        Self::Power22EotfInverse,
        Self::Power24Eotf,
        Self::Power24EotfInverse,
        Self::St2084PqEotf,
        Self::St2084PqEotfInverse,
        Self::HlgOetf,
        Self::HlgOetfInverse,
        Self::Bt1886Eotf,
        Self::Bt1886EotfInverse,
        Self::Log100Eotf,
        Self::Log100EotfInverse,
        Self::Log316Eotf,
        Self::Log316EotfInverse,
    ];

    /// Returns the curve that undoes this one.
    pub const fn inverse(self) -> Self {
        use ToneCurve::*;
        match self {
            Identity => Identity,
            SrgbEotf => SrgbEotfInverse,
            SrgbEotfInverse => SrgbEotf,
            AdobeRgbEotf => AdobeRgbEotfInverse,
            AdobeRgbEotfInverse => AdobeRgbEotf,
            Power22Eotf => Power22EotfInverse,
            Power22EotfInverse => Power22Eotf,
            Power24Eotf => Power24EotfInverse,
            Power24EotfInverse => Power24Eotf,
            St2084PqEotf => St2084PqEotfInverse,
            St2084PqEotfInverse => St2084PqEotf,
            HlgOetf => HlgOetfInverse,
            HlgOetfInverse => HlgOetf,
            Bt1886Eotf => Bt1886EotfInverse,
            Bt1886EotfInverse => Bt1886Eotf,
            Log100Eotf => Log100EotfInverse,
            Log100EotfInverse => Log100Eotf,
            Log316Eotf => Log316EotfInverse,
            Log316EotfInverse => Log316Eotf,
        }
    }

    /// Short lowercase name, used in logs and reports.
    pub const fn name(self) -> &'static str {
        use ToneCurve::*;
        match self {
            Identity => "identity",
            SrgbEotf => "srgb_eotf",
            SrgbEotfInverse => "srgb_eotf_inverse",
            AdobeRgbEotf => "adobergb_eotf",
            AdobeRgbEotfInverse => "adobergb_eotf_inverse",
            Power22Eotf => "power2.2_eotf",
            Power22EotfInverse => "power2.2_eotf_inverse",
            Power24Eotf => "power2.4_eotf",
            Power24EotfInverse => "power2.4_eotf_inverse",
            St2084PqEotf => "st2084_pq_eotf",
            St2084PqEotfInverse => "st2084_pq_eotf_inverse",
            HlgOetf => "hlg_oetf",
            HlgOetfInverse => "hlg_oetf_inverse",
            Bt1886Eotf => "bt1886_eotf",
            Bt1886EotfInverse => "bt1886_eotf_inverse",
            Log100Eotf => "log100_eotf",
            Log100EotfInverse => "log100_eotf_inverse",
            Log316Eotf => "log316_eotf",
            Log316EotfInverse => "log316_eotf_inverse",
        }
    }

    /// Evaluates the curve at `x`.
    ///
    /// Inputs within [`DOMAIN_TOLERANCE`] of `[0, 1]` are clamped into it.
    /// Anything further out, or NaN, is rejected.
    pub fn apply(self, x: f32) -> TransferResult<f32> {
        if !(x >= -DOMAIN_TOLERANCE && x <= 1.0 + DOMAIN_TOLERANCE) {
            return Err(TransferError::OutOfDomain { curve: self, value: x });
        }
        Ok(self.eval(x.clamp(0.0, 1.0)))
    }

    /// Evaluates every element of `values` in place.
    ///
    /// Stops at the first out-of-domain element; earlier elements stay
    /// converted.
    pub fn apply_slice(self, values: &mut [f32]) -> TransferResult<()> {
        for v in values.iter_mut() {
            *v = self.apply(*v)?;
        }
        Ok(())
    }

    fn eval(self, x: f32) -> f32 {
        use ToneCurve::*;
        match self {
            Identity => x,
            SrgbEotf => srgb::eotf(x),
            SrgbEotfInverse => srgb::eotf_inverse(x),
            AdobeRgbEotf => gamma::eotf(x, gamma::ADOBE_RGB_GAMMA),
            AdobeRgbEotfInverse => gamma::eotf_inverse(x, gamma::ADOBE_RGB_GAMMA),
            Power22Eotf => gamma::eotf(x, 2.2),
            Power22EotfInverse => gamma::eotf_inverse(x, 2.2),
            Power24Eotf => gamma::eotf(x, 2.4),
            Power24EotfInverse => gamma::eotf_inverse(x, 2.4),
            St2084PqEotf => pq::eotf(x),
            St2084PqEotfInverse => pq::eotf_inverse(x),
            HlgOetf => hlg::oetf(x),
            HlgOetfInverse => hlg::oetf_inverse(x),
            Bt1886Eotf => bt1886::eotf_normalized(x),
            Bt1886EotfInverse => bt1886::eotf_inverse_normalized(x),
            Log100Eotf => log::log100_eotf(x),
            Log100EotfInverse => log::log100_eotf_inverse(x),
            Log316Eotf => log::log316_eotf(x),
            Log316EotfInverse => log::log316_eotf_inverse(x),
        }
    }
}

impl fmt::Display for ToneCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
