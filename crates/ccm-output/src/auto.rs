//! The `auto:` pseudo-profile.
//!
//! `color-profile=auto:<flags>` derives a parametric profile from the
//! output's modes instead of a `[color-profile]` section:
//!
//! | EOTF mode | Transfer function |
//! |-----------|-------------------|
//! | `sdr` | gamma 2.2 |
//! | `hdr-gamma` | display gamma, else gamma 2.2 |
//! | `st2084` | ST 2084 PQ |
//! | `hlg` | HLG |
//!
//! | Colorimetry mode | Signaling primaries |
//! |------------------|---------------------|
//! | `default` | display native (with `edid-primaries`), else the fallback |
//! | `bt2020*`, `ictcp` | BT.2020 |
//! | `p3d65` | Display P3 |
//! | `p3dci` | DCI-P3 |
//!
//! With a non-default colorimetry, `edid-primaries` sets the target
//! primaries instead. `edid-luminance` takes the luminance range from the
//! display: signaling luminances for SDR-style curves, target luminances for
//! PQ and HLG. Missing or unusable display data falls back per
//! [`AutoFallback`].

use crate::edid::{DisplayDescriptor, LuminanceRange};
use crate::modes::{ColorimetryMode, EotfMode};
use ccm_primaries::{ColorGamut, NamedPrimaries};
use ccm_profile::{AutoFlags, Capabilities, ColorProfileParams, ParamBuilder, ParamErrors};
use ccm_transfer::{NamedTransferFunction, TransferFunction};
use serde::{Deserialize, Serialize};

/// Handling of a luminance range with only one end known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartialLuminance {
    /// Fill the missing end from the transfer function defaults
    #[default]
    Merge,
    /// Ignore the display range entirely
    Discard,
}

/// Fallbacks used when display data is missing or unusable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutoFallback {
    /// Signaling primaries when neither colorimetry nor display data give any
    pub primaries: NamedPrimaries,
    /// Partial luminance range policy
    pub partial_luminance: PartialLuminance,
}

impl Default for AutoFallback {
    fn default() -> Self {
        Self { primaries: NamedPrimaries::Srgb, partial_luminance: PartialLuminance::Merge }
    }
}

/// Inputs of the auto profile.
#[derive(Clone, Copy)]
pub struct AutoInputs<'a> {
    /// Flags after `auto:`
    pub flags: AutoFlags,
    /// Resolved EOTF mode
    pub eotf_mode: EotfMode,
    /// Resolved colorimetry mode
    pub colorimetry_mode: ColorimetryMode,
    /// Display data, if any
    pub display: Option<&'a dyn DisplayDescriptor>,
}

fn transfer_function(eotf: EotfMode, display: Option<&dyn DisplayDescriptor>) -> TransferFunction {
    let named = |tf| TransferFunction::Named(tf);
    match eotf {
        EotfMode::Sdr => named(NamedTransferFunction::Gamma22),
        EotfMode::TraditionalHdr => display
            .and_then(|d| d.native_tf())
            .unwrap_or(named(NamedTransferFunction::Gamma22)),
        EotfMode::St2084 => named(NamedTransferFunction::St2084Pq),
        EotfMode::Hlg => named(NamedTransferFunction::Hlg),
    }
}

fn signaling_primaries(colorimetry: ColorimetryMode) -> Option<NamedPrimaries> {
    match colorimetry {
        ColorimetryMode::Default => None,
        ColorimetryMode::Bt2020Cycc
        | ColorimetryMode::Bt2020Ycc
        | ColorimetryMode::Bt2020Rgb
        | ColorimetryMode::Ictcp => Some(NamedPrimaries::Bt2020),
        ColorimetryMode::P3D65 => Some(NamedPrimaries::DisplayP3),
        ColorimetryMode::P3Dci => Some(NamedPrimaries::DciP3),
    }
}

fn is_hdr_curve(tf: TransferFunction) -> bool {
    matches!(
        tf,
        TransferFunction::Named(NamedTransferFunction::St2084Pq | NamedTransferFunction::Hlg)
    )
}

fn display_primaries(inputs: &AutoInputs<'_>) -> Option<ColorGamut> {
    if !inputs.flags.contains(AutoFlags::EDID_PRIMARIES) {
        return None;
    }
    let gamut = inputs.display.and_then(|d| d.native_primaries());
    if gamut.is_none() {
        tracing::warn!("auto color profile: no usable display primaries, using defaults");
    }
    gamut
}

fn display_luminance(inputs: &AutoInputs<'_>, tf: TransferFunction, fallback: &AutoFallback) -> Option<(f32, f32)> {
    if !inputs.flags.contains(AutoFlags::EDID_LUMINANCE) {
        return None;
    }
    let range = inputs.display.and_then(|d| d.luminance_range());
    let resolved = range.and_then(|r| resolve_range(r, tf, fallback.partial_luminance));
    if resolved.is_none() {
        tracing::warn!("auto color profile: no usable display luminance range, using defaults");
    }
    resolved
}

fn resolve_range(range: LuminanceRange, tf: TransferFunction, policy: PartialLuminance) -> Option<(f32, f32)> {
    let defaults = tf.default_luminance();
    let (min, max) = match (range.min, range.max, policy) {
        (Some(min), Some(max), _) => (min, max),
        (None, None, _) | (_, _, PartialLuminance::Discard) => return None,
        (min, max, PartialLuminance::Merge) => (min.unwrap_or(defaults.min), max.unwrap_or(defaults.max)),
    };
    LuminanceRange { min: Some(min), max: Some(max), max_fall: None }
        .is_complete()
        .then_some((min, max))
}

/// Derives the parameters of an `auto:` profile.
///
/// The result goes through [`ParamBuilder`], so it is checked against
/// `caps` like any configured profile.
pub fn derive_auto_params(
    inputs: AutoInputs<'_>,
    fallback: &AutoFallback,
    caps: &Capabilities,
) -> Result<ColorProfileParams, ParamErrors> {
    let tf = transfer_function(inputs.eotf_mode, inputs.display);
    let native = display_primaries(&inputs);
    let luminance = display_luminance(&inputs, tf, fallback);

    let mut b = ParamBuilder::new(caps);

    match (signaling_primaries(inputs.colorimetry_mode), native) {
        (None, Some(gamut)) => b.set_primaries(gamut),
        (None, None) => b.set_primaries_named(fallback.primaries),
        (Some(named), native) => {
            b.set_primaries_named(named);
            if let Some(gamut) = native {
                b.set_target_primaries(gamut);
            }
        }
    }

    match tf {
        TransferFunction::Named(named) => b.set_tf_named(named),
        TransferFunction::Power(e) => b.set_tf_power(e),
        TransferFunction::Identity => b.set_tf_named(NamedTransferFunction::ExtLinear),
    }

    if let Some((min, max)) = luminance {
        if is_hdr_curve(tf) {
            b.set_target_luminance(min, max);
        } else {
            b.set_primary_luminance(min, max, max);
        }
    }

    let params = b.build();
    match &params {
        Ok(p) => tracing::debug!(
            "auto color profile: {} / {} -> {:?}, tf {}",
            inputs.eotf_mode,
            inputs.colorimetry_mode,
            p.primaries,
            p.tf
        ),
        Err(e) => tracing::error!("auto color profile: {}", e),
    }
    params
}
