//! Accumulating builder for [`ColorProfileParams`].
//!
//! Setters never fail. Each problem is recorded as a [`ParamError`] and
//! setting continues, so one [`ParamBuilder::build`] call reports everything
//! wrong with a parameter set. The first recorded error's kind is the cause
//! code handed back to runtime callers.
//!
//! # Example
//!
//! ```rust
//! use ccm_profile::{Capabilities, ParamBuilder, ParamErrorKind};
//! use ccm_primaries::NamedPrimaries;
//! use ccm_transfer::NamedTransferFunction;
//!
//! let caps = Capabilities::all();
//!
//! let mut b = ParamBuilder::new(&caps);
//! b.set_primaries_named(NamedPrimaries::Bt2020);
//! b.set_tf_named(NamedTransferFunction::St2084Pq);
//! let params = b.build().unwrap();
//! assert_eq!(params.max_luminance, 10000.0);
//!
//! let mut b = ParamBuilder::new(&caps);
//! b.set_tf_power(0.5);
//! let errors = b.build().unwrap_err();
//! assert_eq!(errors.cause(), Some(ParamErrorKind::InvalidTf));
//! ```

use crate::caps::{Capabilities, Features};
use crate::params::{ColorProfileParams, PrimariesSpec};
use ccm_core::CIExy;
use ccm_primaries::{ColorGamut, NamedPrimaries};
use ccm_transfer::{NamedTransferFunction, TransferFunction, POWER_MAX, POWER_MIN};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Allowed range of CIE x and y in parametric profiles.
pub const CIE_XY_RANGE: (f32, f32) = (-1.0, 2.0);

/// Upper bound for maxCLL and maxFALL.
pub const LIGHT_LEVEL_MAX: f32 = 1e6;

/// Cause code of a parameter error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParamErrorKind {
    /// Bad or unknown transfer function
    InvalidTf,
    /// Unknown primaries name
    InvalidPrimariesNamed,
    /// Signaling primaries are inconsistent
    InvalidPrimaries,
    /// Target primaries are inconsistent
    InvalidTargetPrimaries,
    /// Luminance out of range or out of order
    InvalidLuminance,
    /// CIE x or y outside the accepted range
    CieXyOutOfRange,
    /// The same parameter was set twice
    AlreadySet,
    /// The color manager does not support the value or feature
    Unsupported,
    /// A required parameter is missing
    IncompleteSet,
    /// maxCLL out of range
    InvalidMaxCll,
    /// maxFALL out of range
    InvalidMaxFall,
}

/// One diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParamError {
    /// Cause code
    pub kind: ParamErrorKind,
    /// Human-readable reason
    pub message: String,
}

impl ParamError {
    /// Creates a diagnostic.
    pub fn new(kind: ParamErrorKind, message: impl Into<String>) -> Self {
        Self { kind, message: message.into() }
    }
}

impl fmt::Display for ParamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// An ordered, non-empty list of diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParamErrors(Vec<ParamError>);

impl ParamErrors {
    /// Creates an empty list.
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Appends a diagnostic.
    pub fn push(&mut self, kind: ParamErrorKind, message: impl Into<String>) {
        self.0.push(ParamError::new(kind, message));
    }

    /// Cause code of the first diagnostic.
    pub fn cause(&self) -> Option<ParamErrorKind> {
        self.0.first().map(|e| e.kind)
    }

    /// Number of diagnostics.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates the diagnostics.
    pub fn iter(&self) -> std::slice::Iter<'_, ParamError> {
        self.0.iter()
    }

    /// Messages only, in order.
    pub fn messages(&self) -> Vec<&str> {
        self.0.iter().map(|e| e.message.as_str()).collect()
    }

    /// True if any message contains `needle`.
    pub fn mentions(&self, needle: &str) -> bool {
        self.0.iter().any(|e| e.message.contains(needle))
    }

    /// Appends every diagnostic of `other`.
    pub fn extend(&mut self, other: ParamErrors) {
        self.0.extend(other.0);
    }
}

impl<'a> IntoIterator for &'a ParamErrors {
    type Item = &'a ParamError;
    type IntoIter = std::slice::Iter<'a, ParamError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for ParamErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, e) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            f.write_str(&e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ParamErrors {}

/// Builder accumulating profile parameters and their errors.
#[derive(Debug, Clone)]
pub struct ParamBuilder<'a> {
    caps: &'a Capabilities,
    errors: ParamErrors,
    primaries: Option<PrimariesSpec>,
    tf: Option<TransferFunction>,
    // (min, reference, max)
    luminance: Option<(f32, f32, f32)>,
    target_primaries: Option<ColorGamut>,
    target_luminance: Option<(f32, f32)>,
    max_cll: Option<f32>,
    max_fall: Option<f32>,
}

impl<'a> ParamBuilder<'a> {
    /// Starts an empty parameter set checked against `caps`.
    pub fn new(caps: &'a Capabilities) -> Self {
        Self {
            caps,
            errors: ParamErrors::new(),
            primaries: None,
            tf: None,
            luminance: None,
            target_primaries: None,
            target_luminance: None,
            max_cll: None,
            max_fall: None,
        }
    }

    /// Diagnostics recorded so far.
    pub fn errors(&self) -> &ParamErrors {
        &self.errors
    }

    /// Records an externally detected problem, e.g. an unparseable value.
    pub fn report(&mut self, kind: ParamErrorKind, message: impl Into<String>) {
        self.errors.push(kind, message);
    }

    fn require(&mut self, feature: Features, what: &str) -> bool {
        if self.caps.features.contains(feature) {
            true
        } else {
            self.errors.push(
                ParamErrorKind::Unsupported,
                format!("{} not supported by the color manager", what),
            );
            false
        }
    }

    fn primaries_free(&mut self) -> bool {
        if self.primaries.is_some() {
            self.errors.push(ParamErrorKind::AlreadySet, "primaries were already set");
            false
        } else {
            true
        }
    }

    fn tf_free(&mut self) -> bool {
        if self.tf.is_some() {
            self.errors.push(ParamErrorKind::AlreadySet, "transfer function was already set");
            false
        } else {
            true
        }
    }

    fn target_primaries_free(&mut self) -> bool {
        if self.target_primaries.is_some() {
            self.errors.push(ParamErrorKind::AlreadySet, "target primaries were already set");
            false
        } else {
            true
        }
    }

    fn check_cie(&mut self, what: &str, gamut: &ColorGamut) {
        let (lo, hi) = CIE_XY_RANGE;
        for (point, xy) in gamut.named_points() {
            for (axis, v) in [("x", xy.x), ("y", xy.y)] {
                if !(lo..=hi).contains(&v) {
                    self.errors.push(
                        ParamErrorKind::CieXyOutOfRange,
                        format!(
                            "{} {} {} = {:.6} is out of range [{:.1}, {:.1}]",
                            what, point, axis, v, lo, hi
                        ),
                    );
                }
            }
        }
    }

    fn check_white_inside(&mut self, what: &str, kind: ParamErrorKind, gamut: &ColorGamut) {
        if !gamut.contains_white_point() {
            let CIExy { x, y } = gamut.white_point;
            self.errors.push(
                kind,
                format!(
                    "{} white point ({:.6}, {:.6}) is outside the triangle of its primaries",
                    what, x, y
                ),
            );
        }
    }

    /// Sets signaling primaries from the named table.
    pub fn set_primaries_named(&mut self, primaries: NamedPrimaries) {
        if !self.primaries_free() {
            return;
        }
        if !self.caps.primaries.has(primaries) {
            self.errors.push(
                ParamErrorKind::Unsupported,
                format!(
                    "named primaries '{}' not supported by the color manager",
                    primaries.name()
                ),
            );
            return;
        }
        self.primaries = Some(PrimariesSpec::Named(primaries));
    }

    /// Sets explicit signaling primaries.
    pub fn set_primaries(&mut self, gamut: ColorGamut) {
        if !self.require(Features::SET_PRIMARIES, "setting primaries") {
            return;
        }
        if !self.primaries_free() {
            return;
        }
        self.check_cie("primaries", &gamut);
        self.check_white_inside("primaries", ParamErrorKind::InvalidPrimaries, &gamut);
        self.primaries = Some(PrimariesSpec::Explicit(gamut));
    }

    /// Sets a named transfer function.
    pub fn set_tf_named(&mut self, tf: NamedTransferFunction) {
        if !self.tf_free() {
            return;
        }
        if !self.caps.tfs.has(tf) {
            self.errors.push(
                ParamErrorKind::Unsupported,
                format!(
                    "named transfer function '{}' not supported by the color manager",
                    tf.name()
                ),
            );
            return;
        }
        self.tf = Some(TransferFunction::Named(tf));
    }

    /// Sets a pure power transfer function.
    pub fn set_tf_power(&mut self, exponent: f32) {
        if !self.require(Features::SET_TF_POWER, "power transfer function") {
            return;
        }
        if !self.tf_free() {
            return;
        }
        match TransferFunction::power(exponent) {
            Ok(tf) => self.tf = Some(tf),
            Err(_) => {
                self.errors.push(
                    ParamErrorKind::InvalidTf,
                    format!(
                        "tf power exponent {:.6} is not in the range [{:.1}, {:.1}]",
                        exponent, POWER_MIN, POWER_MAX
                    ),
                );
                // an out-of-range exponent still counts as set
                self.tf = Some(TransferFunction::Power(exponent));
            }
        }
    }

    /// Sets signaling luminances.
    pub fn set_primary_luminance(&mut self, min: f32, reference: f32, max: f32) {
        if !self.require(Features::SET_LUMINANCES, "setting luminances") {
            return;
        }
        if self.luminance.is_some() {
            self.errors.push(ParamErrorKind::AlreadySet, "luminances were already set");
            return;
        }

        for (name, v) in [("min_lum", min), ("ref_lum", reference), ("max_lum", max)] {
            if !v.is_finite() || v < 0.0 {
                self.errors.push(
                    ParamErrorKind::InvalidLuminance,
                    format!("{} {:.6} is not a valid luminance", name, v),
                );
            }
        }
        if !(reference > min) {
            self.errors.push(
                ParamErrorKind::InvalidLuminance,
                format!(
                    "reference luminance must be greater than primary minimum \
                     (ref_lum {:.6}, min_lum {:.6})",
                    reference, min
                ),
            );
        }
        if !(min < max) {
            self.errors.push(
                ParamErrorKind::InvalidLuminance,
                format!(
                    "primary minimum must be less than primary maximum \
                     (min_lum {:.6}, max_lum {:.6})",
                    min, max
                ),
            );
        }
        self.luminance = Some((min, reference, max));
    }

    /// Sets target primaries from the named table.
    pub fn set_target_primaries_named(&mut self, primaries: NamedPrimaries) {
        if !self.require(Features::SET_MASTERING_DISPLAY_PRIMARIES, "setting target primaries") {
            return;
        }
        if !self.target_primaries_free() {
            return;
        }
        if !self.caps.primaries.has(primaries) {
            self.errors.push(
                ParamErrorKind::Unsupported,
                format!(
                    "named primaries '{}' not supported by the color manager",
                    primaries.name()
                ),
            );
            return;
        }
        self.target_primaries = Some(primaries.gamut());
    }

    /// Sets explicit target primaries.
    pub fn set_target_primaries(&mut self, gamut: ColorGamut) {
        if !self.require(Features::SET_MASTERING_DISPLAY_PRIMARIES, "setting target primaries") {
            return;
        }
        if !self.target_primaries_free() {
            return;
        }
        self.check_cie("target primaries", &gamut);
        self.check_white_inside("target primaries", ParamErrorKind::InvalidTargetPrimaries, &gamut);
        self.target_primaries = Some(gamut);
    }

    /// Sets target luminances.
    pub fn set_target_luminance(&mut self, min: f32, max: f32) {
        if !self.require(Features::SET_MASTERING_DISPLAY_PRIMARIES, "setting target luminances") {
            return;
        }
        if self.target_luminance.is_some() {
            self.errors
                .push(ParamErrorKind::AlreadySet, "target luminances were already set");
            return;
        }
        if !min.is_finite() || !max.is_finite() || min < 0.0 {
            self.errors.push(
                ParamErrorKind::InvalidLuminance,
                format!(
                    "target luminances {:.6} and {:.6} are not valid luminances",
                    min, max
                ),
            );
        } else if !(min < max) {
            self.errors.push(
                ParamErrorKind::InvalidLuminance,
                format!(
                    "target minimum must be less than target maximum \
                     (target_min_lum {:.6}, target_max_lum {:.6})",
                    min, max
                ),
            );
        }
        self.target_luminance = Some((min, max));
    }

    /// Sets maxCLL.
    pub fn set_max_cll(&mut self, max_cll: f32) {
        if !self.require(Features::SET_MASTERING_DISPLAY_PRIMARIES, "setting maxCLL") {
            return;
        }
        if !(max_cll > 0.0 && max_cll <= LIGHT_LEVEL_MAX) {
            self.errors.push(
                ParamErrorKind::InvalidMaxCll,
                format!("maxCLL {:.6} is out of range (0, {:.0}]", max_cll, LIGHT_LEVEL_MAX),
            );
        }
        self.max_cll = Some(max_cll);
    }

    /// Sets maxFALL.
    pub fn set_max_fall(&mut self, max_fall: f32) {
        if !self.require(Features::SET_MASTERING_DISPLAY_PRIMARIES, "setting maxFALL") {
            return;
        }
        if !(max_fall > 0.0 && max_fall <= LIGHT_LEVEL_MAX) {
            self.errors.push(
                ParamErrorKind::InvalidMaxFall,
                format!("maxFALL {:.6} is out of range (0, {:.0}]", max_fall, LIGHT_LEVEL_MAX),
            );
        }
        self.max_fall = Some(max_fall);
    }

    /// Completes defaults, runs cross-field checks and returns the profile
    /// or every diagnostic recorded.
    pub fn build(mut self) -> Result<ColorProfileParams, ParamErrors> {
        if self.primaries.is_none() {
            self.errors.push(ParamErrorKind::IncompleteSet, "primaries not set");
        }
        if self.tf.is_none() {
            self.errors.push(ParamErrorKind::IncompleteSet, "transfer function not set");
        }
        let (Some(primaries), Some(tf)) = (self.primaries, self.tf) else {
            return Err(self.errors);
        };

        let defaults = tf.default_luminance();
        let (min, reference, max) = self
            .luminance
            .unwrap_or((defaults.min, defaults.reference, defaults.max));
        let target_primaries = self.target_primaries.unwrap_or_else(|| primaries.gamut());
        let (target_min, target_max) = self.target_luminance.unwrap_or((min, max));

        if let Some(cll) = self.max_cll {
            if cll < target_min {
                self.errors.push(
                    ParamErrorKind::InvalidMaxCll,
                    format!(
                        "maxCLL {:.6} should be greater or equal to target min luminance {:.6}",
                        cll, target_min
                    ),
                );
            }
        }
        if let Some(fall) = self.max_fall {
            if !(fall > min) {
                self.errors.push(
                    ParamErrorKind::InvalidMaxFall,
                    format!(
                        "maxFALL {:.6} must be greater than min luminance {:.6}",
                        fall, min
                    ),
                );
            }
        }

        if !self.errors.is_empty() {
            return Err(self.errors);
        }

        Ok(ColorProfileParams {
            primaries,
            target_primaries,
            tf,
            min_luminance: min,
            max_luminance: max,
            reference_white_luminance: reference,
            target_min_luminance: target_min,
            target_max_luminance: target_max,
            max_cll: self.max_cll,
            max_fall: self.max_fall,
        })
    }
}
