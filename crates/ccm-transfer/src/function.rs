//! The transfer function carried by a color profile.

use crate::{gamma, DefaultLuminance, NamedTransferFunction, TransferError, TransferResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Smallest accepted power exponent.
pub const POWER_MIN: f32 = 1.0;

/// Largest accepted power exponent.
pub const POWER_MAX: f32 = 10.0;

/// A profile's transfer function.
///
/// # Example
///
/// ```rust
/// use ccm_transfer::{NamedTransferFunction, TransferFunction};
///
/// let tf = TransferFunction::power(2.4).unwrap();
/// assert!((tf.eval(0.5) - 0.5f32.powf(2.4)).abs() < 1e-6);
///
/// let pq = TransferFunction::Named(NamedTransferFunction::St2084Pq);
/// assert_eq!(pq.default_luminance().max, 10000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransferFunction {
    /// Signal is linear.
    Identity,
    /// A named curve.
    Named(NamedTransferFunction),
    /// Pure power with the given exponent, mirrored for negative input.
    Power(f32),
}

impl TransferFunction {
    /// Creates a power curve, checking the exponent range.
    pub fn power(exponent: f32) -> TransferResult<Self> {
        if (POWER_MIN..=POWER_MAX).contains(&exponent) {
            Ok(Self::Power(exponent))
        } else {
            Err(TransferError::InvalidExponent(exponent))
        }
    }

    /// Signal to linear.
    pub fn eval(&self, v: f32) -> f32 {
        match *self {
            Self::Identity => v,
            Self::Named(tf) => tf.eval(v),
            Self::Power(e) => gamma::eotf_mirrored(v, e),
        }
    }

    /// Linear to signal.
    pub fn eval_inverse(&self, l: f32) -> f32 {
        match *self {
            Self::Identity => l,
            Self::Named(tf) => tf.eval_inverse(l),
            Self::Power(e) => gamma::eotf_inverse_mirrored(l, e),
        }
    }

    /// Default signaling luminances for this curve.
    pub fn default_luminance(&self) -> DefaultLuminance {
        match *self {
            Self::Named(tf) => tf.default_luminance(),
            Self::Identity | Self::Power(_) => DefaultLuminance::SDR,
        }
    }
}

impl Default for TransferFunction {
    fn default() -> Self {
        Self::Named(NamedTransferFunction::Srgb)
    }
}

impl From<NamedTransferFunction> for TransferFunction {
    fn from(tf: NamedTransferFunction) -> Self {
        Self::Named(tf)
    }
}

impl fmt::Display for TransferFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Identity => f.write_str("identity"),
            Self::Named(tf) => write!(f, "{}", tf),
            Self::Power(e) => write!(f, "power {}", e),
        }
    }
}
