//! Error types for tone curve evaluation.

use crate::ToneCurve;
use thiserror::Error;

/// Result type for this crate.
pub type TransferResult<T> = std::result::Result<T, TransferError>;

/// Tone curve evaluation errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum TransferError {
    /// Input lies outside `[0, 1]` by more than the clamping tolerance.
    #[error("{value} is outside the domain of {curve}")]
    OutOfDomain {
        /// Curve being evaluated
        curve: ToneCurve,
        /// Offending input
        value: f32,
    },

    /// Power exponent outside `[1.0, 10.0]`.
    #[error("power exponent {0} is outside [1.0, 10.0]")]
    InvalidExponent(f32),
}
