//! LUT error types.

use ccm_transfer::TransferError;
use thiserror::Error;

/// Result type for LUT operations.
pub type LutResult<T> = Result<T, LutError>;

/// Errors that can occur during LUT operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LutError {
    /// Fewer than two entries.
    #[error("invalid LUT size: {0}, need at least 2 entries")]
    InvalidSize(usize),

    /// Sampling a tone curve failed.
    #[error(transparent)]
    Transfer(#[from] TransferError),
}
