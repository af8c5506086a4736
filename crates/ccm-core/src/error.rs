//! Error types for ccm-core operations.
//!
//! # Usage
//!
//! ```rust
//! use ccm_core::{IdAllocator, IdError};
//!
//! let mut ids = IdAllocator::new();
//! let id = ids.get_id();
//! assert!(ids.put_id(id).is_ok());
//! assert_eq!(ids.put_id(id), Err(IdError::NotAllocated(id)));
//! ```

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors produced by the core value types.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// Chromaticity with `y == 0` cannot be lifted to XYZ.
    #[error("chromaticity ({x}, {y}) has zero y and no XYZ representation")]
    DegenerateChromaticity {
        /// x coordinate
        x: f32,
        /// y coordinate
        y: f32,
    },

    /// Id allocator misuse.
    #[error(transparent)]
    Id(#[from] IdError),
}

/// Misuse of [`crate::IdAllocator`].
///
/// These indicate a caller bug rather than bad user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum IdError {
    /// Id 0 is reserved and never issued.
    #[error("id 0 is reserved and cannot be released")]
    Reserved,

    /// The id is not currently allocated.
    #[error("id {0} is not allocated")]
    NotAllocated(u32),
}
