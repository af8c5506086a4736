//! # ccm-core
//!
//! Core types shared by the compositor color management crates.
//!
//! - [`CIExy`] - CIE 1931 xy chromaticity coordinate
//! - [`IdAllocator`] - smallest-free positive id allocator (id 0 is reserved)
//! - [`Error`] / [`IdError`] - error types for the above
//!
//! ## Crate Structure
//!
//! ```text
//! ccm-core (this crate)
//!    ^
//!    |
//!    +-- ccm-math (matrices, chromatic adaptation)
//!    +-- ccm-primaries (gamuts, normalized primary matrices)
//!    +-- ccm-transfer (tone curves, transfer functions)
//!    +-- ccm-lut (1D LUT search and inversion)
//!    +-- ccm-profile (profile parameters, weston.ini parsing)
//!    +-- ccm-output (EOTF/colorimetry modes, HDR metadata, color manager)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod cie;
pub mod error;
pub mod idalloc;

pub use cie::CIExy;
pub use error::{Error, IdError, Result};
pub use idalloc::IdAllocator;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::cie::CIExy;
    pub use crate::error::{Error, IdError, Result};
    pub use crate::idalloc::IdAllocator;
}
