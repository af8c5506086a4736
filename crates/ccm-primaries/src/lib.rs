//! # ccm-primaries
//!
//! Color gamuts, named primaries, and RGB-XYZ matrix generation.
//!
//! A [`ColorGamut`] is three CIE xy primaries (R, G, B) plus a white point.
//! From it this crate derives the normalized primary matrix (NPM) mapping
//! linear RGB to CIE XYZ, its inverse, and RGB-to-RGB conversion matrices
//! with optional Bradford chromatic adaptation.
//!
//! # Named Primaries
//!
//! | Name | Config token | White |
//! |------|--------------|-------|
//! | sRGB / BT.709 | `srgb` | D65 |
//! | PAL-M | `pal_m` | C |
//! | PAL | `pal` | D65 |
//! | NTSC (SMPTE 170M) | `ntsc` | D65 |
//! | Generic film | `generic_film` | C |
//! | BT.2020 | `bt2020` | D65 |
//! | CIE 1931 XYZ | `cie1931_xyz` | E |
//! | DCI-P3 | `dci_p3` | DCI |
//! | Display P3 | `display_p3` | D65 |
//! | Adobe RGB | `adobe_rgb` | D65 |
//!
//! # Usage
//!
//! ```rust
//! use ccm_primaries::{normalized_primary_matrix, NamedPrimaries, NpmDirection};
//! use ccm_math::Vec3;
//!
//! let gamut = NamedPrimaries::Srgb.gamut();
//! let rgb_to_xyz = normalized_primary_matrix(&gamut, NpmDirection::Forward).unwrap();
//! let white = rgb_to_xyz * Vec3::ONE;
//! assert!((white.y - 1.0).abs() < 1e-5);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod gamut;
mod named;

pub use gamut::*;
pub use named::*;
