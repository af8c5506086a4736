//! # ccm-transfer
//!
//! Tone curves and transfer functions.
//!
//! Two layers live here:
//!
//! - [`ToneCurve`]: fixed curve ids over `[0, 1]`, each naming its own
//!   inverse. These are what LUTs get sampled from.
//! - [`TransferFunction`]: what a color profile carries. Either identity, a
//!   [`NamedTransferFunction`] from the config table, or a power exponent.
//!
//! The per-curve modules hold the raw formulas.
//!
//! | Module | Curves |
//! |--------|--------|
//! | [`srgb`] | sRGB, extended sRGB |
//! | [`gamma`] | power 2.2 / 2.4 / 2.8, Adobe RGB, `tf_power` |
//! | [`pq`] | SMPTE ST 2084 |
//! | [`hlg`] | BT.2100 HLG |
//! | [`bt1886`] | BT.1886 |
//! | [`log`] | H.273 Log-100, Log-316 |
//! | [`legacy`] | ST 240, BT.709 / xvYCC, ST 428 |
//!
//! # Usage
//!
//! ```rust
//! use ccm_transfer::{NamedTransferFunction, ToneCurve};
//!
//! let tf = NamedTransferFunction::from_name("st2084_pq").unwrap();
//! let curve = tf.tone_curve().unwrap();
//! assert_eq!(curve, ToneCurve::St2084PqEotf);
//! assert_eq!(curve.inverse(), ToneCurve::St2084PqEotfInverse);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod bt1886;
pub mod gamma;
pub mod hlg;
pub mod legacy;
pub mod log;
pub mod pq;
pub mod srgb;

mod curve;
mod error;
mod function;
mod named;

pub use curve::{ToneCurve, DOMAIN_TOLERANCE};
pub use error::{TransferError, TransferResult};
pub use function::{TransferFunction, POWER_MAX, POWER_MIN};
pub use named::{DefaultLuminance, NamedTransferFunction};
