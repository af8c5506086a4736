//! # ccm-lut
//!
//! 1D lookup tables sampled from tone curves, plus the search and inversion
//! routines used when a renderer needs the inverse of a sampled curve.
//!
//! - [`Lut1D`] - uniformly sampled curve over `[0, 1]`
//! - [`find_neighbors`] - bracketing index pair on a monotonic sample array
//! - [`inverse_evaluate_lut1d`] - approximate normalized input for an output
//!
//! # Usage
//!
//! ```rust
//! use ccm_lut::{inverse_evaluate_lut1d, Lut1D};
//! use ccm_transfer::ToneCurve;
//!
//! let lut = Lut1D::from_curve(ToneCurve::St2084PqEotf, 4096)?;
//! let signal = inverse_evaluate_lut1d(lut.as_slice(), 0.01)?;
//! assert!(signal > 0.4 && signal < 0.6);
//! # Ok::<(), ccm_lut::LutError>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
mod lut1d;
mod search;

pub use error::{LutError, LutResult};
pub use lut1d::Lut1D;
pub use search::{find_neighbors, inverse_evaluate_lut1d};
