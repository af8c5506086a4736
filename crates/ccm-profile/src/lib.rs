//! # ccm-profile
//!
//! Parametric color profiles.
//!
//! - [`ParamBuilder`] - collects parameters one setter at a time, checks them
//!   against the color manager's [`Capabilities`] and returns every problem
//!   at once
//! - [`ColorProfileParams`] - the validated result
//! - [`IniFile`] / [`Section`] - `weston.ini` reader
//! - [`config`] - `[color-profile]` sections and the [`ProfileTable`]
//! - [`ProfileRef`] - what an output's `color-profile=` key points at
//!
//! # Usage
//!
//! ```rust
//! use ccm_profile::{Capabilities, IniFile, ProfileTable};
//!
//! let ini = IniFile::parse(
//!     "[color-profile]\nname=hdr\nprim_named=bt2020\ntf_named=st2084_pq\n",
//! ).unwrap();
//! let (table, errors) = ProfileTable::from_ini(&ini, &Capabilities::all());
//! assert!(errors.is_empty());
//! assert_eq!(table.get("hdr").unwrap().max_luminance, 10000.0);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod caps;
pub mod config;
pub mod error;
pub mod ini;
pub mod params;
pub mod reference;

pub use builder::{ParamBuilder, ParamError, ParamErrorKind, ParamErrors};
pub use caps::{Capabilities, Features, PrimariesSet, RenderIntents, TfSet};
pub use config::{params_from_section, ProfileConfigError, ProfileTable};
pub use error::{ProfileError, ProfileResult};
pub use ini::{IniFile, Section};
pub use params::{ColorProfileParams, PrimariesSpec};
pub use reference::{AutoFlags, ProfileRef};
