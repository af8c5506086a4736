//! # ccm-output
//!
//! Per-output color setup for a compositor.
//!
//! | Module | Handles |
//! |--------|---------|
//! | [`modes`] | `eotf-mode=` and `colorimetry-mode=` tokens |
//! | [`output`] | Mode resolution against head capabilities |
//! | [`hdr`] | HDR static metadata type 1 |
//! | [`characteristics`] | `[color_characteristics]` sections |
//! | [`edid`] | Chromaticity, gamma and HDR blocks from EDID |
//! | [`manager`] | The [`ColorManager`] interface |
//! | [`stock`] | [`StockColorManager`], a matrix-and-curve implementation |
//! | [`auto`] | `color-profile=auto:` derivation |
//! | [`configure`] | All of the above driven from `weston.ini` |
//!
//! # Usage
//!
//! ```rust
//! use ccm_output::{ColorConfig, ColorManager, EotfMode, HeadCaps, StockColorManager};
//! use ccm_profile::IniFile;
//!
//! let ini = IniFile::parse(
//!     "[core]\ncolor-management=true\n\n[output]\nname=DP-1\neotf-mode=st2084\n",
//! ).unwrap();
//! let mut cm = StockColorManager::default();
//! let (config, errors) = ColorConfig::from_ini(&ini, cm.capabilities());
//! assert!(errors.is_empty());
//!
//! let out = config.configure_output(&ini, &mut cm, "DP-1", HeadCaps::all(), None).unwrap();
//! assert_eq!(out.output.eotf_mode(), EotfMode::St2084);
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod auto;
pub mod characteristics;
pub mod configure;
pub mod edid;
pub mod error;
pub mod hdr;
pub mod manager;
pub mod modes;
pub mod output;
pub mod stock;

pub use auto::{derive_auto_params, AutoFallback, AutoInputs, PartialLuminance};
pub use characteristics::{parse_color_characteristics, CharacteristicsError};
pub use configure::{ColorConfig, ConfiguredOutput};
pub use edid::{DisplayDescriptor, Edid, EdidError, LuminanceRange};
pub use error::{OutputError, OutputResult};
pub use hdr::{HdrGroups, HdrMetadataError, HdrMetadataType1};
pub use manager::{ColorManager, ColorTransform, ManagerError, OutputColorOutcome};
pub use modes::{ColorimetryMode, ColorimetryModes, EotfMode, EotfModes};
pub use output::{HeadCaps, Output};
pub use stock::{ColorProfile, StockColorManager};
