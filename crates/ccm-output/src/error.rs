//! Error types for output color setup.
//!
//! Mode errors display as the exact lines the compositor logs, including the
//! trailing newline.

use crate::characteristics::CharacteristicsError;
use crate::edid::EdidError;
use crate::hdr::HdrMetadataError;
use crate::manager::ManagerError;
use crate::modes::{ColorimetryMode, EotfMode};
use ccm_profile::ProfileError;
use thiserror::Error;

/// Result type for output color setup.
pub type OutputResult<T> = Result<T, OutputError>;

/// Errors raised while configuring an output's color.
#[derive(Debug, Error)]
pub enum OutputError {
    /// `eotf-mode=` value not in the table.
    #[error(
        "Error in config for output '{output}': '{value}' is not a valid EOTF mode. Try one of: {}\n",
        EotfMode::valid_names()
    )]
    InvalidEotfMode {
        /// Output name
        output: String,
        /// Raw value
        value: String,
    },

    /// Non-SDR EOTF with color management disabled.
    #[error("Error: EOTF mode {mode} on output '{output}' requires color-management=true in weston.ini\n")]
    EotfRequiresColorManagement {
        /// Output name
        output: String,
        /// Requested mode
        mode: EotfMode,
    },

    /// EOTF mode the head cannot drive.
    #[error("Error: output '{output}' does not support EOTF mode {mode}.\n")]
    UnsupportedEotfMode {
        /// Output name
        output: String,
        /// Requested mode
        mode: EotfMode,
    },

    /// `colorimetry-mode=` value not in the table.
    #[error(
        "Error in config for output '{output}': '{value}' is not a valid colorimetry mode. Try one of: {}\n",
        ColorimetryMode::valid_names()
    )]
    InvalidColorimetryMode {
        /// Output name
        output: String,
        /// Raw value
        value: String,
    },

    /// Non-default colorimetry with color management disabled.
    #[error(
        "Error: Colorimetry mode {mode} on output '{output}' requires color-management=true in weston.ini\n"
    )]
    ColorimetryRequiresColorManagement {
        /// Output name
        output: String,
        /// Requested mode
        mode: ColorimetryMode,
    },

    /// Colorimetry mode the head cannot drive.
    #[error("Error: output '{output}' does not support colorimetry mode {mode}.\n")]
    UnsupportedColorimetryMode {
        /// Output name
        output: String,
        /// Requested mode
        mode: ColorimetryMode,
    },

    /// `color-profile=` or `color_characteristics=` with color management disabled.
    #[error("Config error in weston.ini, output '{output}': {key}= requires color-management=true\n")]
    RequiresColorManagement {
        /// Output name
        output: String,
        /// Offending key
        key: &'static str,
    },

    /// `color_characteristics=` names no section.
    #[error(
        "Config error in weston.ini, output '{output}': no [color_characteristics] section with 'name={name}' found.\n"
    )]
    MissingCharacteristics {
        /// Output name
        output: String,
        /// Referenced name
        name: String,
    },

    /// Invalid `[color_characteristics]` section.
    #[error(transparent)]
    Characteristics(#[from] CharacteristicsError),

    /// HDR metadata set at run time failed validation.
    #[error("invalid HDR static metadata: {0}")]
    HdrMetadata(#[from] HdrMetadataError),

    /// Profile lookup or parsing failed.
    #[error(transparent)]
    Profile(#[from] ProfileError),

    /// The color manager refused.
    #[error(transparent)]
    Manager(#[from] ManagerError),

    /// Display data could not be read.
    #[error(transparent)]
    Edid(#[from] EdidError),
}
