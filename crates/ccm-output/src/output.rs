//! Output color state and mode resolution.
//!
//! Resolving `eotf-mode=` and `colorimetry-mode=` follows one pattern:
//!
//! 1. absent key: commit the default
//! 2. look the token up, else "not a valid ... mode"
//! 3. a non-default mode needs color management enabled
//! 4. the head must support the mode
//! 5. commit
//!
//! Every failure leaves the output's current mode untouched.

use crate::edid::DisplayDescriptor;
use crate::error::{OutputError, OutputResult};
use crate::hdr::HdrMetadataType1;
use crate::modes::{ColorimetryMode, ColorimetryModes, EotfMode, EotfModes};
use ccm_profile::Section;
use serde::{Deserialize, Serialize};

/// Config key selecting the EOTF mode.
pub const EOTF_MODE_KEY: &str = "eotf-mode";

/// Config key selecting the colorimetry mode.
pub const COLORIMETRY_MODE_KEY: &str = "colorimetry-mode";

/// Modes a head can drive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeadCaps {
    /// Supported EOTF modes
    pub eotf_modes: EotfModes,
    /// Supported colorimetry modes
    pub colorimetry_modes: ColorimetryModes,
}

impl HeadCaps {
    /// A head that only does SDR with default colorimetry.
    pub fn sdr_only() -> Self {
        Self::default()
    }

    /// A head that drives every mode.
    pub fn all() -> Self {
        Self { eotf_modes: EotfModes::all(), colorimetry_modes: ColorimetryModes::all() }
    }

    /// What a display advertises.
    pub fn from_display(display: &dyn DisplayDescriptor) -> Self {
        Self {
            eotf_modes: display.supported_eotf_modes(),
            colorimetry_modes: display.supported_colorimetry_modes(),
        }
    }
}

/// Color state of one output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Output {
    name: String,
    caps: HeadCaps,
    eotf_mode: EotfMode,
    colorimetry_mode: ColorimetryMode,
    hdr_metadata: Option<HdrMetadataType1>,
}

impl Output {
    /// A fresh output in SDR with default colorimetry.
    pub fn new(name: impl Into<String>, caps: HeadCaps) -> Self {
        Self {
            name: name.into(),
            caps,
            eotf_mode: EotfMode::default(),
            colorimetry_mode: ColorimetryMode::default(),
            hdr_metadata: None,
        }
    }

    /// Output name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Head capabilities.
    pub fn caps(&self) -> HeadCaps {
        self.caps
    }

    /// Active EOTF mode.
    pub fn eotf_mode(&self) -> EotfMode {
        self.eotf_mode
    }

    /// Active colorimetry mode.
    pub fn colorimetry_mode(&self) -> ColorimetryMode {
        self.colorimetry_mode
    }

    /// Display characteristics, if set.
    pub fn hdr_metadata(&self) -> Option<&HdrMetadataType1> {
        self.hdr_metadata.as_ref()
    }

    /// Resolves `eotf-mode=` from an `[output]` section.
    pub fn set_eotf_mode(&mut self, section: Option<&Section>, color_management: bool) -> OutputResult<EotfMode> {
        self.request_eotf_mode(section.and_then(|s| s.get(EOTF_MODE_KEY)), color_management)
    }

    /// Resolves an EOTF mode token; `None` selects the default.
    pub fn request_eotf_mode(&mut self, value: Option<&str>, color_management: bool) -> OutputResult<EotfMode> {
        let Some(value) = value else {
            self.eotf_mode = EotfMode::default();
            return Ok(self.eotf_mode);
        };
        let mode = EotfMode::from_name(value).ok_or_else(|| OutputError::InvalidEotfMode {
            output: self.name.clone(),
            value: value.to_string(),
        })?;
        if mode != EotfMode::default() && !color_management {
            return Err(OutputError::EotfRequiresColorManagement { output: self.name.clone(), mode });
        }
        if !self.caps.eotf_modes.has(mode) {
            return Err(OutputError::UnsupportedEotfMode { output: self.name.clone(), mode });
        }
        tracing::debug!("output '{}': EOTF mode {}", self.name, mode.description());
        self.eotf_mode = mode;
        Ok(mode)
    }

    /// Resolves `colorimetry-mode=` from an `[output]` section.
    pub fn set_colorimetry_mode(
        &mut self,
        section: Option<&Section>,
        color_management: bool,
    ) -> OutputResult<ColorimetryMode> {
        self.request_colorimetry_mode(section.and_then(|s| s.get(COLORIMETRY_MODE_KEY)), color_management)
    }

    /// Resolves a colorimetry mode token; `None` selects the default.
    pub fn request_colorimetry_mode(
        &mut self,
        value: Option<&str>,
        color_management: bool,
    ) -> OutputResult<ColorimetryMode> {
        let Some(value) = value else {
            self.colorimetry_mode = ColorimetryMode::default();
            return Ok(self.colorimetry_mode);
        };
        let mode = ColorimetryMode::from_name(value).ok_or_else(|| OutputError::InvalidColorimetryMode {
            output: self.name.clone(),
            value: value.to_string(),
        })?;
        if mode != ColorimetryMode::default() && !color_management {
            return Err(OutputError::ColorimetryRequiresColorManagement { output: self.name.clone(), mode });
        }
        if !self.caps.colorimetry_modes.has(mode) {
            return Err(OutputError::UnsupportedColorimetryMode { output: self.name.clone(), mode });
        }
        tracing::debug!("output '{}': colorimetry mode {}", self.name, mode.description());
        self.colorimetry_mode = mode;
        Ok(mode)
    }

    /// Sets display characteristics. `None` clears them along with both
    /// modes.
    pub fn set_color_characteristics(&mut self, md: Option<HdrMetadataType1>) -> OutputResult<()> {
        match md {
            Some(md) => {
                md.validate()?;
                self.hdr_metadata = Some(md);
            }
            None => self.reset(),
        }
        Ok(())
    }

    /// Back to SDR, default colorimetry and no characteristics.
    pub fn reset(&mut self) {
        self.eotf_mode = EotfMode::default();
        self.colorimetry_mode = ColorimetryMode::default();
        self.hdr_metadata = None;
    }
}
