//! EOTF and colorimetry modes of an output.
//!
//! Each mode has a config token (`eotf-mode=`, `colorimetry-mode=`) and a bit
//! in the matching capability set reported by a head.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Electro-optical transfer function the output signals to the sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EotfMode {
    /// Traditional gamma, SDR luminance range
    #[default]
    Sdr,
    /// Traditional gamma, HDR luminance range
    TraditionalHdr,
    /// SMPTE ST 2084 (PQ)
    St2084,
    /// Hybrid log-gamma
    Hlg,
}

impl EotfMode {
    /// Every mode, in config table order.
    pub const ALL: [Self; 4] = [Self::Sdr, Self::TraditionalHdr, Self::St2084, Self::Hlg];

    /// Config token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Sdr => "sdr",
            Self::TraditionalHdr => "hdr-gamma",
            Self::St2084 => "st2084",
            Self::Hlg => "hlg",
        }
    }

    /// Human readable description for logs.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Sdr => "SDR",
            Self::TraditionalHdr => "traditional gamma HDR",
            Self::St2084 => "ST2084",
            Self::Hlg => "HLG",
        }
    }

    /// Looks a config token up.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Space separated list of every token, for error messages.
    pub fn valid_names() -> String {
        token_list(Self::ALL.iter().map(|m| m.name()))
    }
}

impl fmt::Display for EotfMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Color space and encoding convention of the output signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorimetryMode {
    /// Sink default, usually BT.709 / sRGB
    #[default]
    Default,
    /// BT.2020 constant luminance YCbCr
    Bt2020Cycc,
    /// BT.2020 non-constant luminance YCbCr
    Bt2020Ycc,
    /// BT.2020 RGB
    Bt2020Rgb,
    /// DCI-P3 primaries, D65 white
    P3D65,
    /// DCI-P3 primaries, DCI white
    P3Dci,
    /// BT.2100 ICtCp
    Ictcp,
}

impl ColorimetryMode {
    /// Every mode, in config table order.
    pub const ALL: [Self; 7] = [
        Self::Default,
        Self::Bt2020Cycc,
        Self::Bt2020Ycc,
        Self::Bt2020Rgb,
        Self::P3D65,
        Self::P3Dci,
        Self::Ictcp,
    ];

    /// Config token.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bt2020Cycc => "bt2020cycc",
            Self::Bt2020Ycc => "bt2020ycc",
            Self::Bt2020Rgb => "bt2020rgb",
            Self::P3D65 => "p3d65",
            Self::P3Dci => "p3dci",
            Self::Ictcp => "ictcp",
        }
    }

    /// Human readable description for logs.
    pub const fn description(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Bt2020Cycc => "BT.2020 (cYCC)",
            Self::Bt2020Ycc => "BT.2020 (YCC)",
            Self::Bt2020Rgb => "BT.2020 (RGB)",
            Self::P3D65 => "DCI-P3 RGB D65",
            Self::P3Dci => "DCI-P3 RGB Theatre",
            Self::Ictcp => "BT.2100 ICtCp",
        }
    }

    /// Looks a config token up.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.name() == name)
    }

    /// Space separated list of every token, for error messages.
    pub fn valid_names() -> String {
        token_list(Self::ALL.iter().map(|m| m.name()))
    }
}

impl fmt::Display for ColorimetryMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn token_list<'a>(names: impl Iterator<Item = &'a str>) -> String {
    names.collect::<Vec<_>>().join(" ")
}

bitflags! {
    /// EOTF modes a head supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct EotfModes: u32 {
        /// [`EotfMode::Sdr`]
        const SDR = 1 << 0;
        /// [`EotfMode::TraditionalHdr`]
        const TRADITIONAL_HDR = 1 << 1;
        /// [`EotfMode::St2084`]
        const ST2084 = 1 << 2;
        /// [`EotfMode::Hlg`]
        const HLG = 1 << 3;
    }
}

impl EotfModes {
    /// The single bit for `mode`.
    pub const fn of(mode: EotfMode) -> Self {
        match mode {
            EotfMode::Sdr => Self::SDR,
            EotfMode::TraditionalHdr => Self::TRADITIONAL_HDR,
            EotfMode::St2084 => Self::ST2084,
            EotfMode::Hlg => Self::HLG,
        }
    }

    /// True if `mode` is in the set.
    pub const fn has(self, mode: EotfMode) -> bool {
        self.contains(Self::of(mode))
    }

    /// Members of the set, in table order.
    pub fn modes(self) -> impl Iterator<Item = EotfMode> {
        EotfMode::ALL.into_iter().filter(move |m| self.has(*m))
    }
}

impl Default for EotfModes {
    fn default() -> Self {
        Self::SDR
    }
}

bitflags! {
    /// Colorimetry modes a head supports.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct ColorimetryModes: u32 {
        /// [`ColorimetryMode::Default`]
        const DEFAULT = 1 << 0;
        /// [`ColorimetryMode::Bt2020Cycc`]
        const BT2020_CYCC = 1 << 1;
        /// [`ColorimetryMode::Bt2020Ycc`]
        const BT2020_YCC = 1 << 2;
        /// [`ColorimetryMode::Bt2020Rgb`]
        const BT2020_RGB = 1 << 3;
        /// [`ColorimetryMode::P3D65`]
        const P3D65 = 1 << 4;
        /// [`ColorimetryMode::P3Dci`]
        const P3DCI = 1 << 5;
        /// [`ColorimetryMode::Ictcp`]
        const ICTCP = 1 << 6;
    }
}

impl ColorimetryModes {
    /// The single bit for `mode`.
    pub const fn of(mode: ColorimetryMode) -> Self {
        match mode {
            ColorimetryMode::Default => Self::DEFAULT,
            ColorimetryMode::Bt2020Cycc => Self::BT2020_CYCC,
            ColorimetryMode::Bt2020Ycc => Self::BT2020_YCC,
            ColorimetryMode::Bt2020Rgb => Self::BT2020_RGB,
            ColorimetryMode::P3D65 => Self::P3D65,
            ColorimetryMode::P3Dci => Self::P3DCI,
            ColorimetryMode::Ictcp => Self::ICTCP,
        }
    }

    /// True if `mode` is in the set.
    pub const fn has(self, mode: ColorimetryMode) -> bool {
        self.contains(Self::of(mode))
    }

    /// Members of the set, in table order.
    pub fn modes(self) -> impl Iterator<Item = ColorimetryMode> {
        ColorimetryMode::ALL.into_iter().filter(move |m| self.has(*m))
    }
}

impl Default for ColorimetryModes {
    fn default() -> Self {
        Self::DEFAULT
    }
}
