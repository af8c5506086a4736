//! Minimal EDID reader.
//!
//! Reads just what color management needs:
//!
//! - base block: chromaticity of the native primaries and white, and the
//!   display gamma
//! - CTA-861 extensions: the colorimetry data block and the HDR static
//!   metadata data block
//!
//! Everything else in the blob is skipped. The [`DisplayDescriptor`] trait is
//! the interface the rest of the crate consumes, so tests and other sources
//! can stand in for a real EDID.

use crate::modes::{ColorimetryModes, EotfModes};
use ccm_core::CIExy;
use ccm_primaries::ColorGamut;
use ccm_transfer::TransferFunction;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// EDID block size in bytes.
pub const BLOCK_SIZE: usize = 128;

const HEADER: [u8; 8] = [0x00, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0x00];
const CTA_EXTENSION_TAG: u8 = 0x02;
const CTA_EXTENDED_TAG: u8 = 7;
const EXT_COLORIMETRY: u8 = 5;
const EXT_HDR_STATIC_METADATA: u8 = 6;

/// Errors raised while reading an EDID blob.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EdidError {
    /// Fewer bytes than one block.
    #[error("EDID is {0} bytes, need at least {BLOCK_SIZE}")]
    TooShort(usize),

    /// The fixed 8-byte header is wrong.
    #[error("EDID header mismatch")]
    BadHeader,

    /// A block's bytes do not sum to zero.
    #[error("EDID block {0} checksum mismatch")]
    Checksum(usize),
}

/// Result type for EDID parsing.
pub type EdidResult<T> = Result<T, EdidError>;

/// Luminance range advertised by the sink, in cd/m².
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LuminanceRange {
    /// Desired content minimum luminance
    pub min: Option<f32>,
    /// Desired content maximum luminance
    pub max: Option<f32>,
    /// Desired content maximum frame-average luminance
    pub max_fall: Option<f32>,
}

impl LuminanceRange {
    /// True if both ends are known and ordered.
    pub fn is_complete(&self) -> bool {
        matches!((self.min, self.max), (Some(min), Some(max)) if min >= 0.0 && min < max)
    }
}

/// Display properties consumed by output setup and the auto profile.
pub trait DisplayDescriptor {
    /// Native primaries and white point, if advertised.
    fn native_primaries(&self) -> Option<ColorGamut>;

    /// Native transfer function, if advertised.
    fn native_tf(&self) -> Option<TransferFunction>;

    /// Luminance range, if advertised.
    fn luminance_range(&self) -> Option<LuminanceRange>;

    /// EOTF modes the sink accepts. SDR is always included.
    fn supported_eotf_modes(&self) -> EotfModes;

    /// Colorimetry modes the sink accepts. Default is always included.
    fn supported_colorimetry_modes(&self) -> ColorimetryModes;
}

/// Parsed EDID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edid {
    /// Base block chromaticity
    pub chromaticity: ColorGamut,
    /// Base block gamma, when defined
    pub gamma: Option<f32>,
    /// From the HDR static metadata data block
    pub eotf_modes: EotfModes,
    /// From the colorimetry data block
    pub colorimetry_modes: ColorimetryModes,
    /// From the HDR static metadata data block
    pub luminance: Option<LuminanceRange>,
}

fn checksum_ok(block: &[u8]) -> bool {
    block.iter().fold(0u8, |acc, b| acc.wrapping_add(*b)) == 0
}

// 10-bit chromaticity: 8 high bits plus 2 low bits packed elsewhere
fn chroma(hi: u8, lo: u8, shift: u8) -> f32 {
    let v = ((hi as u16) << 2) | ((lo >> shift) & 0x3) as u16;
    v as f32 / 1024.0
}

fn parse_chromaticity(b: &[u8]) -> ColorGamut {
    let (rg, bw) = (b[0x19], b[0x1a]);
    ColorGamut {
        primary: [
            CIExy::new(chroma(b[0x1b], rg, 6), chroma(b[0x1c], rg, 4)),
            CIExy::new(chroma(b[0x1d], rg, 2), chroma(b[0x1e], rg, 0)),
            CIExy::new(chroma(b[0x1f], bw, 6), chroma(b[0x20], bw, 4)),
        ],
        white_point: CIExy::new(chroma(b[0x21], bw, 2), chroma(b[0x22], bw, 0)),
    }
}

/// CTA-861 luminance code value to cd/m².
fn max_luminance(cv: u8) -> f32 {
    50.0 * 2f32.powf(cv as f32 / 32.0)
}

fn min_luminance(cv: u8, max: f32) -> f32 {
    let r = cv as f32 / 255.0;
    max * r * r / 100.0
}

impl Edid {
    /// Parses a blob of one base block plus extensions.
    ///
    /// Extensions that are missing, truncated or fail their checksum are
    /// skipped with a warning; only base block problems are errors.
    pub fn parse(data: &[u8]) -> EdidResult<Self> {
        if data.len() < BLOCK_SIZE {
            return Err(EdidError::TooShort(data.len()));
        }
        let base = &data[..BLOCK_SIZE];
        if base[..8] != HEADER {
            return Err(EdidError::BadHeader);
        }
        if !checksum_ok(base) {
            return Err(EdidError::Checksum(0));
        }

        let gamma = match base[0x17] {
            0xff => None,
            g => Some((g as f32 + 100.0) / 100.0),
        };

        let mut edid = Self {
            chromaticity: parse_chromaticity(base),
            gamma,
            eotf_modes: EotfModes::SDR,
            colorimetry_modes: ColorimetryModes::DEFAULT,
            luminance: None,
        };

        let extensions = base[0x7e] as usize;
        for n in 1..=extensions {
            let Some(block) = data.get(n * BLOCK_SIZE..(n + 1) * BLOCK_SIZE) else {
                tracing::warn!("EDID announces {} extensions but block {} is missing", extensions, n);
                break;
            };
            if !checksum_ok(block) {
                tracing::warn!("{}, skipping", EdidError::Checksum(n));
                continue;
            }
            if block[0] == CTA_EXTENSION_TAG {
                edid.parse_cta(block);
            }
        }

        Ok(edid)
    }

    fn parse_cta(&mut self, block: &[u8]) {
        let dtd_offset = (block[2] as usize).min(BLOCK_SIZE - 1);
        let mut pos = 4;
        while pos < dtd_offset {
            let tag = block[pos] >> 5;
            let len = (block[pos] & 0x1f) as usize;
            let end = pos + 1 + len;
            if end > dtd_offset {
                tracing::warn!("EDID CTA data block at {} overruns the collection", pos);
                break;
            }
            let payload = &block[pos + 1..end];
            if tag == CTA_EXTENDED_TAG {
                if let Some((&ext, body)) = payload.split_first() {
                    match ext {
                        EXT_COLORIMETRY => self.parse_colorimetry(body),
                        EXT_HDR_STATIC_METADATA => self.parse_hdr_static(body),
                        _ => {}
                    }
                }
            }
            pos = end;
        }
    }

    fn parse_colorimetry(&mut self, body: &[u8]) {
        let Some(&b0) = body.first() else { return };
        let b1 = body.get(1).copied().unwrap_or(0);
        let mut modes = ColorimetryModes::DEFAULT;
        modes.set(ColorimetryModes::BT2020_CYCC, b0 & (1 << 5) != 0);
        modes.set(ColorimetryModes::BT2020_YCC, b0 & (1 << 6) != 0);
        modes.set(ColorimetryModes::BT2020_RGB, b0 & (1 << 7) != 0);
        // ST 2113 RGB covers both P3 variants
        modes.set(ColorimetryModes::P3D65 | ColorimetryModes::P3DCI, b1 & (1 << 6) != 0);
        modes.set(ColorimetryModes::ICTCP, b1 & (1 << 7) != 0);
        self.colorimetry_modes |= modes;
    }

    fn parse_hdr_static(&mut self, body: &[u8]) {
        let Some(&eotfs) = body.first() else { return };
        let mut modes = EotfModes::SDR;
        modes.set(EotfModes::TRADITIONAL_HDR, eotfs & (1 << 1) != 0);
        modes.set(EotfModes::ST2084, eotfs & (1 << 2) != 0);
        modes.set(EotfModes::HLG, eotfs & (1 << 3) != 0);
        self.eotf_modes |= modes;

        let max = body.get(2).filter(|cv| **cv != 0).map(|cv| max_luminance(*cv));
        let max_fall = body.get(3).filter(|cv| **cv != 0).map(|cv| max_luminance(*cv));
        let min = match (body.get(4), max) {
            (Some(cv), Some(max)) => Some(min_luminance(*cv, max)),
            _ => None,
        };
        if max.is_some() || max_fall.is_some() || min.is_some() {
            self.luminance = Some(LuminanceRange { min, max, max_fall });
        }
    }
}

impl DisplayDescriptor for Edid {
    fn native_primaries(&self) -> Option<ColorGamut> {
        let g = self.chromaticity;
        let positive = g.named_points().iter().all(|(_, xy)| xy.x > 0.0 && xy.y > 0.0);
        (positive && g.contains_white_point()).then_some(g)
    }

    fn native_tf(&self) -> Option<TransferFunction> {
        self.gamma.and_then(|g| TransferFunction::power(g).ok())
    }

    fn luminance_range(&self) -> Option<LuminanceRange> {
        self.luminance
    }

    fn supported_eotf_modes(&self) -> EotfModes {
        self.eotf_modes | EotfModes::SDR
    }

    fn supported_colorimetry_modes(&self) -> ColorimetryModes {
        self.colorimetry_modes | ColorimetryModes::DEFAULT
    }
}
