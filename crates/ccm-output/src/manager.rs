//! Color manager interface.
//!
//! The color manager owns color profiles and turns an output's state plus its
//! profile into the transforms the renderer needs. Everything in this
//! workspace talks to it through [`ColorManager`]; profiles are opaque
//! handles of the manager's choosing.

use crate::hdr::HdrMetadataType1;
use crate::modes::{ColorimetryMode, EotfMode};
use crate::output::Output;
use ccm_lut::{Lut1D, LutError};
use ccm_math::{Mat3, Vec3};
use ccm_profile::{Capabilities, ColorProfileParams};
use thiserror::Error;

/// Errors reported by a color manager.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ManagerError {
    /// The parameters use something the manager cannot handle.
    #[error("color profile '{name}': {what} not supported by the color manager")]
    Unsupported {
        /// Profile name
        name: String,
        /// What was rejected
        what: String,
    },

    /// Primaries that do not span a gamut.
    #[error("color profile '{0}': primaries and white point do not define a gamut")]
    DegenerateGamut(String),

    /// Transform tables could not be built.
    #[error(transparent)]
    Lut(#[from] LutError),
}

/// Decode, matrix, encode.
///
/// Either curve may be absent, meaning identity.
#[derive(Debug, Clone, PartialEq)]
pub struct ColorTransform {
    /// Per-channel curve applied first
    pub decode: Option<Lut1D>,
    /// 3x3 matrix applied to the decoded value
    pub matrix: Mat3,
    /// Per-channel curve applied last
    pub encode: Option<Lut1D>,
}

impl ColorTransform {
    /// The identity transform.
    pub fn identity() -> Self {
        Self { decode: None, matrix: Mat3::IDENTITY, encode: None }
    }

    /// True when applying the transform changes nothing.
    pub fn is_identity(&self) -> bool {
        self.decode.is_none() && self.encode.is_none() && self.matrix == Mat3::IDENTITY
    }

    /// Transforms one RGB triple.
    pub fn apply(&self, rgb: Vec3) -> Vec3 {
        let curve = |lut: &Option<Lut1D>, v: Vec3| match lut {
            Some(l) => Vec3::new(l.apply(v.x), l.apply(v.y), l.apply(v.z)),
            None => v,
        };
        curve(&self.encode, self.matrix * curve(&self.decode, rgb))
    }
}

/// What the renderer needs to drive one output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputColorOutcome {
    /// Signaled EOTF mode
    pub eotf_mode: EotfMode,
    /// Signaled colorimetry
    pub colorimetry_mode: ColorimetryMode,
    /// HDR static metadata for the sink
    pub hdr_metadata: Option<HdrMetadataType1>,
    /// sRGB content straight to the output encoding
    pub from_srgb_to_output: ColorTransform,
    /// sRGB content into the blending space
    pub from_srgb_to_blend: ColorTransform,
    /// Blending space to the output encoding
    pub from_blend_to_output: ColorTransform,
}

/// Collaborator that owns color profiles.
pub trait ColorManager {
    /// Opaque profile handle.
    type Profile: Clone;

    /// Short name for logs.
    fn name(&self) -> &str;

    /// What parametric profiles may use.
    fn capabilities(&self) -> &Capabilities;

    /// A new reference to the stock sRGB profile.
    fn ref_stock_srgb_color_profile(&mut self) -> Self::Profile;

    /// Creates a profile from validated parameters.
    fn get_color_profile_from_params(
        &mut self,
        params: &ColorProfileParams,
        name: &str,
    ) -> Result<Self::Profile, ManagerError>;

    /// Releases one reference.
    fn destroy_color_profile(&mut self, profile: Self::Profile);

    /// Builds the transforms for `output` driven with `profile`.
    fn create_output_color_outcome(
        &mut self,
        output: &Output,
        profile: &Self::Profile,
    ) -> Result<OutputColorOutcome, ManagerError>;
}
