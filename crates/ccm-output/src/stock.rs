//! In-process color manager.
//!
//! [`StockColorManager`] implements [`ColorManager`] with plain matrix and
//! 1D LUT math: sRGB content is decoded, converted to the output's primaries
//! with Bradford adaptation, scaled to the output's reference white and
//! re-encoded with the output profile's transfer function.

use crate::hdr::{HdrGroups, HdrMetadataType1, MIN_DML_RANGE};
use crate::manager::{ColorManager, ColorTransform, ManagerError, OutputColorOutcome};
use crate::modes::EotfMode;
use crate::output::Output;
use ccm_core::IdAllocator;
use ccm_lut::{Lut1D, LutResult};
use ccm_math::Mat3;
use ccm_primaries::{gamut_to_gamut_matrix, NpmDirection};
use ccm_profile::{Capabilities, ColorProfileParams, PrimariesSpec};
use ccm_transfer::TransferFunction;
use std::sync::Arc;

/// Entries in the decode and encode tables.
pub const LUT_SIZE: usize = 1024;

/// Description of the stock sRGB profile.
pub const STOCK_SRGB_DESCRIPTION: &str = "stock sRGB color profile";

/// A profile created by [`StockColorManager`].
#[derive(Debug, PartialEq)]
pub struct ColorProfile {
    id: u32,
    description: String,
    params: ColorProfileParams,
    to_xyz: Mat3,
}

impl ColorProfile {
    /// Manager-assigned id, unique among live profiles.
    pub fn id(&self) -> u32 {
        self.id
    }

    /// Name given at creation.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Parameters the profile was made from.
    pub fn params(&self) -> &ColorProfileParams {
        &self.params
    }

    /// Linear RGB to XYZ.
    pub fn to_xyz(&self) -> Mat3 {
        self.to_xyz
    }
}

/// Reference color manager.
///
/// # Example
///
/// ```rust
/// use ccm_output::{ColorManager, StockColorManager};
/// use ccm_profile::ColorProfileParams;
///
/// let mut cm = StockColorManager::default();
/// let srgb = cm.ref_stock_srgb_color_profile();
/// let pq = cm
///     .get_color_profile_from_params(&ColorProfileParams::bt2100_pq(), "hdr")
///     .unwrap();
/// assert_ne!(srgb.id(), pq.id());
///
/// cm.destroy_color_profile(pq);
/// assert_eq!(cm.live_profiles(), 1);
/// ```
#[derive(Debug)]
pub struct StockColorManager {
    caps: Capabilities,
    ids: IdAllocator,
    live: usize,
    stock_srgb: Option<Arc<ColorProfile>>,
}

impl Default for StockColorManager {
    fn default() -> Self {
        Self::new(Capabilities::all())
    }
}

impl StockColorManager {
    /// Creates a manager advertising `caps`.
    pub fn new(caps: Capabilities) -> Self {
        Self { caps, ids: IdAllocator::new(), live: 0, stock_srgb: None }
    }

    /// Number of profiles not yet destroyed, the stock one included.
    pub fn live_profiles(&self) -> usize {
        self.live
    }

    fn check_supported(&self, params: &ColorProfileParams, name: &str) -> Result<(), ManagerError> {
        let unsupported = |what: String| ManagerError::Unsupported { name: name.to_string(), what };
        if let PrimariesSpec::Named(p) = params.primaries {
            if !self.caps.primaries.has(p) {
                return Err(unsupported(format!("named primaries '{}'", p.name())));
            }
        }
        if let TransferFunction::Named(tf) = params.tf {
            if !self.caps.tfs.has(tf) {
                return Err(unsupported(format!("named transfer function '{}'", tf.name())));
            }
        }
        Ok(())
    }

    fn create(&mut self, params: ColorProfileParams, description: &str) -> Result<Arc<ColorProfile>, ManagerError> {
        let to_xyz = params
            .npm(NpmDirection::Forward)
            .ok_or_else(|| ManagerError::DegenerateGamut(description.to_string()))?;
        Ok(self.register(params, description, to_xyz))
    }

    fn register(&mut self, params: ColorProfileParams, description: &str, to_xyz: Mat3) -> Arc<ColorProfile> {
        let id = self.ids.get_id();
        self.live += 1;
        tracing::debug!("color profile {} '{}' created", id, description);
        Arc::new(ColorProfile { id, description: description.to_string(), params, to_xyz })
    }
}

fn sample(tf: TransferFunction, inverse: bool) -> LutResult<Lut1D> {
    let named_curve = match tf {
        TransferFunction::Named(named) => named.tone_curve(),
        TransferFunction::Identity | TransferFunction::Power(_) => None,
    };
    if let Some(curve) = named_curve {
        let curve = if inverse { curve.inverse() } else { curve };
        return Lut1D::from_curve(curve, LUT_SIZE);
    }
    let scale = 1.0 / (LUT_SIZE - 1) as f32;
    let data = (0..LUT_SIZE)
        .map(|i| {
            let x = i as f32 * scale;
            if inverse { tf.eval_inverse(x) } else { tf.eval(x) }
        })
        .collect();
    Lut1D::from_data(data)
}

fn curve(tf: TransferFunction, inverse: bool) -> LutResult<Option<Lut1D>> {
    match tf {
        TransferFunction::Identity => Ok(None),
        _ => sample(tf, inverse).map(Some),
    }
}

// Mastering metadata advertised for an ST 2084 output without configured
// characteristics.
fn metadata_from_profile(params: &ColorProfileParams) -> Option<HdrMetadataType1> {
    let target = params.target_primaries;
    let mut md = HdrMetadataType1 {
        group_mask: HdrGroups::PRIMARIES | HdrGroups::WHITE | HdrGroups::MAXDML,
        primary: target.primary,
        white: target.white_point,
        max_dml: params.target_max_luminance,
        min_dml: params.target_min_luminance,
        max_cll: params.max_cll.unwrap_or_default(),
        max_fall: params.max_fall.unwrap_or_default(),
    };
    md.group_mask.set(HdrGroups::MINDML, md.min_dml <= MIN_DML_RANGE.1);
    md.group_mask.set(HdrGroups::MAXCLL, params.max_cll.is_some());
    md.group_mask.set(HdrGroups::MAXFALL, params.max_fall.is_some());

    match md.validate() {
        Ok(()) => Some(md),
        Err(e) => {
            tracing::warn!("not sending HDR metadata derived from the output profile: {}", e);
            None
        }
    }
}

impl ColorManager for StockColorManager {
    type Profile = Arc<ColorProfile>;

    fn name(&self) -> &str {
        "stock"
    }

    fn capabilities(&self) -> &Capabilities {
        &self.caps
    }

    fn ref_stock_srgb_color_profile(&mut self) -> Arc<ColorProfile> {
        if let Some(p) = &self.stock_srgb {
            return Arc::clone(p);
        }
        let params = ColorProfileParams::srgb();
        // sRGB primaries always span a gamut
        let to_xyz = params.npm(NpmDirection::Forward).unwrap_or(Mat3::IDENTITY);
        let profile = self.register(params, STOCK_SRGB_DESCRIPTION, to_xyz);
        self.stock_srgb = Some(Arc::clone(&profile));
        profile
    }

    fn get_color_profile_from_params(
        &mut self,
        params: &ColorProfileParams,
        name: &str,
    ) -> Result<Arc<ColorProfile>, ManagerError> {
        self.check_supported(params, name)?;
        self.create(params.clone(), name)
    }

    fn destroy_color_profile(&mut self, profile: Arc<ColorProfile>) {
        let Ok(profile) = Arc::try_unwrap(profile) else {
            return;
        };
        match self.ids.put_id(profile.id) {
            Ok(()) => {
                self.live -= 1;
                tracing::debug!("color profile {} '{}' destroyed", profile.id, profile.description);
            }
            Err(e) => tracing::error!("destroying color profile '{}': {}", profile.description, e),
        }
    }

    fn create_output_color_outcome(
        &mut self,
        output: &Output,
        profile: &Arc<ColorProfile>,
    ) -> Result<OutputColorOutcome, ManagerError> {
        let srgb = ColorProfileParams::srgb();
        let params = profile.params();

        let gamut = gamut_to_gamut_matrix(&srgb.gamut(), &params.gamut(), true)
            .ok_or_else(|| ManagerError::DegenerateGamut(profile.description.clone()))?;
        // sRGB white lands on the output's reference white
        let scale = if params.max_luminance > 0.0 {
            params.reference_white_luminance / params.max_luminance
        } else {
            1.0
        };
        let matrix = gamut * scale;

        let decode = curve(srgb.tf, false)?;
        let encode = curve(params.tf, true)?;

        let hdr_metadata = match output.hdr_metadata() {
            Some(md) => Some(*md),
            None if output.eotf_mode() == EotfMode::St2084 => metadata_from_profile(params),
            None => None,
        };

        tracing::debug!(
            "output '{}': color outcome for profile '{}', {} / {}",
            output.name(),
            profile.description,
            output.eotf_mode().description(),
            output.colorimetry_mode().description()
        );

        Ok(OutputColorOutcome {
            eotf_mode: output.eotf_mode(),
            colorimetry_mode: output.colorimetry_mode(),
            hdr_metadata,
            from_srgb_to_output: ColorTransform { decode: decode.clone(), matrix, encode: encode.clone() },
            from_srgb_to_blend: ColorTransform { decode, matrix, encode: None },
            from_blend_to_output: ColorTransform { decode: None, matrix: Mat3::IDENTITY, encode },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::HeadCaps;
    use approx::assert_abs_diff_eq;
    use ccm_math::Vec3;
    use ccm_primaries::{ColorGamut, NamedPrimaries};
    use ccm_profile::PrimariesSet;

    #[test]
    fn test_stock_profile_shared() {
        let mut cm = StockColorManager::default();
        let a = cm.ref_stock_srgb_color_profile();
        let b = cm.ref_stock_srgb_color_profile();
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(a.id(), 1);
        assert_eq!(a.description(), STOCK_SRGB_DESCRIPTION);

        cm.destroy_color_profile(a);
        cm.destroy_color_profile(b);
        assert_eq!(cm.live_profiles(), 1);
    }

    #[test]
    fn test_ids_reused() {
        let mut cm = StockColorManager::default();
        let p1 = cm.get_color_profile_from_params(&ColorProfileParams::srgb(), "a").unwrap();
        let p2 = cm.get_color_profile_from_params(&ColorProfileParams::bt2100_pq(), "b").unwrap();
        assert_eq!((p1.id(), p2.id()), (1, 2));

        let extra = Arc::clone(&p1);
        cm.destroy_color_profile(p1);
        assert_eq!(cm.live_profiles(), 2);
        cm.destroy_color_profile(extra);
        assert_eq!(cm.live_profiles(), 1);

        let p3 = cm.get_color_profile_from_params(&ColorProfileParams::bt2100_hlg(), "c").unwrap();
        assert_eq!(p3.id(), 1);
    }

    #[test]
    fn test_unsupported_params() {
        let caps = Capabilities { primaries: PrimariesSet::SRGB, ..Capabilities::all() };
        let mut cm = StockColorManager::new(caps);
        let err = cm
            .get_color_profile_from_params(&ColorProfileParams::bt2100_pq(), "hdr")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "color profile 'hdr': named primaries 'bt2020' not supported by the color manager"
        );
        assert_eq!(cm.live_profiles(), 0);
    }

    #[test]
    fn test_degenerate_params() {
        let mut cm = StockColorManager::default();
        let mut params = ColorProfileParams::srgb();
        let mut g = NamedPrimaries::Srgb.gamut();
        g.primary[1] = g.primary[0];
        params.primaries = PrimariesSpec::Explicit(g);
        assert!(matches!(
            cm.get_color_profile_from_params(&params, "flat"),
            Err(ManagerError::DegenerateGamut(_))
        ));

        // collinear only up to f32 rounding
        params.primaries = PrimariesSpec::Explicit(ColorGamut::from_xy(
            (0.1, 0.2),
            (0.2, 0.3),
            (0.3, 0.4),
            (0.2, 0.3),
        ));
        assert!(matches!(
            cm.get_color_profile_from_params(&params, "line"),
            Err(ManagerError::DegenerateGamut(_))
        ));
        assert_eq!(cm.live_profiles(), 0);
    }

    #[test]
    fn test_srgb_outcome_is_near_identity() {
        let mut cm = StockColorManager::default();
        let out = Output::new("DP-1", HeadCaps::sdr_only());
        let profile = cm.ref_stock_srgb_color_profile();
        let outcome = cm.create_output_color_outcome(&out, &profile).unwrap();

        assert_eq!(outcome.eotf_mode, EotfMode::Sdr);
        assert!(outcome.hdr_metadata.is_none());
        for v in [0.0, 0.25, 0.5, 1.0] {
            let rgb = outcome.from_srgb_to_output.apply(Vec3::splat(v));
            assert_abs_diff_eq!(rgb.x, v, epsilon = 2e-3);
            assert_abs_diff_eq!(rgb.z, v, epsilon = 2e-3);
        }
    }

    #[test]
    fn test_pq_outcome() {
        let mut cm = StockColorManager::default();
        let mut out = Output::new("DP-1", HeadCaps::all());
        out.request_eotf_mode(Some("st2084"), true).unwrap();
        let profile = cm
            .get_color_profile_from_params(&ColorProfileParams::bt2100_pq(), "hdr")
            .unwrap();
        let outcome = cm.create_output_color_outcome(&out, &profile).unwrap();

        // sRGB white in blend space is 203 cd/m² out of 10000
        let white = outcome.from_srgb_to_blend.apply(Vec3::ONE);
        assert_abs_diff_eq!(white.y, 0.0203, epsilon = 1e-4);

        let md = outcome.hdr_metadata.unwrap();
        assert_eq!(md.group_mask, HdrGroups::PRIMARIES | HdrGroups::WHITE | HdrGroups::MAXDML | HdrGroups::MINDML);
        assert_eq!(md.max_dml, 10000.0);

        let encoded = outcome.from_srgb_to_output.apply(Vec3::ONE);
        let direct = outcome.from_blend_to_output.apply(white);
        assert_abs_diff_eq!(encoded.y, direct.y, epsilon = 1e-5);
        // PQ code value of ~203 cd/m²
        assert_abs_diff_eq!(encoded.y, 0.58, epsilon = 0.01);
    }

    #[test]
    fn test_power_tf_sampled() {
        let mut cm = StockColorManager::default();
        let mut params = ColorProfileParams::srgb();
        params.tf = TransferFunction::Power(2.4);

        let profile = cm.get_color_profile_from_params(&params, "p24").unwrap();
        let out = Output::new("DP-1", HeadCaps::sdr_only());
        let outcome = cm.create_output_color_outcome(&out, &profile).unwrap();
        let encode = outcome.from_blend_to_output.encode.unwrap();
        assert_eq!(encode.len(), LUT_SIZE);
        assert_abs_diff_eq!(encode.apply(0.5), 0.5f32.powf(1.0 / 2.4), epsilon = 1e-4);
    }
}
