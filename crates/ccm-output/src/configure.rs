//! Output color setup from `weston.ini`.
//!
//! For each output, in order:
//!
//! 1. `eotf-mode=` and `colorimetry-mode=`
//! 2. `color_characteristics=` (a `[color_characteristics]` section)
//! 3. `color-profile=`: absent or `srgb:` selects the stock profile, `auto:`
//!    derives one from the modes above, anything else names a
//!    `[color-profile]` section
//! 4. the color manager builds the output color outcome
//!
//! The first failing step aborts setup of that output.

use crate::auto::{derive_auto_params, AutoFallback, AutoInputs};
use crate::characteristics::{self, parse_color_characteristics};
use crate::edid::DisplayDescriptor;
use crate::error::{OutputError, OutputResult};
use crate::manager::{ColorManager, OutputColorOutcome};
use crate::output::{HeadCaps, Output};
use ccm_profile::{
    Capabilities, IniFile, ProfileConfigError, ProfileError, ProfileRef, ProfileTable, Section,
};

/// Section holding output settings.
pub const OUTPUT_SECTION: &str = "output";

/// Output key selecting the profile.
pub const COLOR_PROFILE_KEY: &str = "color-profile";

/// Output key selecting display characteristics.
pub const COLOR_CHARACTERISTICS_KEY: &str = "color_characteristics";

/// A fully configured output.
#[derive(Debug)]
pub struct ConfiguredOutput<P> {
    /// Resolved output state
    pub output: Output,
    /// Profile handle from the color manager
    pub profile: P,
    /// Transforms for the renderer
    pub outcome: OutputColorOutcome,
}

/// Compositor-wide color settings read from `weston.ini`.
#[derive(Debug, Clone, Default)]
pub struct ColorConfig {
    /// `[core] color-management=`
    pub color_management: bool,
    /// Every valid `[color-profile]`
    pub profiles: ProfileTable,
    /// `auto:` fallbacks
    pub fallback: AutoFallback,
}

impl ColorConfig {
    /// Reads `[core]` and every `[color-profile]`.
    ///
    /// Problems are logged and returned; the affected setting keeps its
    /// default and the affected profile is left out.
    pub fn from_ini(ini: &IniFile, caps: &Capabilities) -> (Self, Vec<ProfileError>) {
        let mut errors = Vec::new();
        let color_management = match ini.section("core") {
            Some(core) => core.get_bool("color-management", false).unwrap_or_else(|e| {
                tracing::error!("{}", e);
                errors.push(e);
                false
            }),
            None => false,
        };
        let (profiles, profile_errors) = ProfileTable::from_ini(ini, caps);
        errors.extend(profile_errors);
        tracing::info!(
            "color management {}, {} color profile(s)",
            if color_management { "enabled" } else { "disabled" },
            profiles.len()
        );
        (Self { color_management, profiles, fallback: AutoFallback::default() }, errors)
    }

    /// Configures the output called `name`.
    ///
    /// `caps` is what the head can drive; `display` feeds `auto:` profiles.
    pub fn configure_output<M: ColorManager>(
        &self,
        ini: &IniFile,
        manager: &mut M,
        name: &str,
        caps: HeadCaps,
        display: Option<&dyn DisplayDescriptor>,
    ) -> OutputResult<ConfiguredOutput<M::Profile>> {
        let section = ini.find_section(OUTPUT_SECTION, "name", name);
        let mut output = Output::new(name, caps);

        output.set_eotf_mode(section, self.color_management)?;
        output.set_colorimetry_mode(section, self.color_management)?;
        self.set_characteristics(ini, section, &mut output)?;

        let profile = self.resolve_profile(section, &output, manager, display)?;
        match manager.create_output_color_outcome(&output, &profile) {
            Ok(outcome) => Ok(ConfiguredOutput { output, profile, outcome }),
            Err(e) => {
                manager.destroy_color_profile(profile);
                Err(e.into())
            }
        }
    }

    fn set_characteristics(&self, ini: &IniFile, section: Option<&Section>, output: &mut Output) -> OutputResult<()> {
        let Some(name) = section.and_then(|s| s.get(COLOR_CHARACTERISTICS_KEY)) else {
            return Ok(());
        };
        if !self.color_management {
            return Err(OutputError::RequiresColorManagement {
                output: output.name().to_string(),
                key: COLOR_CHARACTERISTICS_KEY,
            });
        }
        let cc = ini
            .find_section(characteristics::SECTION, "name", name)
            .ok_or_else(|| OutputError::MissingCharacteristics {
                output: output.name().to_string(),
                name: name.to_string(),
            })?;
        let md = parse_color_characteristics(cc)?;
        output.set_color_characteristics(Some(md))
    }

    fn resolve_profile<M: ColorManager>(
        &self,
        section: Option<&Section>,
        output: &Output,
        manager: &mut M,
        display: Option<&dyn DisplayDescriptor>,
    ) -> OutputResult<M::Profile> {
        let Some(value) = section.and_then(|s| s.get(COLOR_PROFILE_KEY)) else {
            return Ok(manager.ref_stock_srgb_color_profile());
        };
        if !self.color_management {
            return Err(OutputError::RequiresColorManagement {
                output: output.name().to_string(),
                key: COLOR_PROFILE_KEY,
            });
        }

        let reference = ProfileRef::parse(value)?;
        let profile = match &reference {
            ProfileRef::StockSrgb => manager.ref_stock_srgb_color_profile(),
            ProfileRef::Auto(flags) => {
                let inputs = AutoInputs {
                    flags: *flags,
                    eotf_mode: output.eotf_mode(),
                    colorimetry_mode: output.colorimetry_mode(),
                    display,
                };
                let description = reference.to_string();
                let params = derive_auto_params(inputs, &self.fallback, manager.capabilities())
                    .map_err(|errors| ProfileError::from(ProfileConfigError { name: description.clone(), errors }))?;
                manager.get_color_profile_from_params(&params, &description)?
            }
            ProfileRef::Named(name) => {
                let params = self.profiles.get(name)?;
                manager.get_color_profile_from_params(params, name)?
            }
        };
        tracing::debug!("output '{}': color profile {}", output.name(), reference);
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::edid::tests::sample_edid;
    use crate::edid::Edid;
    use crate::modes::{ColorimetryMode, EotfMode};
    use crate::stock::{StockColorManager, STOCK_SRGB_DESCRIPTION};

    const INI: &str = "\
[core]
color-management=true

[color-profile]
name=hdr
prim_named=bt2020
tf_named=st2084_pq
max_cll=1000
max_fall=400

[color_characteristics]
name=panel
maxCLL=800

[output]
name=DP-1
eotf-mode=st2084
colorimetry-mode=bt2020rgb
color-profile=hdr
color_characteristics=panel

[output]
name=DP-2
eotf-mode=st2084
colorimetry-mode=bt2020rgb
color-profile=auto:edid-primaries+edid-luminance

[output]
name=DP-3
color-profile=missing

[output]
name=DP-4
color_characteristics=nowhere
";

    fn setup(text: &str) -> (IniFile, ColorConfig, StockColorManager) {
        let ini = IniFile::parse(text).unwrap();
        let cm = StockColorManager::default();
        let (config, errors) = ColorConfig::from_ini(&ini, cm.capabilities());
        assert!(errors.is_empty(), "{:?}", errors);
        (ini, config, cm)
    }

    #[test]
    fn test_named_profile_output() {
        let (ini, config, mut cm) = setup(INI);
        assert!(config.color_management);

        let out = config
            .configure_output(&ini, &mut cm, "DP-1", HeadCaps::all(), None)
            .unwrap();
        assert_eq!(out.output.eotf_mode(), EotfMode::St2084);
        assert_eq!(out.output.colorimetry_mode(), ColorimetryMode::Bt2020Rgb);
        assert_eq!(out.profile.description(), "hdr");
        // configured characteristics win over profile-derived metadata
        assert_eq!(out.outcome.hdr_metadata.unwrap().max_cll, 800.0);
    }

    #[test]
    fn test_auto_profile_output() {
        let (ini, config, mut cm) = setup(INI);
        let edid = Edid::parse(&sample_edid()).unwrap();
        let caps = HeadCaps::from_display(&edid);

        let out = config
            .configure_output(&ini, &mut cm, "DP-2", caps, Some(&edid))
            .unwrap();
        assert_eq!(out.profile.description(), "auto:edid-primaries+edid-luminance");
        let params = out.profile.params();
        assert!(params.target_max_luminance > 1000.0);
        assert_eq!(params.target_primaries, edid.native_primaries().unwrap());
    }

    #[test]
    fn test_unconfigured_output_gets_stock_srgb() {
        let (ini, config, mut cm) = setup(INI);
        let out = config
            .configure_output(&ini, &mut cm, "HDMI-A-1", HeadCaps::sdr_only(), None)
            .unwrap();
        assert_eq!(out.profile.description(), STOCK_SRGB_DESCRIPTION);
        assert_eq!(out.output.eotf_mode(), EotfMode::Sdr);
    }

    #[test]
    fn test_errors() {
        let (ini, config, mut cm) = setup(INI);

        let err = config
            .configure_output(&ini, &mut cm, "DP-3", HeadCaps::all(), None)
            .unwrap_err();
        assert!(matches!(err, OutputError::Profile(ProfileError::UnknownProfile(_))));

        let err = config
            .configure_output(&ini, &mut cm, "DP-4", HeadCaps::all(), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config error in weston.ini, output 'DP-4': no [color_characteristics] section with 'name=nowhere' found.\n"
        );

        // an SDR-only head cannot take DP-1's settings
        let err = config
            .configure_output(&ini, &mut cm, "DP-1", HeadCaps::sdr_only(), None)
            .unwrap_err();
        assert!(matches!(err, OutputError::UnsupportedEotfMode { .. }));
    }

    #[test]
    fn test_color_management_disabled() {
        let text = INI.replace("color-management=true", "color-management=false");
        let (ini, config, mut cm) = setup(&text);
        let err = config
            .configure_output(&ini, &mut cm, "DP-1", HeadCaps::all(), None)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Error: EOTF mode st2084 on output 'DP-1' requires color-management=true in weston.ini\n"
        );

        let err = config
            .configure_output(&ini, &mut cm, "DP-3", HeadCaps::all(), None)
            .unwrap_err();
        assert!(matches!(
            err,
            OutputError::RequiresColorManagement { key: COLOR_PROFILE_KEY, .. }
        ));
    }

    #[test]
    fn test_bad_core_flag() {
        let ini = IniFile::parse("[core]\ncolor-management=yes\n").unwrap();
        let (config, errors) = ColorConfig::from_ini(&ini, &Capabilities::all());
        assert!(!config.color_management);
        assert_eq!(errors.len(), 1);
    }
}
