//! `[color-profile]` sections.
//!
//! ```text
//! [color-profile]
//! name=hdr-mastering
//! prim_named=bt2020
//! tf_named=st2084_pq
//! target_named=display_p3
//! target_min_lum=0.005
//! target_max_lum=1000
//! max_cll=1000
//! max_fall=400
//! ```
//!
//! Keys in one group must appear together or not at all:
//!
//! | Group | Keys |
//! |-------|------|
//! | primaries | `prim_red`, `prim_green`, `prim_blue`, `prim_white` |
//! | luminances | `min_lum`, `ref_lum`, `max_lum` |
//! | target primaries | `target_red`, `target_green`, `target_blue`, `target_white` |
//! | target luminances | `target_min_lum`, `target_max_lum` |
//!
//! Every group is checked before anything is applied. An incomplete group is
//! reported key by key and then skipped. The rest is fed to a
//! [`ParamBuilder`] in a fixed order, so each problem is reported once.

use crate::builder::{ParamBuilder, ParamErrorKind, ParamErrors};
use crate::caps::Capabilities;
use crate::ini::{IniFile, Section};
use crate::params::ColorProfileParams;
use crate::{ProfileError, ProfileResult};
use ccm_core::CIExy;
use ccm_primaries::{ColorGamut, NamedPrimaries};
use ccm_transfer::NamedTransferFunction;
use std::collections::BTreeMap;
use std::fmt;

/// Section name of parametric profiles.
pub const SECTION: &str = "color-profile";

/// Indentation of each reason line in [`ProfileConfigError`]'s message.
const REASON_INDENT: &str = "               ";

const PRIMARIES: &[&str] = &["prim_red", "prim_green", "prim_blue", "prim_white"];
const LUMINANCES: &[&str] = &["min_lum", "ref_lum", "max_lum"];
const TARGET_PRIMARIES: &[&str] = &["target_red", "target_green", "target_blue", "target_white"];
const TARGET_LUMINANCES: &[&str] = &["target_min_lum", "target_max_lum"];

/// Every key a `[color-profile]` section may hold.
pub const KEYS: &[&str] = &[
    "name",
    "prim_named",
    "prim_red",
    "prim_green",
    "prim_blue",
    "prim_white",
    "target_named",
    "target_red",
    "target_green",
    "target_blue",
    "target_white",
    "tf_named",
    "tf_power",
    "min_lum",
    "ref_lum",
    "max_lum",
    "target_min_lum",
    "target_max_lum",
    "max_cll",
    "max_fall",
];

/// A rejected `[color-profile]` section.
///
/// Displays as the exact diagnostic block the compositor logs:
///
/// ```text
/// Config error in weston.ini [color-profile] name=<name>, invalid parameter set:
///                <reason>
///                <reason>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileConfigError {
    /// Profile name
    pub name: String,
    /// Every reason, in detection order
    pub errors: ParamErrors,
}

impl fmt::Display for ProfileConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Config error in weston.ini [color-profile] name={}, invalid parameter set:",
            self.name
        )?;
        for e in &self.errors {
            writeln!(f, "{}{}", REASON_INDENT, e.message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ProfileConfigError {}

#[derive(Clone, Copy, PartialEq, Eq)]
enum GroupState {
    Absent,
    Complete,
    Partial,
}

fn check_group(section: &Section, group: &str, keys: &[&str], errors: &mut ParamErrors) -> GroupState {
    let present = keys.iter().filter(|k| section.has(k)).count();
    if present == 0 {
        return GroupState::Absent;
    }
    if present == keys.len() {
        return GroupState::Complete;
    }
    for key in keys {
        let state = if section.has(key) { "set" } else { "missing" };
        errors.push(
            ParamErrorKind::IncompleteSet,
            format!("incomplete group '{}': {} is {}", group, key, state),
        );
    }
    GroupState::Partial
}

fn parse_float(section: &Section, key: &str, kind: ParamErrorKind, b: &mut ParamBuilder<'_>) -> Option<f32> {
    let raw = section.get(key)?;
    match raw.parse::<f32>() {
        Ok(v) if v.is_finite() => Some(v),
        _ => {
            b.report(kind, format!("{}: '{}' is not a number", key, raw));
            None
        }
    }
}

fn parse_xy(section: &Section, key: &str, kind: ParamErrorKind, b: &mut ParamBuilder<'_>) -> Option<CIExy> {
    let raw = section.get(key)?;
    let mut it = raw.split_whitespace().map(str::parse::<f32>);
    match (it.next(), it.next(), it.next()) {
        (Some(Ok(x)), Some(Ok(y)), None) if x.is_finite() && y.is_finite() => Some(CIExy::new(x, y)),
        _ => {
            b.report(kind, format!("{}: '{}' is not a pair of CIE x y values", key, raw));
            None
        }
    }
}

// All keys of a complete group parsed, or None after reporting each failure.
fn parse_all<T>(
    section: &Section,
    keys: &[&str],
    b: &mut ParamBuilder<'_>,
    mut parse: impl FnMut(&Section, &str, &mut ParamBuilder<'_>) -> Option<T>,
) -> Option<Vec<T>> {
    let values: Vec<Option<T>> = keys.iter().map(|k| parse(section, k, b)).collect();
    values.into_iter().collect()
}

fn parse_gamut(section: &Section, keys: &[&str], kind: ParamErrorKind, b: &mut ParamBuilder<'_>) -> Option<ColorGamut> {
    let pts = parse_all(section, keys, b, |s, k, b| parse_xy(s, k, kind, b))?;
    Some(ColorGamut { primary: [pts[0], pts[1], pts[2]], white_point: pts[3] })
}

fn parse_named_primaries(section: &Section, key: &str, b: &mut ParamBuilder<'_>) -> Option<NamedPrimaries> {
    let raw = section.get(key)?;
    let named = NamedPrimaries::from_name(raw);
    if named.is_none() {
        b.report(
            ParamErrorKind::InvalidPrimariesNamed,
            format!("{}: '{}' is not a known set of primaries", key, raw),
        );
    }
    named
}

/// Builds the parameters of one `[color-profile]` section.
///
/// `name` is only used in the diagnostic. Unknown keys are logged and
/// ignored.
pub fn params_from_section(
    section: &Section,
    name: &str,
    caps: &Capabilities,
) -> Result<ColorProfileParams, ProfileConfigError> {
    for (key, _) in section.entries() {
        if !KEYS.contains(&key) {
            tracing::warn!("weston.ini [color-profile] name={}: ignoring unknown key '{}'", name, key);
        }
    }

    let mut group_errors = ParamErrors::new();
    let primaries = check_group(section, "primaries", PRIMARIES, &mut group_errors);
    let luminances = check_group(section, "luminances", LUMINANCES, &mut group_errors);
    let target_primaries = check_group(section, "target primaries", TARGET_PRIMARIES, &mut group_errors);
    let target_luminances = check_group(section, "target luminances", TARGET_LUMINANCES, &mut group_errors);

    let mut b = ParamBuilder::new(caps);
    for e in &group_errors {
        b.report(e.kind, e.message.clone());
    }

    if let Some(p) = parse_named_primaries(section, "prim_named", &mut b) {
        b.set_primaries_named(p);
    }
    if primaries == GroupState::Complete {
        if let Some(g) = parse_gamut(section, PRIMARIES, ParamErrorKind::InvalidPrimaries, &mut b) {
            b.set_primaries(g);
        }
    }

    if let Some(raw) = section.get("tf_named") {
        match NamedTransferFunction::from_name(raw) {
            Some(tf) => b.set_tf_named(tf),
            None => b.report(
                ParamErrorKind::InvalidTf,
                format!("tf_named: '{}' is not a known transfer function", raw),
            ),
        }
    }
    if let Some(e) = parse_float(section, "tf_power", ParamErrorKind::InvalidTf, &mut b) {
        b.set_tf_power(e);
    }

    if luminances == GroupState::Complete {
        let lum = parse_all(section, LUMINANCES, &mut b, |s, k, b| {
            parse_float(s, k, ParamErrorKind::InvalidLuminance, b)
        });
        if let Some(v) = lum {
            b.set_primary_luminance(v[0], v[1], v[2]);
        }
    }

    if let Some(p) = parse_named_primaries(section, "target_named", &mut b) {
        b.set_target_primaries_named(p);
    }
    if target_primaries == GroupState::Complete {
        if let Some(g) = parse_gamut(section, TARGET_PRIMARIES, ParamErrorKind::InvalidTargetPrimaries, &mut b) {
            b.set_target_primaries(g);
        }
    }

    if target_luminances == GroupState::Complete {
        let lum = parse_all(section, TARGET_LUMINANCES, &mut b, |s, k, b| {
            parse_float(s, k, ParamErrorKind::InvalidLuminance, b)
        });
        if let Some(v) = lum {
            b.set_target_luminance(v[0], v[1]);
        }
    }

    if let Some(v) = parse_float(section, "max_cll", ParamErrorKind::InvalidMaxCll, &mut b) {
        b.set_max_cll(v);
    }
    if let Some(v) = parse_float(section, "max_fall", ParamErrorKind::InvalidMaxFall, &mut b) {
        b.set_max_fall(v);
    }

    b.build().map_err(|errors| ProfileConfigError { name: name.to_string(), errors })
}

/// Every valid `[color-profile]` of a config file, by name.
#[derive(Debug, Clone, Default)]
pub struct ProfileTable {
    profiles: BTreeMap<String, ColorProfileParams>,
}

impl ProfileTable {
    /// Parses every `[color-profile]` section of `ini`.
    ///
    /// Invalid sections are left out of the table; their errors are logged
    /// and returned alongside it.
    pub fn from_ini(ini: &IniFile, caps: &Capabilities) -> (Self, Vec<ProfileError>) {
        let mut table = Self::default();
        let mut errors = Vec::new();

        for section in ini.sections(SECTION) {
            match table.add_section(section, caps) {
                Ok(name) => tracing::debug!("loaded color profile '{}'", name),
                Err(e) => {
                    tracing::error!("{}", e.to_string().trim_end());
                    errors.push(e);
                }
            }
        }
        (table, errors)
    }

    fn add_section(&mut self, section: &Section, caps: &Capabilities) -> ProfileResult<String> {
        let name = section
            .get("name")
            .filter(|n| !n.is_empty())
            .ok_or(ProfileError::MissingName { line: section.line() })?;
        if name.contains(':') {
            return Err(ProfileError::ReservedName(name.to_string()));
        }
        if self.profiles.contains_key(name) {
            return Err(ProfileError::DuplicateName(name.to_string()));
        }
        let params = params_from_section(section, name, caps)?;
        self.profiles.insert(name.to_string(), params);
        Ok(name.to_string())
    }

    /// Looks a profile up by name.
    pub fn get(&self, name: &str) -> ProfileResult<&ColorProfileParams> {
        self.profiles
            .get(name)
            .ok_or_else(|| ProfileError::UnknownProfile(name.to_string()))
    }

    /// Profiles in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ColorProfileParams)> {
        self.profiles.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Number of profiles.
    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    /// True when no profile loaded.
    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::caps::{Features, PrimariesSet};
    use crate::params::PrimariesSpec;
    use ccm_transfer::TransferFunction;

    fn section(entries: &[(&str, &str)]) -> Section {
        entries
            .iter()
            .fold(Section::new(SECTION), |s, (k, v)| s.with(*k, *v))
    }

    fn parse(entries: &[(&str, &str)]) -> Result<ColorProfileParams, ProfileConfigError> {
        params_from_section(&section(entries), "test", &Capabilities::all())
    }

    #[test]
    fn test_named_profile() {
        let p = parse(&[("prim_named", "bt2020"), ("tf_named", "st2084_pq")]).unwrap();
        assert_eq!(p, ColorProfileParams::bt2100_pq());
    }

    #[test]
    fn test_explicit_profile() {
        let p = parse(&[
            ("prim_red", "0.64 0.33"),
            ("prim_green", "0.30 0.60"),
            ("prim_blue", "0.15 0.06"),
            ("prim_white", "0.3127 0.3290"),
            ("tf_power", "2.4"),
            ("min_lum", "0.1"),
            ("ref_lum", "120"),
            ("max_lum", "400"),
        ])
        .unwrap();
        assert_eq!(p.primaries, PrimariesSpec::Explicit(NamedPrimaries::Srgb.gamut()));
        assert_eq!(p.tf, TransferFunction::Power(2.4));
        assert_eq!(p.reference_white_luminance, 120.0);
        assert_eq!((p.target_min_luminance, p.target_max_luminance), (0.1, 400.0));
    }

    #[test]
    fn test_partial_group() {
        let err = parse(&[
            ("prim_named", "srgb"),
            ("tf_named", "gamma22"),
            ("prim_red", "0.64 0.33"),
            ("prim_blue", "0.15 0.06"),
        ])
        .unwrap_err();
        assert_eq!(
            err.errors.messages(),
            vec![
                "incomplete group 'primaries': prim_red is set",
                "incomplete group 'primaries': prim_green is missing",
                "incomplete group 'primaries': prim_blue is set",
                "incomplete group 'primaries': prim_white is missing",
            ]
        );
    }

    #[test]
    fn test_luminance_ordering() {
        let err = parse(&[
            ("prim_named", "srgb"),
            ("tf_named", "gamma22"),
            ("ref_lum", "5"),
            ("min_lum", "10"),
            ("max_lum", "2"),
        ])
        .unwrap_err();
        assert!(err.errors.mentions("reference luminance must be greater than primary minimum"));
        assert!(err.errors.mentions("primary minimum must be less than primary maximum"));
    }

    #[test]
    fn test_empty_profile() {
        let err = parse(&[]).unwrap_err();
        assert_eq!(err.errors.messages(), vec!["primaries not set", "transfer function not set"]);
    }

    #[test]
    fn test_exact_message() {
        let err = parse(&[("prim_named", "srgb")]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Config error in weston.ini [color-profile] name=test, invalid parameter set:\n               transfer function not set\n"
        );
    }

    #[test]
    fn test_unsupported_by_manager() {
        let caps = Capabilities { primaries: PrimariesSet::SRGB, ..Capabilities::all() };
        let err = params_from_section(
            &section(&[("prim_named", "bt2020"), ("tf_named", "srgb")]),
            "wide",
            &caps,
        )
        .unwrap_err();
        assert_eq!(
            err.errors.messages(),
            vec![
                "named primaries 'bt2020' not supported by the color manager",
                "primaries not set",
            ]
        );
    }

    #[test]
    fn test_unknown_names_and_garbage() {
        let err = parse(&[
            ("prim_named", "rec709"),
            ("tf_named", "pq"),
            ("max_cll", "bright"),
        ])
        .unwrap_err();
        let kinds: Vec<_> = err.errors.iter().map(|e| e.kind).collect();
        assert_eq!(
            kinds,
            vec![
                ParamErrorKind::InvalidPrimariesNamed,
                ParamErrorKind::InvalidTf,
                ParamErrorKind::InvalidMaxCll,
                ParamErrorKind::IncompleteSet,
                ParamErrorKind::IncompleteSet,
            ]
        );
        assert!(err.errors.mentions("prim_named: 'rec709' is not a known set of primaries"));
    }

    #[test]
    fn test_bad_pair_skips_group() {
        let err = parse(&[
            ("prim_red", "0.64"),
            ("prim_green", "0.30 0.60"),
            ("prim_blue", "0.15 0.06 0.1"),
            ("prim_white", "0.3127 0.3290"),
            ("tf_named", "srgb"),
        ])
        .unwrap_err();
        assert_eq!(
            err.errors.messages(),
            vec![
                "prim_red: '0.64' is not a pair of CIE x y values",
                "prim_blue: '0.15 0.06 0.1' is not a pair of CIE x y values",
                "primaries not set",
            ]
        );
    }

    #[test]
    fn test_collinear_primaries_rejected() {
        let err = parse(&[
            ("prim_red", "0.1 0.2"),
            ("prim_green", "0.2 0.3"),
            ("prim_blue", "0.3 0.4"),
            ("prim_white", "0.2 0.3"),
            ("tf_named", "srgb"),
        ])
        .unwrap_err();
        assert_eq!(err.errors.cause(), Some(ParamErrorKind::InvalidPrimaries));
        assert_eq!(
            err.errors.messages(),
            vec!["primaries white point (0.200000, 0.300000) is outside the triangle of its primaries"]
        );
    }

    #[test]
    fn test_named_and_explicit_conflict() {
        let err = parse(&[
            ("prim_named", "srgb"),
            ("prim_red", "0.64 0.33"),
            ("prim_green", "0.30 0.60"),
            ("prim_blue", "0.15 0.06"),
            ("prim_white", "0.3127 0.3290"),
            ("tf_named", "srgb"),
            ("tf_power", "2.2"),
        ])
        .unwrap_err();
        assert_eq!(
            err.errors.messages(),
            vec!["primaries were already set", "transfer function was already set"]
        );
    }

    #[test]
    fn test_feature_missing() {
        let caps = Capabilities { features: Features::PARAMETRIC, ..Capabilities::all() };
        let err = params_from_section(
            &section(&[("prim_named", "srgb"), ("tf_power", "2.2")]),
            "p",
            &caps,
        )
        .unwrap_err();
        assert_eq!(err.errors.cause(), Some(ParamErrorKind::Unsupported));
        assert!(err.errors.mentions("transfer function not set"));
    }

    #[test]
    fn test_table() {
        let ini = IniFile::parse(
            "[color-profile]\nname=a\nprim_named=srgb\ntf_named=srgb\n\
             [color-profile]\nname=a\nprim_named=pal\ntf_named=srgb\n\
             [color-profile]\nprim_named=pal\n\
             [color-profile]\nname=auto:x\n\
             [color-profile]\nname=bad\n",
        )
        .unwrap();
        let (table, errors) = ProfileTable::from_ini(&ini, &Capabilities::all());
        assert_eq!(table.len(), 1);
        assert!(table.get("a").is_ok());
        assert!(matches!(table.get("b"), Err(ProfileError::UnknownProfile(_))));
        assert_eq!(errors.len(), 4);
        assert!(matches!(errors[0], ProfileError::DuplicateName(_)));
        assert!(matches!(errors[1], ProfileError::MissingName { line: 9 }));
        assert!(matches!(errors[2], ProfileError::ReservedName(_)));
        assert!(matches!(errors[3], ProfileError::InvalidProfile(_)));
    }
}
