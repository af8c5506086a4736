//! `[color_characteristics]` sections.
//!
//! ```text
//! [color_characteristics]
//! name=my-monitor
//! red_x=0.680
//! red_y=0.320
//! green_x=0.265
//! green_y=0.690
//! blue_x=0.150
//! blue_y=0.060
//! white_x=0.3127
//! white_y=0.3290
//! max_L=1000
//! min_L=0.005
//! maxCLL=1000
//! maxFALL=400
//! ```
//!
//! An output refers to one with `color_characteristics=<name>`. Keys come in
//! groups matching [`HdrGroups`]; a group is either complete or absent.

use crate::hdr::{HdrGroups, HdrMetadataType1};
use ccm_core::CIExy;
use ccm_profile::Section;
use std::fmt;

/// Section name.
pub const SECTION: &str = "color_characteristics";

struct Key {
    name: &'static str,
    group: HdrGroups,
    group_name: &'static str,
}

const fn key(name: &'static str, group: HdrGroups, group_name: &'static str) -> Key {
    Key { name, group, group_name }
}

const KEYS: [Key; 12] = [
    key("red_x", HdrGroups::PRIMARIES, "primaries"),
    key("red_y", HdrGroups::PRIMARIES, "primaries"),
    key("green_x", HdrGroups::PRIMARIES, "primaries"),
    key("green_y", HdrGroups::PRIMARIES, "primaries"),
    key("blue_x", HdrGroups::PRIMARIES, "primaries"),
    key("blue_y", HdrGroups::PRIMARIES, "primaries"),
    key("white_x", HdrGroups::WHITE, "white"),
    key("white_y", HdrGroups::WHITE, "white"),
    key("max_L", HdrGroups::MAXDML, "max_L"),
    key("min_L", HdrGroups::MINDML, "min_L"),
    key("maxCLL", HdrGroups::MAXCLL, "maxCLL"),
    key("maxFALL", HdrGroups::MAXFALL, "maxFALL"),
];

/// A rejected `[color_characteristics]` section.
///
/// Displays one line per reason:
///
/// ```text
/// Config error in weston.ini [color_characteristics] name=<name>: <reason>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacteristicsError {
    /// Section name
    pub name: String,
    /// Every reason, in key order
    pub reasons: Vec<String>,
}

impl fmt::Display for CharacteristicsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for reason in &self.reasons {
            writeln!(
                f,
                "Config error in weston.ini [{}] name={}: {}",
                SECTION, self.name, reason
            )?;
        }
        Ok(())
    }
}

impl std::error::Error for CharacteristicsError {}

/// Parses a `[color_characteristics]` section into HDR metadata.
///
/// Parse errors, incomplete groups and out-of-range values are all reported
/// together.
pub fn parse_color_characteristics(section: &Section) -> Result<HdrMetadataType1, CharacteristicsError> {
    let name = section.get("name").unwrap_or_default();
    let mut reasons = Vec::new();
    let mut values = [0.0f32; KEYS.len()];
    let mut found = HdrGroups::empty();
    let mut missing = HdrGroups::empty();

    for (key, _) in section.entries() {
        if key != "name" && !KEYS.iter().any(|k| k.name == key) {
            tracing::warn!("weston.ini [{}] name={}: ignoring unknown key '{}'", SECTION, name, key);
        }
    }

    for (slot, k) in values.iter_mut().zip(KEYS.iter()) {
        let Some(raw) = section.get(k.name) else {
            missing |= k.group;
            continue;
        };
        found |= k.group;
        match raw.parse::<f32>() {
            Ok(v) if v.is_finite() => *slot = v,
            _ => reasons.push(format!("{}={} is not a number", k.name, raw)),
        }
    }

    let partial = found & missing;
    for k in KEYS.iter().filter(|k| partial.contains(k.group) && !section.has(k.name)) {
        reasons.push(format!("group '{}' is incomplete, {} is missing", k.group_name, k.name));
    }

    if !reasons.is_empty() {
        return Err(CharacteristicsError { name: name.to_string(), reasons });
    }

    let md = HdrMetadataType1 {
        group_mask: found,
        primary: [
            CIExy::new(values[0], values[1]),
            CIExy::new(values[2], values[3]),
            CIExy::new(values[4], values[5]),
        ],
        white: CIExy::new(values[6], values[7]),
        max_dml: values[8],
        min_dml: values[9],
        max_cll: values[10],
        max_fall: values[11],
    };

    let reasons: Vec<String> = md.errors().iter().map(ToString::to_string).collect();
    if reasons.is_empty() {
        Ok(md)
    } else {
        Err(CharacteristicsError { name: name.to_string(), reasons })
    }
}
