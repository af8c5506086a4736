//! Values of an output's `color-profile=` key.

use crate::{ProfileError, ProfileResult};
use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

bitflags! {
    /// Opt-ins of the `auto:` pseudo-profile.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct AutoFlags: u32 {
        /// Use the display's native primaries from EDID
        const EDID_PRIMARIES = 1 << 0;
        /// Use the display's luminance range from EDID
        const EDID_LUMINANCE = 1 << 1;
    }
}

impl AutoFlags {
    /// Parses `+`-separated flag names. The empty string is no flags.
    pub fn parse(s: &str) -> ProfileResult<Self> {
        let mut flags = Self::empty();
        for token in s.split('+').map(str::trim).filter(|t| !t.is_empty()) {
            flags |= match token {
                "edid-primaries" => Self::EDID_PRIMARIES,
                "edid-luminance" => Self::EDID_LUMINANCE,
                other => return Err(ProfileError::UnknownAutoFlag(other.to_string())),
            };
        }
        Ok(flags)
    }
}

/// Which profile an output asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProfileRef {
    /// `srgb:` - the color manager's stock sRGB profile
    StockSrgb,
    /// `auto:<flags>` - derived from output modes and display data
    Auto(AutoFlags),
    /// A `[color-profile]` section by name
    Named(String),
}

impl ProfileRef {
    /// Prefix selecting the stock sRGB profile.
    pub const SRGB_PREFIX: &'static str = "srgb:";
    /// Prefix selecting the auto profile.
    pub const AUTO_PREFIX: &'static str = "auto:";

    /// Parses a `color-profile=` value.
    ///
    /// ```rust
    /// use ccm_profile::{AutoFlags, ProfileRef};
    ///
    /// assert_eq!(ProfileRef::parse("srgb:").unwrap(), ProfileRef::StockSrgb);
    /// assert_eq!(
    ///     ProfileRef::parse("auto:edid-primaries+edid-luminance").unwrap(),
    ///     ProfileRef::Auto(AutoFlags::all()),
    /// );
    /// assert_eq!(ProfileRef::parse("my-hdr").unwrap(), ProfileRef::Named("my-hdr".into()));
    /// ```
    pub fn parse(value: &str) -> ProfileResult<Self> {
        let value = value.trim();
        if let Some(rest) = value.strip_prefix(Self::SRGB_PREFIX) {
            if !rest.is_empty() {
                return Err(ProfileError::InvalidValue {
                    section: "output".into(),
                    key: "color-profile".into(),
                    value: value.to_string(),
                });
            }
            return Ok(Self::StockSrgb);
        }
        if let Some(rest) = value.strip_prefix(Self::AUTO_PREFIX) {
            return Ok(Self::Auto(AutoFlags::parse(rest)?));
        }
        if value.is_empty() {
            return Err(ProfileError::InvalidValue {
                section: "output".into(),
                key: "color-profile".into(),
                value: String::new(),
            });
        }
        Ok(Self::Named(value.to_string()))
    }
}

impl fmt::Display for ProfileRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::StockSrgb => f.write_str(Self::SRGB_PREFIX),
            Self::Auto(flags) => {
                f.write_str(Self::AUTO_PREFIX)?;
                let mut first = true;
                for (name, flag) in [
                    ("edid-primaries", AutoFlags::EDID_PRIMARIES),
                    ("edid-luminance", AutoFlags::EDID_LUMINANCE),
                ] {
                    if flags.contains(flag) {
                        if !first {
                            f.write_str("+")?;
                        }
                        f.write_str(name)?;
                        first = false;
                    }
                }
                Ok(())
            }
            Self::Named(name) => f.write_str(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_flags() {
        assert_eq!(AutoFlags::parse("").unwrap(), AutoFlags::empty());
        assert_eq!(AutoFlags::parse("edid-luminance").unwrap(), AutoFlags::EDID_LUMINANCE);
        assert!(matches!(
            AutoFlags::parse("edid-primaries+bogus"),
            Err(ProfileError::UnknownAutoFlag(f)) if f == "bogus"
        ));
    }

    #[test]
    fn test_parse_refs() {
        assert_eq!(ProfileRef::parse("auto:").unwrap(), ProfileRef::Auto(AutoFlags::empty()));
        assert!(ProfileRef::parse("srgb:extra").is_err());
        assert!(ProfileRef::parse("").is_err());
    }

    #[test]
    fn test_display_roundtrip() {
        for s in ["srgb:", "auto:", "auto:edid-primaries", "auto:edid-primaries+edid-luminance", "hdr"] {
            assert_eq!(ProfileRef::parse(s).unwrap().to_string(), s);
        }
    }
}
