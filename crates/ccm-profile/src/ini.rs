//! Reader for `weston.ini`-style configuration files.
//!
//! Grammar:
//!
//! ```text
//! # comment
//! [section]
//! key=value
//! ```
//!
//! Sections may repeat; each occurrence is kept as its own [`Section`] in file
//! order (outputs and color profiles are told apart by their `name=` key).
//! Keys and values are trimmed. The first occurrence of a key in a section
//! wins.

use crate::{ProfileError, ProfileResult};
use std::path::Path;

/// One `[section]` block.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Section {
    name: String,
    line: usize,
    entries: Vec<(String, String)>,
}

impl Section {
    /// Creates an empty section.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), line: 0, entries: Vec::new() }
    }

    /// Appends an entry, builder style.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.push((key.into(), value.into()));
        self
    }

    /// Section name (the part between brackets).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 1-based line of the section header, 0 when built in code.
    pub fn line(&self) -> usize {
        self.line
    }

    /// Raw value of `key`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// True if `key` is present, whatever its value.
    pub fn has(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Boolean value of `key`; `default` when absent.
    ///
    /// Accepts `true`/`false` and `1`/`0`.
    pub fn get_bool(&self, key: &str, default: bool) -> ProfileResult<bool> {
        match self.get(key) {
            None => Ok(default),
            Some("true") | Some("1") => Ok(true),
            Some("false") | Some("0") => Ok(false),
            Some(other) => Err(ProfileError::InvalidValue {
                section: self.name.clone(),
                key: key.to_string(),
                value: other.to_string(),
            }),
        }
    }

    /// All entries in file order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// A parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IniFile {
    sections: Vec<Section>,
}

impl IniFile {
    /// Parses configuration text.
    pub fn parse(text: &str) -> ProfileResult<Self> {
        let mut sections: Vec<Section> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line_no = idx + 1;
            let line = raw.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(rest) = line.strip_prefix('[') {
                let Some(name) = rest.strip_suffix(']') else {
                    return Err(ProfileError::Syntax {
                        line: line_no,
                        message: format!("unterminated section header: {}", line),
                    });
                };
                let name = name.trim();
                if name.is_empty() {
                    return Err(ProfileError::Syntax {
                        line: line_no,
                        message: "empty section name".into(),
                    });
                }
                sections.push(Section { name: name.to_string(), line: line_no, entries: Vec::new() });
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                return Err(ProfileError::Syntax {
                    line: line_no,
                    message: format!("expected key=value, found: {}", line),
                });
            };
            let key = key.trim();
            if key.is_empty() {
                return Err(ProfileError::Syntax {
                    line: line_no,
                    message: "empty key".into(),
                });
            }
            let Some(section) = sections.last_mut() else {
                return Err(ProfileError::Syntax {
                    line: line_no,
                    message: format!("key '{}' outside of any section", key),
                });
            };
            if section.has(key) {
                tracing::warn!(
                    "weston.ini line {}: duplicate key '{}' in [{}], keeping the first",
                    line_no,
                    key,
                    section.name
                );
                continue;
            }
            section.entries.push((key.to_string(), value.trim().to_string()));
        }

        Ok(Self { sections })
    }

    /// Reads and parses a file.
    pub fn load(path: impl AsRef<Path>) -> ProfileResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::parse(&text)
    }

    /// Adds a section, builder style.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Every section, in file order.
    pub fn all(&self) -> &[Section] {
        &self.sections
    }

    /// Every section called `name`, in file order.
    pub fn sections<'s>(&'s self, name: &str) -> impl Iterator<Item = &'s Section> {
        self.sections.iter().filter(move |s| s.name == name)
    }

    /// First section called `name`.
    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections(name).next()
    }

    /// First section called `name` whose `key` equals `value`.
    pub fn find_section(&self, name: &str, key: &str, value: &str) -> Option<&Section> {
        self.sections(name).find(|s| s.get(key) == Some(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = "\
# global settings
[core]
color-management=true

[output]
name=HDMI-A-1
eotf-mode = st2084

[output]
name=DP-1
";

    #[test]
    fn test_parse_sections() {
        let ini = IniFile::parse(SAMPLE).unwrap();
        assert_eq!(ini.all().len(), 3);
        assert_eq!(ini.sections("output").count(), 2);

        let core = ini.section("core").unwrap();
        assert!(core.get_bool("color-management", false).unwrap());
        assert_eq!(core.line(), 2);

        let hdmi = ini.find_section("output", "name", "HDMI-A-1").unwrap();
        assert_eq!(hdmi.get("eotf-mode"), Some("st2084"));
        assert!(ini.find_section("output", "name", "eDP-1").is_none());
    }

    #[test]
    fn test_first_key_wins() {
        let ini = IniFile::parse("[a]\nk=1\nk=2\n").unwrap();
        assert_eq!(ini.section("a").unwrap().get("k"), Some("1"));
    }

    #[test]
    fn test_empty_value() {
        let ini = IniFile::parse("[a]\nk=\n").unwrap();
        assert_eq!(ini.section("a").unwrap().get("k"), Some(""));
    }

    #[test]
    fn test_syntax_errors() {
        assert!(matches!(
            IniFile::parse("k=v\n"),
            Err(ProfileError::Syntax { line: 1, .. })
        ));
        assert!(matches!(
            IniFile::parse("[a]\njunk\n"),
            Err(ProfileError::Syntax { line: 2, .. })
        ));
        assert!(matches!(
            IniFile::parse("[a\n"),
            Err(ProfileError::Syntax { line: 1, .. })
        ));
    }

    #[test]
    fn test_bad_bool() {
        let ini = IniFile::parse("[core]\ncolor-management=maybe\n").unwrap();
        let err = ini.section("core").unwrap().get_bool("color-management", false);
        assert!(matches!(err, Err(ProfileError::InvalidValue { .. })));
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weston.ini");
        std::fs::write(&path, SAMPLE).unwrap();
        let ini = IniFile::load(&path).unwrap();
        assert_eq!(ini.sections("output").count(), 2);

        assert!(matches!(
            IniFile::load(dir.path().join("missing.ini")),
            Err(ProfileError::Io(_))
        ));
    }
}
