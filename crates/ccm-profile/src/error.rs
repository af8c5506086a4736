//! Error types for profile configuration.

use crate::ProfileConfigError;
use thiserror::Error;

/// Result type for profile configuration.
pub type ProfileResult<T> = Result<T, ProfileError>;

/// Errors raised while reading profile configuration.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// I/O error reading the config file.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed line in the config file.
    #[error("weston.ini line {line}: {message}")]
    Syntax {
        /// 1-based line number
        line: usize,
        /// What is wrong
        message: String,
    },

    /// A value that cannot be interpreted for its key.
    #[error("invalid value '{value}' for {key} in [{section}]")]
    InvalidValue {
        /// Section name
        section: String,
        /// Key
        key: String,
        /// Raw value
        value: String,
    },

    /// A `[color-profile]` section without `name=`.
    #[error("Config error in weston.ini [color-profile] at line {line}: missing name")]
    MissingName {
        /// Line of the section header
        line: usize,
    },

    /// Two `[color-profile]` sections share a name.
    #[error("Config error in weston.ini [color-profile] name={0}: duplicate profile name")]
    DuplicateName(String),

    /// Profile names must not look like `srgb:` or `auto:` references.
    #[error("Config error in weston.ini [color-profile] name={0}: profile names must not contain ':'")]
    ReservedName(String),

    /// The parameter set failed validation.
    #[error(transparent)]
    InvalidProfile(#[from] ProfileConfigError),

    /// An output references a profile that does not exist.
    #[error("no [color-profile] named '{0}'")]
    UnknownProfile(String),

    /// Unrecognized flag in `color-profile=auto:<flags>`.
    #[error("unknown flag '{0}' in color-profile=auto:, expected edid-primaries or edid-luminance")]
    UnknownAutoFlag(String),
}
