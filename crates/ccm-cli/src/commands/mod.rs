//! CLI command implementations

pub mod edid;
pub mod matrix;
pub mod output;
pub mod profile;

use anyhow::{Context, Result};
use ccm_math::Mat3;
use ccm_primaries::NamedPrimaries;
use ccm_profile::IniFile;
use serde::Serialize;
use std::path::Path;

/// Load a weston.ini
pub fn load_ini(path: &Path) -> Result<IniFile> {
    IniFile::load(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Look up named primaries, listing the valid names on failure
pub fn named_primaries(name: &str) -> Result<NamedPrimaries> {
    NamedPrimaries::from_name(name).with_context(|| {
        let names: Vec<_> = NamedPrimaries::ALL.iter().map(|p| p.name()).collect();
        format!("unknown primaries '{}', expected one of: {}", name, names.join(" "))
    })
}

/// Print a value as pretty JSON on stdout
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a 3x3 matrix, one row per line
pub fn print_mat3(label: &str, m: &Mat3) {
    println!("  {}:", label);
    for r in 0..3 {
        println!("    [{:>11.7} {:>11.7} {:>11.7}]", m[(r, 0)], m[(r, 1)], m[(r, 2)]);
    }
}

/// Rows of a matrix, for JSON
pub fn mat3_rows(m: &Mat3) -> [[f32; 3]; 3] {
    std::array::from_fn(|r| std::array::from_fn(|c| m[(r, c)]))
}
