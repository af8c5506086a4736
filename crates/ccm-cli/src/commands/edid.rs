//! EDID decode command.

use crate::EdidArgs;
use anyhow::{Context, Result};
use ccm_output::{DisplayDescriptor, Edid};
use serde_json::json;
use std::path::Path;

/// Read and parse an EDID blob
pub fn load(path: &Path) -> Result<Edid> {
    let data = std::fs::read(path).with_context(|| format!("Failed to read: {}", path.display()))?;
    Edid::parse(&data).with_context(|| format!("Bad EDID: {}", path.display()))
}

/// Runs the edid command.
pub fn run(args: EdidArgs) -> Result<()> {
    let edid = load(&args.input)?;

    if args.json {
        return super::print_json(&json!({
            "edid": edid,
            "native_primaries": edid.native_primaries(),
            "native_tf": edid.native_tf().map(|tf| tf.to_string()),
        }));
    }

    let names = |v: Vec<&str>| if v.is_empty() { "none".to_string() } else { v.join(" ") };
    let [r, g, b] = edid.chromaticity.primary;
    println!("{}", args.input.display());
    println!("  Red:         {}", r);
    println!("  Green:       {}", g);
    println!("  Blue:        {}", b);
    println!("  White:       {}", edid.chromaticity.white_point);
    if edid.native_primaries().is_none() {
        println!("  (chromaticity unusable as native primaries)");
    }
    match edid.native_tf() {
        Some(tf) => println!("  Transfer:    {}", tf),
        None => println!("  Transfer:    undefined"),
    }
    println!("  EOTF modes:  {}", names(edid.eotf_modes.modes().map(|m| m.name()).collect()));
    println!(
        "  Colorimetry: {}",
        names(edid.colorimetry_modes.modes().map(|m| m.name()).collect())
    );
    if let Some(l) = edid.luminance {
        let show = |v: Option<f32>| v.map_or("-".to_string(), |v| format!("{:.4}", v));
        println!(
            "  Luminance:   min {} max {} max frame-average {} cd/m²",
            show(l.min),
            show(l.max),
            show(l.max_fall)
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_rejects_garbage() {
        let file = tempfile::NamedTempFile::new().unwrap();
        std::fs::write(file.path(), [0u8; 16]).unwrap();
        let err = format!("{:#}", load(file.path()).unwrap_err());
        assert!(err.starts_with("Bad EDID"));
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load(Path::new("/nonexistent/edid.bin")).is_err());
    }
}
