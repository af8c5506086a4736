//! Profile check command.
//!
//! Loads `[core]` and every `[color-profile]`, prints what loaded and what
//! did not. Any error makes the command fail.

use crate::ProfileArgs;
use anyhow::{bail, Result};
use ccm_output::ColorConfig;
use ccm_profile::{Capabilities, ColorProfileParams, PrimariesSpec};
use serde_json::json;

/// Runs the profile command.
pub fn run(args: ProfileArgs) -> Result<()> {
    let ini = super::load_ini(&args.config)?;
    let (config, errors) = ColorConfig::from_ini(&ini, &Capabilities::all());

    if args.json {
        let profiles: serde_json::Map<_, _> = config
            .profiles
            .iter()
            .map(|(name, p)| (name.to_string(), json!(p)))
            .collect();
        let errors: Vec<_> = errors.iter().map(|e| e.to_string().trim_end().to_string()).collect();
        super::print_json(&json!({
            "color_management": config.color_management,
            "profiles": profiles,
            "errors": errors,
        }))?;
    } else {
        println!("{}", args.config.display());
        println!(
            "  Color management: {}",
            if config.color_management { "enabled" } else { "disabled" }
        );
        for (name, params) in config.profiles.iter() {
            print_profile(name, params);
        }
        for e in &errors {
            for line in e.to_string().lines() {
                println!("  ! {}", line);
            }
        }
    }

    if !errors.is_empty() {
        bail!("{} error(s) in {}", errors.len(), args.config.display());
    }
    Ok(())
}

/// Short text form of the signaling primaries.
pub fn describe_primaries(spec: &PrimariesSpec) -> String {
    match spec {
        PrimariesSpec::Named(p) => p.name().to_string(),
        PrimariesSpec::Explicit(g) => {
            let [r, gr, b] = g.primary;
            format!("R{} G{} B{} W{}", r, gr, b, g.white_point)
        }
    }
}

/// Print one profile's parameters.
pub fn print_profile(name: &str, p: &ColorProfileParams) {
    println!("  [{}]", name);
    println!("    Primaries:  {}", describe_primaries(&p.primaries));
    println!("    Transfer:   {}", p.tf);
    println!(
        "    Luminance:  {:.4} - {:.1} cd/m², reference white {:.1}",
        p.min_luminance, p.max_luminance, p.reference_white_luminance
    );
    println!(
        "    Target:     {:.4} - {:.1} cd/m²",
        p.target_min_luminance, p.target_max_luminance
    );
    if p.primaries.gamut() != p.target_primaries {
        let [r, g, b] = p.target_primaries.primary;
        println!("    Target gamut: R{} G{} B{} W{}", r, g, b, p.target_primaries.white_point);
    }
    if let Some(cll) = p.max_cll {
        println!("    maxCLL:     {:.1}", cll);
    }
    if let Some(fall) = p.max_fall {
        println!("    maxFALL:    {:.1}", fall);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ccm_primaries::{ColorGamut, NamedPrimaries};
    use std::io::Write;

    #[test]
    fn test_describe_primaries() {
        assert_eq!(describe_primaries(&PrimariesSpec::Named(NamedPrimaries::Bt2020)), "bt2020");
        let g = ColorGamut::from_xy((0.64, 0.33), (0.3, 0.6), (0.15, 0.06), (0.3127, 0.329));
        assert!(describe_primaries(&PrimariesSpec::Explicit(g)).starts_with("R(x=0.640000"));
    }

    #[test]
    fn test_run_reports_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[color-profile]\nname=ok\nprim_named=srgb\ntf_named=srgb\n").unwrap();
        writeln!(file, "[color-profile]\nname=bad\nprim_red=0.6 0.3\n").unwrap();

        let args = ProfileArgs { config: file.path().to_path_buf(), json: true };
        let err = run(args).unwrap_err();
        assert!(err.to_string().starts_with("1 error(s)"));
    }

    #[test]
    fn test_run_clean_config() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[core]\ncolor-management=true\n\n[color-profile]\nname=hdr\nprim_named=bt2020\ntf_named=st2084_pq").unwrap();
        let args = ProfileArgs { config: file.path().to_path_buf(), json: false };
        run(args).unwrap();
    }
}
