//! Matrix command.
//!
//! Prints the NPM of a set of primaries and, with `--to`, the gamut-to-gamut
//! conversion. `--adapt` without `--to` prints the Bradford matrix to D65.

use crate::MatrixArgs;
use anyhow::{Context, Result};
use ccm_core::CIExy;
use ccm_math::{bradford_adaptation, Mat3};
use ccm_primaries::{gamut_to_gamut_matrix, normalized_primary_matrix, NpmDirection};
use serde_json::json;

/// Runs the matrix command.
pub fn run(args: MatrixArgs) -> Result<()> {
    let src = super::named_primaries(&args.from)?;
    let gamut = src.gamut();
    let npm = normalized_primary_matrix(&gamut, NpmDirection::Forward)
        .with_context(|| format!("{} primaries do not span a gamut", src))?;

    let mut matrices: Vec<(String, Mat3)> = vec![(format!("{} to XYZ", src), npm)];
    match &args.to {
        Some(to) => {
            let dst = super::named_primaries(to)?;
            let m = gamut_to_gamut_matrix(&gamut, &dst.gamut(), args.adapt)
                .with_context(|| format!("no conversion from {} to {}", src, dst))?;
            matrices.push((format!("{} to {}", src, dst), m));
        }
        None if args.adapt => {
            let m = bradford_adaptation(gamut.white_point, CIExy::D65)
                .context("white point cannot be adapted")?;
            matrices.push((format!("{} white to D65", src), m));
        }
        None => {}
    }

    if args.json {
        let out: serde_json::Map<_, _> = matrices
            .iter()
            .map(|(label, m)| (label.clone(), json!(super::mat3_rows(m))))
            .collect();
        return super::print_json(&out);
    }
    for (label, m) in &matrices {
        super::print_mat3(label, m);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(from: &str, to: Option<&str>, adapt: bool) -> MatrixArgs {
        MatrixArgs { from: from.into(), to: to.map(Into::into), adapt, json: false }
    }

    #[test]
    fn test_matrix_variants() {
        run(args("srgb", None, false)).unwrap();
        run(args("dci_p3", None, true)).unwrap();
        run(args("srgb", Some("bt2020"), true)).unwrap();
    }

    #[test]
    fn test_unknown_primaries() {
        assert!(run(args("srgb", Some("rec709"), false)).is_err());
    }
}
