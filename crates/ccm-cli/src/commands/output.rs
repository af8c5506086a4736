//! Output resolve command.
//!
//! Runs the compositor's output color setup against a config file and an
//! optional EDID blob, using the stock color manager.

use crate::{CapsArg, OutputArgs};
use anyhow::{bail, Context, Result};
use ccm_lut::Lut1D;
use ccm_output::{
    ColorConfig, ColorManager, ColorTransform, DisplayDescriptor, Edid, HdrGroups, HdrMetadataType1, HeadCaps,
    StockColorManager,
};
use serde_json::json;

/// Runs the output command.
pub fn run(args: OutputArgs) -> Result<()> {
    let ini = super::load_ini(&args.config)?;
    let edid = match &args.edid {
        Some(path) => Some(super::edid::load(path)?),
        None => None,
    };
    let caps = head_caps(args.caps, edid.as_ref())?;

    let mut cm = StockColorManager::default();
    let (config, errors) = ColorConfig::from_ini(&ini, cm.capabilities());
    if !errors.is_empty() {
        tracing::warn!("{} config error(s), continuing with what loaded", errors.len());
    }

    let display = edid.as_ref().map(|e| e as &dyn DisplayDescriptor);
    let out = config
        .configure_output(&ini, &mut cm, &args.name, caps, display)
        .map_err(|e| anyhow::anyhow!("{}", e.to_string().trim_end()))
        .with_context(|| format!("output '{}' failed", args.name))?;

    if args.json {
        super::print_json(&json!({
            "output": out.output,
            "profile": {
                "id": out.profile.id(),
                "description": out.profile.description(),
                "params": out.profile.params(),
            },
            "hdr_metadata": out.outcome.hdr_metadata,
            "from_srgb_to_output": transform_json(&out.outcome.from_srgb_to_output),
            "from_srgb_to_blend": transform_json(&out.outcome.from_srgb_to_blend),
            "from_blend_to_output": transform_json(&out.outcome.from_blend_to_output),
        }))?;
    } else {
        println!("{}", out.output.name());
        println!("  EOTF mode:        {}", out.output.eotf_mode().description());
        println!("  Colorimetry mode: {}", out.output.colorimetry_mode().description());
        println!("  Color profile:    {} (id {})", out.profile.description(), out.profile.id());
        match &out.outcome.hdr_metadata {
            Some(md) => print_hdr_metadata(md),
            None => println!("  HDR metadata:     none"),
        }
        print_transform("sRGB to output", &out.outcome.from_srgb_to_output);
        print_transform("sRGB to blend", &out.outcome.from_srgb_to_blend);
        print_transform("blend to output", &out.outcome.from_blend_to_output);
    }
    Ok(())
}

fn head_caps(arg: CapsArg, edid: Option<&Edid>) -> Result<HeadCaps> {
    Ok(match arg {
        CapsArg::Sdr => HeadCaps::sdr_only(),
        CapsArg::All => HeadCaps::all(),
        CapsArg::Edid => match edid {
            Some(e) => HeadCaps::from_display(e),
            None => bail!("--caps edid needs --edid"),
        },
    })
}

fn print_hdr_metadata(md: &HdrMetadataType1) {
    println!("  HDR metadata:");
    if md.group_mask.contains(HdrGroups::PRIMARIES) {
        let [r, g, b] = md.primary;
        println!("    Primaries:  R{} G{} B{}", r, g, b);
    }
    if md.group_mask.contains(HdrGroups::WHITE) {
        println!("    White:      {}", md.white);
    }
    if md.group_mask.contains(HdrGroups::MAXDML) {
        println!("    max_L:      {:.1}", md.max_dml);
    }
    if md.group_mask.contains(HdrGroups::MINDML) {
        println!("    min_L:      {:.4}", md.min_dml);
    }
    if md.group_mask.contains(HdrGroups::MAXCLL) {
        println!("    maxCLL:     {:.1}", md.max_cll);
    }
    if md.group_mask.contains(HdrGroups::MAXFALL) {
        println!("    maxFALL:    {:.1}", md.max_fall);
    }
}

fn print_transform(label: &str, t: &ColorTransform) {
    if t.is_identity() {
        println!("  {}: identity", label);
        return;
    }
    let curve = |l: &Option<Lut1D>| l.as_ref().map_or("none".to_string(), |l| format!("{} entries", l.len()));
    println!("  {}: decode {}, encode {}", label, curve(&t.decode), curve(&t.encode));
    super::print_mat3("matrix", &t.matrix);
}

fn transform_json(t: &ColorTransform) -> serde_json::Value {
    json!({
        "decode_len": t.decode.as_ref().map(|l| l.len()),
        "matrix": super::mat3_rows(&t.matrix),
        "encode_len": t.encode.as_ref().map(|l| l.len()),
    })
}
