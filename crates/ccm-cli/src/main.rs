//! ccm - compositor color management inspector
//!
//! Checks `weston.ini` color configuration, resolves outputs the way the
//! compositor would, decodes EDID blobs and prints gamut matrices.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "ccm")]
#[command(author, version, about = "Compositor color management inspector")]
#[command(long_about = "
Inspects the color management side of a compositor configuration.

Examples:
  ccm profile weston.ini                   # Check every [color-profile]
  ccm output weston.ini DP-1               # Resolve one output
  ccm output weston.ini DP-1 --edid dp1.bin --caps edid
  ccm edid dp1.bin --json                  # Decode an EDID blob
  ccm matrix --from srgb --to bt2020       # Gamut-to-gamut matrix
  ccm matrix --from dci_p3 --adapt         # NPM and adaptation to D65
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (repeat for more)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate [core] and [color-profile] sections
    #[command(visible_alias = "p")]
    Profile(ProfileArgs),

    /// Resolve the color setup of one output
    #[command(visible_alias = "o")]
    Output(OutputArgs),

    /// Decode an EDID blob
    Edid(EdidArgs),

    /// Print primary and gamut conversion matrices
    #[command(visible_alias = "m")]
    Matrix(MatrixArgs),
}

#[derive(Args)]
struct ProfileArgs {
    /// weston.ini to check
    config: PathBuf,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

/// What the head is assumed to drive.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CapsArg {
    /// SDR and default colorimetry only
    Sdr,
    /// Every mode
    All,
    /// Modes advertised by --edid
    Edid,
}

#[derive(Args)]
struct OutputArgs {
    /// weston.ini to read
    config: PathBuf,

    /// Output name, as in [output] name=
    name: String,

    /// EDID blob of the attached display
    #[arg(short, long)]
    edid: Option<PathBuf>,

    /// Head capabilities
    #[arg(short, long, value_enum, default_value = "all")]
    caps: CapsArg,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct EdidArgs {
    /// EDID blob
    input: PathBuf,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

#[derive(Args)]
struct MatrixArgs {
    /// Source primaries (srgb, bt2020, dci_p3, ...)
    #[arg(short, long, default_value = "srgb")]
    from: String,

    /// Destination primaries; without it only the NPM is printed
    #[arg(short, long)]
    to: Option<String>,

    /// Adapt white points with Bradford
    #[arg(short, long)]
    adapt: bool,

    /// Machine-readable output (JSON)
    #[arg(long)]
    json: bool,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Profile(args) => commands::profile::run(args),
        Commands::Output(args) => commands::output::run(args),
        Commands::Edid(args) => commands::edid::run(args),
        Commands::Matrix(args) => commands::matrix::run(args),
    }
}
