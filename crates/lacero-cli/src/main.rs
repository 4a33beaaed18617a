//! Lacero CLI: scenario runs, frame export and config checks.

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "lacero")]
#[command(version, about = "Lacero: calendar page tearing simulator")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run tearing scenarios and report metrics.
    Run {
        /// Which scenario to run (straight_pull, corner_peel, hanging_page, all).
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Paper preset to apply (see `lacero materials`).
        #[arg(short, long)]
        material: Option<String>,

        /// Output CSV file path. Prints to stdout when omitted.
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Run one scenario and write every frame to JSON.
    Export {
        #[arg(short, long)]
        scenario: String,

        #[arg(short, long, default_value = "frames.json")]
        output: String,

        #[arg(short, long)]
        material: Option<String>,

        /// Also write the torn-edge mask as a PGM image.
        #[arg(long)]
        mask: Option<String>,

        /// Mask size in pixels.
        #[arg(long, default_value_t = 256)]
        mask_resolution: usize,
    },

    /// Validate a sheet config (or, with --material, a paper preset) in TOML.
    Validate {
        path: String,

        #[arg(long)]
        material: bool,
    },

    /// List the built-in paper presets.
    Materials,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            material,
            output,
        } => commands::run(&scenario, material.as_deref(), output.as_deref()),
        Commands::Export {
            scenario,
            output,
            material,
            mask,
            mask_resolution,
        } => commands::export(
            &scenario,
            &output,
            material.as_deref(),
            mask.as_deref(),
            mask_resolution,
        ),
        Commands::Validate { path, material } => commands::validate(&path, material),
        Commands::Materials => commands::materials(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
