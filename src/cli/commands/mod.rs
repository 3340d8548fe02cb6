use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::cli::Output;
use crate::config::BridgeSettings;

pub mod formats;
pub mod normalize;
pub mod scan;
pub mod version;

#[derive(Parser)]
#[command(
    name = "barcode-bridge",
    version = env!("CARGO_PKG_VERSION"),
    about = "Native barcode scanner bridge harness",
    long_about = "Exercises the barcode-bridge library against a simulated native scanner: \
                  inspect the symbology table, normalize scan configurations and translate \
                  native responses."
)]
pub struct Cli {
    /// Bridge settings file (TOML or JSON)
    #[arg(long, global = true, value_name = "FILE")]
    pub settings: Option<PathBuf>,

    /// Show debug logging and extra detail
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// List the supported barcode formats and their bit values
    Formats,
    /// Print the bitmask for a set of formats
    Encode(formats::EncodeArgs),
    /// Print the format name for a native format code
    Decode(formats::DecodeArgs),
    /// Print the configuration the native scanner would receive
    Normalize(normalize::NormalizeArgs),
    /// Run one scan against the simulated native scanner
    Scan(scan::ScanArgs),
    /// Show version information
    Version,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        let settings = BridgeSettings::load_with_custom_config(self.settings.as_deref())?;
        setup_logging(self.verbose, &settings.log_filter);

        let output = Output::new(self.verbose);

        match self.command {
            Commands::Formats => formats::list(&output),
            Commands::Encode(args) => formats::encode(args, &output),
            Commands::Decode(args) => formats::decode(args, &output),
            Commands::Normalize(args) => normalize::execute(args, &output),
            Commands::Scan(args) => scan::execute(args, settings, &output).await,
            Commands::Version => version::execute(&output),
        }
    }
}

fn setup_logging(verbose: bool, default_filter: &str) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            tracing_subscriber::EnvFilter::new("debug")
        } else {
            tracing_subscriber::EnvFilter::new(default_filter)
        }
    });

    // Logs go to stderr so command output stays parseable
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
