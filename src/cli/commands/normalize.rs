//! Normalize command implementation

use anyhow::{Context, Result};
use clap::Args;
use serde_json::Value;
use std::path::PathBuf;

use crate::cli::Output;
use crate::config;

#[derive(Args)]
pub struct NormalizeArgs {
    #[command(flatten)]
    pub input: ConfigInput,
}

/// Scan configuration given inline or as a file
#[derive(Args)]
pub struct ConfigInput {
    /// Scan configuration as JSON; omit to use the defaults
    #[arg(value_name = "CONFIG_JSON", conflicts_with = "config_file")]
    pub config: Option<String>,

    /// Read the scan configuration from a JSON file
    #[arg(long, value_name = "FILE")]
    pub config_file: Option<PathBuf>,
}

impl ConfigInput {
    /// The caller configuration exactly as the host would pass it
    pub fn load(&self) -> Result<Option<Value>> {
        let raw = match (&self.config, &self.config_file) {
            (Some(inline), _) => inline.clone(),
            (None, Some(path)) => std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config file: {}", path.display()))?,
            (None, None) => return Ok(None),
        };

        let value = serde_json::from_str(&raw).context("Scan configuration is not valid JSON")?;
        Ok(Some(value))
    }
}

pub fn execute(args: NormalizeArgs, output: &Output) -> Result<()> {
    let input = args.input.load()?;
    let normalized = config::normalize(input.as_ref());

    if output.is_verbose() {
        let names: Vec<String> = normalized
            .formats()
            .formats()
            .iter()
            .map(ToString::to_string)
            .collect();
        output.verbose(&format!("Enabled formats: {}", names.join(", ")));
    }

    output.json(&normalized.into_value())
}
