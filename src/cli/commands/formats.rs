//! Symbology table commands

use anyhow::Result;
use clap::Args;
use serde_json::json;

use crate::cli::Output;
use crate::formats::{BarcodeFormat, FormatMask};

#[derive(Args)]
pub struct EncodeArgs {
    /// Format names, e.g. QRCode EAN13
    #[arg(value_name = "FORMAT", required = true)]
    pub formats: Vec<BarcodeFormat>,

    /// Print the result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct DecodeArgs {
    /// Format code reported by the native scanner
    #[arg(value_name = "CODE")]
    pub code: u64,
}

pub fn list(output: &Output) -> Result<()> {
    output.header("Barcode Formats");
    for format in BarcodeFormat::ALL {
        let default = if format.enabled_by_default() { "on" } else { "off" };
        output.table_row(
            format.name(),
            &format!("{:>5}  default {default}", format.bit()),
        );
    }
    output.blank_line();
    output.key_value(
        "Default mask:",
        &FormatMask::defaults().bits().to_string(),
        true,
    );
    Ok(())
}

pub fn encode(args: EncodeArgs, output: &Output) -> Result<()> {
    let mask: FormatMask = args.formats.iter().copied().collect();

    if args.json {
        let names: Vec<&str> = mask.formats().into_iter().map(BarcodeFormat::name).collect();
        return output.json(&json!({ "formats": names, "mask": mask.bits() }));
    }

    println!("{}", mask.bits());
    Ok(())
}

pub fn decode(args: DecodeArgs, output: &Output) -> Result<()> {
    match crate::formats::decode(args.code) {
        Some(format) => {
            let default = if format.enabled_by_default() { "on" } else { "off" };
            output.verbose(&format!("Code {} is the {format} bit, default {default}", args.code));
            println!("{format}");
            Ok(())
        }
        None => anyhow::bail!("No barcode format has code {}", args.code),
    }
}
