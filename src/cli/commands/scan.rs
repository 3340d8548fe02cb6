//! Scan command implementation
//!
//! Runs a single scan through the simulated native scanner and prints the
//! translated outcome as JSON.

use anyhow::{Context, Result};
use clap::Args;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;

use super::normalize::ConfigInput;
use crate::bridge::{NativeResponse, SimulatedBridge};
use crate::cli::Output;
use crate::config::BridgeSettings;
use crate::formats::BarcodeFormat;
use crate::scanner::{BarcodeScanner, ScanOutcome};

#[derive(Args)]
pub struct ScanArgs {
    #[command(flatten)]
    pub input: ConfigInput,

    /// How the simulated scanner answers:
    /// success:TEXT:CODE (CODE may be a number or a format name),
    /// error:SIGNAL, cancel, or busy (a second scan while one is open)
    #[arg(long, value_name = "RESPONSE", default_value = "cancel")]
    pub respond: Respond,
}

/// Scripted answer of the simulated native scanner
#[derive(Debug, Clone, PartialEq)]
pub enum Respond {
    Success { text: String, code: u64 },
    Error(String),
    Cancel,
    Busy,
}

impl FromStr for Respond {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        if let Some(rest) = s.strip_prefix("success:") {
            let (text, code) = rest
                .rsplit_once(':')
                .context("Expected success:TEXT:CODE")?;
            let code = match code.parse::<u64>() {
                Ok(code) => code,
                Err(_) => u64::from(code.parse::<BarcodeFormat>()?.bit()),
            };
            return Ok(Respond::Success {
                text: text.to_string(),
                code,
            });
        }
        if let Some(signal) = s.strip_prefix("error:") {
            return Ok(Respond::Error(signal.to_string()));
        }
        match s {
            "cancel" => Ok(Respond::Cancel),
            "busy" => Ok(Respond::Busy),
            other => anyhow::bail!("Unknown response '{other}'"),
        }
    }
}

pub async fn execute(args: ScanArgs, settings: BridgeSettings, output: &Output) -> Result<()> {
    let config = args.input.load()?;
    let bridge = Arc::new(SimulatedBridge::new());
    let scanner = BarcodeScanner::with_settings(bridge.clone(), settings);

    let outcome = run(&scanner, &bridge, config, args.respond).await;

    for call in bridge.calls() {
        output.verbose(&format!(
            "Native call {}.{} {}",
            call.service,
            call.action,
            Value::Array(call.args)
        ));
    }

    match outcome {
        Ok(result) => output.json(&json!({ "success": result })),
        Err(error) => {
            output.json(&json!({ "error": error }))?;
            std::process::exit(1);
        }
    }
}

async fn run(
    scanner: &BarcodeScanner,
    bridge: &SimulatedBridge,
    config: Option<Value>,
    respond: Respond,
) -> ScanOutcome {
    let pending = scanner.scan_async(config.clone());

    let response = match respond {
        Respond::Success { text, code } => NativeResponse::scanned_code(text, code),
        Respond::Error(signal) => NativeResponse::failure(Value::String(signal)),
        Respond::Cancel => NativeResponse::user_cancelled(),
        Respond::Busy => {
            // The first scan stays open, so the native side rejects this one
            let second = scanner.scan_async(config);
            let outcome = second.await;
            bridge.respond(NativeResponse::user_cancelled());
            let _ = pending.await;
            return outcome;
        }
    };

    bridge.respond(response);
    pending.await
}
