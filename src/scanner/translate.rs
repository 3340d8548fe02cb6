//! Native payload translation
//!
//! Turns the raw values the native layer hands to its callbacks into the
//! stable result shapes callers see.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::config::is_truthy;
use crate::formats::{self, BarcodeFormat};

/// Error signal sent when the user dismisses the scanner
pub const USER_CANCELLED: &str = "USER_CANCELLED";

/// Error signal sent when a scan is already running
pub const SCANNER_OPEN: &str = "SCANNER_OPEN";

pub const CANCELLED_MESSAGE: &str = "Scan was cancelled.";
pub const SCANNER_OPEN_MESSAGE: &str = "Another scan is already in progress.";
pub const UNKNOWN_ERROR_MESSAGE: &str = "Unknown error.";

/// A successfully scanned barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanResult {
    pub text: String,

    /// `None` when the native code matched no single symbology
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format: Option<BarcodeFormat>,
}

/// A scan that did not produce a barcode
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanError {
    pub cancelled: bool,
    pub message: Option<String>,
}

impl ScanError {
    pub fn cancelled() -> Self {
        Self {
            cancelled: true,
            message: Some(CANCELLED_MESSAGE.to_string()),
        }
    }

    pub fn already_scanning() -> Self {
        Self {
            cancelled: false,
            message: Some(SCANNER_OPEN_MESSAGE.to_string()),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            cancelled: false,
            message: Some(message.into()),
        }
    }

    pub fn unknown() -> Self {
        Self::failed(UNKNOWN_ERROR_MESSAGE)
    }
}

impl fmt::Display for ScanError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message.as_deref().unwrap_or(UNKNOWN_ERROR_MESSAGE))
    }
}

impl std::error::Error for ScanError {}

/// Translate the native success payload `[text, code]`
pub fn success(payload: Value) -> ScanResult {
    let (text, code) = match payload {
        Value::Array(items) => {
            let mut items = items.into_iter();
            (items.next(), items.next())
        }
        other => {
            tracing::debug!("Native success payload is not a sequence: {other}");
            (Some(other), None)
        }
    };

    let text = match text {
        Some(Value::String(text)) => text,
        Some(Value::Null) | None => String::new(),
        Some(other) => {
            tracing::debug!("Native scan text is not a string: {other}");
            other.to_string()
        }
    };

    let format = code.as_ref().and_then(format_code).and_then(formats::decode);
    if format.is_none() {
        tracing::debug!("Native format code {:?} matches no single format", code);
    }

    ScanResult { text, format }
}

/// Translate the native error payload, whose first element is the error signal
pub fn error(payload: Value) -> ScanError {
    let signal = match payload {
        Value::Array(items) => items.into_iter().next(),
        other => Some(other),
    };

    match signal {
        None | Some(Value::Null) => ScanError::cancelled(),
        Some(Value::String(s)) if s == USER_CANCELLED => ScanError::cancelled(),
        Some(Value::String(s)) if s == SCANNER_OPEN => ScanError::already_scanning(),
        Some(Value::String(s)) if !s.is_empty() => ScanError::failed(s),
        Some(other) if is_truthy(&other) => ScanError::failed(other.to_string()),
        Some(_) => ScanError::unknown(),
    }
}

fn format_code(value: &Value) -> Option<u64> {
    value.as_u64().or_else(|| {
        value
            .as_f64()
            .filter(|f| *f >= 0.0 && f.fract() == 0.0)
            .map(|f| f as u64)
    })
}
