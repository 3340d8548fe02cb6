//! Scan configuration
//!
//! Every scan builds its configuration fresh: the caller's record is laid
//! over the documented defaults and the `formats` map is folded into the
//! native bitmask. Nothing here is persisted between scans.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::formats::{self, BarcodeFormat, FormatMask};

pub mod settings;

pub use settings::BridgeSettings;

/// Specialised detector the native scanner can run instead of barcode detection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectorType {
    Card,
}

/// Fully populated scan options with their documented defaults
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScanOptions {
    /// Play a sound when a barcode is recognised
    pub beep_on_success: bool,

    /// `None` for barcode detection, `Some(Card)` for card detection
    pub detector_type: Option<DetectorType>,

    /// Symbologies the scanner should look for
    pub formats: BTreeMap<BarcodeFormat, bool>,

    /// Android only
    pub rotate_camera: bool,

    /// iOS only
    pub show_flip_camera_button: bool,

    pub show_torch_button: bool,

    pub vibrate_on_success: bool,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            beep_on_success: false,
            detector_type: None,
            formats: BarcodeFormat::ALL
                .into_iter()
                .map(|f| (f, f.enabled_by_default()))
                .collect(),
            rotate_camera: false,
            show_flip_camera_button: false,
            show_torch_button: true,
            vibrate_on_success: false,
        }
    }
}

impl ScanOptions {
    /// The defaults as the keyed record the normalizer merges over
    pub fn default_record() -> Map<String, Value> {
        let mut record = Map::new();
        record.insert("beepOnSuccess".to_string(), Value::Bool(false));
        record.insert("detectorType".to_string(), Value::Null);
        record.insert(
            "formats".to_string(),
            Value::Object(formats::default_format_map()),
        );
        record.insert("rotateCamera".to_string(), Value::Bool(false));
        record.insert("showFlipCameraButton".to_string(), Value::Bool(false));
        record.insert("showTorchButton".to_string(), Value::Bool(true));
        record.insert("vibrateOnSuccess".to_string(), Value::Bool(false));
        record
    }
}

/// Caller-side options where every field is optional.
///
/// Unset fields are left out of the record, so they fall back to the
/// defaults during normalization. Note that `formats` replaces the default
/// map as a whole when it is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartialScanOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub beep_on_success: Option<bool>,

    /// Serialized only when set; use `Some(None)` to send an explicit null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detector_type: Option<Option<DetectorType>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub formats: Option<BTreeMap<BarcodeFormat, bool>>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate_camera: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_flip_camera_button: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub show_torch_button: Option<bool>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vibrate_on_success: Option<bool>,
}

impl PartialScanOptions {
    /// Enable exactly the given symbologies
    pub fn only(formats: impl IntoIterator<Item = BarcodeFormat>) -> Self {
        Self {
            formats: Some(formats.into_iter().map(|f| (f, true)).collect()),
            ..Self::default()
        }
    }

    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Map::new()))
    }
}

impl From<ScanOptions> for Value {
    fn from(options: ScanOptions) -> Self {
        serde_json::to_value(options).unwrap_or_else(|_| Value::Object(ScanOptions::default_record()))
    }
}

/// Configuration as handed to the native layer
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedConfig {
    record: Map<String, Value>,
    formats: FormatMask,
}

impl NormalizedConfig {
    /// The encoded symbology set
    pub fn formats(&self) -> FormatMask {
        self.formats
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.record.get(key)
    }

    /// Truthiness of an option; missing keys read as `false`
    pub fn flag(&self, key: &str) -> bool {
        self.record.get(key).is_some_and(is_truthy)
    }

    pub fn detector_type(&self) -> Option<DetectorType> {
        self.record
            .get("detectorType")
            .and_then(|v| serde_json::from_value(v.clone()).ok())
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.record
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.record)
    }
}

/// Build the native configuration for one scan.
///
/// A missing config, or one that is not a keyed record (a sequence, a
/// string, a number), is replaced by the defaults wholesale. Otherwise the
/// caller's keys are laid over the defaults one level deep and `formats` is
/// replaced by its bitmask. A scalar `formats` enables nothing; a `null` or
/// sequence `formats` falls back to the default set.
pub fn normalize(config: Option<&Value>) -> NormalizedConfig {
    let mut record = ScanOptions::default_record();

    match config {
        Some(Value::Object(overrides)) => {
            for (key, value) in overrides {
                record.insert(key.clone(), value.clone());
            }
        }
        Some(Value::Null) | None => {}
        Some(other) => {
            tracing::debug!(
                "Scan config is a {}, not a record; using defaults",
                value_kind(other)
            );
        }
    }

    let mask = match record.get("formats") {
        Some(Value::Object(enabled)) => formats::encode(enabled),
        // scalars carry no format entries
        Some(scalar @ (Value::Bool(_) | Value::Number(_) | Value::String(_))) => {
            tracing::debug!(
                "Scan config formats is a {}; no formats enabled",
                value_kind(scalar)
            );
            FormatMask::EMPTY
        }
        other => {
            tracing::debug!(
                "Scan config formats is {}; using default formats",
                other.map(value_kind).unwrap_or("missing")
            );
            FormatMask::defaults()
        }
    };
    record.insert("formats".to_string(), Value::from(mask.bits()));

    NormalizedConfig {
        record,
        formats: mask,
    }
}

/// Truthiness of a host value, as the scripting side evaluates it
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "sequence",
        Value::Object(_) => "record",
    }
}

#[cfg(test)]
mod tests;
