//! Barcode symbology table
//!
//! The native scanner reports and accepts symbologies as single bits of a
//! 13-bit mask. This module owns that table and the conversions in both
//! directions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

use crate::config::is_truthy;

/// A barcode symbology understood by the native scanner
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum BarcodeFormat {
    Code128,
    Code39,
    Code93,
    CodaBar,
    DataMatrix,
    EAN13,
    EAN8,
    ITF,
    QRCode,
    UPCA,
    UPCE,
    PDF417,
    Aztec,
}

impl BarcodeFormat {
    /// Every symbology, in bit order
    pub const ALL: [BarcodeFormat; 13] = [
        BarcodeFormat::Code128,
        BarcodeFormat::Code39,
        BarcodeFormat::Code93,
        BarcodeFormat::CodaBar,
        BarcodeFormat::DataMatrix,
        BarcodeFormat::EAN13,
        BarcodeFormat::EAN8,
        BarcodeFormat::ITF,
        BarcodeFormat::QRCode,
        BarcodeFormat::UPCA,
        BarcodeFormat::UPCE,
        BarcodeFormat::PDF417,
        BarcodeFormat::Aztec,
    ];

    /// The single bit the native layer uses for this symbology
    pub const fn bit(self) -> u32 {
        match self {
            BarcodeFormat::Code128 => 1,
            BarcodeFormat::Code39 => 2,
            BarcodeFormat::Code93 => 4,
            BarcodeFormat::CodaBar => 8,
            BarcodeFormat::DataMatrix => 16,
            BarcodeFormat::EAN13 => 32,
            BarcodeFormat::EAN8 => 64,
            BarcodeFormat::ITF => 128,
            BarcodeFormat::QRCode => 256,
            BarcodeFormat::UPCA => 512,
            BarcodeFormat::UPCE => 1024,
            BarcodeFormat::PDF417 => 2048,
            BarcodeFormat::Aztec => 4096,
        }
    }

    /// Name as used in configuration maps and scan results
    pub const fn name(self) -> &'static str {
        match self {
            BarcodeFormat::Code128 => "Code128",
            BarcodeFormat::Code39 => "Code39",
            BarcodeFormat::Code93 => "Code93",
            BarcodeFormat::CodaBar => "CodaBar",
            BarcodeFormat::DataMatrix => "DataMatrix",
            BarcodeFormat::EAN13 => "EAN13",
            BarcodeFormat::EAN8 => "EAN8",
            BarcodeFormat::ITF => "ITF",
            BarcodeFormat::QRCode => "QRCode",
            BarcodeFormat::UPCA => "UPCA",
            BarcodeFormat::UPCE => "UPCE",
            BarcodeFormat::PDF417 => "PDF417",
            BarcodeFormat::Aztec => "Aztec",
        }
    }

    /// Whether the symbology is scanned when the caller does not say otherwise
    pub const fn enabled_by_default(self) -> bool {
        !matches!(self, BarcodeFormat::PDF417)
    }

    /// Exact lookup of a native format code.
    ///
    /// Only a code equal to one bit matches; multi-bit masks return `None`.
    pub fn from_code(code: u64) -> Option<Self> {
        Self::ALL.into_iter().find(|f| u64::from(f.bit()) == code)
    }
}

impl fmt::Display for BarcodeFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BarcodeFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|f| f.name() == s)
            .ok_or_else(|| anyhow::anyhow!("Unknown barcode format: {s}"))
    }
}

/// A set of symbologies folded into the native bitmask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FormatMask(u32);

impl FormatMask {
    pub const EMPTY: FormatMask = FormatMask(0);

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn contains(self, format: BarcodeFormat) -> bool {
        self.0 & format.bit() != 0
    }

    pub fn with(self, format: BarcodeFormat) -> Self {
        FormatMask(self.0 | format.bit())
    }

    /// Formats whose bit is set, in table order
    pub fn formats(self) -> Vec<BarcodeFormat> {
        BarcodeFormat::ALL
            .into_iter()
            .filter(|f| self.contains(*f))
            .collect()
    }

    /// Mask of the formats enabled by default (everything except PDF417)
    pub fn defaults() -> Self {
        BarcodeFormat::ALL
            .into_iter()
            .filter(|f| f.enabled_by_default())
            .collect()
    }
}

impl FromIterator<BarcodeFormat> for FormatMask {
    fn from_iter<I: IntoIterator<Item = BarcodeFormat>>(iter: I) -> Self {
        iter.into_iter().fold(FormatMask::EMPTY, FormatMask::with)
    }
}

impl From<FormatMask> for u32 {
    fn from(mask: FormatMask) -> Self {
        mask.0
    }
}

/// Fold a `{ name: enabled }` map into the native bitmask.
///
/// Entries with a truthy value contribute their bit; names outside the table
/// are ignored.
pub fn encode(enabled: &Map<String, Value>) -> FormatMask {
    enabled
        .iter()
        .filter(|(_, value)| is_truthy(value))
        .filter_map(|(name, _)| name.parse::<BarcodeFormat>().ok())
        .collect()
}

/// Name lookup for a format code reported by the native layer
pub fn decode(code: u64) -> Option<BarcodeFormat> {
    BarcodeFormat::from_code(code)
}

/// The default `formats` map handed to callers and used by the normalizer
pub fn default_format_map() -> Map<String, Value> {
    BarcodeFormat::ALL
        .into_iter()
        .map(|f| (f.name().to_string(), Value::Bool(f.enabled_by_default())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_bits_are_disjoint_powers_of_two() {
        let mut seen = 0u32;
        for format in BarcodeFormat::ALL {
            assert!(format.bit().is_power_of_two(), "{format} is not a single bit");
            assert_eq!(seen & format.bit(), 0, "{format} overlaps another format");
            seen |= format.bit();
        }
        assert_eq!(seen, 0x1FFF);
    }

    #[test]
    fn test_single_format_round_trip() {
        for format in BarcodeFormat::ALL {
            let mut enabled = Map::new();
            enabled.insert(format.name().to_string(), Value::Bool(true));
            let mask = encode(&enabled);
            assert_eq!(decode(u64::from(mask.bits())), Some(format));
        }
    }

    #[test]
    fn test_encode_empty_is_zero() {
        assert_eq!(encode(&Map::new()).bits(), 0);
    }

    #[test]
    fn test_encode_defaults_excludes_pdf417() {
        let mask = encode(&default_format_map());
        assert_eq!(mask.bits(), 0x1FFF - 2048);
        assert_eq!(mask, FormatMask::defaults());
        assert!(!mask.contains(BarcodeFormat::PDF417));
    }

    #[test]
    fn test_encode_ignores_unknown_and_disabled() {
        let mask = encode(&map(json!({
            "QRCode": true,
            "EAN13": false,
            "Bogus": true,
        })));
        assert_eq!(mask.bits(), 256);
    }

    #[test]
    fn test_encode_uses_truthiness() {
        let mask = encode(&map(json!({
            "Code128": 1,
            "Code39": "yes",
            "Code93": 0,
            "CodaBar": "",
            "DataMatrix": null,
        })));
        assert_eq!(mask.formats(), vec![BarcodeFormat::Code128, BarcodeFormat::Code39]);
    }

    #[test]
    fn test_decode_requires_exact_bit() {
        assert_eq!(decode(32), Some(BarcodeFormat::EAN13));
        assert_eq!(decode(32 | 64), None);
        assert_eq!(decode(0), None);
        assert_eq!(decode(8192), None);
    }

    #[test]
    fn test_name_parsing() {
        assert_eq!("UPCE".parse::<BarcodeFormat>().unwrap(), BarcodeFormat::UPCE);
        assert!("upce".parse::<BarcodeFormat>().is_err());
        assert_eq!(serde_json::to_value(BarcodeFormat::QRCode).unwrap(), json!("QRCode"));
    }
}
