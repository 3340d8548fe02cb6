//! # barcode-bridge - native barcode scanning for hybrid apps
//!
//! Exposes a device's native barcode scanner to code running inside a
//! hybrid-app container. The crate does four things:
//!
//! - **Normalize** a caller-supplied scan configuration against the documented defaults
//! - **Encode** the enabled symbologies into the single bitmask the native layer expects
//! - **Invoke** the native `startScan` operation through a generic bridge primitive
//! - **Translate** the native success and error payloads into stable result shapes
//!
//! The scanning itself (camera, decoding, recognition) lives on the native
//! side behind the [`NativeBridge`] trait.
//!
//! ## Library Usage
//!
//! ```rust,no_run
//! use barcode_bridge::{BarcodeScanner, BarcodeFormat, PartialScanOptions, SimulatedBridge};
//! use std::sync::Arc;
//!
//! # async fn demo() {
//! let bridge = Arc::new(SimulatedBridge::new());
//! let scanner = BarcodeScanner::new(bridge.clone());
//!
//! let options = PartialScanOptions::only([BarcodeFormat::QRCode, BarcodeFormat::EAN13]);
//! match scanner.scan_async(Some(options.to_value())).await {
//!     Ok(result) => println!("{} ({:?})", result.text, result.format),
//!     Err(error) => println!("scan failed: {error}"),
//! }
//! # }
//! ```
//!
//! ## Callback Usage
//!
//! ```rust,no_run
//! use barcode_bridge::{BarcodeScanner, Handler, ScanError, ScanResult, SimulatedBridge};
//! use std::sync::Arc;
//!
//! let scanner = BarcodeScanner::new(Arc::new(SimulatedBridge::new()));
//! scanner.scan(
//!     None,
//!     Handler::new(|result: ScanResult| println!("scanned {}", result.text)),
//!     Some(Handler::new(|error: ScanError| println!("{error}"))),
//! );
//! ```

pub mod bridge;
pub mod cli;
pub mod config;
pub mod formats;
pub mod scanner;

pub use bridge::{NativeBridge, NativeCall, NativeCallback, NativeResponse, SimulatedBridge};
pub use config::{BridgeSettings, DetectorType, NormalizedConfig, PartialScanOptions, ScanOptions};
pub use formats::{BarcodeFormat, FormatMask};
pub use scanner::{BarcodeScanner, Handler, PendingScan, ScanError, ScanOutcome, ScanResult};

/// Result type alias for barcode-bridge operations
pub type Result<T> = anyhow::Result<T>;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const PKG_NAME: &str = env!("CARGO_PKG_NAME");
pub const PKG_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
