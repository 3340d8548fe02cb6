//! Native bridge seam
//!
//! The host container exposes one generic primitive: invoke an operation on a
//! named native plugin with positional arguments and two completion
//! callbacks. The scanner service depends only on this trait, so any host
//! (a webview bridge, an FFI shim, the in-process simulator) can sit behind it.

use serde_json::Value;

pub mod simulated;

pub use simulated::{NativeResponse, SimulatedBridge};

/// Completion callback handed to the native side; called at most once
pub type NativeCallback = Box<dyn FnOnce(Value) + Send + 'static>;

/// One request addressed to a native plugin
#[derive(Debug, Clone, PartialEq)]
pub struct NativeCall {
    /// Plugin name, e.g. `cordova-plugin-barcode-scanner`
    pub service: String,
    /// Operation name, e.g. `startScan`
    pub action: String,
    pub args: Vec<Value>,
}

/// Generic call-with-two-callbacks primitive of the host container.
///
/// Implementations must return without waiting for the operation and invoke
/// exactly one of the callbacks once the native side finishes. Dropping both
/// callbacks unused is tolerated by the scanner but reported as an unknown
/// error to async callers.
pub trait NativeBridge: Send + Sync {
    fn exec(&self, call: NativeCall, on_success: NativeCallback, on_error: NativeCallback);
}

impl<F> NativeBridge for F
where
    F: Fn(NativeCall, NativeCallback, NativeCallback) + Send + Sync,
{
    fn exec(&self, call: NativeCall, on_success: NativeCallback, on_error: NativeCallback) {
        self(call, on_success, on_error)
    }
}
