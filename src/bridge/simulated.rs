//! In-process stand-in for the native scanner
//!
//! Records every call, holds at most one scan open at a time and rejects an
//! overlapping scan with `SCANNER_OPEN`, the way the native plugin does.
//! Tests and the harness binary complete the open scan with [`SimulatedBridge::respond`].

use serde_json::{Value, json};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{NativeBridge, NativeCall, NativeCallback};
use crate::formats::BarcodeFormat;
use crate::scanner::translate::{SCANNER_OPEN, USER_CANCELLED};

/// Payload the simulated native side completes a scan with
#[derive(Debug, Clone, PartialEq)]
pub enum NativeResponse {
    /// Delivered to the success callback as-is
    Success(Value),
    /// Delivered to the error callback as-is
    Error(Value),
}

impl NativeResponse {
    /// `[text, code]` for a recognised barcode
    pub fn scanned(text: impl Into<String>, format: BarcodeFormat) -> Self {
        Self::Success(json!([text.into(), format.bit()]))
    }

    /// `[text, code]` with an arbitrary code
    pub fn scanned_code(text: impl Into<String>, code: u64) -> Self {
        Self::Success(json!([text.into(), code]))
    }

    pub fn user_cancelled() -> Self {
        Self::Error(json!([USER_CANCELLED]))
    }

    pub fn failure(signal: Value) -> Self {
        Self::Error(json!([signal]))
    }
}

struct OpenScan {
    on_success: NativeCallback,
    on_error: NativeCallback,
}

#[derive(Default)]
struct State {
    calls: Vec<NativeCall>,
    open: Option<OpenScan>,
}

#[derive(Default)]
pub struct SimulatedBridge {
    state: Mutex<State>,
}

impl SimulatedBridge {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Every call received so far, including rejected ones
    pub fn calls(&self) -> Vec<NativeCall> {
        self.state().calls.clone()
    }

    pub fn is_scanning(&self) -> bool {
        self.state().open.is_some()
    }

    /// Complete the open scan. Returns `false` when no scan is open.
    pub fn respond(&self, response: NativeResponse) -> bool {
        // Callbacks run outside the lock so they may start another scan
        let Some(open) = self.state().open.take() else {
            tracing::debug!("Simulated bridge has no open scan to complete");
            return false;
        };

        match response {
            NativeResponse::Success(payload) => (open.on_success)(payload),
            NativeResponse::Error(payload) => (open.on_error)(payload),
        }
        true
    }

    /// Close the open scan without calling either callback
    pub fn abandon(&self) -> bool {
        self.state().open.take().is_some()
    }
}

impl NativeBridge for SimulatedBridge {
    fn exec(&self, call: NativeCall, on_success: NativeCallback, on_error: NativeCallback) {
        let mut state = self.state();
        state.calls.push(call);

        if state.open.is_some() {
            drop(state);
            tracing::debug!("Simulated bridge rejecting overlapping scan");
            on_error(json!([SCANNER_OPEN]));
            return;
        }

        state.open = Some(OpenScan {
            on_success,
            on_error,
        });
    }
}
