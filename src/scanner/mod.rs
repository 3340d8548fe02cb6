//! Barcode scanner service
//!
//! [`BarcodeScanner`] is constructed once by the host application and passed
//! by reference to whatever needs to scan. Each scan normalizes its
//! configuration, issues exactly one native call and returns immediately; the
//! outcome arrives later, either through caller-supplied handlers
//! ([`BarcodeScanner::scan`]) or through a single completion channel
//! ([`BarcodeScanner::scan_async`]).

use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex, PoisonError};
use std::task::{Context, Poll};
use tokio::sync::oneshot;
use uuid::Uuid;

use crate::bridge::{NativeBridge, NativeCall, NativeCallback};
use crate::config::{self, BridgeSettings, NormalizedConfig};

pub mod translate;

pub use translate::{ScanError, ScanResult};

/// Outcome delivered by the completion channel
pub type ScanOutcome = std::result::Result<ScanResult, ScanError>;

/// A result handler as received from the host side.
///
/// Hosts pass handlers as loosely typed values; anything that is not
/// callable arrives as [`Handler::NotInvocable`] and makes `scan` abort.
pub enum Handler<T> {
    Function(Box<dyn FnOnce(T) + Send + 'static>),
    NotInvocable(Value),
}

impl<T> Handler<T> {
    pub fn new(f: impl FnOnce(T) + Send + 'static) -> Self {
        Handler::Function(Box::new(f))
    }

    pub fn noop() -> Self {
        Handler::Function(Box::new(|_| {}))
    }

    /// A non-callable value supplied where a handler was expected
    pub fn value(value: Value) -> Self {
        Handler::NotInvocable(value)
    }

    pub fn is_invocable(&self) -> bool {
        matches!(self, Handler::Function(_))
    }
}

impl<T> std::fmt::Debug for Handler<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Handler::Function(_) => f.write_str("Handler::Function"),
            Handler::NotInvocable(value) => write!(f, "Handler::NotInvocable({value})"),
        }
    }
}

/// Scanner service bound to one native bridge
#[derive(Clone)]
pub struct BarcodeScanner {
    bridge: Arc<dyn NativeBridge>,
    settings: BridgeSettings,
}

impl BarcodeScanner {
    pub fn new(bridge: Arc<dyn NativeBridge>) -> Self {
        Self::with_settings(bridge, BridgeSettings::default())
    }

    pub fn with_settings(bridge: Arc<dyn NativeBridge>, settings: BridgeSettings) -> Self {
        Self { bridge, settings }
    }

    pub fn settings(&self) -> &BridgeSettings {
        &self.settings
    }

    /// Start a scan and report the outcome to the given handlers.
    ///
    /// A missing `on_error` becomes a no-op. If either handler is not
    /// invocable the scan is abandoned after a diagnostic: neither handler
    /// runs and the bridge is not called. This never panics and never
    /// reports misuse as an error.
    pub fn scan(
        &self,
        config: Option<Value>,
        on_success: Handler<ScanResult>,
        on_error: Option<Handler<ScanError>>,
    ) {
        let on_error = match on_error.unwrap_or_else(Handler::noop) {
            Handler::Function(f) => f,
            Handler::NotInvocable(_) => {
                tracing::warn!("BarcodeScanner.scan error: Error callback must be a function.");
                return;
            }
        };
        let on_success = match on_success {
            Handler::Function(f) => f,
            Handler::NotInvocable(_) => {
                tracing::warn!("BarcodeScanner.scan error: Success callback must be a function.");
                return;
            }
        };

        let normalized = config::normalize(config.as_ref());
        let id = Uuid::new_v4();
        self.dispatch(
            id,
            normalized,
            Box::new(move |payload| {
                let result = translate::success(payload);
                tracing::debug!(%id, format = ?result.format, "Scan succeeded");
                on_success(result);
            }),
            Box::new(move |payload| {
                let error = translate::error(payload);
                tracing::debug!(%id, cancelled = error.cancelled, "Scan failed: {error}");
                on_error(error);
            }),
        );
    }

    /// Start a scan whose outcome is delivered once through the returned handle
    pub fn scan_async(&self, config: Option<Value>) -> PendingScan {
        let normalized = config::normalize(config.as_ref());
        let id = Uuid::new_v4();
        let (tx, rx) = oneshot::channel();
        let completion = Completion(Arc::new(Mutex::new(Some(tx))));
        let on_error = completion.clone();

        self.dispatch(
            id,
            normalized,
            Box::new(move |payload| completion.complete(id, Ok(translate::success(payload)))),
            Box::new(move |payload| on_error.complete(id, Err(translate::error(payload)))),
        );

        PendingScan { id, rx }
    }

    fn dispatch(
        &self,
        id: Uuid,
        config: NormalizedConfig,
        on_success: NativeCallback,
        on_error: NativeCallback,
    ) {
        let span = tracing::debug_span!("scan", %id);
        let _enter = span.enter();

        tracing::debug!(
            service = %self.settings.service,
            action = %self.settings.action,
            formats = config.formats().bits(),
            "Starting native scan"
        );

        let call = NativeCall {
            service: self.settings.service.clone(),
            action: self.settings.action.clone(),
            args: vec![config.into_value()],
        };
        self.bridge.exec(call, on_success, on_error);
    }
}

/// Shared sender so whichever native callback fires first wins
#[derive(Clone)]
struct Completion(Arc<Mutex<Option<oneshot::Sender<ScanOutcome>>>>);

impl Completion {
    fn complete(&self, id: Uuid, outcome: ScanOutcome) {
        let sender = self.0.lock().unwrap_or_else(PoisonError::into_inner).take();
        match sender {
            Some(tx) => {
                if tx.send(outcome).is_err() {
                    tracing::debug!(%id, "Scan outcome dropped, nobody is waiting");
                }
            }
            None => tracing::warn!(%id, "Native bridge completed a scan twice"),
        }
    }
}

/// Handle to an in-flight scan started with [`BarcodeScanner::scan_async`]
#[derive(Debug)]
pub struct PendingScan {
    id: Uuid,
    rx: oneshot::Receiver<ScanOutcome>,
}

impl PendingScan {
    /// Request id used in log events for this scan
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// The outcome if the native side already answered
    pub fn try_outcome(&mut self) -> Option<ScanOutcome> {
        match self.rx.try_recv() {
            Ok(outcome) => Some(outcome),
            Err(oneshot::error::TryRecvError::Empty) => None,
            Err(oneshot::error::TryRecvError::Closed) => Some(Err(ScanError::unknown())),
        }
    }
}

impl Future for PendingScan {
    type Output = ScanOutcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let id = self.id;
        Pin::new(&mut self.rx).poll(cx).map(|received| {
            received.unwrap_or_else(|_| {
                tracing::warn!(%id, "Native bridge dropped the scan without a result");
                Err(ScanError::unknown())
            })
        })
    }
}
