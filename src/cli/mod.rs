//! Developer harness for barcode-bridge
//!
//! Drives the library against the in-process simulated bridge so the
//! configuration, encoding and translation paths can be exercised from a
//! shell.

pub mod commands;
pub mod output;

pub use output::Output;
