//! Version command implementation

use crate::cli::Output;
use anyhow::Result;

/// Execute the version command
pub fn execute(output: &Output) -> Result<()> {
    output.header("barcode-bridge Version Information");

    output.key_value("Version:", crate::VERSION, true);
    output.key_value("Description:", crate::PKG_DESCRIPTION, false);
    output.key_value(
        "Profile:",
        if cfg!(debug_assertions) { "debug" } else { "release" },
        false,
    );

    output.blank_line();
    output.success("Run 'barcode-bridge --help' for usage information");

    Ok(())
}
