use anyhow::{Context, Result};
use figment::{
    Figment,
    providers::{Env, Format, Json, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

// Embed the default settings at compile time
const DEFAULT_SETTINGS: &str = include_str!("../../default-config.toml");

/// How the scanner service reaches the host container
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BridgeSettings {
    /// Native plugin name passed to the bridge
    pub service: String,

    /// Operation name passed to the bridge
    pub action: String,

    /// Default log filter for the harness binary
    pub log_filter: String,
}

impl Default for BridgeSettings {
    fn default() -> Self {
        Self {
            service: "cordova-plugin-barcode-scanner".to_string(),
            action: "startScan".to_string(),
            log_filter: "warn".to_string(),
        }
    }
}

impl BridgeSettings {
    pub fn load() -> Result<Self> {
        Self::load_with_custom_config(None)
    }

    /// Embedded defaults, then the optional settings file, then `BARCODE_BRIDGE_*` variables
    pub fn load_with_custom_config(custom_config: Option<&Path>) -> Result<Self> {
        tracing::trace!("SETTINGS LOAD: Starting");

        let mut figment = Figment::new().merge(Toml::string(DEFAULT_SETTINGS));

        if let Some(path) = custom_config {
            if !path.exists() {
                anyhow::bail!("Settings file not found: {}", path.display());
            }
            tracing::trace!("SETTINGS LOAD: Merging {}", path.display());
            figment = match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => figment.merge(Json::file(path)),
                _ => figment.merge(Toml::file(path)),
            };
        }

        // Environment variables always have highest priority
        figment = figment.merge(Env::prefixed("BARCODE_BRIDGE_"));

        let settings: BridgeSettings = figment
            .extract()
            .context("Failed to load bridge settings")?;
        settings.validate()?;

        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.service.trim().is_empty() {
            anyhow::bail!("Bridge service name cannot be empty");
        }
        if self.action.trim().is_empty() {
            anyhow::bail!("Bridge action name cannot be empty");
        }
        Ok(())
    }
}
