//! Catalog configuration.
//!
//! Loaded from JSON; every field has a default so an absent file or a partial
//! file both work. Validation runs once at startup.
use crate::controller::{ControllerSettings, ExpansionMode};
use crate::grid::DEFAULT_PAGE_LENGTHS;
use crate::render::{ComrakMarkdown, InstallCommand};
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const CONFIG_SCHEMA_VERSION: u32 = 1;
const CONFIG_DIR_NAME: &str = "pkgcat";
const CONFIG_FILE_NAME: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    pub schema_version: u32,
    pub install_prefix: String,
    pub satyrographos_install: bool,
    pub feed: String,
    pub feed_timeout_secs: u64,
    pub expansion: ExpansionMode,
    pub page_title: String,
    pub page_lengths: Vec<i64>,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        CatalogConfig {
            schema_version: CONFIG_SCHEMA_VERSION,
            install_prefix: "satysfi-".to_string(),
            satyrographos_install: true,
            feed: "./data.json".to_string(),
            feed_timeout_secs: 10,
            expansion: ExpansionMode::Single,
            page_title: "SATySFi Package Catalog".to_string(),
            page_lengths: DEFAULT_PAGE_LENGTHS.to_vec(),
        }
    }
}

impl CatalogConfig {
    pub fn install_command(&self) -> InstallCommand {
        InstallCommand {
            prefix: self.install_prefix.clone(),
            satyrographos_install: self.satyrographos_install,
        }
    }

    pub fn feed_timeout(&self) -> Duration {
        Duration::from_secs(self.feed_timeout_secs)
    }

    pub fn controller_settings(&self) -> ControllerSettings {
        ControllerSettings {
            install: self.install_command(),
            expansion: self.expansion,
            markdown: Box::new(ComrakMarkdown),
            now: None,
        }
    }
}

/// Render a pretty JSON config stub with every default spelled out.
pub fn config_stub() -> Result<String> {
    serde_json::to_string_pretty(&CatalogConfig::default()).context("serialize config stub")
}

/// Per-user config location, when the platform has one.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
}

/// Resolve config: explicit path (must exist), else the per-user file if
/// present, else defaults.
pub fn resolve_config(explicit: Option<&Path>) -> Result<CatalogConfig> {
    let config = match explicit {
        Some(path) => load_config(path)?,
        None => match default_config_path().filter(|path| path.is_file()) {
            Some(path) => load_config(&path)?,
            None => CatalogConfig::default(),
        },
    };
    validate_config(&config)?;
    Ok(config)
}

pub fn load_config(path: &Path) -> Result<CatalogConfig> {
    let bytes = fs::read(path).with_context(|| format!("read config {}", path.display()))?;
    let config: CatalogConfig = serde_json::from_slice(&bytes)
        .with_context(|| format!("parse config JSON {}", path.display()))?;
    tracing::debug!(path = %path.display(), "config loaded");
    Ok(config)
}

pub fn validate_config(config: &CatalogConfig) -> Result<()> {
    if config.schema_version != CONFIG_SCHEMA_VERSION {
        return Err(anyhow!(
            "unsupported config schema_version {}",
            config.schema_version
        ));
    }
    if config.feed_timeout_secs == 0 {
        return Err(anyhow!("feed_timeout_secs must be greater than zero"));
    }
    if config.feed.trim().is_empty() {
        return Err(anyhow!("feed must be non-empty"));
    }
    if config.page_lengths.is_empty() {
        return Err(anyhow!("page_lengths must list at least one entry"));
    }
    if let Some(bad) = config
        .page_lengths
        .iter()
        .find(|len| **len == 0 || **len < -1)
    {
        return Err(anyhow!(
            "page_lengths entries must be positive or -1 for \"All\" (got {bad})"
        ));
    }
    if let Some(bad) = config
        .install_prefix
        .chars()
        .find(|ch| ch.is_whitespace() || ";&|<>$`\\\"'(){}*?!#".contains(*ch))
    {
        return Err(anyhow!(
            "install_prefix must not contain whitespace or shell metacharacters (got {bad:?})"
        ));
    }
    Ok(())
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
