// SPDX-License-Identifier: GPL-3.0-or-later
use std::path::Path;

use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub pool_max_size: u32,
    /// Create the database and apply the bundled schema on apply runs. The
    /// catalogue table normally belongs to the catalogue site, so this is off.
    pub migrate: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://archivist.db".to_string(),
            pool_max_size: 4,
            migrate: false,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    pub log_level: String,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// Settings for duplicate resolution runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DedupConfig {
    /// Restrict grouping to a single category when set.
    pub category: Option<String>,
    /// Ask before deleting anything in apply mode.
    pub require_confirmation: bool,
}

impl Default for DedupConfig {
    fn default() -> Self {
        Self {
            category: None,
            require_confirmation: true,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    pub database: DatabaseConfig,
    pub telemetry: TelemetryConfig,
    pub dedup: DedupConfig,
}

/// Load configuration from defaults, optional TOML file, and environment overrides (prefix: ARCHIVIST_).
pub fn load(config_path: Option<&Path>) -> Result<AppConfig> {
    let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

    if let Some(path) = config_path {
        figment = figment.merge(Toml::file(path));
    }

    figment = figment.merge(Env::prefixed("ARCHIVIST_").split("__"));

    let config: AppConfig = figment.extract()?;
    info!(target: "config", "configuration loaded");
    Ok(config)
}
