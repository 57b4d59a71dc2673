//! Configuration management for the Carbon Tracker engine
//!
//! Configuration is loaded hierarchically:
//! 1. Default values (in code)
//! 2. TOML config files (config/development.toml or config/production.toml)
//! 3. Environment variables (prefix: CT__)

use serde::{Deserialize, Serialize};
use std::env;

use crate::error::EngineResult;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct EngineConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub factors: FactorsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Badge catalog source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    /// JSON or TOML catalog file; the builtin catalog when unset
    pub path: Option<String>,
}

/// Emission factor source and layers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorsConfig {
    /// JSON or TOML factor table replacing the builtin one
    pub overrides_path: Option<String>,
    pub state_adjustments: bool,
    pub city_adjustments: bool,
}

impl Default for FactorsConfig {
    fn default() -> Self {
        Self {
            overrides_path: None,
            state_adjustments: true,
            city_adjustments: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Force JSON (true) or pretty (false) output; follows RUST_ENV when unset
    pub json: Option<bool>,
}

impl EngineConfig {
    /// Load configuration from files and environment
    ///
    /// Loading order (later sources override earlier):
    /// 1. Default values
    /// 2. Config file based on RUST_ENV (development.toml or production.toml)
    /// 3. Environment variables with CT__ prefix
    pub fn load() -> EngineResult<Self> {
        let env = env::var("RUST_ENV").unwrap_or_else(|_| "development".to_string());
        Self::load_from(&format!("config/{}", env))
    }

    /// Load with an explicit config file stem (extension optional)
    pub fn load_from(config_file: &str) -> EngineResult<Self> {
        let config = config::Config::builder()
            // Start with defaults
            .add_source(config::Config::try_from(&EngineConfig::default())?)
            .add_source(config::File::with_name(config_file).required(false))
            // e.g., CT__CATALOG__PATH=badges.toml sets catalog.path
            .add_source(
                config::Environment::with_prefix("CT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        Ok(config.try_deserialize()?)
    }

    /// Check if running in production mode
    pub fn is_production() -> bool {
        env::var("RUST_ENV")
            .map(|v| v == "production")
            .unwrap_or(false)
    }

    /// Whether logs should be JSON formatted
    pub fn json_logs(&self) -> bool {
        self.logging.json.unwrap_or_else(Self::is_production)
    }
}
