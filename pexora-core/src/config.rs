//! Core configuration (`<base>/config.toml`)

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::modules::MigrationPolicy;

/// Errors reading the configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Settings consumed by the core
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct CoreConfig {
    /// Verbose logging of every load attempt
    pub debug_mode: bool,
    /// Whether an external reload trigger also reloads modules
    pub module_auto_reload: bool,
    pub modules: ModulesConfig,
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            debug_mode: false,
            module_auto_reload: true,
            modules: ModulesConfig::default(),
        }
    }
}

/// `[modules]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct ModulesConfig {
    pub allow_non_pexora_modules: bool,
    pub ignore_naming_convention: bool,
    pub auto_copy_to_modules: bool,
    pub delete_old_plugins: bool,
    pub additional_modules: Vec<String>,
}

impl Default for ModulesConfig {
    fn default() -> Self {
        Self {
            allow_non_pexora_modules: true,
            ignore_naming_convention: false,
            auto_copy_to_modules: false,
            delete_old_plugins: false,
            additional_modules: Vec::new(),
        }
    }
}

impl CoreConfig {
    /// Load from a TOML file
    ///
    /// Returns the defaults if the file doesn't exist.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        if config.debug_mode {
            tracing::debug!(?config, "Loaded core config");
        }
        Ok(config)
    }

    /// Immutable migration settings for one lifecycle pass
    pub fn migration_policy(&self) -> MigrationPolicy {
        MigrationPolicy {
            auto_copy_enabled: self.modules.auto_copy_to_modules,
            delete_source_after_copy: self.modules.delete_old_plugins,
            ignore_naming_convention: self.modules.ignore_naming_convention,
            allow_non_conventional_modules: self.modules.allow_non_pexora_modules,
            allow_list: self.modules.additional_modules.iter().cloned().collect(),
        }
    }
}
