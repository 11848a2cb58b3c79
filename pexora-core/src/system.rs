//! ModuleSystem - wires configuration and the lifecycle controller together

use std::path::{Path, PathBuf};

use pexora_module_api::ModuleHost;

use crate::config::{ConfigError, CoreConfig};
use crate::modules::{
    DisableReport, LifecycleConfig, LifecycleController, LifecycleError, LoadReport,
    MigrationPolicy, StatusTracker,
};

/// Entry point used by the surrounding application.
///
/// Built once at startup and passed by reference to whatever needs it.
pub struct ModuleSystem {
    base_dir: PathBuf,
    config_path: PathBuf,
    config: CoreConfig,
    controller: LifecycleController,
}

impl ModuleSystem {
    /// Read `<base>/config.toml` and prepare a controller for `<base>/modules`
    pub fn open(
        base_dir: impl Into<PathBuf>,
        host: Box<dyn ModuleHost>,
    ) -> Result<Self, ConfigError> {
        let base_dir = base_dir.into();
        let config_path = pexora_paths::config_file(&base_dir);
        let config = CoreConfig::load(&config_path)?;

        let mut lifecycle = LifecycleConfig::from_base_dir(&base_dir);
        lifecycle.debug = config.debug_mode;

        Ok(Self {
            controller: LifecycleController::new(lifecycle, host),
            base_dir,
            config_path,
            config,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn controller(&self) -> &LifecycleController {
        &self.controller
    }

    pub fn status(&self) -> &StatusTracker {
        self.controller.status()
    }

    /// First load pass at startup
    pub fn start(&mut self) -> Result<LoadReport, LifecycleError> {
        tracing::info!(base = %self.base_dir.display(), "Starting module system");
        let policy = self.config.migration_policy();
        self.controller.load_all(&policy)
    }

    /// Load pass for read-only callers.
    ///
    /// Migration is skipped so staged plugins are neither copied nor deleted.
    pub fn inspect(&mut self) -> Result<LoadReport, LifecycleError> {
        tracing::debug!(base = %self.base_dir.display(), "Loading modules without migration");
        let policy = MigrationPolicy {
            auto_copy_enabled: false,
            ..self.config.migration_policy()
        };
        self.controller.load_all(&policy)
    }

    /// Re-read the config and, if `module-auto-reload` is set, reload all modules.
    ///
    /// Returns `None` when module reloading is switched off. A config file
    /// that no longer parses leaves the previous settings in effect.
    pub fn reload(&mut self) -> Result<Option<LoadReport>, LifecycleError> {
        tracing::info!("Reloading configuration");
        match CoreConfig::load(&self.config_path) {
            Ok(config) => {
                self.controller.set_debug(config.debug_mode);
                self.config = config;
            }
            Err(e) => {
                tracing::error!(
                    path = %self.config_path.display(),
                    error = %e,
                    "Keeping previous configuration"
                );
            }
        }

        if !self.config.module_auto_reload {
            tracing::info!("Module auto-reload disabled, modules left as they are");
            return Ok(None);
        }

        let policy = self.config.migration_policy();
        self.controller.reload(&policy).map(Some)
    }

    /// Disable every module
    pub fn shutdown(&mut self) -> DisableReport {
        tracing::info!("Shutting down module system");
        self.controller.disable_all()
    }
}
