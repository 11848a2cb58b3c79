//! pexora-core: Module lifecycle core for the pexora extension system
//!
//! This crate discovers modules packaged as archives, validates their
//! declared dependencies, activates them through a host framework and
//! tracks their state:
//!
//! - **Lifecycle** - [`LifecycleController`] runs load, disable and reload passes
//! - **Migration** - [`Migrator`] copies eligible staged archives into the module directory
//! - **Validation** - [`DependencyValidator`] produces advisory warnings
//! - **Status** - [`StatusTracker`] is the name to enabled view used for reporting
//! - **Configuration** - [`CoreConfig`] read from `<base>/config.toml`
//!
//! # Quick Start
//!
//! ```no_run
//! use pexora_core::{ArchiveHost, ModuleSystem};
//!
//! fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let base = pexora_paths::base_dir();
//!     let mut system = ModuleSystem::open(base, Box::new(ArchiveHost::new()))?;
//!
//!     let report = system.start()?;
//!     println!(
//!         "{} enabled, {} failed",
//!         report.enabled_count(),
//!         report.failed_count()
//!     );
//!
//!     system.shutdown();
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod modules;
pub mod system;

// Re-export key types for convenience
pub use config::{ConfigError, CoreConfig, ModulesConfig};
pub use modules::{
    ArchiveHost, DependencyValidator, DisableReport, LifecycleConfig, LifecycleController,
    LifecycleError, LoadReport, MigrationError, MigrationPolicy, MigrationReport, Migrator,
    ModuleOutcome, ModuleRecord, ModuleState, ModuleStatus, ModuleStatusKind, ScanError,
    StatusReport, StatusTracker, ValidationWarning,
};
pub use system::ModuleSystem;
