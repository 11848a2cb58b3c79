//! Module system for pexora
//!
//! This module provides the discover-validate-activate loop for modules:
//!
//! - [`LifecycleController`]: Drives load, disable and reload passes
//! - [`Migrator`]: Promotes eligible staged archives into the module directory
//! - [`DependencyValidator`]: Advisory core-dependency and naming checks
//! - [`StatusTracker`]: Name to enabled projection for reporting
//! - [`ArchiveHost`]: Reference [`ModuleHost`](pexora_module_api::ModuleHost) for zip packages
//!
//! # Directory Layout
//!
//! Modules are discovered in `<base>/modules/*.jar`. When auto-copy is
//! enabled, the directory above `<base>` is checked first for archives that
//! qualify as modules, and those are copied in before the scan.
//!
//! # Example
//!
//! ```ignore
//! use pexora_core::modules::{ArchiveHost, LifecycleConfig, LifecycleController, MigrationPolicy};
//!
//! let config = LifecycleConfig::from_base_dir(&base);
//! let mut controller = LifecycleController::new(config, Box::new(ArchiveHost::new()));
//!
//! let report = controller.load_all(&MigrationPolicy::default())?;
//! println!("{} modules enabled", report.enabled_count());
//!
//! controller.reload(&MigrationPolicy::default())?;
//! ```

mod archive;
mod error;
mod lifecycle;
mod migrator;
mod scanner;
mod status;
mod validator;

pub use archive::{ArchiveHost, DESCRIPTOR_ENTRY};
pub use error::{LifecycleError, MigrationError, ScanError};
pub use lifecycle::{
    DisableReport, LifecycleConfig, LifecycleController, LoadReport, ModuleOutcome, ModuleRecord,
    ModuleState, ModuleStatusKind,
};
pub use migrator::{MigrationPolicy, MigrationReport, Migrator, SkipReason, SkippedFile};
pub use scanner::{ensure_dir, is_module_package, scan};
pub use status::{ModuleStatus, StatusReport, StatusTracker};
pub use validator::{DependencyValidator, ValidationWarning};
