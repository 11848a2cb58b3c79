//! pexora-module-api - Module API for the pexora extension core
//!
//! This crate provides the types shared between the pexora core and a host
//! framework integration. The core never parses or runs module archives
//! itself; it asks a [`ModuleHost`] to do so and only tracks the outcome.
//!
//! # Example
//!
//! ```ignore
//! use pexora_module_api::{ModuleDescriptor, ModuleError, ModuleHandle, ModuleHost};
//! use std::path::Path;
//!
//! struct MyHost;
//!
//! impl ModuleHost for MyHost {
//!     fn parse_descriptor(&mut self, path: &Path) -> Result<ModuleDescriptor, ModuleError> {
//!         read_my_format(path)
//!     }
//!
//!     fn activate(&mut self, descriptor: &ModuleDescriptor) -> Result<ModuleHandle, ModuleError> {
//!         Ok(ModuleHandle::new(1, &descriptor.name))
//!     }
//!
//!     fn deactivate(&mut self, _handle: ModuleHandle) -> Result<(), ModuleError> {
//!         Ok(())
//!     }
//! }
//! ```

pub mod error;
pub mod types;

use std::path::Path;

pub use error::ModuleError;
pub use types::*;

/// Identifier of the core application. Modules declare it as a dependency.
pub const CORE_IDENTIFIER: &str = "PexoraCore";

/// Reserved module name prefix.
pub const MODULE_PREFIX: &str = "Pexora";

/// File extension of module packages (without the dot).
pub const MODULE_EXTENSION: &str = "jar";

/// File name of the core's own archive, never migrated.
pub const CORE_ARCHIVE_NAME: &str = "PexoraCore.jar";

/// Capability interface of the host framework.
///
/// The host owns archive parsing and activation. Implementations are called
/// from a single control thread and need not be reentrant.
pub trait ModuleHost {
    /// Read the descriptor of a module package without activating it.
    fn parse_descriptor(&mut self, path: &Path) -> Result<ModuleDescriptor, ModuleError>;

    /// Activate a previously parsed module.
    fn activate(&mut self, descriptor: &ModuleDescriptor) -> Result<ModuleHandle, ModuleError>;

    /// Deactivate a module, consuming the handle returned by [`ModuleHost::activate`].
    fn deactivate(&mut self, handle: ModuleHandle) -> Result<(), ModuleError>;
}
