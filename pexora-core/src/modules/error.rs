//! Module system error types

use std::path::PathBuf;
use thiserror::Error;

use pexora_module_api::ModuleError;

/// Errors from scanning the module directory
#[derive(Error, Debug)]
pub enum ScanError {
    /// Module directory could not be created
    #[error("Failed to create module directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Errors that abort a whole lifecycle pass
#[derive(Error, Debug)]
pub enum LifecycleError {
    #[error(transparent)]
    Scan(#[from] ScanError),
}

/// Failure to migrate a single staged file
#[derive(Error, Debug)]
pub enum MigrationError {
    /// Descriptor could not be read
    #[error("Failed to inspect {path}: {source}")]
    Inspect {
        path: PathBuf,
        #[source]
        source: ModuleError,
    },

    /// Copy into the module directory failed
    #[error("Failed to copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Staged original could not be removed after copying
    #[error("Failed to delete staged file {path}: {source}")]
    Delete {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Host panicked while reading the descriptor
    #[error("Host panicked while inspecting {path}")]
    Panicked { path: PathBuf },
}

impl MigrationError {
    /// Staged file the failure refers to
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Inspect { path, .. }
            | Self::Delete { path, .. }
            | Self::Panicked { path } => path,
            Self::Copy { from, .. } => from,
        }
    }
}
