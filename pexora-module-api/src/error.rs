//! Error types for host integrations

use thiserror::Error;

/// Errors a host framework can report for a single module
#[derive(Error, Debug)]
pub enum ModuleError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The package could not be opened as an archive
    #[error("Invalid archive: {0}")]
    InvalidArchive(String),

    /// The package has no usable descriptor
    #[error("Invalid descriptor: {0}")]
    InvalidDescriptor(String),

    /// The package is an archive but not a module
    #[error("Not a module: {0}")]
    NotAModule(String),

    /// A hard dependency is not available
    #[error("Module '{module}' requires '{dependency}', which is not active")]
    MissingDependency { module: String, dependency: String },

    /// Activation failed inside the host
    #[error("Activation failed: {0}")]
    Activation(String),

    /// Deactivation failed inside the host
    #[error("Deactivation failed: {0}")]
    Deactivation(String),

    /// The handle was not issued by this host or is already released
    #[error("Unknown module handle {id} ({name})")]
    UnknownHandle { id: u64, name: String },

    /// Custom error with message
    #[error("{0}")]
    Custom(String),
}

impl ModuleError {
    /// Create a custom error with a message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(message.into())
    }

    /// Create an activation error
    pub fn activation(message: impl Into<String>) -> Self {
        Self::Activation(message.into())
    }

    /// Create a deactivation error
    pub fn deactivation(message: impl Into<String>) -> Self {
        Self::Deactivation(message.into())
    }

    /// Create a descriptor error
    pub fn invalid_descriptor(message: impl Into<String>) -> Self {
        Self::InvalidDescriptor(message.into())
    }
}
