//! Status tracker - name to enabled projection of the module records

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Status of a single module as seen by reporting
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleStatus {
    pub name: String,
    pub enabled: bool,
}

/// Serialisable status payload for admin commands and status queries
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub modules: BTreeMap<String, bool>,
    pub enabled: usize,
    pub total: usize,
}

/// In-memory map of module name to enabled flag.
///
/// Pure bookkeeping: knows nothing about files, descriptors or the host.
#[derive(Debug, Clone, Default)]
pub struct StatusTracker {
    modules: BTreeMap<String, bool>,
}

impl StatusTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or update a module's flag
    pub fn register(&mut self, name: &str, enabled: bool) {
        self.modules.insert(name.to_string(), enabled);
    }

    /// Remove a module
    pub fn unregister(&mut self, name: &str) {
        self.modules.remove(name);
    }

    /// Unknown modules are not enabled
    pub fn is_enabled(&self, name: &str) -> bool {
        self.modules.get(name).copied().unwrap_or(false)
    }

    pub fn status(&self, name: &str) -> Option<ModuleStatus> {
        self.modules.get(name).map(|&enabled| ModuleStatus {
            name: name.to_string(),
            enabled,
        })
    }

    /// Independent copy of the full map
    pub fn snapshot(&self) -> BTreeMap<String, bool> {
        self.modules.clone()
    }

    pub fn enabled_count(&self) -> usize {
        self.modules.values().filter(|&&enabled| enabled).count()
    }

    pub fn total_count(&self) -> usize {
        self.modules.len()
    }

    pub fn report(&self) -> StatusReport {
        StatusReport {
            modules: self.snapshot(),
            enabled: self.enabled_count(),
            total: self.total_count(),
        }
    }
}
