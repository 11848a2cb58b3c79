//! Module descriptor and handle types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// Metadata read from a module package. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModuleDescriptor {
    /// Module name, the unique key in the active registry
    pub name: String,
    /// Module version as declared by the package
    pub version: String,
    /// Hard dependencies
    #[serde(default)]
    pub depend: BTreeSet<String>,
    /// Soft dependencies
    #[serde(default)]
    pub soft_depend: BTreeSet<String>,
    /// Package file the descriptor was read from
    pub source_path: PathBuf,
}

impl ModuleDescriptor {
    /// Create a descriptor with no dependencies
    pub fn new(
        name: impl Into<String>,
        version: impl Into<String>,
        source_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
            depend: BTreeSet::new(),
            soft_depend: BTreeSet::new(),
            source_path: source_path.into(),
        }
    }

    /// Add a hard dependency
    pub fn with_depend(mut self, id: impl Into<String>) -> Self {
        self.depend.insert(id.into());
        self
    }

    /// Add a soft dependency
    pub fn with_soft_depend(mut self, id: impl Into<String>) -> Self {
        self.soft_depend.insert(id.into());
        self
    }

    /// Whether `id` appears in either dependency list
    pub fn declares_dependency_on(&self, id: &str) -> bool {
        self.depend.contains(id) || self.soft_depend.contains(id)
    }

    /// Union of hard and soft dependencies
    pub fn all_dependencies(&self) -> impl Iterator<Item = &str> {
        self.depend.union(&self.soft_depend).map(String::as_str)
    }
}

/// Opaque token for an activated module, issued by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModuleHandle {
    pub id: u64,
    pub name: String,
}

impl ModuleHandle {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declares_dependency_checks_both_lists() {
        let hard = ModuleDescriptor::new("A", "1.0", "a.jar").with_depend("PexoraCore");
        let soft = ModuleDescriptor::new("B", "1.0", "b.jar").with_soft_depend("PexoraCore");
        let none = ModuleDescriptor::new("C", "1.0", "c.jar").with_depend("Other");

        assert!(hard.declares_dependency_on("PexoraCore"));
        assert!(soft.declares_dependency_on("PexoraCore"));
        assert!(!none.declares_dependency_on("PexoraCore"));
    }

    #[test]
    fn test_all_dependencies_is_deduplicated_union() {
        let descriptor = ModuleDescriptor::new("A", "1.0", "a.jar")
            .with_depend("X")
            .with_depend("Y")
            .with_soft_depend("Y")
            .with_soft_depend("Z");

        let deps: Vec<&str> = descriptor.all_dependencies().collect();
        assert_eq!(deps, vec!["X", "Y", "Z"]);
    }

    #[test]
    fn test_descriptor_deserializes_without_dependency_lists() {
        let descriptor: ModuleDescriptor =
            toml::from_str("name = \"PexoraChat\"\nversion = \"2.0\"\nsource_path = \"m.jar\"\n")
                .unwrap();
        assert!(descriptor.depend.is_empty());
        assert!(descriptor.soft_depend.is_empty());
    }

    #[test]
    fn test_descriptor_json_shape() {
        let descriptor =
            ModuleDescriptor::new("PexoraChat", "2.0", "m.jar").with_depend("PexoraCore");
        let json = serde_json::to_value(&descriptor).unwrap();
        assert_eq!(json["name"], "PexoraChat");
        assert_eq!(json["depend"][0], "PexoraCore");
    }

    #[test]
    fn test_handle_new() {
        let handle = ModuleHandle::new(7, "PexoraChat");
        assert_eq!(handle.id, 7);
        assert_eq!(handle.name, "PexoraChat");
    }
}
