//! ArchiveHost - reference host integration for zip module packages
//!
//! A module package is a zip archive (`.jar`) carrying a `module.toml`
//! descriptor at its root:
//!
//! ```toml
//! name = "PexoraChat"
//! version = "1.2.0"
//! main = "de.pexora.chat.ChatModule"
//! depend = ["PexoraCore"]
//! softdepend = ["PlaceholderAPI"]
//! ```
//!
//! The host never runs module code. Activation only resolves hard
//! dependencies against the core and the currently active modules.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use pexora_module_api::{CORE_IDENTIFIER, ModuleDescriptor, ModuleError, ModuleHandle, ModuleHost};

/// Path of the descriptor entry inside a module package
pub const DESCRIPTOR_ENTRY: &str = "module.toml";

#[derive(Debug, Deserialize)]
struct ModuleManifest {
    name: String,
    version: String,
    #[serde(default)]
    main: Option<String>,
    #[serde(default)]
    depend: Vec<String>,
    #[serde(default)]
    softdepend: Vec<String>,
}

/// Host backed by zip archives on disk
#[derive(Debug)]
pub struct ArchiveHost {
    core_identifier: String,
    /// Active module name to handle id
    active: BTreeMap<String, u64>,
    next_id: u64,
}

impl Default for ArchiveHost {
    fn default() -> Self {
        Self::new()
    }
}

impl ArchiveHost {
    pub fn new() -> Self {
        Self {
            core_identifier: CORE_IDENTIFIER.to_string(),
            active: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Names of modules the host currently considers active
    pub fn active_modules(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }

    fn read_manifest(path: &Path) -> Result<ModuleManifest, ModuleError> {
        let file = std::fs::File::open(path)?;
        let mut archive = zip::ZipArchive::new(file)
            .map_err(|e| ModuleError::InvalidArchive(format!("{}: {e}", path.display())))?;

        let mut entry = match archive.by_name(DESCRIPTOR_ENTRY) {
            Ok(entry) => entry,
            Err(zip::result::ZipError::FileNotFound) => {
                return Err(ModuleError::invalid_descriptor(format!(
                    "{} has no {DESCRIPTOR_ENTRY}",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(ModuleError::InvalidArchive(format!(
                    "{}: {e}",
                    path.display()
                )));
            }
        };

        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;

        toml::from_str(&contents)
            .map_err(|e| ModuleError::invalid_descriptor(format!("{}: {e}", path.display())))
    }
}

impl ModuleHost for ArchiveHost {
    fn parse_descriptor(&mut self, path: &Path) -> Result<ModuleDescriptor, ModuleError> {
        let manifest = Self::read_manifest(path)?;

        if manifest.name.trim().is_empty() {
            return Err(ModuleError::invalid_descriptor(format!(
                "{}: empty module name",
                path.display()
            )));
        }

        if manifest
            .main
            .as_deref()
            .is_none_or(|main| main.trim().is_empty())
        {
            return Err(ModuleError::NotAModule(format!(
                "{} declares no entry point",
                manifest.name
            )));
        }

        Ok(ModuleDescriptor {
            name: manifest.name,
            version: manifest.version,
            depend: manifest.depend.into_iter().collect(),
            soft_depend: manifest.softdepend.into_iter().collect(),
            source_path: path.to_path_buf(),
        })
    }

    fn activate(&mut self, descriptor: &ModuleDescriptor) -> Result<ModuleHandle, ModuleError> {
        if self.active.contains_key(&descriptor.name) {
            return Err(ModuleError::activation(format!(
                "{} is already active",
                descriptor.name
            )));
        }

        if let Some(missing) = descriptor
            .depend
            .iter()
            .find(|dep| **dep != self.core_identifier && !self.active.contains_key(*dep))
        {
            return Err(ModuleError::MissingDependency {
                module: descriptor.name.clone(),
                dependency: missing.clone(),
            });
        }

        let id = self.next_id;
        self.next_id += 1;
        self.active.insert(descriptor.name.clone(), id);
        Ok(ModuleHandle::new(id, &descriptor.name))
    }

    fn deactivate(&mut self, handle: ModuleHandle) -> Result<(), ModuleError> {
        match self.active.get(&handle.name) {
            Some(&id) if id == handle.id => {
                self.active.remove(&handle.name);
                Ok(())
            }
            _ => Err(ModuleError::UnknownHandle {
                id: handle.id,
                name: handle.name,
            }),
        }
    }
}
