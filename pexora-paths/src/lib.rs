//! Directory layout for pexora.
//!
//! The core owns a base directory inside the host's shared extension
//! directory. Modules live in `<base>/modules/`; the shared extension
//! directory one level above the base doubles as the migration staging area.

use std::path::{Path, PathBuf};

/// Name of the core's own directory inside the extension directory.
pub const BASE_DIR_NAME: &str = "PexoraCore";

/// Name of the module directory inside the base directory.
pub const MODULES_DIR_NAME: &str = "modules";

/// Name of the configuration file inside the base directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Get the host's shared extension directory.
///
/// Returns `$PEXORA_EXTENSIONS_DIR` if set, otherwise
/// `$XDG_DATA_HOME/pexora/plugins`, falling back to `~/.local/share/pexora/plugins`.
pub fn extensions_dir() -> PathBuf {
    if let Ok(dir) = std::env::var("PEXORA_EXTENSIONS_DIR") {
        PathBuf::from(dir)
    } else if let Ok(xdg_data) = std::env::var("XDG_DATA_HOME") {
        PathBuf::from(xdg_data).join("pexora/plugins")
    } else if let Some(home) = dirs::home_dir() {
        home.join(".local/share/pexora/plugins")
    } else {
        PathBuf::from(".local/share/pexora/plugins")
    }
}

/// Get the core's base directory.
///
/// # Examples
///
/// ```
/// use pexora_paths::{base_dir, modules_dir};
///
/// let base = base_dir();
/// assert!(modules_dir(&base).ends_with("PexoraCore/modules"));
/// ```
pub fn base_dir() -> PathBuf {
    extensions_dir().join(BASE_DIR_NAME)
}

/// Module directory for a base directory.
pub fn modules_dir(base: &Path) -> PathBuf {
    base.join(MODULES_DIR_NAME)
}

/// Staging directory for a base directory.
///
/// A relative single-component base stages from the current directory.
/// A filesystem root has no parent and stages from itself.
pub fn staging_dir(base: &Path) -> PathBuf {
    match base.parent() {
        Some(parent) if parent.as_os_str().is_empty() => PathBuf::from("."),
        Some(parent) => parent.to_path_buf(),
        None => base.to_path_buf(),
    }
}

/// Configuration file for a base directory.
pub fn config_file(base: &Path) -> PathBuf {
    base.join(CONFIG_FILE_NAME)
}
