//! Module directory scanning

use std::path::{Path, PathBuf};

use pexora_module_api::MODULE_EXTENSION;

use super::error::ScanError;

/// Enumerate module packages in `dir`, creating the directory if missing.
///
/// Results are sorted by file name so activation order is reproducible.
/// Failing to create the directory is the only error; an unreadable
/// directory yields an empty list.
pub fn scan(dir: &Path) -> Result<Vec<PathBuf>, ScanError> {
    ensure_dir(dir)?;
    Ok(list_packages(dir))
}

/// Create the module directory if it does not exist yet.
pub fn ensure_dir(dir: &Path) -> Result<(), ScanError> {
    if dir.is_dir() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|source| ScanError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })?;
    tracing::debug!(dir = %dir.display(), "Created module directory");
    Ok(())
}

/// Enumerate module packages in `dir` without creating it.
pub(crate) fn list_packages(dir: &Path) -> Vec<PathBuf> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::debug!(dir = %dir.display(), error = %e, "Cannot read directory");
            return Vec::new();
        }
    };

    let mut found: Vec<PathBuf> = entries
        .filter_map(|entry| match entry {
            Ok(entry) => Some(entry.path()),
            Err(e) => {
                tracing::warn!(dir = %dir.display(), error = %e, "Skipping unreadable entry");
                None
            }
        })
        .filter(|path| path.is_file() && is_module_package(path))
        .collect();

    found.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    found
}

/// Whether `path` carries the module package extension
pub fn is_module_package(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext == MODULE_EXTENSION)
}
