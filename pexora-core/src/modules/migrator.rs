//! Plugin migrator - promotes eligible staged archives into the module directory

use std::collections::BTreeSet;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use pexora_module_api::{CORE_ARCHIVE_NAME, ModuleDescriptor, ModuleHost};

use super::error::MigrationError;
use super::scanner;
use super::validator::DependencyValidator;

/// Migration settings, snapshotted once per lifecycle pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MigrationPolicy {
    /// Run the migrator at the start of each pass
    pub auto_copy_enabled: bool,
    /// Delete the staged original after a successful copy
    pub delete_source_after_copy: bool,
    /// Treat every staged module as eligible
    pub ignore_naming_convention: bool,
    /// Enable the allow-list path
    pub allow_non_conventional_modules: bool,
    /// Names exempt from the naming convention
    pub allow_list: BTreeSet<String>,
}

/// Why a staged file was left alone
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// No eligibility rule matched
    NotEligible,
    /// A file of the same name is already in the module directory
    AlreadyPresent,
}

/// A staged file that was not copied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: PathBuf,
    pub module: String,
    pub reason: SkipReason,
}

/// Outcome of one migrator run
#[derive(Debug, Default)]
pub struct MigrationReport {
    /// Targets written into the module directory
    pub copied: Vec<PathBuf>,
    pub skipped: Vec<SkippedFile>,
    /// Staged originals removed after copying
    pub deleted: Vec<PathBuf>,
    pub failures: Vec<MigrationError>,
}

impl MigrationReport {
    pub fn is_empty(&self) -> bool {
        self.copied.is_empty()
            && self.skipped.is_empty()
            && self.deleted.is_empty()
            && self.failures.is_empty()
    }
}

/// Copies eligible archives from the staging directory into the module directory
#[derive(Debug, Clone)]
pub struct Migrator {
    staging_dir: PathBuf,
    modules_dir: PathBuf,
    validator: DependencyValidator,
}

impl Migrator {
    pub fn new(staging_dir: impl Into<PathBuf>, modules_dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: staging_dir.into(),
            modules_dir: modules_dir.into(),
            validator: DependencyValidator::default(),
        }
    }

    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    /// Whether a staged module qualifies for migration under `policy`
    pub fn is_eligible(&self, descriptor: &ModuleDescriptor, policy: &MigrationPolicy) -> bool {
        self.validator.follows_convention(&descriptor.name)
            || policy.ignore_naming_convention
            || (policy.allow_non_conventional_modules
                && policy.allow_list.contains(&descriptor.name))
            || descriptor.declares_dependency_on(self.validator.core_identifier())
    }

    /// Process every staged package once.
    ///
    /// Failures are isolated per file and collected in the report. The
    /// module directory must already exist. Callers decide whether to run
    /// this at all from [`MigrationPolicy::auto_copy_enabled`].
    pub fn run(&self, host: &mut dyn ModuleHost, policy: &MigrationPolicy) -> MigrationReport {
        let mut report = MigrationReport::default();

        let staged: Vec<PathBuf> = scanner::list_packages(&self.staging_dir)
            .into_iter()
            .filter(|path| {
                path.file_name()
                    .is_none_or(|name| name != CORE_ARCHIVE_NAME)
            })
            .collect();

        if staged.is_empty() {
            tracing::debug!(dir = %self.staging_dir.display(), "No staged plugins to migrate");
            return report;
        }

        tracing::info!(
            dir = %self.staging_dir.display(),
            count = staged.len(),
            "Checking staged plugins for modules"
        );

        for path in staged {
            if let Err(e) = self.migrate_one(host, policy, &path, &mut report) {
                match e {
                    MigrationError::Delete { .. } => {
                        tracing::warn!(file = %path.display(), error = %e, "Could not delete staged plugin");
                    }
                    _ => {
                        tracing::error!(file = %path.display(), error = %e, "Migration failed");
                    }
                }
                report.failures.push(e);
            }
        }

        report
    }

    fn migrate_one(
        &self,
        host: &mut dyn ModuleHost,
        policy: &MigrationPolicy,
        path: &Path,
        report: &mut MigrationReport,
    ) -> Result<(), MigrationError> {
        let descriptor = std::panic::catch_unwind(AssertUnwindSafe(|| host.parse_descriptor(path)))
            .map_err(|_| MigrationError::Panicked {
                path: path.to_path_buf(),
            })?
            .map_err(|source| MigrationError::Inspect {
                path: path.to_path_buf(),
                source,
            })?;

        if !self.is_eligible(&descriptor, policy) {
            tracing::debug!(module = %descriptor.name, "Staged plugin is not a module, leaving it");
            report.skipped.push(SkippedFile {
                path: path.to_path_buf(),
                module: descriptor.name,
                reason: SkipReason::NotEligible,
            });
            return Ok(());
        }

        // list_packages only yields paths with a file name
        let Some(file_name) = path.file_name() else {
            return Ok(());
        };
        let target = self.modules_dir.join(file_name);

        if target.exists() {
            tracing::debug!(module = %descriptor.name, "Module already present in module directory");
            report.skipped.push(SkippedFile {
                path: path.to_path_buf(),
                module: descriptor.name,
                reason: SkipReason::AlreadyPresent,
            });
            return Ok(());
        }

        if let Err(source) = std::fs::copy(path, &target) {
            // Drop a partially written target so the next pass retries
            if let Err(e) = remove_partial_copy(&target) {
                tracing::warn!(file = %target.display(), error = %e, "Could not remove partial module copy");
            }
            return Err(MigrationError::Copy {
                from: path.to_path_buf(),
                to: target,
                source,
            });
        }
        tracing::info!(module = %descriptor.name, target = %target.display(), "Copied plugin as module");
        report.copied.push(target);

        if policy.delete_source_after_copy {
            std::fs::remove_file(path).map_err(|source| MigrationError::Delete {
                path: path.to_path_buf(),
                source,
            })?;
            tracing::info!(module = %descriptor.name, "Deleted staged plugin");
            report.deleted.push(path.to_path_buf());
        }

        Ok(())
    }
}

/// Remove a partial copy. A target that was never created is not an error.
fn remove_partial_copy(target: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(target) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}
