//! LifecycleController - scan, migrate, load, validate and activate modules

use std::collections::BTreeMap;
use std::fmt;
use std::panic::AssertUnwindSafe;
use std::path::{Path, PathBuf};

use pexora_module_api::{ModuleDescriptor, ModuleError, ModuleHandle, ModuleHost};

use super::error::LifecycleError;
use super::migrator::{MigrationPolicy, MigrationReport, Migrator};
use super::scanner;
use super::status::StatusTracker;
use super::validator::{DependencyValidator, ValidationWarning};

/// State of a module within one lifecycle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModuleState {
    /// Candidate file found by the scanner
    Discovered,
    /// Descriptor read and accepted, not yet active
    Loaded,
    /// Activated by the host
    Enabled,
    /// Deactivated during a disable or reload
    Disabled,
    /// Could not be parsed or activated
    Failed,
}

impl ModuleState {
    /// Whether moving from `self` to `next` is a legal transition
    pub fn can_transition_to(self, next: ModuleState) -> bool {
        matches!(
            (self, next),
            (Self::Discovered, Self::Loaded)
                | (Self::Discovered, Self::Failed)
                | (Self::Loaded, Self::Enabled)
                | (Self::Loaded, Self::Failed)
                | (Self::Enabled, Self::Disabled)
        )
    }
}

impl fmt::Display for ModuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Discovered => "discovered",
            Self::Loaded => "loaded",
            Self::Enabled => "enabled",
            Self::Disabled => "disabled",
            Self::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Bookkeeping for one module file within a pass
#[derive(Debug, Clone)]
pub struct ModuleRecord {
    /// Module name, or the file name when the descriptor could not be read
    pub name: String,
    pub source_path: PathBuf,
    /// Absent when parsing failed
    pub descriptor: Option<ModuleDescriptor>,
    pub state: ModuleState,
    pub failure_reason: Option<String>,
    pub warnings: Vec<ValidationWarning>,
}

impl ModuleRecord {
    fn discovered(name: String, source_path: PathBuf) -> Self {
        Self {
            name,
            source_path,
            descriptor: None,
            state: ModuleState::Discovered,
            failure_reason: None,
            warnings: Vec::new(),
        }
    }

    fn transition(&mut self, next: ModuleState) {
        debug_assert!(
            self.state.can_transition_to(next),
            "illegal module transition {} -> {}",
            self.state,
            next
        );
        self.state = next;
    }

    fn fail(&mut self, reason: String) {
        self.transition(ModuleState::Failed);
        self.failure_reason = Some(reason);
    }
}

/// Result of attempting to load one module file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleOutcome {
    /// Activated, possibly with advisory warnings
    Enabled {
        name: String,
        warnings: Vec<ValidationWarning>,
    },
    /// Parsing or activation failed
    Failed { name: String, reason: String },
    /// Another file already provided a module with this name
    Rejected {
        name: String,
        path: PathBuf,
        existing: PathBuf,
    },
}

impl ModuleOutcome {
    pub fn name(&self) -> &str {
        match self {
            Self::Enabled { name, .. }
            | Self::Failed { name, .. }
            | Self::Rejected { name, .. } => name,
        }
    }
}

/// Summary of a load pass
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Present when the migrator ran
    pub migration: Option<MigrationReport>,
    /// One entry per scanned file, in scan order
    pub outcomes: Vec<ModuleOutcome>,
}

impl LoadReport {
    pub fn enabled_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ModuleOutcome::Enabled { .. }))
            .count()
    }

    pub fn failed_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ModuleOutcome::Failed { .. }))
            .count()
    }

    pub fn rejected_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, ModuleOutcome::Rejected { .. }))
            .count()
    }
}

/// Summary of a disable pass
#[derive(Debug, Default, PartialEq, Eq)]
pub struct DisableReport {
    pub disabled: Vec<String>,
    /// Modules the host failed to deactivate: (name, reason)
    pub failures: Vec<(String, String)>,
}

/// What an operator should be told about a module
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModuleStatusKind {
    NeverLoaded,
    Enabled,
    Disabled,
    Failed { reason: String },
}

/// Configuration for LifecycleController
#[derive(Debug, Clone)]
pub struct LifecycleConfig {
    /// Directory scanned for module packages (`<base>/modules`)
    pub modules_dir: PathBuf,
    /// Directory the migrator reads from (`<base>/..`)
    pub staging_dir: PathBuf,
    /// Log every load attempt
    pub debug: bool,
}

impl LifecycleConfig {
    pub fn from_base_dir(base: &Path) -> Self {
        Self {
            modules_dir: pexora_paths::modules_dir(base),
            staging_dir: pexora_paths::staging_dir(base),
            debug: false,
        }
    }
}

impl Default for LifecycleConfig {
    fn default() -> Self {
        Self::from_base_dir(&pexora_paths::base_dir())
    }
}

/// Owns the module records and drives every lifecycle pass.
///
/// All calls happen on one control thread; the host is never invoked
/// concurrently.
pub struct LifecycleController {
    host: Box<dyn ModuleHost>,
    modules_dir: PathBuf,
    migrator: Migrator,
    validator: DependencyValidator,
    /// Records of the current pass by name
    records: BTreeMap<String, ModuleRecord>,
    /// Active registry
    active: BTreeMap<String, ModuleHandle>,
    status: StatusTracker,
    debug: bool,
}

impl LifecycleController {
    pub fn new(config: LifecycleConfig, host: Box<dyn ModuleHost>) -> Self {
        Self {
            host,
            migrator: Migrator::new(&config.staging_dir, &config.modules_dir),
            modules_dir: config.modules_dir,
            validator: DependencyValidator::default(),
            records: BTreeMap::new(),
            active: BTreeMap::new(),
            status: StatusTracker::new(),
            debug: config.debug,
        }
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    pub fn modules_dir(&self) -> &Path {
        &self.modules_dir
    }

    pub fn migrator(&self) -> &Migrator {
        &self.migrator
    }

    pub fn status(&self) -> &StatusTracker {
        &self.status
    }

    pub fn record(&self, name: &str) -> Option<&ModuleRecord> {
        self.records.get(name)
    }

    pub fn records(&self) -> impl Iterator<Item = &ModuleRecord> {
        self.records.values()
    }

    /// Names in the active registry
    pub fn active_modules(&self) -> impl Iterator<Item = &str> {
        self.active.keys().map(String::as_str)
    }

    pub fn is_active(&self, name: &str) -> bool {
        self.active.contains_key(name)
    }

    pub fn describe(&self, name: &str) -> ModuleStatusKind {
        match self.records.get(name) {
            Some(record) => match record.state {
                ModuleState::Enabled => ModuleStatusKind::Enabled,
                ModuleState::Failed => ModuleStatusKind::Failed {
                    reason: record
                        .failure_reason
                        .clone()
                        .unwrap_or_else(|| "unknown error".to_string()),
                },
                ModuleState::Disabled | ModuleState::Discovered | ModuleState::Loaded => {
                    ModuleStatusKind::Disabled
                }
            },
            None if self.status.status(name).is_some() => ModuleStatusKind::Disabled,
            None => ModuleStatusKind::NeverLoaded,
        }
    }

    /// Run one load pass: migrate (if enabled), scan, then load every file.
    ///
    /// Only failing to create the module directory aborts the pass.
    pub fn load_all(&mut self, policy: &MigrationPolicy) -> Result<LoadReport, LifecycleError> {
        tracing::info!(dir = %self.modules_dir.display(), "Loading modules");
        self.discard_inactive_records();

        scanner::ensure_dir(&self.modules_dir)?;

        let mut report = LoadReport::default();
        if policy.auto_copy_enabled {
            report.migration = Some(self.migrator.run(self.host.as_mut(), policy));
        }

        let files = scanner::scan(&self.modules_dir)?;
        if files.is_empty() {
            tracing::info!("No modules found to load");
            return Ok(report);
        }

        for file in &files {
            report.outcomes.push(self.load_one(file));
        }

        tracing::info!(
            loaded = self.active.len(),
            failed = report.failed_count(),
            rejected = report.rejected_count(),
            "Modules loaded"
        );
        Ok(report)
    }

    /// Load and activate a single module file.
    ///
    /// Never fails: problems are recorded as `Failed` or `Rejected` outcomes.
    pub fn load_one(&mut self, path: &Path) -> ModuleOutcome {
        if self.debug {
            tracing::debug!(file = %path.display(), "Attempting to load module");
        }

        let descriptor = match guarded("parsing", || self.host.parse_descriptor(path)) {
            Ok(descriptor) => descriptor,
            Err(reason) => return self.record_parse_failure(path, reason),
        };

        if let Some(existing) = self.records.get(&descriptor.name) {
            tracing::error!(
                module = %descriptor.name,
                file = %path.display(),
                existing = %existing.source_path.display(),
                "Duplicate module name, not loading"
            );
            return ModuleOutcome::Rejected {
                name: descriptor.name,
                path: path.to_path_buf(),
                existing: existing.source_path.clone(),
            };
        }

        let name = descriptor.name.clone();
        let mut record = ModuleRecord::discovered(name.clone(), path.to_path_buf());
        record.transition(ModuleState::Loaded);

        let warnings = self.validator.validate(&descriptor);
        for warning in &warnings {
            tracing::warn!(module = %name, "{}", warning);
        }
        record.warnings = warnings.clone();

        let outcome = match guarded("activation", || self.host.activate(&descriptor)) {
            Ok(handle) => {
                record.transition(ModuleState::Enabled);
                self.active.insert(name.clone(), handle);
                self.status.register(&name, true);
                tracing::info!(module = %name, version = %descriptor.version, "Enabled module");
                ModuleOutcome::Enabled {
                    name: name.clone(),
                    warnings,
                }
            }
            Err(reason) => {
                tracing::error!(module = %name, error = %reason, "Failed to enable module");
                record.fail(reason.clone());
                self.status.register(&name, false);
                ModuleOutcome::Failed {
                    name: name.clone(),
                    reason,
                }
            }
        };

        record.descriptor = Some(descriptor);
        self.records.insert(name, record);
        outcome
    }

    /// Deactivate every active module and clear the active registry.
    ///
    /// Deactivation failures are logged; the module is dropped from the
    /// registry regardless.
    pub fn disable_all(&mut self) -> DisableReport {
        tracing::info!(count = self.active.len(), "Disabling all modules");
        let mut report = DisableReport::default();

        for (name, handle) in std::mem::take(&mut self.active) {
            match guarded("deactivation", || self.host.deactivate(handle)) {
                Ok(()) => {
                    tracing::info!(module = %name, "Disabled module");
                    report.disabled.push(name.clone());
                }
                Err(reason) => {
                    tracing::error!(module = %name, error = %reason, "Error disabling module");
                    report.failures.push((name.clone(), reason));
                }
            }

            if let Some(record) = self.records.get_mut(&name) {
                record.transition(ModuleState::Disabled);
            }
            self.status.register(&name, false);
        }

        report
    }

    /// Disable everything, then run a fresh load pass.
    ///
    /// No module is active between the two steps.
    pub fn reload(&mut self, policy: &MigrationPolicy) -> Result<LoadReport, LifecycleError> {
        tracing::info!("Reloading all modules");
        self.disable_all();
        self.load_all(policy)
    }

    fn record_parse_failure(&mut self, path: &Path, reason: String) -> ModuleOutcome {
        let key = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        tracing::error!(file = %path.display(), error = %reason, "Failed to load module");

        if self.records.contains_key(&key) {
            // A module is literally named after this file; keep its record
            tracing::debug!(file = %key, "Not recording parse failure over existing record");
        } else {
            let mut record = ModuleRecord::discovered(key.clone(), path.to_path_buf());
            record.fail(reason.clone());
            self.records.insert(key.clone(), record);
            self.status.register(&key, false);
        }

        ModuleOutcome::Failed { name: key, reason }
    }

    /// Records from a previous pass are not carried over unless still active
    fn discard_inactive_records(&mut self) {
        let stale: Vec<String> = self
            .records
            .values()
            .filter(|r| r.state != ModuleState::Enabled)
            .map(|r| r.name.clone())
            .collect();

        for name in stale {
            self.records.remove(&name);
            self.status.unregister(&name);
        }
    }
}

impl Drop for LifecycleController {
    fn drop(&mut self) {
        // Give modules a chance to release host resources
        if !self.active.is_empty() {
            self.disable_all();
        }
    }
}

/// Call into the host, turning errors and panics into a failure reason
fn guarded<T>(operation: &str, f: impl FnOnce() -> Result<T, ModuleError>) -> Result<T, String> {
    match std::panic::catch_unwind(AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => Err(e.to_string()),
        Err(_) => Err(format!("host panicked during {operation}")),
    }
}
