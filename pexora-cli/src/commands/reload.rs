//! `pexora reload` - re-read the config and run a fresh load pass

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, Table};
use pexora_core::{LoadReport, ModuleOutcome};

use super::{start_system, table};

pub fn run(base_dir: &Path) -> Result<()> {
    let mut system = start_system(base_dir)?;

    match system.reload().context("Failed to reload modules")? {
        Some(report) => {
            println!("Reloaded configuration and modules");
            print_migration(&report);
            if report.outcomes.is_empty() {
                println!("No modules found to load");
            } else {
                println!("{}", outcome_table(&report));
            }
            println!(
                "{} enabled, {} failed, {} rejected",
                report.enabled_count(),
                report.failed_count(),
                report.rejected_count()
            );
        }
        None => {
            println!("Reloaded configuration");
            println!("Modules were left as they are (module-auto-reload = false)");
        }
    }

    system.shutdown();
    Ok(())
}

fn print_migration(report: &LoadReport) {
    let Some(migration) = &report.migration else {
        return;
    };
    for path in &migration.copied {
        println!("Copied {}", path.display());
    }
    for failure in &migration.failures {
        println!(
            "Could not migrate {}: {}",
            failure.path().display(),
            failure
        );
    }
}

fn outcome_table(report: &LoadReport) -> Table {
    let mut table = table(&["Module", "Result", "Details"]);
    for outcome in &report.outcomes {
        let (result, details) = match outcome {
            ModuleOutcome::Enabled { warnings, .. } => (
                Cell::new("Enabled").fg(Color::Green),
                warnings
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            ModuleOutcome::Failed { reason, .. } => {
                (Cell::new("Failed").fg(Color::Red), reason.clone())
            }
            ModuleOutcome::Rejected { path, existing, .. } => (
                Cell::new("Rejected").fg(Color::Yellow),
                format!("{} duplicates {}", path.display(), existing.display()),
            ),
        };
        table.add_row(vec![Cell::new(outcome.name()), result, Cell::new(details)]);
    }
    table
}
