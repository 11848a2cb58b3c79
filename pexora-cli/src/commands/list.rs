//! `pexora list` - every module record with its state

use std::path::Path;

use anyhow::Result;
use comfy_table::{Cell, Color, Table};
use pexora_core::{ModuleRecord, ModuleState};

use super::{inspect_system, table};

pub fn run(base_dir: &Path) -> Result<()> {
    let mut system = inspect_system(base_dir)?;
    let records: Vec<&ModuleRecord> = system.controller().records().collect();

    if records.is_empty() {
        println!("No modules installed");
        println!();
        println!(
            "Module directory: {}",
            system.controller().modules_dir().display()
        );
        println!();
        println!("To install a module, copy its .jar into the module directory,");
        println!(
            "or enable auto-copy-to-modules in {}",
            pexora_paths::config_file(system.base_dir()).display()
        );
    } else {
        println!("{}", record_table(&records));
    }

    system.shutdown();
    Ok(())
}

fn state_cell(state: ModuleState) -> Cell {
    let color = match state {
        ModuleState::Enabled => Color::Green,
        ModuleState::Failed => Color::Red,
        ModuleState::Discovered | ModuleState::Loaded | ModuleState::Disabled => Color::Yellow,
    };
    Cell::new(state).fg(color)
}

fn record_table(records: &[&ModuleRecord]) -> Table {
    let mut table = table(&["Module", "Version", "State", "File", "Details"]);
    for record in records {
        let version = record
            .descriptor
            .as_ref()
            .map(|d| d.version.clone())
            .unwrap_or_else(|| "-".to_string());
        let file = record
            .source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let details = match &record.failure_reason {
            Some(reason) => reason.clone(),
            None => record
                .warnings
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join("\n"),
        };

        table.add_row(vec![
            Cell::new(&record.name),
            Cell::new(version),
            state_cell(record.state),
            Cell::new(file),
            Cell::new(details),
        ]);
    }
    table
}
