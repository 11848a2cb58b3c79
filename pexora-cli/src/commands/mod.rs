//! Admin subcommands
//!
//! Every command runs in its own process: it opens the module system for
//! the base directory, performs one load pass, reports, and disables the
//! modules again before exiting. Only `reload` migrates staged plugins.

pub mod list;
pub mod reload;
pub mod status;

use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Color, ContentArrangement, Table, presets::UTF8_FULL_CONDENSED};
use pexora_core::{ArchiveHost, ModuleSystem};

fn open_system(base_dir: &Path) -> Result<ModuleSystem> {
    tracing::debug!(base = %base_dir.display(), "Opening module system");
    ModuleSystem::open(base_dir, Box::new(ArchiveHost::new()))
        .with_context(|| format!("Failed to open module system at {}", base_dir.display()))
}

/// Open the module system and run the startup pass
pub(crate) fn start_system(base_dir: &Path) -> Result<ModuleSystem> {
    let mut system = open_system(base_dir)?;
    system.start().context("Failed to load modules")?;
    Ok(system)
}

/// Open the module system and load modules without touching the staging directory
pub(crate) fn inspect_system(base_dir: &Path) -> Result<ModuleSystem> {
    let mut system = open_system(base_dir)?;
    system.inspect().context("Failed to load modules")?;
    Ok(system)
}

/// Table with the shared look of every command
pub(crate) fn table(headers: &[&str]) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(
        headers
            .iter()
            .map(|h| Cell::new(h).fg(Color::Cyan))
            .collect::<Vec<_>>(),
    );
    table
}

pub(crate) fn enabled_cell(enabled: bool) -> Cell {
    if enabled {
        Cell::new("Enabled").fg(Color::Green)
    } else {
        Cell::new("Disabled").fg(Color::Red)
    }
}
