//! `pexora status` - enabled and total module counts

use std::path::Path;

use anyhow::Result;
use clap::Args;
use comfy_table::{Cell, Table};
use pexora_core::StatusReport;
use pexora_module_api::CORE_IDENTIFIER;

use super::{enabled_cell, inspect_system, table};

#[derive(Args, Debug)]
pub struct StatusArgs {
    /// Print the status report as JSON
    #[arg(long)]
    pub json: bool,
}

pub fn run(base_dir: &Path, args: StatusArgs) -> Result<()> {
    let mut system = inspect_system(base_dir)?;
    let report = system.status().report();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("{} v{}", CORE_IDENTIFIER, env!("CARGO_PKG_VERSION"));
        println!("Modules: {}/{}", report.enabled, report.total);
        if report.total == 0 {
            println!();
            println!(
                "No modules found in {}",
                system.controller().modules_dir().display()
            );
        } else {
            println!("{}", status_table(&report));
        }
    }

    system.shutdown();
    Ok(())
}

fn status_table(report: &StatusReport) -> Table {
    let mut table = table(&["Module", "Status"]);
    for (name, &enabled) in &report.modules {
        table.add_row(vec![Cell::new(name), enabled_cell(enabled)]);
    }
    table
}
