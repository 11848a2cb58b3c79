use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use pexora_core::CoreConfig;

mod commands;

#[derive(Parser)]
#[command(name = "pexora", about = "Inspect and reload pexora modules")]
#[command(version, propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Core data directory (defaults to <extensions>/PexoraCore)
    #[arg(long, global = true, value_name = "PATH")]
    base_dir: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show enabled and total module counts (staged plugins are not migrated)
    Status(commands::status::StatusArgs),
    /// Reload configuration and modules
    Reload,
    /// List every module with its state (staged plugins are not migrated)
    List,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let base_dir = cli.base_dir.unwrap_or_else(pexora_paths::base_dir);

    // A broken config is reported by the command itself
    let debug_mode = CoreConfig::load(&pexora_paths::config_file(&base_dir))
        .map(|config| config.debug_mode)
        .unwrap_or(false);
    let filter = if cli.verbose || debug_mode {
        "debug"
    } else {
        "info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Status(args) => commands::status::run(&base_dir, args),
        Commands::Reload => commands::reload::run(&base_dir),
        Commands::List => commands::list::run(&base_dir),
    }
}
