//! Integration tests for the pexora binary
//!
//! Every test points `--base-dir` at a fresh temporary directory, so no
//! real extension directory is touched.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn pexora(base: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_pexora"))
        .args(args)
        .arg("--base-dir")
        .arg(base)
        .output()
        .expect("Failed to run pexora")
}

fn write_module(modules: &Path, file: &str, name: &str) {
    std::fs::create_dir_all(modules).unwrap();
    let mut writer = zip::ZipWriter::new(std::fs::File::create(modules.join(file)).unwrap());
    writer
        .start_file("module.toml", SimpleFileOptions::default())
        .unwrap();
    write!(
        writer,
        "name = \"{name}\"\nversion = \"1.0.0\"\nmain = \"{name}Main\"\ndepend = [\"PexoraCore\"]\n"
    )
    .unwrap();
    writer.finish().unwrap();
}

/// Test that pexora --help lists the subcommands
#[test]
fn pexora_help_lists_commands() {
    let output = Command::new(env!("CARGO_BIN_EXE_pexora"))
        .arg("--help")
        .output()
        .expect("Failed to run pexora --help");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("status"));
    assert!(stdout.contains("reload"));
    assert!(stdout.contains("list"));
}

/// Test that status on an empty base directory reports nothing
#[test]
fn pexora_status_json_empty() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");

    let output = pexora(&base, &["status", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["enabled"], 0);
    assert_eq!(report["total"], 0);
    assert!(base.join("modules").is_dir());
}

/// Test that status counts enabled modules and failed files
#[test]
fn pexora_status_json_counts_modules() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");
    write_module(&base.join("modules"), "PexoraChat.jar", "PexoraChat");
    std::fs::write(base.join("modules/Broken.jar"), b"garbage").unwrap();

    let output = pexora(&base, &["status", "--json"]);

    assert!(output.status.success());
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["enabled"], 1);
    assert_eq!(report["total"], 2);
    assert_eq!(report["modules"]["PexoraChat"], true);
    assert_eq!(report["modules"]["Broken.jar"], false);
}

/// Test that the plain status output shows the counts
#[test]
fn pexora_status_table() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");
    write_module(&base.join("modules"), "PexoraChat.jar", "PexoraChat");

    let output = pexora(&base, &["status"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Modules: 1/1"));
    assert!(stdout.contains("PexoraChat"));
}

/// Test that list explains where modules go when none are installed
#[test]
fn pexora_list_empty() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");

    let output = pexora(&base, &["list"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No modules installed"));
}

/// Test that reload honours module-auto-reload
#[test]
fn pexora_reload_without_auto_reload() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");
    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("config.toml"), "module-auto-reload = false\n").unwrap();

    let output = pexora(&base, &["reload"]);

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("module-auto-reload = false"));
}

/// Test that status leaves staged plugins alone and reload migrates them
#[test]
fn pexora_status_does_not_migrate() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");
    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("config.toml"), MIGRATING_CONFIG).unwrap();
    write_module(dir.path(), "PexoraChat.jar", "PexoraChat");
    let staged = dir.path().join("PexoraChat.jar");
    let migrated = base.join("modules/PexoraChat.jar");

    let output = pexora(&base, &["status"]);

    assert!(output.status.success());
    assert!(staged.exists());
    assert!(!migrated.exists());

    let output = pexora(&base, &["reload"]);

    assert!(output.status.success());
    assert!(!staged.exists());
    assert!(migrated.exists());
}

const MIGRATING_CONFIG: &str = r#"
[modules]
auto-copy-to-modules = true
delete-old-plugins = true
"#;

/// Test that a malformed config is reported as an error
#[test]
fn pexora_rejects_malformed_config() {
    let dir = TempDir::new().unwrap();
    let base = dir.path().join("PexoraCore");
    std::fs::create_dir_all(&base).unwrap();
    std::fs::write(base.join("config.toml"), "debug-mode = \"yes\"\n").unwrap();

    let output = pexora(&base, &["status"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Failed to open module system"));
}
