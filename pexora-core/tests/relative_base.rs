//! Relative base directories
//!
//! Kept in its own test binary: the test changes the process working
//! directory, which would race with any other test in the same process.

use std::io::Write;

use pexora_core::{ArchiveHost, ModuleSystem};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const MANIFEST: &str = r#"
name = "PexoraChat"
version = "1.0.0"
main = "Chat"
depend = ["PexoraCore"]
"#;

const CONFIG: &str = r#"
[modules]
auto-copy-to-modules = true
"#;

#[test]
fn relative_base_migrates_from_current_directory() {
    let dir = TempDir::new().unwrap();
    std::env::set_current_dir(dir.path()).unwrap();

    let mut writer = zip::ZipWriter::new(std::fs::File::create("PexoraChat.jar").unwrap());
    writer
        .start_file("module.toml", SimpleFileOptions::default())
        .unwrap();
    writer.write_all(MANIFEST.as_bytes()).unwrap();
    writer.finish().unwrap();

    std::fs::create_dir_all("PexoraCore").unwrap();
    std::fs::write("PexoraCore/config.toml", CONFIG).unwrap();

    let mut system = ModuleSystem::open("PexoraCore", Box::new(ArchiveHost::new())).unwrap();
    let report = system.start().unwrap();

    assert_eq!(report.migration.unwrap().copied.len(), 1);
    let copied = dir.path().join("PexoraCore/modules/PexoraChat.jar");
    assert!(copied.is_file());
    assert!(system.status().is_enabled("PexoraChat"));
}
