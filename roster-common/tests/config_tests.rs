//! Root folder resolution tests
//!
//! Tests that set or clear ROSTER_ROOT_FOLDER are marked #[serial] so they
//! do not race on the process environment.

use roster_common::config::{default_root_folder, resolve_root_folder, TomlConfig, ROOT_FOLDER_ENV};
use serial_test::serial;
use std::env;
use std::path::{Path, PathBuf};

#[test]
#[serial]
fn test_cli_argument_wins() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/roster-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/roster-toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(Some(Path::new("/tmp/roster-cli")), ROOT_FOLDER_ENV, &toml);
    assert_eq!(resolved, PathBuf::from("/tmp/roster-cli"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_env_beats_toml() {
    env::set_var(ROOT_FOLDER_ENV, "/tmp/roster-env");
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/roster-toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(None, ROOT_FOLDER_ENV, &toml);
    assert_eq!(resolved, PathBuf::from("/tmp/roster-env"));

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
#[serial]
fn test_toml_beats_default() {
    env::remove_var(ROOT_FOLDER_ENV);
    let toml = TomlConfig {
        root_folder: Some(PathBuf::from("/tmp/roster-toml")),
        ..Default::default()
    };

    let resolved = resolve_root_folder(None, ROOT_FOLDER_ENV, &toml);
    assert_eq!(resolved, PathBuf::from("/tmp/roster-toml"));
}

#[test]
#[serial]
fn test_falls_back_to_default() {
    env::remove_var(ROOT_FOLDER_ENV);

    let resolved = resolve_root_folder(None, ROOT_FOLDER_ENV, &TomlConfig::default());
    assert_eq!(resolved, default_root_folder());
    assert!(!resolved.as_os_str().is_empty());
}

#[test]
#[serial]
fn test_blank_env_is_ignored() {
    env::set_var(ROOT_FOLDER_ENV, "  ");

    let resolved = resolve_root_folder(None, ROOT_FOLDER_ENV, &TomlConfig::default());
    assert_eq!(resolved, default_root_folder());

    env::remove_var(ROOT_FOLDER_ENV);
}

#[test]
fn test_load_explicit_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.toml");
    std::fs::write(&path, "port = 4100\n[logging]\nlevel = \"warn\"\n").unwrap();

    let loaded = TomlConfig::load(Some(&path)).unwrap();
    assert_eq!(loaded.path.as_deref(), Some(path.as_path()));
    assert_eq!(loaded.config.port, Some(4100));
    assert_eq!(loaded.config.logging.level, "warn");
}
