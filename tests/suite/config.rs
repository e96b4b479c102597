//! Configuration file handling as the binary uses it.

use std::fs;
use std::time::Duration;

use journal_config::{ConfigError, DataDirSource, JournalConfig};

#[test]
fn config_file_sets_holds_and_directories() {
    let dir = tempfile::tempdir().expect("tempdir");
    let data_dir = dir.path().join("data");
    let path = dir.path().join("config.toml");
    fs::write(
        &path,
        format!(
            r#"
[app]
profile = "Riebeck"
data_dir = "{}"
ascii_only = true

[input]
rename_hold_ms = 250
delete_hold_ms = 900
"#,
            data_dir.display()
        ),
    )
    .expect("write config");

    let config = JournalConfig::load_from(path)
        .expect("valid config")
        .expect("config present");

    assert_eq!(config.profile_id(), "Riebeck");
    assert!(config.ascii_only());
    assert!(!config.high_contrast());
    assert_eq!(config.input().rename_hold(), Duration::from_millis(250));
    assert_eq!(config.input().delete_hold(), Duration::from_millis(900));
    assert_eq!(config.input().remove_photo_hold(), Duration::from_millis(500));

    let resolved = config.data_dir();
    assert_eq!(resolved.source, DataDirSource::Custom);
    assert_eq!(resolved.saves_dir(), data_dir.join("saves"));
    assert_eq!(config.photos_dir(&resolved), data_dir.join("photos"));
}

#[test]
fn missing_config_file_is_not_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let loaded = JournalConfig::load_from(dir.path().join("absent.toml")).expect("no error");
    assert!(loaded.is_none());
}

#[test]
fn unparsable_config_is_reported() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    fs::write(&path, "[input\nrename_hold_ms = ").expect("write config");

    let err = JournalConfig::load_from(path).expect_err("parse error");
    assert!(matches!(err, ConfigError::Parse { .. }));
}
