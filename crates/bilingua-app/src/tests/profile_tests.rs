use std::fs;

use bilingua_config::{Config, PROFILE_FILE};
use tempfile::TempDir;

use crate::profile::apply_profile;

/// Settings as they come out of the environment
fn env_config() -> (TempDir, Config) {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.paths.app_dir = dir.path().to_path_buf();
    config.annotation.style = "stars".to_string();
    config.archive.tool = "/opt/lslib/divine".to_string();

    (dir, config)
}

#[test]
fn missing_profile_keeps_environment() {
    let (dir, base) = env_config();

    let config = apply_profile(base).unwrap();

    assert_eq!(config.paths.app_dir, dir.path());
    assert_eq!(config.annotation.style, "stars");
    assert!(config.game.launch);
}

#[test]
fn profile_overrides_only_what_it_names() {
    let (dir, base) = env_config();
    fs::write(dir.path().join(PROFILE_FILE), r#"{ "game": { "launch": false } }"#).unwrap();

    let config = apply_profile(base).unwrap();

    assert!(!config.game.launch);
    assert_eq!(config.annotation.style, "stars");
    assert_eq!(config.archive.tool, "/opt/lslib/divine");
    assert_eq!(config.archive.compression, "lz4");
    assert_eq!(config.paths.app_dir, dir.path());
}

#[test]
fn profile_values_win_over_environment() {
    let (dir, base) = env_config();
    fs::write(
        dir.path().join(PROFILE_FILE),
        r#"{ "annotation": { "style": "colors" }, "paths": { "dictionary": "words.dic" } }"#,
    )
    .unwrap();

    let config = apply_profile(base).unwrap();

    assert_eq!(config.annotation.style, "colors");
    assert_eq!(config.paths.dictionary(), dir.path().join("words.dic"));
    assert_eq!(config.paths.app_dir, dir.path());
}

#[test]
fn broken_profile_is_an_error() {
    let (dir, base) = env_config();
    fs::write(dir.path().join(PROFILE_FILE), "{ not json").unwrap();

    assert!(apply_profile(base).is_err());
}
