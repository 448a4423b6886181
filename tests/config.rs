use std::fs;

use tasktube::config::Config;
use tasktube::error::exit_codes;

#[test]
fn config_defaults_when_missing() {
    let config = Config::load(None).expect("default config");
    assert_eq!(config.api.base_url, "http://localhost:8080");
}

#[test]
fn config_overrides_from_toml() -> Result<(), Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let config_path = dir.path().join("tasktube.toml");
    let toml = r#"
[api]
base_url = "https://tasks.example.com"
"#;
    fs::write(&config_path, toml)?;

    let config = Config::load(Some(&config_path))?;
    assert_eq!(config.api.base_url, "https://tasks.example.com");

    Ok(())
}

#[test]
fn explicit_missing_path_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("absent.toml");
    let err = Config::load(Some(&missing)).expect_err("missing config");
    assert!(err.to_string().contains("config file not found"));
}

#[test]
fn malformed_toml_is_a_user_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config_path = dir.path().join("tasktube.toml");
    fs::write(&config_path, "[api\nbase_url = ").expect("write");
    let err = Config::load(Some(&config_path)).expect_err("malformed config");
    assert_eq!(err.exit_code(), exit_codes::USER_ERROR);
    assert!(err.to_string().contains("failed to parse"));
}
