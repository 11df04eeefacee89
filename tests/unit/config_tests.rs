// =========================
// tests/unit/config_tests.rs
// =========================
//! Settings loading from real files and their effect on the gate
use std::time::Duration;
use tempfile::TempDir;
use webook_backend_lib::config::Settings;

#[test]
fn test_load_from_toml_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("webook.toml");
    std::fs::write(
        &path,
        r#"
log_level = "debug"

[server]
port = 9090

[session]
refresh_interval_ms = 2500
max_age_secs = 1800

[auth]
ignore_paths = ["/users/login", "/status"]
"#,
    )
    .unwrap();

    let settings = Settings::load_from(&path).unwrap();
    settings.validate().unwrap();

    assert_eq!(settings.log_level, "debug");
    assert_eq!(settings.server.port, 9090);
    assert_eq!(settings.refresh_interval(), Duration::from_millis(2500));
    assert_eq!(settings.session_max_age(), Duration::from_secs(1800));
    // untouched sections keep their defaults
    assert_eq!(settings.session.cookie_name, "mysession");

    let gate = settings.gate_config();
    assert!(gate.exemptions.is_exempt("/status"));
    assert!(!gate.exemptions.is_exempt("/users/signup"));
}

#[test]
fn test_load_from_json_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("webook.json");
    std::fs::write(&path, r#"{ "password": { "min_length": 12 } }"#).unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert_eq!(settings.password_requirements().min_length, 12);
}

#[test]
fn test_invalid_file_settings_fail_validation() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("webook.toml");
    std::fs::write(&path, "[session]\nrefresh_interval_ms = 0\n").unwrap();

    let settings = Settings::load_from(&path).unwrap();
    assert!(settings.validate().is_err());
}
