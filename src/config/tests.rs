//! Configuration tests
//!
//! Round-trip guards keep `to_toml()` in sync with `FileConfig`: when a field
//! is added to one and not the other, these fail.

use super::collection::DEFAULT_API_URL;
use super::*;
use std::collections::HashMap;

fn no_env(_: &str) -> Option<String> {
    None
}

fn env_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

// ─────────────────────────────────────────────────────────────────────────────
// Round-trip tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_config_roundtrip_default() {
    let config = Config::default();
    let toml_str = config.to_toml();

    let parsed: Result<FileConfig, _> = toml::from_str(&toml_str);
    assert!(
        parsed.is_ok(),
        "Default config should round-trip.\nTOML:\n{}\nError: {:?}",
        toml_str,
        parsed.err()
    );

    let resolved = Config::resolve(parsed.unwrap(), no_env);
    assert_eq!(resolved, config);
}

#[test]
fn test_config_roundtrip_custom_values() {
    let mut config = Config::default();
    config.theme = "light".to_string();
    config.api.api_url = "http://localhost:9000/api/v1".to_string();
    config.api.preview_width = 120;
    config.gallery.page_size = 30;
    config.logging.level = "debug".to_string();
    config.logging.file_enabled = true;
    config.logging.file_rotation = LogRotation::Hourly;

    let file: FileConfig = toml::from_str(&config.to_toml()).unwrap();
    let resolved = Config::resolve(file, no_env);

    assert_eq!(resolved, config);
}

#[test]
fn test_template_keeps_image_placeholders() {
    let toml_str = Config::default().to_toml();
    assert!(toml_str.contains("{image_id}"));
    assert!(toml_str.contains("{width}"));
}

// ─────────────────────────────────────────────────────────────────────────────
// Loading tests
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_empty_file_uses_defaults() {
    let file: FileConfig = toml::from_str("").unwrap();
    assert_eq!(Config::resolve(file, no_env), Config::default());
}

#[test]
fn test_partial_sections() {
    let file: FileConfig = toml::from_str(
        r#"
[gallery]
page_size = 24

[logging]
file_rotation = "never"
"#,
    )
    .unwrap();

    let config = Config::resolve(file, no_env);
    assert_eq!(config.gallery.page_size, 24);
    assert_eq!(config.logging.file_rotation, LogRotation::Never);
    assert_eq!(config.logging.level, "info");
    assert_eq!(config.api.api_url, DEFAULT_API_URL);
}

#[test]
fn test_zero_page_size_falls_back() {
    let file: FileConfig = toml::from_str("[gallery]\npage_size = 0\n").unwrap();
    assert_eq!(Config::resolve(file, no_env).gallery.page_size, 12);
}

#[test]
fn test_unknown_rotation_defaults_to_daily() {
    assert_eq!(LogRotation::parse("weekly"), LogRotation::Daily);
    assert_eq!(LogRotation::parse("HOURLY"), LogRotation::Hourly);
}

#[test]
fn test_invalid_value_type_is_rejected() {
    let parsed: Result<FileConfig, _> = toml::from_str("[gallery]\npage_size = \"twelve\"\n");
    assert!(parsed.is_err());
}

// ─────────────────────────────────────────────────────────────────────────────
// Environment precedence
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn test_env_overrides_file() {
    let file: FileConfig = toml::from_str(
        r#"
theme = "light"

[api]
api_url = "https://file.example/api/v1"

[gallery]
page_size = 24
"#,
    )
    .unwrap();

    let env = env_from(&[
        ("ARTIC_API_URL", "http://127.0.0.1:8080/api/v1/"),
        ("ARTIC_PAGE_SIZE", "6"),
        ("ARTIC_THEME", "dark"),
    ]);
    let config = Config::resolve(file, env);

    // Trailing slash is trimmed so paths join cleanly
    assert_eq!(config.api.api_url, "http://127.0.0.1:8080/api/v1");
    assert_eq!(config.gallery.page_size, 6);
    assert_eq!(config.theme, "dark");
}

#[test]
fn test_bad_env_page_size_is_ignored() {
    let file: FileConfig = toml::from_str("[gallery]\npage_size = 24\n").unwrap();

    let config = Config::resolve(file, env_from(&[("ARTIC_PAGE_SIZE", "lots")]));
    assert_eq!(config.gallery.page_size, 24);

    let file: FileConfig = toml::from_str("").unwrap();
    let config = Config::resolve(file, env_from(&[("ARTIC_PAGE_SIZE", "0")]));
    assert_eq!(config.gallery.page_size, 12);
}

#[test]
fn test_no_tui_flag() {
    let headless = |v: &str| {
        let file: FileConfig = toml::from_str("").unwrap();
        !Config::resolve(file, env_from(&[("ARTIC_NO_TUI", v)])).enable_tui
    };

    assert!(headless("1"));
    assert!(headless("TRUE"));
    assert!(!headless("0"));
}
