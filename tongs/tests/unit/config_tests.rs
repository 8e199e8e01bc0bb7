use tongs::TransportMode;
use tongs::config::{ConfigError, TongsConfig, load_or_default};

#[test]
fn test_default_config() {
    let config = TongsConfig::default();
    assert_eq!(config.endpoint, "/jinji/select_ido_type/");
    assert_eq!(config.field, "ido_type");
    assert_eq!(config.mode, TransportMode::Post);
    assert_eq!(config.source_id, "id_ido_type");
    assert_eq!(config.dependent_id, "id_ido_syumoku");
    assert_eq!(config.csrf_cookie, "csrftoken");
    assert_eq!(config.csrf_header, "X-CSRFToken");
    assert_eq!(config.placeholder_label, "---------");
    assert!(config.check_status);
    assert!(config.discard_stale);
    assert!(config.timeout_secs.is_none());
}

#[test]
fn test_parse_partial_config() {
    let toml_str = r#"
        base_url = "https://hr.example.com"
        mode = "get"
        timeout_secs = 5
    "#;
    let config: TongsConfig = toml::from_str(toml_str).unwrap();
    assert_eq!(config.base_url, "https://hr.example.com");
    assert_eq!(config.mode, TransportMode::Get);
    assert_eq!(config.timeout_secs, Some(5));
    assert_eq!(config.field, "ido_type");
}

#[test]
fn test_config_round_trips_through_toml() {
    let config = TongsConfig {
        discard_stale: false,
        ..TongsConfig::default()
    };
    let text = config.to_toml().unwrap();
    assert!(text.contains("mode = \"post\""));
    assert_eq!(toml::from_str::<TongsConfig>(&text).unwrap(), config);
}

#[test]
fn test_from_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tongs.toml");
    std::fs::write(&path, "endpoint = \"/select/\"\n").unwrap();

    let config = TongsConfig::from_file(&path).unwrap();
    assert_eq!(config.endpoint, "/select/");
}

#[test]
fn test_from_missing_file() {
    let err = TongsConfig::from_file("/nonexistent/tongs.toml").unwrap_err();
    assert!(matches!(err, ConfigError::NotFound(_)));
}

#[test]
fn test_from_invalid_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("tongs.toml");
    std::fs::write(&path, "mode = \"put\"\n").unwrap();

    let err = TongsConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, ConfigError::ParseError(_)));
}

#[test]
fn test_env_overrides() {
    envmnt::set("TONGS_BASE_URL", "http://env.local");
    envmnt::set("TONGS_MODE", "GET");
    let config = TongsConfig::default().apply_env().unwrap();
    assert_eq!(config.base_url, "http://env.local");
    assert_eq!(config.mode, TransportMode::Get);

    envmnt::set("TONGS_MODE", "put");
    let err = TongsConfig::default().apply_env().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidEnv { key, .. } if key == "TONGS_MODE"));

    envmnt::remove("TONGS_BASE_URL");
    envmnt::remove("TONGS_MODE");
}

#[test]
fn test_uppercase_mode_in_file() {
    let config: TongsConfig = toml::from_str("mode = \"GET\"").unwrap();
    assert_eq!(config.mode, TransportMode::Get);
    assert!(config.to_toml().unwrap().contains("mode = \"get\""));
}

#[test]
fn test_load_or_default_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let config = load_or_default(dir.path().join(".tongs.toml")).unwrap();
    assert_eq!(config, TongsConfig::default());
}

#[test]
fn test_load_or_default_reports_read_errors() {
    let dir = tempfile::tempdir().unwrap();
    let err = load_or_default(dir.path()).unwrap_err();
    assert!(matches!(err, ConfigError::ReadError(_)));
}

#[test]
fn test_load_or_default_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join(".tongs.toml");
    std::fs::write(&path, "field = \"kind\"\n").unwrap();

    let config = load_or_default(&path).unwrap();
    assert_eq!(config.field, "kind");
}
