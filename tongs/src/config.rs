use crate::domain::TransportMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use thiserror::Error;

pub const CONFIG_FILE: &str = ".tongs.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),
    #[error("Config file not found: {0}")]
    NotFound(String),
    #[error("Invalid value for {key}: {value}")]
    InvalidEnv { key: String, value: String },
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct TongsConfig {
    pub base_url: String,
    pub endpoint: String,
    pub field: String,
    pub mode: TransportMode,
    pub source_id: String,
    pub dependent_id: String,
    pub csrf_cookie: String,
    pub csrf_header: String,
    pub placeholder_label: String,
    pub check_status: bool,
    pub discard_stale: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
    pub asset_name: String,
}

impl Default for TongsConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8000".to_string(),
            endpoint: "/jinji/select_ido_type/".to_string(),
            field: "ido_type".to_string(),
            mode: TransportMode::Post,
            source_id: "id_ido_type".to_string(),
            dependent_id: "id_ido_syumoku".to_string(),
            csrf_cookie: "csrftoken".to_string(),
            csrf_header: "X-CSRFToken".to_string(),
            placeholder_label: "---------".to_string(),
            check_status: true,
            discard_stale: true,
            timeout_secs: None,
            asset_name: "select_ido_type.js".to_string(),
        }
    }
}

impl TongsConfig {
    /// Loads an explicit config file. A missing file is an error here,
    /// unlike [`load_config`] which falls back to defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let contents = fs::read_to_string(path)?;
        let config: TongsConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Applies `TONGS_*` environment overrides on top of the file values.
    pub fn apply_env(mut self) -> Result<Self, ConfigError> {
        if let Some(base_url) = env_value("TONGS_BASE_URL") {
            self.base_url = base_url;
        }
        if let Some(endpoint) = env_value("TONGS_ENDPOINT") {
            self.endpoint = endpoint;
        }
        if let Some(mode) = env_value("TONGS_MODE") {
            self.mode = mode.parse().map_err(|_| ConfigError::InvalidEnv {
                key: "TONGS_MODE".to_string(),
                value: mode.clone(),
            })?;
        }
        Ok(self)
    }
}

fn env_value(key: &str) -> Option<String> {
    if envmnt::exists(key) {
        let value = envmnt::get_or(key, "");
        if !value.trim().is_empty() {
            return Some(value.trim().to_string());
        }
    }
    None
}

/// Resolves the effective config: explicit path or `.tongs.toml`, then
/// `.env` and `TONGS_*` overrides.
pub fn load_config(path: Option<&Path>) -> Result<TongsConfig, ConfigError> {
    dotenvy::dotenv().ok();

    let config = match path {
        Some(path) => TongsConfig::from_file(path)?,
        None => load_or_default(CONFIG_FILE)?,
    };

    config.apply_env()
}

/// Reads `path`, falling back to defaults only when the file does not exist.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<TongsConfig, ConfigError> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(TongsConfig::default()),
        Err(e) => Err(ConfigError::ReadError(e)),
    }
}
