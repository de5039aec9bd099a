use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::BoardConfig;

/// Environment variable naming the data directory
pub const DATA_DIR_ENV: &str = "TASKBOARD_DIR";

/// Error type for configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse config.toml: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("no data directory available; pass --data-dir or set {DATA_DIR_ENV}")]
    NoDataDir,
}

/// Resolve the data directory: explicit override, then `TASKBOARD_DIR`,
/// then the platform data directory.
pub fn resolve_data_dir(override_dir: Option<&Path>) -> Result<PathBuf, ConfigError> {
    if let Some(dir) = override_dir {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    directories::ProjectDirs::from("", "", "taskboard")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or(ConfigError::NoDataDir)
}

/// Read `config.toml` from the data directory. A missing file yields defaults.
pub fn read_config(data_dir: &Path) -> Result<BoardConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");
    if !config_path.exists() {
        return Ok(BoardConfig::default());
    }
    let text = fs::read_to_string(&config_path).map_err(|e| ConfigError::ReadError {
        path: config_path.clone(),
        source: e,
    })?;
    Ok(toml::from_str(&text)?)
}

/// Path of the key/value storage file for this config
pub fn storage_path(data_dir: &Path, config: &BoardConfig) -> PathBuf {
    data_dir.join(&config.storage.file)
}
