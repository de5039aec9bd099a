use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Configuration from config.toml in the data directory
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BoardConfig {
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Key the board is stored under
    #[serde(default = "default_key")]
    pub key: String,
    /// Key/value file, relative to the data directory
    #[serde(default = "default_file")]
    pub file: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            key: default_key(),
            file: default_file(),
        }
    }
}

fn default_key() -> String {
    "taskboard".to_string()
}

fn default_file() -> String {
    "storage.json".to_string()
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct UiConfig {
    #[serde(default)]
    pub show_key_hints: bool,
    /// Colour overrides for the dark theme
    #[serde(default)]
    pub colors: HashMap<String, String>,
    /// Colour overrides for the light theme
    #[serde(default)]
    pub light_colors: HashMap<String, String>,
    #[serde(default)]
    pub tag_colors: HashMap<String, String>,
}
