use std::fs;
use std::path::PathBuf;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use crate::engine::mastery::DEFAULT_SUCCESS_THRESHOLD_MS;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Config {
    #[serde(default = "default_start_level")]
    pub start_level: u8,
    #[serde(default = "default_success_threshold_ms")]
    pub success_threshold_ms: u64,
    #[serde(default = "default_sound")]
    pub sound: bool,
}

fn default_start_level() -> u8 {
    1
}
fn default_success_threshold_ms() -> u64 {
    DEFAULT_SUCCESS_THRESHOLD_MS
}
fn default_sound() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            start_level: default_start_level(),
            success_threshold_ms: default_success_threshold_ms(),
            sound: default_sound(),
        }
    }
}

impl Config {
    pub fn load() -> Result<Self> {
        let path = Self::config_path();
        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&content)?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    #[allow(dead_code)]
    pub fn save(&self) -> Result<()> {
        let path = Self::config_path();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        fs::write(&path, content)?;
        Ok(())
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("chunkr")
            .join("config.toml")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_from_empty_file() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.start_level, 1);
        assert_eq!(config.success_threshold_ms, 5000);
        assert!(config.sound);
    }

    #[test]
    fn partial_file_keeps_remaining_defaults() {
        let config: Config = toml::from_str("start_level = 4\nsound = false\n").unwrap();
        assert_eq!(config.start_level, 4);
        assert!(!config.sound);
        assert_eq!(config.success_threshold_ms, 5000);
    }

    #[test]
    fn toml_round_trip() {
        let config = Config {
            start_level: 7,
            success_threshold_ms: 4000,
            sound: false,
        };
        let serialized = toml::to_string_pretty(&config).unwrap();
        let deserialized: Config = toml::from_str(&serialized).unwrap();
        assert_eq!(deserialized.start_level, 7);
        assert_eq!(deserialized.success_threshold_ms, 4000);
        assert!(!deserialized.sound);
    }
}
