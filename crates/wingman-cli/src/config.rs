//! Replay configuration.

use anyhow::{bail, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// How the final session snapshot is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SnapshotFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for SnapshotFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(SnapshotFormat::Text),
            "json" => Ok(SnapshotFormat::Json),
            _ => Err(format!("Invalid snapshot format: '{}'. Use 'text' or 'json'.", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,
    #[serde(default)]
    pub include_creatures_in_group: bool,
    #[serde(default)]
    pub ignored_creatures: Vec<String>,
    #[serde(default)]
    pub snapshot_format: SnapshotFormat,
}

fn default_poll_interval_ms() -> u64 {
    100
}

/// One Ethernet-sized TCP segment.
fn default_chunk_size() -> usize {
    1460
}

impl Default for Config {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
            chunk_size: default_chunk_size(),
            include_creatures_in_group: false,
            ignored_creatures: Vec::new(),
            snapshot_format: SnapshotFormat::default(),
        }
    }
}

impl Config {
    /// Load config from a specific file path.
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from `config/default.toml`, then the user config directory, or
    /// fall back to defaults.
    pub fn load() -> Result<Self> {
        Self::load_first_existing(&Self::search_paths())
    }

    /// Load the first of `candidates` that exists, or defaults if none do.
    pub fn load_first_existing(candidates: &[PathBuf]) -> Result<Self> {
        match candidates.iter().find(|path| path.exists()) {
            Some(path) => Self::load_from(path),
            None => Ok(Config::default()),
        }
    }

    pub fn search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("config/default.toml")];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("wingman").join("config.toml"));
        }
        paths
    }

    pub fn validate(&self) -> Result<()> {
        if self.poll_interval_ms == 0 {
            bail!("poll_interval_ms must be greater than zero");
        }
        if self.chunk_size == 0 {
            bail!("chunk_size must be greater than zero");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.poll_interval_ms, 100);
        assert_eq!(config.chunk_size, 1460);
    }

    #[test]
    fn test_partial_file() {
        let config: Config = toml::from_str(
            r#"
            include_creatures_in_group = true
            ignored_creatures = ["a rat", "a pigeon"]
            snapshot_format = "json"
            "#,
        )
        .unwrap();
        assert!(config.include_creatures_in_group);
        assert_eq!(config.ignored_creatures, vec!["a rat", "a pigeon"]);
        assert_eq!(config.snapshot_format, SnapshotFormat::Json);
        assert_eq!(config.poll_interval_ms, 100);
    }

    #[test]
    fn test_unknown_snapshot_format_rejected() {
        assert!(toml::from_str::<Config>(r#"snapshot_format = "yaml""#).is_err());
    }

    #[test]
    fn test_snapshot_format_from_str() {
        assert_eq!("TEXT".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Text);
        assert_eq!("json".parse::<SnapshotFormat>().unwrap(), SnapshotFormat::Json);
        assert!("xml".parse::<SnapshotFormat>().is_err());
    }

    #[test]
    fn test_validate() {
        let config = Config {
            chunk_size: 0,
            ..Config::default()
        };
        assert!(config.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }
}
