//! Configuration management.

use anyhow::{Context as _, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    /// HashedRPZ key.
    pub key: Option<String>,

    /// Origin domain the hashed names are placed under.
    pub origin_domain: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Wildcard too-long names by default (as if --make-wildcard was passed).
    #[serde(default)]
    pub make_wildcard: bool,
}

impl Config {
    /// Get the default config file path.
    pub fn path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("net", "hashedrpz", "hasher")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from `path`, falling back to defaults when the
    /// file does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("failed to parse config {}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config {}", path.display()))?;

        Ok(())
    }

    /// The key with all but its first and last four characters hidden.
    pub fn masked_key(&self) -> Option<String> {
        self.key.as_ref().map(|k| {
            let chars: Vec<char> = k.chars().collect();
            if chars.len() > 8 {
                let head: String = chars[..4].iter().collect();
                let tail: String = chars[chars.len() - 4..].iter().collect();
                format!("{head}...{tail}")
            } else {
                "****".to_string()
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sub").join("config.toml");

        let config = Config {
            key: Some("0KjULoiv d2VFuNPc".to_string()),
            origin_domain: Some("rpz.example.net".to_string()),
            output_format: Some(OutputFormat::Csv),
            make_wildcard: true,
        };
        config.save_to(&path).unwrap();

        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn parses_partial_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "origin_domain = \"rpz.example.org\"\n").unwrap();

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.origin_domain.as_deref(), Some("rpz.example.org"));
        assert_eq!(config.key, None);
        assert!(!config.make_wildcard);
    }

    #[test]
    fn rejects_garbage() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "make_wildcard = \"maybe\"\n").unwrap();

        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn masks_key() {
        let mut config = Config {
            key: Some("teststring: 0KjULoiv".to_string()),
            ..Config::default()
        };
        assert_eq!(config.masked_key().as_deref(), Some("test...Loiv"));

        config.key = Some("short".to_string());
        assert_eq!(config.masked_key().as_deref(), Some("****"));

        config.key = None;
        assert_eq!(config.masked_key(), None);
    }
}
