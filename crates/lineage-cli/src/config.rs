//! CLI configuration
//!
//! Settings are read from `lineage.toml` in the working directory, or the
//! file named by `--config` / `LINEAGE_CONFIG`. Every key is optional;
//! command-line flags take precedence over the file.

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use lineage_core::DEFAULT_MAX_PARENTS;
use lineage_source::DEFAULT_EXTENSION;

/// Config file looked up when none is given
pub const DEFAULT_CONFIG_FILE: &str = "lineage.toml";

/// Resolve the config file location
pub fn config_file_path(explicit: Option<&Path>) -> PathBuf {
    explicit
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE))
}

/// Configuration for the CLI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root of the zoo record tree
    pub zoo_dir: PathBuf,
    /// Root of the panda record tree
    pub panda_dir: PathBuf,
    /// Export file
    pub output: PathBuf,
    /// Record file extension
    pub extension: String,
    /// Pretty-print the export
    pub pretty: bool,
    /// Maximum distinct parents per child
    pub max_parents: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            zoo_dir: PathBuf::from("./zoos"),
            panda_dir: PathBuf::from("./pandas"),
            output: PathBuf::from("./export/redpanda.json"),
            extension: DEFAULT_EXTENSION.to_string(),
            pretty: false,
            max_parents: DEFAULT_MAX_PARENTS,
        }
    }
}

impl Config {
    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        let config: Self = toml::from_str(&content)
            .with_context(|| format!("invalid config file {}", path.display()))?;
        anyhow::ensure!(
            config.max_parents >= 1,
            "invalid config file {}: max_parents must be at least 1",
            path.display()
        );
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("failed to write config file {}", path.display()))?;
        Ok(())
    }

    /// Known config keys
    pub fn keys() -> &'static [&'static str] {
        &["zoo_dir", "panda_dir", "output", "extension", "pretty", "max_parents"]
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "zoo_dir" => Some(self.zoo_dir.display().to_string()),
            "panda_dir" => Some(self.panda_dir.display().to_string()),
            "output" => Some(self.output.display().to_string()),
            "extension" => Some(self.extension.clone()),
            "pretty" => Some(self.pretty.to_string()),
            "max_parents" => Some(self.max_parents.to_string()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> anyhow::Result<()> {
        match key {
            "zoo_dir" => self.zoo_dir = PathBuf::from(value),
            "panda_dir" => self.panda_dir = PathBuf::from(value),
            "output" => self.output = PathBuf::from(value),
            "extension" => self.extension = value.trim_start_matches('.').to_string(),
            "pretty" => {
                self.pretty = value
                    .parse()
                    .with_context(|| format!("pretty must be true or false, got {:?}", value))?
            }
            "max_parents" => {
                let max: usize = value
                    .parse()
                    .with_context(|| format!("max_parents must be a number, got {:?}", value))?;
                anyhow::ensure!(max >= 1, "max_parents must be at least 1");
                self.max_parents = max;
            }
            _ => anyhow::bail!(
                "Unknown config key: {}. Available keys: {}",
                key,
                Self::keys().join(", ")
            ),
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(&dir.path().join("lineage.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.output, PathBuf::from("./export/redpanda.json"));
    }

    #[test]
    fn test_partial_file_keeps_other_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineage.toml");
        std::fs::write(&path, "panda_dir = \"data/pandas\"\nmax_parents = 1\n").unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.panda_dir, PathBuf::from("data/pandas"));
        assert_eq!(config.max_parents, 1);
        assert_eq!(config.zoo_dir, PathBuf::from("./zoos"));
    }

    #[test]
    fn test_load_rejects_zero_max_parents() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineage.toml");
        std::fs::write(&path, "max_parents = 0\n").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("max_parents must be at least 1"));
    }

    #[test]
    fn test_set_get_save_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lineage.toml");

        let mut config = Config::default();
        config.set("pretty", "true").unwrap();
        config.set("extension", ".ini").unwrap();
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.get("pretty").as_deref(), Some("true"));
        assert_eq!(loaded.get("extension").as_deref(), Some("ini"));
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("max_parents", "0").is_err());
        assert!(config.set("pretty", "yes").is_err());
        assert!(config.set("colour", "blue").is_err());
        assert_eq!(config.get("colour"), None);
    }
}
