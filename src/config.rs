//! Settings file (`config.toml` in the data directory)
//!
//! ```toml
//! deck = "deck.json"          # relative paths resolve against the data dir
//! progress = "progress.json"
//! shuffle = true
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE: &str = "config.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Could not write config: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AppConfig {
    /// Deck file
    pub deck: PathBuf,
    /// Progress snapshot file
    pub progress: PathBuf,
    /// Today's answer counts
    pub tally: PathBuf,
    /// Shuffle the due queue at the start of a study session
    pub shuffle: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            deck: PathBuf::from("deck.json"),
            progress: PathBuf::from("progress.json"),
            tally: PathBuf::from("tally.json"),
            shuffle: true,
        }
    }
}

impl AppConfig {
    /// Load `config.toml` from `data_dir`, falling back to defaults if absent
    pub fn load(data_dir: &Path) -> Result<Self, ConfigError> {
        let path = data_dir.join(CONFIG_FILE);
        if !path.exists() {
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&path)?;
        let config: AppConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn save(&self, data_dir: &Path) -> Result<(), ConfigError> {
        fs::create_dir_all(data_dir)?;
        fs::write(data_dir.join(CONFIG_FILE), toml::to_string_pretty(self)?)?;
        Ok(())
    }

    /// Resolve a configured path against the data directory
    pub fn resolve(data_dir: &Path, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            data_dir.join(path)
        }
    }

    pub fn deck_path(&self, data_dir: &Path) -> PathBuf {
        Self::resolve(data_dir, &self.deck)
    }

    pub fn progress_path(&self, data_dir: &Path) -> PathBuf {
        Self::resolve(data_dir, &self.progress)
    }

    pub fn tally_path(&self, data_dir: &Path) -> PathBuf {
        Self::resolve(data_dir, &self.tally)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig::load(temp_dir.path()).unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.deck_path(temp_dir.path()), temp_dir.path().join("deck.json"));
    }

    #[test]
    fn test_partial_config() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "shuffle = false\ndeck = \"japanese.json\"\n").unwrap();

        let config = AppConfig::load(temp_dir.path()).unwrap();
        assert!(!config.shuffle);
        assert_eq!(config.deck, PathBuf::from("japanese.json"));
        assert_eq!(config.progress, PathBuf::from("progress.json"));
    }

    #[test]
    fn test_absolute_paths_are_kept() {
        let temp_dir = TempDir::new().unwrap();
        let absolute = temp_dir.path().join("elsewhere/progress.json");
        let config = AppConfig {
            progress: absolute.clone(),
            ..Default::default()
        };
        assert_eq!(config.progress_path(Path::new("/unused")), absolute);
    }

    #[test]
    fn test_save_and_reload() {
        let temp_dir = TempDir::new().unwrap();
        let config = AppConfig {
            shuffle: false,
            ..Default::default()
        };
        config.save(temp_dir.path()).unwrap();
        assert_eq!(AppConfig::load(temp_dir.path()).unwrap(), config);
    }

    #[test]
    fn test_invalid_config_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join(CONFIG_FILE), "shuffle = \"sometimes\"").unwrap();
        assert!(matches!(AppConfig::load(temp_dir.path()), Err(ConfigError::Toml(_))));
    }
}
