use crate::generator::AlphabetPreset;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// target length of a new session
    pub length: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub alphabet: AlphabetPreset,
    /// how long a key stays tinted after a submit
    pub highlight_ms: u64,
    pub tick_rate_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            length: 20,
            min_length: 1,
            max_length: 200,
            alphabet: AlphabetPreset::Alphanumeric,
            highlight_ms: 300,
            tick_rate_ms: 50,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.min_length == 0 {
            return Err(ConfigError::Invalid("min_length must be at least 1".into()));
        }
        if self.min_length > self.max_length {
            return Err(ConfigError::Invalid(format!(
                "min_length {} exceeds max_length {}",
                self.min_length, self.max_length
            )));
        }
        if self.highlight_ms == 0 {
            return Err(ConfigError::Invalid("highlight_ms must be positive".into()));
        }
        if self.tick_rate_ms == 0 {
            return Err(ConfigError::Invalid("tick_rate_ms must be positive".into()));
        }
        Ok(())
    }

    /// `length` pulled into the configured range
    pub fn clamp_length(&self, length: usize) -> usize {
        length.max(self.min_length).min(self.max_length)
    }

    pub fn highlight(&self) -> Duration {
        Duration::from_millis(self.highlight_ms)
    }

    pub fn tick_rate(&self) -> Duration {
        Duration::from_millis(self.tick_rate_ms)
    }
}

pub trait ConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError>;
    fn save(&self, cfg: &Config) -> Result<(), ConfigError>;

    /// Stored config, or defaults when it is missing or unusable
    fn load(&self) -> Config {
        self.load_or_default().config
    }

    /// Like `load`, but also says whether saving back would clobber a file
    /// that exists and could not be read.
    fn load_or_default(&self) -> Loaded {
        match self.try_load() {
            Ok(config) => Loaded {
                config,
                writable: true,
            },
            Err(ConfigError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => Loaded {
                config: Config::default(),
                writable: true,
            },
            Err(e) => {
                log::warn!("falling back to default config: {e}");
                Loaded {
                    config: Config::default(),
                    writable: false,
                }
            }
        }
    }
}

/// Result of `ConfigStore::load_or_default`
#[derive(Debug, Clone, PartialEq)]
pub struct Loaded {
    pub config: Config,
    /// false when the stored file exists but is unreadable or invalid
    pub writable: bool,
}

#[derive(Debug, Clone)]
pub struct FileConfigStore {
    path: PathBuf,
}

impl FileConfigStore {
    #[allow(clippy::new_without_default)]
    pub fn new() -> Self {
        let path = if let Some(pd) = ProjectDirs::from("", "", "klava") {
            pd.config_dir().join("config.json")
        } else {
            PathBuf::from("klava_config.json")
        };
        Self { path }
    }

    pub fn with_path<P: AsRef<Path>>(p: P) -> Self {
        Self {
            path: p.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Default for FileConfigStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigStore for FileConfigStore {
    fn try_load(&self) -> Result<Config, ConfigError> {
        let bytes = fs::read(&self.path)?;
        let cfg = serde_json::from_slice::<Config>(&bytes)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn save(&self, cfg: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_vec_pretty(cfg)?;
        fs::write(&self.path, data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use tempfile::tempdir;

    #[test]
    fn roundtrip_default_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config::default();
        store.save(&cfg).unwrap();
        let loaded = store.load();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn save_and_load_custom_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");
        let store = FileConfigStore::with_path(&path);
        let cfg = Config {
            length: 50,
            min_length: 5,
            max_length: 80,
            alphabet: AlphabetPreset::Full,
            highlight_ms: 150,
            tick_rate_ms: 20,
        };
        store.save(&cfg).unwrap();
        let loaded = store.try_load().unwrap();
        assert_eq!(cfg, loaded);
    }

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("absent.json"));

        assert_matches!(store.try_load(), Err(ConfigError::Io(_)));
        assert_eq!(store.load(), Config::default());
        assert!(store.load_or_default().writable);
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, b"{ not json").unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(ConfigError::Parse(_)));
        assert_eq!(store.load(), Config::default());

        let loaded = store.load_or_default();
        assert_eq!(loaded.config, Config::default());
        assert!(!loaded.writable);
    }

    #[test]
    fn invalid_file_is_not_writable() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "min_length": 0 }"#).unwrap();
        let store = FileConfigStore::with_path(&path);

        assert_matches!(store.try_load(), Err(ConfigError::Invalid(_)));
        assert!(!store.load_or_default().writable);
    }

    #[test]
    fn valid_file_is_writable() {
        let dir = tempdir().unwrap();
        let store = FileConfigStore::with_path(dir.path().join("config.json"));
        store.save(&Config::default()).unwrap();

        assert!(store.load_or_default().writable);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, br#"{ "length": 33, "alphabet": "digits" }"#).unwrap();

        let cfg = FileConfigStore::with_path(&path).try_load().unwrap();

        assert_eq!(cfg.length, 33);
        assert_eq!(cfg.alphabet, AlphabetPreset::Digits);
        assert_eq!(cfg.highlight_ms, 300);
    }

    #[test]
    fn invalid_values_are_rejected() {
        let cfg = Config {
            min_length: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(ConfigError::Invalid(_)));

        let cfg = Config {
            min_length: 10,
            max_length: 5,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(ConfigError::Invalid(_)));

        let cfg = Config {
            highlight_ms: 0,
            ..Config::default()
        };
        assert_matches!(cfg.validate(), Err(ConfigError::Invalid(_)));

        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn clamp_length() {
        let cfg = Config::default();
        assert_eq!(cfg.clamp_length(0), 1);
        assert_eq!(cfg.clamp_length(20), 20);
        assert_eq!(cfg.clamp_length(1000), 200);
    }

    #[test]
    fn durations() {
        let cfg = Config::default();
        assert_eq!(cfg.highlight(), Duration::from_millis(300));
        assert_eq!(cfg.tick_rate(), Duration::from_millis(50));
    }
}
