use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use self::store::StoreConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;
use self::words::WordsConfig;

pub mod store;
pub mod translator;
pub mod ui;
pub mod words;

pub use translator::Provider;


#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreConfig,
    pub words: WordsConfig,
    pub translator: TranslatorConfig,
    pub ui: UiConfig,
}

impl Config {
    /// Defaults with environment overrides applied
    pub fn new() -> Self {
        let mut config = Self::default();
        config.apply_env();
        config
    }

    /// Read a JSON config file, then apply environment overrides
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config =
            serde_json::from_str(&data).map_err(|source| ConfigError::Parse {
                path: path.to_path_buf(),
                source,
            })?;
        config.apply_env();
        Ok(config)
    }

    /// Explicit path if given, else the user config file if present, else defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::info!("Loading config from {}", path.display());
            return Self::from_file(path);
        }

        match user_config_path() {
            Some(path) if path.exists() => {
                tracing::info!("Loading user config from {}", path.display());
                Self::from_file(&path)
            }
            _ => {
                tracing::debug!("No config file found, using defaults");
                Ok(Self::new())
            }
        }
    }

    fn apply_env(&mut self) {
        self.store.apply_env();
        self.words.apply_env();
        self.translator.apply_env();
    }
}

/// `<config_dir>/palavra/config.json`
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("palavra").join("config.json"))
}
