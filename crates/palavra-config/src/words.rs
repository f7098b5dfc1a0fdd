use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_path() -> PathBuf {
    PathBuf::from("portuguese.txt")
}

fn default_shuffle() -> bool {
    true
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct WordsConfig {
    /// Word list, one word per line
    #[serde(default = "default_path")]
    pub path: PathBuf,
    /// Randomize the list once at startup
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
}

impl Default for WordsConfig {
    fn default() -> Self {
        Self {
            path: default_path(),
            shuffle: default_shuffle(),
        }
    }
}

impl WordsConfig {
    pub(crate) fn apply_env(&mut self) {
        if let Ok(path) = env::var("PALAVRA_WORDS_FILE") {
            self.path = PathBuf::from(path);
        }
    }
}
