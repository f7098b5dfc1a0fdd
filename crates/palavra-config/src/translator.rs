use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Google,
    Deepl,
    /// Offline: every unseen word goes straight to manual entry
    None,
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(Provider::Google),
            "deepl" => Ok(Provider::Deepl),
            "none" | "off" | "offline" => Ok(Provider::None),
            other => Err(format!("unknown translator provider '{other}'")),
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Provider::Google => "google",
            Provider::Deepl => "deepl",
            Provider::None => "none",
        };
        f.write_str(name)
    }
}

fn default_provider() -> Provider {
    Provider::Google
}

fn default_from_lang() -> String {
    "pt".to_string()
}

fn default_to_lang() -> String {
    "en".to_string()
}

fn default_api_url() -> String {
    "https://api-free.deepl.com/v2/translate".to_string()
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_batch_delay_ms() -> u64 {
    500
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default = "default_provider")]
    pub provider: Provider,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    /// Only used by DeepL
    #[serde(default)]
    pub api_key: String,
    /// Only used by DeepL
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// A lookup running longer than this counts as failed
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Pause between lookups during bulk pretranslation
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_key: String::new(),
            api_url: default_api_url(),
            timeout_ms: default_timeout_ms(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

impl TranslatorConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn batch_delay(&self) -> Duration {
        Duration::from_millis(self.batch_delay_ms)
    }

    pub(crate) fn apply_env(&mut self) {
        if let Ok(value) = env::var("PALAVRA_TRANSLATOR") {
            match value.parse() {
                Ok(provider) => self.provider = provider,
                Err(e) => tracing::warn!("Ignoring PALAVRA_TRANSLATOR: {e}"),
            }
        }

        if let Ok(key) = env::var("DEEPL_API_KEY") {
            self.api_key = key;
        }

        if let Some(timeout_ms) = env::var("PALAVRA_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.timeout_ms = timeout_ms;
        }
    }
}
