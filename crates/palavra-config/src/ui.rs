use serde::{Deserialize, Serialize};

fn default_source_label() -> String {
    "Portuguese".to_string()
}

fn default_target_label() -> String {
    "Translation".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    #[serde(default = "default_source_label")]
    pub source_label: String,
    #[serde(default = "default_target_label")]
    pub target_label: String,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            source_label: default_source_label(),
            target_label: default_target_label(),
        }
    }
}
