use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Learner-assigned mastery level of a word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    New,
    Recognizable,
    Comfortable,
    Learned,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::New,
        Status::Recognizable,
        Status::Comfortable,
        Status::Learned,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::New => "new",
            Status::Recognizable => "recognizable",
            Status::Comfortable => "comfortable",
            Status::Learned => "learned",
        }
    }

    /// Rating level shown to the learner (1..=4)
    pub fn level(&self) -> u8 {
        match self {
            Status::New => 1,
            Status::Recognizable => 2,
            Status::Comfortable => 3,
            Status::Learned => 4,
        }
    }

    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Status::New),
            2 => Some(Status::Recognizable),
            3 => Some(Status::Comfortable),
            4 => Some(Status::Learned),
            _ => None,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status '{}'", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

impl FromStr for Status {
    type Err = UnknownStatus;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Status::New),
            "recognizable" => Ok(Status::Recognizable),
            "comfortable" => Ok(Status::Comfortable),
            "learned" => Ok(Status::Learned),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// One stored vocabulary entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WordRecord {
    pub word: String,
    pub translation: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressSummary {
    pub new: u64,
    pub recognizable: u64,
    pub comfortable: u64,
    pub learned: u64,
    pub total: u64,
}

impl ProgressSummary {
    pub fn count(&self, status: Status) -> u64 {
        match status {
            Status::New => self.new,
            Status::Recognizable => self.recognizable,
            Status::Comfortable => self.comfortable,
            Status::Learned => self.learned,
        }
    }

    pub fn count_mut(&mut self, status: Status) -> &mut u64 {
        match status {
            Status::New => &mut self.new,
            Status::Recognizable => &mut self.recognizable,
            Status::Comfortable => &mut self.comfortable,
            Status::Learned => &mut self.learned,
        }
    }
}

/// Discrete input consumed by the session controller
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Reveal,
    Rate(Status),
    CommitManualEntry(String),
    Exit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Hidden,
    Revealed,
    ManualEntry,
}

/// Everything a renderer needs to draw the current screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct View {
    pub word: String,
    /// Only present while the card is revealed
    pub translation: Option<String>,
    pub phase: Phase,
    pub rating_prompt: Vec<(u8, Status)>,
    pub current_status: Option<Status>,
    pub progress: ProgressSummary,
}

#[derive(Debug, Clone)]
pub enum AppEvent {
    Action(Action),
    Render(View),
    Shutdown,
}
