//! Review-cycle state machine.
//!
//! `Hidden --reveal--> Revealed --rate--> Hidden (next word)`, plus
//! `ManualEntry --commit--> Hidden (next word)` whenever a lookup fails.
//! `SessionState` is a plain value: every transition takes the current state
//! and hands back the next one.

use palavra_store::{StoreError, VocabStore};
use palavra_translator::Resolver;
use palavra_types::{Action, Phase, Status, View};
use rand::Rng;
use rand::rngs::StdRng;

use crate::WordList;
use crate::selector::next_word;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub current_word: Option<String>,
    pub revealed: bool,
    pub awaiting_manual_entry: bool,
}

impl SessionState {
    fn presenting(word: String) -> Self {
        Self {
            current_word: Some(word),
            revealed: false,
            awaiting_manual_entry: false,
        }
    }

    fn manual_entry(word: String) -> Self {
        Self {
            current_word: Some(word),
            revealed: false,
            awaiting_manual_entry: true,
        }
    }

    /// `None` before the first word is loaded
    pub fn phase(&self) -> Option<Phase> {
        self.current_word.as_ref()?;
        Some(if self.awaiting_manual_entry {
            Phase::ManualEntry
        } else if self.revealed {
            Phase::Revealed
        } else {
            Phase::Hidden
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    Continue(SessionState),
    Exit,
}

pub struct Session<R = StdRng> {
    store: VocabStore,
    words: WordList,
    resolver: Resolver,
    rng: R,
}

impl<R: Rng> Session<R> {
    pub fn new(store: VocabStore, words: WordList, resolver: Resolver, rng: R) -> Self {
        Self {
            store,
            words,
            resolver,
            rng,
        }
    }

    pub fn store(&self) -> &VocabStore {
        &self.store
    }

    pub fn words(&self) -> &WordList {
        &self.words
    }

    /// Load the first word of the session
    pub async fn start(&mut self) -> Result<SessionState, StoreError> {
        self.load_next().await
    }

    /// Apply one action. Actions that make no sense in the current phase leave
    /// the state untouched. Only store failures are returned as errors.
    pub async fn handle(
        &mut self,
        state: SessionState,
        action: Action,
    ) -> Result<Transition, StoreError> {
        let (Some(word), Some(phase)) = (state.current_word.clone(), state.phase()) else {
            return Ok(match action {
                Action::Exit => Transition::Exit,
                _ => Transition::Continue(state),
            });
        };

        let next = match (action, phase) {
            (Action::Exit, _) => {
                tracing::debug!("Session exit requested on '{}'", word);
                return Ok(Transition::Exit);
            }
            (Action::Reveal, Phase::Hidden) => {
                tracing::debug!("Revealing '{}'", word);
                SessionState {
                    revealed: true,
                    ..state
                }
            }
            (Action::Rate(status), Phase::Revealed) => {
                self.store.set_status(&word, status)?;
                tracing::debug!("Rated '{}' as {}", word, status);
                self.load_next().await?
            }
            (Action::CommitManualEntry(text), Phase::ManualEntry) => {
                let text = text.trim();
                if text.is_empty() {
                    tracing::debug!("Blank manual entry for '{}', prompting again", word);
                    state
                } else {
                    self.store.upsert(&word, text, None)?;
                    tracing::info!("Manual translation saved: '{}' -> '{}'", word, text);
                    self.load_next().await?
                }
            }
            (action, phase) => {
                tracing::debug!("Ignoring {:?} while {:?}", action, phase);
                state
            }
        };

        Ok(Transition::Continue(next))
    }

    /// What to show for `state`; `None` before a word is loaded
    pub fn view(&self, state: &SessionState) -> Result<Option<View>, StoreError> {
        let (Some(word), Some(phase)) = (state.current_word.as_ref(), state.phase()) else {
            return Ok(None);
        };

        let record = self.store.get(word)?;
        let progress = self.store.progress_summary()?;

        let translation = match phase {
            Phase::Revealed => record.as_ref().and_then(|r| r.translation.clone()),
            _ => None,
        };

        let rating_prompt = match phase {
            Phase::Revealed => Status::ALL.iter().map(|s| (s.level(), *s)).collect(),
            _ => Vec::new(),
        };

        Ok(Some(View {
            word: word.clone(),
            translation,
            phase,
            rating_prompt,
            current_status: record.map(|r| r.status),
            progress,
        }))
    }

    async fn load_next(&mut self) -> Result<SessionState, StoreError> {
        let word = next_word(&self.words, &self.store, &mut self.rng)?.to_string();
        self.load_word(word).await
    }

    async fn load_word(&mut self, word: String) -> Result<SessionState, StoreError> {
        if self.store.has_translation(&word)? {
            tracing::debug!("Presenting '{}'", word);
            return Ok(SessionState::presenting(word));
        }

        match self.resolver.resolve(&word).await {
            Ok(translation) => {
                self.store.upsert(&word, &translation, None)?;
                Ok(SessionState::presenting(word))
            }
            Err(_) => {
                tracing::debug!("Waiting for manual translation of '{}'", word);
                Ok(SessionState::manual_entry(word))
            }
        }
    }
}
