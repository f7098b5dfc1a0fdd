use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use rand::Rng;
use rand::seq::SliceRandom;

use crate::preprocess::{Preprocessor, WordPreprocessor};

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("word list is empty")]
    Empty,

    #[error("failed to read word list {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to write word list {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Candidate words for a session. Never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordList {
    words: Vec<String>,
}

impl WordList {
    /// Normalizes and de-duplicates `words`, keeping first occurrences in order
    pub fn from_words<I, S>(words: I) -> Result<Self, WordListError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let preprocessor = WordPreprocessor;
        let mut seen = HashSet::new();
        let words: Vec<String> = words
            .into_iter()
            .map(|w| preprocessor.process(w.as_ref()))
            .filter(|w| !w.is_empty())
            .filter(|w| seen.insert(w.clone()))
            .collect();

        if words.is_empty() {
            return Err(WordListError::Empty);
        }

        Ok(Self { words })
    }

    /// One word per line
    pub fn load(path: &Path) -> Result<Self, WordListError> {
        let content = fs::read_to_string(path).map_err(|source| WordListError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::from_words(content.lines())?;
        tracing::info!("Loaded {} words from {}", list.len(), path.display());
        Ok(list)
    }

    /// Randomize the order once; it stays fixed afterwards
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.words.shuffle(rng);
    }

    /// Uniformly random member
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> &str {
        &self.words[rng.gen_range(0..self.words.len())]
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.words.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.words
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.iter().any(|w| w == word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// First column of a frequency list (`"casa 12345"` -> `"casa"`)
pub fn parse_frequency_list(text: &str) -> Vec<String> {
    text.lines()
        .filter_map(|line| line.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

pub fn write_word_list(path: &Path, words: &[String]) -> Result<(), WordListError> {
    let mut content = words.join("\n");
    content.push('\n');
    fs::write(path, content).map_err(|source| WordListError::Write {
        path: path.to_path_buf(),
        source,
    })
}
