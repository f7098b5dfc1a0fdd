use std::time::Duration;

use palavra_store::{StoreError, VocabStore};
use palavra_translator::Resolver;

use crate::WordList;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PretranslateReport {
    pub translated: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl PretranslateReport {
    pub fn total(&self) -> usize {
        self.translated + self.skipped + self.failed
    }
}

/// Resolve every word of `words` that has no translation yet.
///
/// `delay` is slept after each successful lookup and twice over after a
/// failed one, to stay under provider rate limits. Store errors abort.
pub async fn pretranslate(
    words: &WordList,
    store: &VocabStore,
    resolver: &Resolver,
    delay: Duration,
) -> Result<PretranslateReport, StoreError> {
    let total = words.len();
    let mut report = PretranslateReport::default();

    for (i, word) in words.iter().enumerate() {
        let position = i + 1;

        if store.has_translation(word)? {
            report.skipped += 1;
            continue;
        }

        match resolver.resolve(word).await {
            Ok(translation) => {
                store.upsert(word, &translation, None)?;
                report.translated += 1;
                tracing::info!("[{position}/{total}] {word} -> {translation}");
                pause(delay).await;
            }
            Err(e) => {
                report.failed += 1;
                tracing::warn!("[{position}/{total}] failed to translate '{word}': {e}");
                pause(delay * 2).await;
            }
        }
    }

    tracing::info!(
        "Pretranslation done. Translated: {}, Skipped: {}, Failed: {}",
        report.translated,
        report.skipped,
        report.failed
    );

    Ok(report)
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}
