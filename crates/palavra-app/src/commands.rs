use std::path::Path;

use anyhow::Context;
use palavra_config::Config;
use palavra_core::word_list::{parse_frequency_list, write_word_list};
use palavra_core::{Session, WordList, pretranslate};
use palavra_store::VocabStore;
use palavra_translator::Resolver;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::signal;

use crate::controller::AppController;

/// Interactive flashcard session
pub async fn review(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;

    let mut rng = StdRng::from_entropy();
    let mut words = load_words(&config)?;
    if config.words.shuffle {
        words.shuffle(&mut rng);
    }

    let resolver = Resolver::from_config(&config.translator);
    if resolver.is_offline() {
        tracing::warn!("No translator available, unseen words need manual entry");
    }

    let session = Session::new(store, words, resolver, rng);
    let controller = AppController::new();
    let mut tasks = controller.spawn_tasks(session, config.ui.clone());

    let result = loop {
        tokio::select! {
            _ = signal::ctrl_c() => {
                tracing::info!("Shutdown requested");
                break Ok(());
            }
            joined = tasks.join_next() => match joined {
                None => break Ok(()),
                Some(Ok(Ok(()))) => continue,
                Some(Ok(Err(e))) => break Err(e),
                Some(Err(e)) => break Err(anyhow::Error::new(e).context("task panicked")),
            },
        }
    };

    controller.shutdown();
    while let Some(joined) = tasks.join_next().await {
        match joined {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::error!("task exited with error during shutdown: {e:#}"),
            Err(e) => tracing::error!("task failed during shutdown: {e}"),
        }
    }

    result
}

/// Frequency list ("word count" per line) to a plain word list
pub fn prepare(input: &Path, output: &Path) -> anyhow::Result<()> {
    let content = std::fs::read_to_string(input)
        .with_context(|| format!("failed to read {}", input.display()))?;
    let words = parse_frequency_list(&content);
    write_word_list(output, &words)?;

    println!("Wrote {} words to {}", words.len(), output.display());
    Ok(())
}

/// Look up every untranslated word of the configured list ahead of time
pub async fn pretranslate_all(config: Config) -> anyhow::Result<()> {
    let store = open_store(&config)?;
    let words = load_words(&config)?;
    let resolver = Resolver::from_config(&config.translator);
    if resolver.is_offline() {
        anyhow::bail!("pretranslation needs a translator; provider is set to none");
    }

    let report = pretranslate(&words, &store, &resolver, config.translator.batch_delay())
        .await
        .context("vocabulary store failure")?;

    println!(
        "Done. Translated: {}, Skipped: {}, Failed: {}",
        report.translated, report.skipped, report.failed
    );
    Ok(())
}

fn open_store(config: &Config) -> anyhow::Result<VocabStore> {
    VocabStore::open(&config.store.path).with_context(|| {
        format!(
            "failed to open vocabulary store at {}",
            config.store.path.display()
        )
    })
}

fn load_words(config: &Config) -> anyhow::Result<WordList> {
    WordList::load(&config.words.path).context("cannot start without a word list")
}
