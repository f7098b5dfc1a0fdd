use std::path::PathBuf;

use clap::{Parser, Subcommand};
use palavra_config::Config;
use tracing_subscriber::EnvFilter;

mod commands;
mod controller;
mod events;
mod ui;


#[derive(Parser)]
#[command(name = "palavra", version, about = "Vocabulary flashcards with automatic translation")]
struct Cli {
    /// JSON config file (defaults to the user config, then built-in defaults)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Review words one at a time (default)
    Review,
    /// Turn a frequency list into a word list (first column of every line)
    Prepare {
        input: PathBuf,
        /// Defaults to the configured word list path
        output: Option<PathBuf>,
    },
    /// Translate every word of the list that has no translation yet
    Pretranslate,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("warning: failed to load .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Review) {
        Command::Review => commands::review(config).await,
        Command::Prepare { input, output } => {
            let output = output.unwrap_or_else(|| config.words.path.clone());
            commands::prepare(&input, &output)
        }
        Command::Pretranslate => commands::pretranslate_all(config).await,
    }
}
