//! Line-oriented terminal front end.
//!
//! Input is read on a plain thread (a blocking stdin read cannot be cancelled,
//! and would otherwise hold up runtime shutdown) and forwarded over a kanal
//! channel.

use std::io::BufRead;

use kanal::{AsyncReceiver, AsyncSender};
use palavra_config::ui::UiConfig;
use palavra_types::{Action, AppEvent, Phase, Status, View};
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    labels: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let input_rx = spawn_stdin_reader()?;
    let mut stdout = tokio::io::stdout();

    // Phase of the view on screen; None while a transition is in flight
    let mut phase: Option<Phase> = None;
    let mut input_open = true;

    loop {
        tokio::select! {
            _ = cancel.cancelled() => break,
            event = app_to_ui_rx.recv() => match event? {
                AppEvent::Render(view) => {
                    phase = Some(view.phase);
                    stdout.write_all(render(&view, &labels).as_bytes()).await?;
                    stdout.flush().await?;
                }
                AppEvent::Shutdown => break,
                AppEvent::Action(_) => {}
            },
            line = input_rx.recv(), if input_open => {
                let Ok(line) = line else {
                    tracing::debug!("[UI] Input closed, exiting session");
                    input_open = false;
                    ui_to_app_tx.send(AppEvent::Action(Action::Exit)).await?;
                    continue;
                };

                let Some(current) = phase else {
                    tracing::debug!("[UI] Busy, dropping input");
                    continue;
                };

                match parse_input(&line, current) {
                    Some(action) => {
                        phase = None;
                        ui_to_app_tx.send(AppEvent::Action(action)).await?;
                    }
                    None => tracing::debug!("[UI] Unrecognized input: {:?}", line),
                }
            }
        }
    }

    Ok(())
}

fn spawn_stdin_reader() -> anyhow::Result<AsyncReceiver<String>> {
    let (tx, rx) = kanal::bounded_async::<String>(64);
    let tx = tx.to_sync();

    std::thread::Builder::new()
        .name("palavra-stdin".into())
        .spawn(move || {
            for line in std::io::stdin().lock().lines() {
                let Ok(line) = line else { break };
                if tx.send(line).is_err() {
                    break;
                }
            }
        })?;

    Ok(rx)
}

/// Map one line of input to an action for the phase on screen
pub fn parse_input(line: &str, phase: Phase) -> Option<Action> {
    let input = line.trim();

    if input == ":q" {
        return Some(Action::Exit);
    }

    match phase {
        // Everything typed here is a translation; blank input is rejected downstream
        Phase::ManualEntry => Some(Action::CommitManualEntry(input.to_string())),
        Phase::Hidden => match input.to_ascii_lowercase().as_str() {
            "" | "r" | "space" => Some(Action::Reveal),
            "q" | "esc" | "quit" | "exit" => Some(Action::Exit),
            _ => None,
        },
        Phase::Revealed => match input.to_ascii_lowercase().as_str() {
            "q" | "esc" | "quit" | "exit" => Some(Action::Exit),
            other => other
                .parse::<u8>()
                .ok()
                .and_then(Status::from_level)
                .map(Action::Rate),
        },
    }
}

pub fn render(view: &View, labels: &UiConfig) -> String {
    let mut lines = vec![
        String::new(),
        "──────────── palavra ────────────".to_string(),
        format!("{}: {}", labels.source_label, view.word),
    ];
    if let Some(status) = view.current_status {
        lines.push(format!("Status: {status}"));
    }
    lines.push(String::new());

    match view.phase {
        Phase::Hidden => lines.push("Press ENTER to reveal the translation".to_string()),
        Phase::Revealed => {
            let translation = view.translation.as_deref().unwrap_or("?");
            lines.push(format!("{}: {}", labels.target_label, translation));
            lines.push(String::new());
            lines.push("How well do you know it?".to_string());
            lines.extend(
                view.rating_prompt
                    .iter()
                    .map(|(level, status)| format!("  {level}  {status}")),
            );
        }
        Phase::ManualEntry => {
            lines.push("No translation available.".to_string());
            lines.push("Enter translation manually (:q to quit):".to_string());
        }
    }

    let p = &view.progress;
    lines.push(String::new());
    lines.push(format!(
        "Progress: {} words | new {} · recognizable {} · comfortable {} · learned {}",
        p.total, p.new, p.recognizable, p.comfortable, p.learned
    ));

    let controls = match view.phase {
        Phase::Hidden => "enter reveal · q quit",
        Phase::Revealed => "1-4 rate · q quit",
        Phase::ManualEntry => "enter save · :q quit",
    };
    lines.push(format!("[{controls}]\n> "));

    lines.join("\n")
}
