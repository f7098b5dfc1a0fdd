use anyhow::Context;
use kanal::{AsyncReceiver, AsyncSender};
use palavra_core::{Session, SessionState, Transition};
use palavra_types::AppEvent;
use tokio_util::sync::CancellationToken;

/// App's main loop: one complete transition per received action
pub async fn event_loop(
    mut session: Session,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
    app_to_ui_tx: AsyncSender<AppEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let mut state = session
        .start()
        .await
        .context("failed to load the first word")?;
    let render = render_event(&session, &state)?;
    send_render(&app_to_ui_tx, render).await?;

    tracing::debug!("[EVENT_LOOP] Waiting for actions");
    loop {
        let event = tokio::select! {
            _ = cancel.cancelled() => {
                tracing::debug!("[EVENT_LOOP] Cancelled");
                return Ok(());
            }
            event = ui_to_app_rx.recv() => event?,
        };

        let AppEvent::Action(action) = event else {
            continue;
        };

        tracing::debug!("[EVENT_LOOP] Action received: {:?}", action);
        let transition = session
            .handle(state, action)
            .await
            .context("vocabulary store failure")?;
        match transition {
            Transition::Continue(next) => {
                state = next;
                let render = render_event(&session, &state)?;
                send_render(&app_to_ui_tx, render).await?;
            }
            Transition::Exit => {
                tracing::info!("Session finished");
                app_to_ui_tx.send(AppEvent::Shutdown).await?;
                return Ok(());
            }
        }
    }
}

/// The store connection is not `Sync`, so views are built before any await
fn render_event(session: &Session, state: &SessionState) -> anyhow::Result<Option<AppEvent>> {
    let view = session
        .view(state)
        .context("failed to read the vocabulary store")?;
    Ok(view.map(AppEvent::Render))
}

async fn send_render(
    app_to_ui_tx: &AsyncSender<AppEvent>,
    render: Option<AppEvent>,
) -> anyhow::Result<()> {
    if let Some(event) = render {
        app_to_ui_tx.send(event).await?;
    }
    Ok(())
}
