use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use verso_types::{AppEvent, PageCommand, PageEvent};

use crate::state::AppState;

/// Hand an event to the loop without reordering; drops only when the loop is saturated
fn forward(event_tx: &AsyncSender<AppEvent>, event: AppEvent) {
    match event_tx.try_send(event) {
        Ok(true) => {}
        Ok(false) => tracing::warn!("Event queue full, event dropped"),
        Err(e) => tracing::error!("Failed to send event to app: {}", e),
    }
}

/// Insertion replies bypass the event queue: the paste handler waiting
/// for one is itself running inside the event loop.
pub(crate) fn route_page_event(
    event_tx: &AsyncSender<AppEvent>,
    insert_results_tx: &AsyncSender<bool>,
    event: PageEvent,
) {
    match event {
        PageEvent::InsertResult { ok } => match insert_results_tx.try_send(ok) {
            Ok(true) => {}
            Ok(false) => tracing::warn!("No paste waiting on insertion reply, dropped"),
            Err(e) => tracing::error!("Failed to deliver insertion reply: {}", e),
        },
        event => forward(event_tx, AppEvent::Page(event)),
    }
}

/// Watcher for the page bridge websocket or the system clipboard
pub async fn watcher_io(
    state: Arc<AppState>,
    cancel: CancellationToken,
    event_tx: AsyncSender<AppEvent>,
    insert_results_tx: AsyncSender<bool>,
    commands_rx: AsyncReceiver<PageCommand>,
) -> anyhow::Result<()> {
    let (listen_to_ws, ws_url, poll) = {
        let config = state.config.read().await;
        (
            config.bridge.listen_to_ws,
            config.bridge.ws_url.clone(),
            Duration::from_millis(config.bridge.clipboard_poll_ms),
        )
    };

    if listen_to_ws {
        tracing::info!("Connecting to page bridge on {}", ws_url);

        verso_io::ws::start_ws_bridge(&ws_url, commands_rx, move |event| {
            route_page_event(&event_tx, &insert_results_tx, event);
        })
        .await?;

        cancel.cancelled().await;
        tracing::info!("Page bridge stopping");
    } else {
        tracing::info!("Starting clipboard watcher");

        // No page attached, commands only reach the log.
        let drain = tokio::spawn(async move {
            while let Ok(command) = commands_rx.recv().await {
                tracing::debug!("No page attached, dropping {:?}", command);
            }
        });

        let tx = event_tx.clone();
        tokio::select! {
            result = verso_io::clipboard::watch_clipboard(poll, move |text| {
                forward(&tx, AppEvent::ClipboardText(text));
            }) => {
                if let Err(e) = result {
                    tracing::error!("Clipboard watcher error: {}", e);
                }
            }
            _ = cancel.cancelled() => {
                tracing::info!("Clipboard watcher stopping");
            }
        }

        drain.abort();
    }

    Ok(())
}
