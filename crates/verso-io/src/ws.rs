use futures_util::{SinkExt, StreamExt};
use kanal::AsyncReceiver;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::Message;
use verso_types::{PageCommand, PageEvent};

/// Parse one bridge frame; unknown shapes are logged and skipped
pub fn parse_frame(text: &str) -> Option<PageEvent> {
    match serde_json::from_str(text) {
        Ok(event) => Some(event),
        Err(e) => {
            tracing::warn!("Ignoring unrecognized bridge frame ({}): {}", e, text);
            None
        }
    }
}

/// Connect to the page bridge.
///
/// Incoming text frames are decoded into [`PageEvent`]s for `on_event`;
/// commands received on `commands` are written back as JSON text frames.
pub async fn start_ws_bridge<F>(
    url: &str,
    commands: AsyncReceiver<PageCommand>,
    mut on_event: F,
) -> Result<(), anyhow::Error>
where
    F: FnMut(PageEvent) + Send + 'static,
{
    let (ws_stream, _) = connect_async(url).await?;
    let (mut write, mut read) = ws_stream.split();

    tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            if let Ok(msg) = msg
                && msg.is_text()
                && let Ok(text) = msg.to_text()
                && let Some(event) = parse_frame(text)
            {
                on_event(event);
            }
        }
        tracing::info!("Page bridge closed");
    });

    tokio::spawn(async move {
        while let Ok(command) = commands.recv().await {
            let json = match serde_json::to_string(&command) {
                Ok(json) => json,
                Err(e) => {
                    tracing::error!("Failed to encode page command: {}", e);
                    continue;
                }
            };
            if let Err(e) = write.send(Message::text(json)).await {
                tracing::error!("Failed to send page command: {}", e);
                break;
            }
        }
    });

    Ok(())
}
