use std::time::Duration;

use arboard::Clipboard;
use tokio::time;
use verso_core::error::InsertionError;
use verso_core::replay::ClipboardWriter;

/// Polls the system clipboard and reports every new non-empty text
pub async fn watch_clipboard<F>(poll: Duration, mut on_text: F) -> Result<(), anyhow::Error>
where
    F: FnMut(String) + Send + 'static,
{
    let mut clipboard = Clipboard::new()?;
    let mut last_text = clipboard.get_text().unwrap_or_default();

    let mut interval = time::interval(poll);

    loop {
        interval.tick().await;
        if let Ok(text) = clipboard.get_text()
            && !text.is_empty()
            && text != last_text
        {
            last_text = text.clone();
            on_text(text);
        }
    }
}

/// Clipboard fallback for refused insertions
pub struct SystemClipboard;

impl ClipboardWriter for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), InsertionError> {
        let mut clipboard =
            Clipboard::new().map_err(|e| InsertionError::Clipboard(e.to_string()))?;
        clipboard
            .set_text(text.to_string())
            .map_err(|e| InsertionError::Clipboard(e.to_string()))
    }
}
