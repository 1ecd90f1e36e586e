use std::sync::Arc;

use kanal::AsyncSender;
use verso_core::capture::CaptureController;
use verso_core::replay::Notifier;
use verso_types::{CopyStatus, NoticeLevel, PageCommand, Selection, TextCopiedResponse};

use crate::page::BridgeNotifier;
use crate::state::AppState;

pub async fn handle_copy(
    state: Arc<AppState>,
    selection: Selection,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    let notifier = BridgeNotifier::new(commands_tx.clone());
    let capture = CaptureController::new(&state.memory);

    match capture.on_copy(&selection).await {
        Ok(Some(response)) => report_copy(&response, &notifier),
        Ok(None) => {}
        Err(e) => {
            tracing::error!("Failed to store copied text: {}", e);
            notifier.notify(NoticeLevel::Error, "Error sending text.");
        }
    }

    Ok(())
}

/// Clipboard watcher input, already plain text
pub async fn handle_clipboard_text(
    state: Arc<AppState>,
    text: String,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    handle_copy(state, Selection::Plain { text }, commands_tx).await
}

fn report_copy(response: &TextCopiedResponse, notifier: &dyn Notifier) {
    match response.status {
        CopyStatus::Success => notifier.notify(NoticeLevel::Success, "Text copied and saved!"),
        CopyStatus::Duplicate => tracing::debug!("Copied text already stored"),
        CopyStatus::IgnoredModeActive => tracing::debug!("Copy ignored, translation mode active"),
    }
}
