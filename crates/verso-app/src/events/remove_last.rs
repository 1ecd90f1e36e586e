use std::sync::Arc;

use kanal::AsyncSender;
use verso_core::capture::CaptureController;
use verso_core::replay::Notifier;
use verso_types::{NoticeLevel, PageCommand, RemoveStatus};

use crate::page::BridgeNotifier;
use crate::state::AppState;

pub async fn handle_remove_last(
    state: Arc<AppState>,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    let notifier = BridgeNotifier::new(commands_tx.clone());
    let capture = CaptureController::new(&state.memory);

    match capture.remove_last_copied_text().await {
        Ok(response) => match response.status {
            RemoveStatus::Success => notifier.notify(NoticeLevel::Warning, "Last copy deleted!"),
            RemoveStatus::NotFound => notifier.notify(NoticeLevel::Warning, "No copy to delete."),
        },
        Err(e) => {
            tracing::error!("Failed to remove last entry: {}", e);
            notifier.notify(NoticeLevel::Error, "Error during deletion.");
        }
    }

    Ok(())
}
