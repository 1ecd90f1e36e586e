use std::sync::Arc;
use std::sync::atomic::Ordering;

use kanal::AsyncSender;
use verso_core::replay::Notifier;
use verso_types::{BatchResponse, BatchStatus, NoticeLevel, PageCommand};

use crate::page::BridgeNotifier;
use crate::state::AppState;

/// Runs in the background so page events keep flowing during the request.
pub async fn handle_batch_request(
    state: Arc<AppState>,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    let notifier = BridgeNotifier::new(commands_tx.clone());

    if state.batch_running.swap(true, Ordering::SeqCst) {
        notifier.notify(NoticeLevel::Warning, "Translation already in progress.");
        return Ok(());
    }

    let batch = state.memory.untranslated().await;
    if batch.is_empty() {
        state.batch_running.store(false, Ordering::SeqCst);
        notifier.notify(
            NoticeLevel::Info,
            "No new text to translate or all texts already have translations.",
        );
        return Ok(());
    }

    tracing::info!("Requesting translations for {} entries", batch.len());
    notifier.notify(NoticeLevel::Info, "Translation in progress...");

    tokio::spawn(async move {
        let response = state
            .batch
            .request_batch_translation(&state.memory, &state.resources, &batch)
            .await;
        state.batch_running.store(false, Ordering::SeqCst);
        report_batch(&response, &notifier);
    });

    Ok(())
}

pub fn report_batch(response: &BatchResponse, notifier: &dyn Notifier) {
    match response.status {
        BatchStatus::Success => notifier.notify(
            NoticeLevel::Success,
            response.message.as_deref().unwrap_or("Translations requested successfully!"),
        ),
        BatchStatus::Error => notifier.notify(
            NoticeLevel::Error,
            &format!(
                "Error from translation request: {}",
                response.error.as_deref().unwrap_or("Unknown error")
            ),
        ),
    }
}
