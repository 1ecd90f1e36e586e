use std::sync::Arc;

use kanal::AsyncSender;
use verso_core::replay::Notifier;
use verso_types::{NoticeLevel, PageCommand};

use crate::page::BridgeNotifier;
use crate::state::AppState;

pub async fn handle_set_mode(
    state: Arc<AppState>,
    active: bool,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    let notifier = BridgeNotifier::new(commands_tx.clone());

    if let Err(e) = state.memory.set_mode_active(active).await {
        tracing::error!("Failed to persist translation mode: {}", e);
        notifier.notify(NoticeLevel::Error, "Error saving translation mode.");
        return Ok(());
    }

    // Apply now so the next event already sees it; the change feed repeats it.
    state.session.lock().await.set_active(active);

    let message = if active {
        "Translation mode active."
    } else {
        "Translation mode off."
    };
    notifier.notify(NoticeLevel::Info, message);

    Ok(())
}
