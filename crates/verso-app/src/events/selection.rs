use std::sync::Arc;

use kanal::AsyncSender;
use verso_core::replay::Notifier;
use verso_core::session::Armed;
use verso_types::{NoticeLevel, PageCommand};

use crate::page::BridgeNotifier;
use crate::state::AppState;

const URL_PREVIEW_CHARS: usize = 50;

pub async fn handle_selection(
    state: Arc<AppState>,
    text: String,
    commands_tx: &AsyncSender<PageCommand>,
) -> anyhow::Result<()> {
    let mut session = state.session.lock().await;

    match session.on_selection(&text) {
        Some(Armed::Url(url)) => {
            let preview: String = url.chars().take(URL_PREVIEW_CHARS).collect();
            BridgeNotifier::new(commands_tx.clone()).notify(
                NoticeLevel::Info,
                &format!("URL \"{preview}...\" ready for translation on paste."),
            );
        }
        Some(Armed::Text(text)) => tracing::debug!("Ready to translate: {}", text),
        Some(Armed::Idle) | None => {}
    }

    Ok(())
}
