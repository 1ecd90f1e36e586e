use std::sync::Arc;

use kanal::AsyncReceiver;
use verso_types::{AppEvent, PageEvent};

use crate::page::PageLink;
use crate::state::AppState;

pub mod batch_translate;
pub mod copy;
pub mod paste;
pub mod remove_last;
pub mod selection;
pub mod set_mode;

use batch_translate::handle_batch_request;
use copy::{handle_clipboard_text, handle_copy};
use paste::handle_paste;
use remove_last::handle_remove_last;
use selection::handle_selection;
use set_mode::handle_set_mode;

/// App's main loop. Events are handled one at a time, in arrival order.
pub async fn event_loop(
    state: Arc<AppState>,
    events_rx: AsyncReceiver<AppEvent>,
    link: PageLink,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = events_rx.recv().await?;
        handle_events(state.clone(), &link, event).await?;
    }
}

pub async fn handle_events(
    state: Arc<AppState>,
    link: &PageLink,
    event: AppEvent,
) -> anyhow::Result<()> {
    let commands_tx = &link.commands;
    match event {
        AppEvent::ClipboardText(text) => {
            tracing::debug!("Clipboard text received: {} chars", text.len());
            handle_clipboard_text(state, text, commands_tx).await?;
        }
        AppEvent::Page(event) => {
            tracing::debug!("Page event: {:?}", event);
            match event {
                PageEvent::Copy { selection } => {
                    handle_copy(state, selection, commands_tx).await?;
                }
                PageEvent::Select { text } => {
                    handle_selection(state, text, commands_tx).await?;
                }
                PageEvent::Paste => {
                    handle_paste(state, link).await?;
                }
                PageEvent::SetMode { active } => {
                    handle_set_mode(state, active, commands_tx).await?;
                }
                PageEvent::RemoveLast => {
                    handle_remove_last(state, commands_tx).await?;
                }
                PageEvent::RequestTranslations => {
                    handle_batch_request(state, commands_tx).await?;
                }
                PageEvent::InsertResult { ok } => {
                    tracing::debug!("Insertion reply outside a paste ignored: {}", ok);
                }
            }
        }
    }

    Ok(())
}
