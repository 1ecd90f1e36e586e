use std::sync::Arc;

use verso_core::replay::{PasteDecision, Replayer, intercept_paste};
use verso_types::PageCommand;

use crate::page::{BridgeNotifier, BridgePage, PageLink};
use crate::state::AppState;

/// The first command sent for every paste is `AllowDefault` or
/// `PreventDefault`; the bridge holds the page's paste until it arrives.
pub async fn handle_paste(state: Arc<AppState>, link: &PageLink) -> anyhow::Result<()> {
    let commands_tx = &link.commands;
    let decision = {
        let mut session = state.session.lock().await;
        intercept_paste(&mut session)
    };

    let job = match decision {
        PasteDecision::AllowDefault => {
            commands_tx.send(PageCommand::AllowDefault).await?;
            return Ok(());
        }
        PasteDecision::Intercept(job) => {
            commands_tx.send(PageCommand::PreventDefault).await?;
            job
        }
    };

    tracing::debug!("Paste intercepted: {:?}", job);

    let notifier = BridgeNotifier::new(commands_tx.clone());
    let mut page = BridgePage::new(link);
    let replayer = Replayer::new(
        &state.memory,
        &state.resources,
        state.clipboard.as_ref(),
        &notifier,
    );

    let outcome = replayer.replay(job, &mut page).await;
    tracing::debug!("Paste replay finished: {:?}", outcome);

    Ok(())
}
