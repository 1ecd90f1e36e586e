use std::sync::Arc;
use std::time::Duration;

use tokio::sync::broadcast::error::RecvError;
use tokio_util::sync::CancellationToken;
use verso_core::store::StoreChange;

use crate::state::AppState;

/// Keep the page session in step with the persisted mode flag.
/// Deactivation from any writer drops a pending armed selection.
///
/// Changes made in this process arrive on the store broadcast. The stored
/// flag is also polled every `delta_time` so a toggle written by another
/// process (the CLI `mode` command) reaches a running session.
pub async fn mode_sync(state: Arc<AppState>, cancel: CancellationToken) -> anyhow::Result<()> {
    let mut changes = state.memory.subscribe();
    let poll = Duration::from_millis(state.config.read().await.delta_time.max(1));
    let mut ticker = tokio::time::interval(poll);
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            change = changes.recv() => match change {
                Ok(StoreChange::ModeChanged(active)) => {
                    tracing::debug!("Mode changed: {}", active);
                    state.session.lock().await.set_active(active);
                }
                Ok(_) => {}
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Missed {} store changes, resyncing mode", skipped);
                    let active = state.memory.mode_active().await;
                    state.session.lock().await.set_active(active);
                }
                Err(RecvError::Closed) => break,
            },
            _ = ticker.tick() => {
                let active = state.memory.mode_active().await;
                let mut session = state.session.lock().await;
                if session.is_active() != active {
                    tracing::debug!("Stored mode differs from session, now: {}", active);
                    session.set_active(active);
                }
            }
            _ = cancel.cancelled() => break,
        }
    }

    Ok(())
}
