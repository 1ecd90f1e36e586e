use std::sync::Arc;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use verso_types::{AppEvent, PageCommand};

use crate::events::event_loop;
use crate::io::watcher_io;
use crate::mode_sync::mode_sync;
use crate::page::PageLink;
use crate::state::AppState;

/// Centralized channel management
pub struct ChannelSet {
    pub page_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub app_to_page: (AsyncSender<PageCommand>, AsyncReceiver<PageCommand>),
    pub insert_results: (AsyncSender<bool>, AsyncReceiver<bool>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            page_to_app: kanal::bounded_async(64),  // page and clipboard events
            app_to_page: kanal::bounded_async(256), // commands and notices
            insert_results: kanal::bounded_async(8), // page replies to insertText
        }
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(
            self.state.clone(),
            self.channels.page_to_app.1.clone(),
            PageLink {
                commands: self.channels.app_to_page.0.clone(),
                insert_results: self.channels.insert_results.1.clone(),
            },
        ));

        // Mode flag -> page session
        tasks.spawn(mode_sync(
            self.state.clone(),
            self.cancel_token.child_token(),
        ));

        // Watcher IO
        tasks.spawn(watcher_io(
            self.state.clone(),
            self.cancel_token.child_token(),
            self.channels.page_to_app.0.clone(),
            self.channels.insert_results.0.clone(),
            self.channels.app_to_page.1.clone(),
        ));

        tasks
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}
