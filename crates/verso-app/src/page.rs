use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::time::timeout;
use verso_core::error::InsertionError;
use verso_core::replay::{HostPage, Notifier};
use verso_types::{NoticeLevel, PageCommand};

/// How long the page gets to answer an `insertText`
const INSERT_REPLY_TIMEOUT: Duration = Duration::from_secs(2);

/// Both directions of the bridge the event handlers need
#[derive(Clone)]
pub struct PageLink {
    pub commands: AsyncSender<PageCommand>,
    /// `insertResult` replies, routed around the event queue
    pub insert_results: AsyncReceiver<bool>,
}

/// The connected page, reached through the bridge command channel
pub struct BridgePage {
    commands: AsyncSender<PageCommand>,
    results: AsyncReceiver<bool>,
}

impl BridgePage {
    pub fn new(link: &PageLink) -> Self {
        Self {
            commands: link.commands.clone(),
            results: link.insert_results.clone(),
        }
    }
}

#[async_trait::async_trait]
impl HostPage for BridgePage {
    async fn insert_text(&mut self, text: &str) -> Result<(), InsertionError> {
        // replies that arrived after an earlier insertion timed out
        while let Ok(Some(stale)) = self.results.try_recv() {
            tracing::debug!("Dropping stale insertion reply: {}", stale);
        }

        let command = PageCommand::InsertText {
            text: text.to_string(),
        };
        self.commands
            .send(command)
            .await
            .map_err(|e| InsertionError::Refused(e.to_string()))?;

        match timeout(INSERT_REPLY_TIMEOUT, self.results.recv()).await {
            Ok(Ok(true)) => Ok(()),
            Ok(Ok(false)) => Err(InsertionError::Refused("page refused insertion".to_string())),
            Ok(Err(e)) => Err(InsertionError::Refused(e.to_string())),
            Err(_) => Err(InsertionError::Refused(
                "no reply from page to insertion".to_string(),
            )),
        }
    }
}

/// Notices go to the log and, when a page is attached, to the page
pub struct BridgeNotifier {
    commands: Option<AsyncSender<PageCommand>>,
}

impl BridgeNotifier {
    pub fn new(commands: AsyncSender<PageCommand>) -> Self {
        Self {
            commands: Some(commands),
        }
    }

    /// Log-only notifier for one-shot CLI commands
    pub fn detached() -> Self {
        Self { commands: None }
    }
}

impl Notifier for BridgeNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        match level {
            NoticeLevel::Error => tracing::error!("{}", message),
            NoticeLevel::Warning => tracing::warn!("{}", message),
            NoticeLevel::Success | NoticeLevel::Info => tracing::info!("{}", message),
        }

        if let Some(commands) = &self.commands {
            let command = PageCommand::Notify {
                level,
                message: message.to_string(),
            };
            if let Err(e) = commands.try_send(command) {
                tracing::debug!("Notice not delivered to page: {}", e);
            }
        }
    }
}
