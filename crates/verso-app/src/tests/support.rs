use std::sync::{Arc, Mutex};

use tempfile::TempDir;
use verso_config::Config;
use verso_config::resources::ResourcesConfig;
use verso_core::batch::BatchRequester;
use verso_core::error::InsertionError;
use verso_core::replay::ClipboardWriter;
use verso_core::resources::Resources;
use verso_core::storage::JsonFileStorage;
use verso_core::store::TranslationMemory;
use verso_translator::{
    CompletionProvider, CompletionRequest, PromptSettings, ProviderMetadata, TranslateError,
};
use verso_types::{PageCommand, UrlEntry};

use crate::page::PageLink;
use crate::state::AppState;

pub struct FixedReply(pub String);

#[async_trait::async_trait]
impl CompletionProvider for FixedReply {
    async fn complete(&self, _request: &CompletionRequest) -> Result<String, TranslateError> {
        Ok(self.0.clone())
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "fixed".to_string(),
            requires_api_key: false,
        }
    }
}

#[derive(Default)]
pub struct RecordingClipboard {
    pub written: Mutex<Vec<String>>,
}

impl ClipboardWriter for RecordingClipboard {
    fn write_text(&self, text: &str) -> Result<(), InsertionError> {
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

pub async fn test_state(urls: &[(&str, &str)], reply: &str) -> (TempDir, Arc<AppState>) {
    test_state_with(urls, reply, Arc::new(RecordingClipboard::default())).await
}

/// App state over real files in a temp dir
pub async fn test_state_with(
    urls: &[(&str, &str)],
    reply: &str,
    clipboard: Arc<RecordingClipboard>,
) -> (TempDir, Arc<AppState>) {
    let dir = tempfile::tempdir().unwrap();

    let mut config = Config::default();
    config.storage.data_dir = dir.path().join("data");
    config.resources = ResourcesConfig {
        keywords_path: dir.path().join("keywords.json"),
        urls_path: dir.path().join("urls.json"),
    };

    std::fs::write(&config.resources.keywords_path, r#"["lighting", "poles"]"#).unwrap();
    let table: Vec<UrlEntry> = urls
        .iter()
        .map(|(original, translated)| UrlEntry {
            original: original.to_string(),
            translated: translated.to_string(),
        })
        .collect();
    std::fs::write(
        &config.resources.urls_path,
        serde_json::to_string(&table).unwrap(),
    )
    .unwrap();

    let memory = TranslationMemory::open(JsonFileStorage::from_config(&config.storage)).unwrap();
    let resources = Resources::load(&config.resources);
    let batch = BatchRequester::new(
        Arc::new(FixedReply(reply.to_string())),
        PromptSettings {
            model: "test-model".to_string(),
            target_language: "Norwegian".to_string(),
            protected_terms: vec![],
        },
    );

    let state = AppState::with_parts(
        config,
        memory,
        resources,
        batch,
        clipboard,
    )
    .await;

    (dir, Arc::new(state))
}

/// Page end of the bridge: records every command and answers each
/// `insertText` with a fixed `insertResult`
pub struct FakeBridge {
    pub link: PageLink,
    received: Arc<Mutex<Vec<PageCommand>>>,
}

impl FakeBridge {
    pub fn accepting() -> Self {
        Self::spawn(true)
    }

    /// A page whose focused field rejects programmatic insertion
    pub fn refusing() -> Self {
        Self::spawn(false)
    }

    fn spawn(accept: bool) -> Self {
        let (commands_tx, commands_rx) = kanal::bounded_async(64);
        let (results_tx, results_rx) = kanal::bounded_async(8);
        let received = Arc::new(Mutex::new(Vec::new()));

        let recorded = received.clone();
        tokio::spawn(async move {
            while let Ok(command) = commands_rx.recv().await {
                let answer = matches!(command, PageCommand::InsertText { .. });
                recorded.lock().unwrap().push(command);
                if answer && results_tx.send(accept).await.is_err() {
                    break;
                }
            }
        });

        Self {
            link: PageLink {
                commands: commands_tx,
                insert_results: results_rx,
            },
            received,
        }
    }

    /// Everything the page received since the last call
    pub async fn take(&self) -> Vec<PageCommand> {
        while !self.link.commands.is_empty() {
            tokio::task::yield_now().await;
        }
        // a command handed straight to the waiting recorder is off the
        // channel before it is recorded; let the recorder run
        tokio::task::yield_now().await;
        std::mem::take(&mut *self.received.lock().unwrap())
    }
}
