use std::sync::Arc;
use std::sync::atomic::AtomicBool;

use anyhow::Context;
use tokio::sync::{Mutex, RwLock};
use verso_config::Config;
use verso_core::batch::BatchRequester;
use verso_core::resources::Resources;
use verso_core::replay::ClipboardWriter;
use verso_core::session::ModeMachine;
use verso_core::storage::JsonFileStorage;
use verso_core::store::TranslationMemory;
use verso_io::clipboard::SystemClipboard;
use verso_translator::{CompletionProvider, OpenAiClient};

pub struct AppState {
    pub config: Arc<RwLock<Config>>,
    pub memory: Arc<TranslationMemory>,
    pub resources: Arc<Resources>,
    pub batch: Arc<BatchRequester>,
    /// Fallback target when the page refuses an insertion
    pub clipboard: Arc<dyn ClipboardWriter>,
    /// Per-page session: translation mode plus the armed selection
    pub session: Mutex<ModeMachine>,
    pub batch_running: AtomicBool,
}

impl AppState {
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        let storage = JsonFileStorage::from_config(&config.storage);
        let memory = TranslationMemory::open(storage).with_context(|| {
            format!(
                "failed to open translation memory in {}",
                config.storage.data_dir.display()
            )
        })?;

        let resources = Resources::load(&config.resources);

        if config.translator.api_key.is_empty() {
            tracing::warn!("No API key configured, batch translation will fail");
        }
        let provider: Arc<dyn CompletionProvider> = Arc::new(OpenAiClient::new(
            config.translator.api_key.clone(),
            config.translator.api_url.clone(),
        ));
        let batch = BatchRequester::from_config(provider, &config.translator);

        Ok(Self::with_parts(config, memory, resources, batch, Arc::new(SystemClipboard)).await)
    }

    pub async fn with_parts(
        config: Config,
        memory: TranslationMemory,
        resources: Resources,
        batch: BatchRequester,
        clipboard: Arc<dyn ClipboardWriter>,
    ) -> Self {
        let session = ModeMachine::new(memory.mode_active().await);

        Self {
            config: Arc::new(RwLock::new(config)),
            memory: Arc::new(memory),
            resources: Arc::new(resources),
            batch: Arc::new(batch),
            clipboard,
            session: Mutex::new(session),
            batch_running: AtomicBool::new(false),
        }
    }
}
