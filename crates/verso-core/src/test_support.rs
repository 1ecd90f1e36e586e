use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use verso_config::resources::ResourcesConfig;
use verso_translator::{CompletionProvider, CompletionRequest, ProviderMetadata, TranslateError};
use verso_types::{NoticeLevel, Preferences, TextEntry, UrlEntry};

use crate::error::{InsertionError, StoreError};
use crate::replay::{ClipboardWriter, HostPage, Notifier};
use crate::resources::Resources;
use crate::storage::MemoryStorage;

/// Loads empty, refuses every save
pub struct FailingStorage;

impl MemoryStorage for FailingStorage {
    fn load_entries(&self) -> Result<Vec<TextEntry>, StoreError> {
        Ok(Vec::new())
    }

    fn save_entries(&self, _entries: &[TextEntry]) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }

    fn load_preferences(&self) -> Result<Preferences, StoreError> {
        Ok(Preferences::default())
    }

    fn save_preferences(&self, _preferences: &Preferences) -> Result<(), StoreError> {
        Err(StoreError::Io(std::io::Error::other("disk full")))
    }
}

pub struct FakePage {
    pub inserted: Vec<String>,
    refuse: bool,
}

impl FakePage {
    pub fn accepting() -> Self {
        Self {
            inserted: Vec::new(),
            refuse: false,
        }
    }

    pub fn refusing() -> Self {
        Self {
            inserted: Vec::new(),
            refuse: true,
        }
    }
}

#[async_trait::async_trait]
impl HostPage for FakePage {
    async fn insert_text(&mut self, text: &str) -> Result<(), InsertionError> {
        if self.refuse {
            return Err(InsertionError::Refused("read-only field".to_string()));
        }
        self.inserted.push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeClipboard {
    written: Mutex<Vec<String>>,
    broken: bool,
}

impl FakeClipboard {
    pub fn broken() -> Self {
        Self {
            written: Mutex::new(Vec::new()),
            broken: true,
        }
    }

    pub fn written(&self) -> Vec<String> {
        self.written.lock().unwrap().clone()
    }
}

impl ClipboardWriter for FakeClipboard {
    fn write_text(&self, text: &str) -> Result<(), InsertionError> {
        if self.broken {
            return Err(InsertionError::Clipboard("no clipboard".to_string()));
        }
        self.written.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notices: Mutex<Vec<(NoticeLevel, String)>>,
}

impl RecordingNotifier {
    pub fn levels(&self) -> Vec<NoticeLevel> {
        self.notices
            .lock()
            .unwrap()
            .iter()
            .map(|(level, _)| *level)
            .collect()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, level: NoticeLevel, message: &str) {
        self.notices.lock().unwrap().push((level, message.to_string()));
    }
}

/// Completion provider returning a canned reply or error
pub struct ScriptedProvider {
    reply: Option<String>,
    error: Mutex<Option<TranslateError>>,
    calls: AtomicUsize,
    last_request: Mutex<Option<CompletionRequest>>,
}

impl ScriptedProvider {
    pub fn replying(reply: &str) -> Self {
        Self {
            reply: Some(reply.to_string()),
            error: Mutex::new(None),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn failing(error: TranslateError) -> Self {
        Self {
            reply: None,
            error: Mutex::new(Some(error)),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<CompletionRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl CompletionProvider for ScriptedProvider {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        if let Some(error) = self.error.lock().unwrap().take() {
            return Err(error);
        }
        self.reply
            .clone()
            .ok_or_else(|| TranslateError::ApiError("no scripted reply".to_string()))
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "scripted".to_string(),
            requires_api_key: false,
        }
    }
}

/// Resources backed by temp files; keep the dir alive for the test
pub fn resources_with(keywords: &[&str], urls: &[(&str, &str)]) -> (tempfile::TempDir, Resources) {
    let dir = tempfile::tempdir().unwrap();
    let config = ResourcesConfig {
        keywords_path: dir.path().join("keywords.json"),
        urls_path: dir.path().join("urls.json"),
    };

    if !keywords.is_empty() {
        std::fs::write(&config.keywords_path, serde_json::to_string(keywords).unwrap()).unwrap();
    }
    if !urls.is_empty() {
        let table: Vec<UrlEntry> = urls
            .iter()
            .map(|(original, translated)| UrlEntry {
                original: original.to_string(),
                translated: translated.to_string(),
            })
            .collect();
        std::fs::write(&config.urls_path, serde_json::to_string(&table).unwrap()).unwrap();
    }

    let resources = Resources::load(&config);
    (dir, resources)
}

/// No keyword file at all
pub fn resources_with_urls(urls: &[(&str, &str)]) -> (tempfile::TempDir, Resources) {
    resources_with(&[], urls)
}
