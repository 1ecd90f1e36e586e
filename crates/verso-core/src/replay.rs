//! Paste interception.
//!
//! Handling is split in two so the host can cancel the default paste
//! synchronously: [`intercept_paste`] decides and consumes the armed selection
//! inside the event, [`Replayer::replay`] does the lookup afterwards and writes
//! the result into the page.

use verso_types::{FindResponse, FindUrlResponse, NoticeLevel};

use crate::error::InsertionError;
use crate::resources::Resources;
use crate::session::{Armed, ModeMachine};
use crate::store::TranslationMemory;

/// Text insertion at the page's insertion point.
///
/// The page may refuse (read-only field, no focus); that is reported as
/// [`InsertionError::Refused`] so the caller can fall back to the clipboard.
#[async_trait::async_trait]
pub trait HostPage: Send {
    async fn insert_text(&mut self, text: &str) -> Result<(), InsertionError>;
}

/// System clipboard, used when the page refuses insertion
pub trait ClipboardWriter: Send + Sync {
    fn write_text(&self, text: &str) -> Result<(), InsertionError>;
}

/// Transient user-visible notices
pub trait Notifier: Send + Sync {
    fn notify(&self, level: NoticeLevel, message: &str);
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayJob {
    Text(String),
    Url(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteDecision {
    /// Nothing armed, let the page paste normally
    AllowDefault,
    /// Cancel the default paste, then run the job
    Intercept(ReplayJob),
}

/// Synchronous part of paste handling. Always leaves the machine `Idle`.
pub fn intercept_paste(mode: &mut ModeMachine) -> PasteDecision {
    match mode.take_armed() {
        Armed::Idle => PasteDecision::AllowDefault,
        Armed::Text(text) => PasteDecision::Intercept(ReplayJob::Text(text)),
        Armed::Url(url) => PasteDecision::Intercept(ReplayJob::Url(url)),
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplayOutcome {
    /// Translation inserted into the page
    Inserted(String),
    /// Page refused insertion, translation left on the clipboard
    CopiedToClipboard(String),
    /// URL had no translation, original inserted unchanged
    InsertedOriginal(String),
    /// Text had no translation, nothing inserted
    NotFound,
    /// Insertion and clipboard fallback both failed
    Failed(String),
}

/// `findAndReplace(originalText)`
pub async fn find_and_replace(memory: &TranslationMemory, original_text: &str) -> FindResponse {
    match memory.find_by_original(original_text).await {
        Some(entry) => {
            tracing::debug!("Found translation: {}", entry.translated_text);
            FindResponse::found(entry.translated_text)
        }
        None => {
            tracing::debug!("Translation not found");
            FindResponse::not_found()
        }
    }
}

/// `findUrlTranslation(url)`
pub async fn find_url_translation(resources: &Resources, url: &str) -> FindUrlResponse {
    match resources.find_url(url).await {
        Some(translated) => FindUrlResponse::found(translated),
        None => FindUrlResponse::not_found(),
    }
}

pub struct Replayer<'a> {
    memory: &'a TranslationMemory,
    resources: &'a Resources,
    clipboard: &'a dyn ClipboardWriter,
    notifier: &'a dyn Notifier,
}

impl<'a> Replayer<'a> {
    pub fn new(
        memory: &'a TranslationMemory,
        resources: &'a Resources,
        clipboard: &'a dyn ClipboardWriter,
        notifier: &'a dyn Notifier,
    ) -> Self {
        Self {
            memory,
            resources,
            clipboard,
            notifier,
        }
    }

    pub async fn replay(&self, job: ReplayJob, page: &mut dyn HostPage) -> ReplayOutcome {
        match job {
            ReplayJob::Url(url) => self.replay_url(url, page).await,
            ReplayJob::Text(text) => self.replay_text(text, page).await,
        }
    }

    async fn replay_url(&self, url: String, page: &mut dyn HostPage) -> ReplayOutcome {
        let response = find_url_translation(self.resources, &url).await;

        match response.translated_url {
            Some(translated) => {
                tracing::info!("URL translation found: {}", translated);
                self.insert_or_fallback(translated, page, "URL translated and inserted!")
                    .await
            }
            None => {
                tracing::info!("URL translation not found for: {}", url);
                self.notifier.notify(
                    NoticeLevel::Warning,
                    "URL translation not found. Pasting original URL.",
                );
                if let Err(e) = page.insert_text(&url).await {
                    tracing::warn!("Inserting original URL failed: {}", e);
                }
                ReplayOutcome::InsertedOriginal(url)
            }
        }
    }

    /// A miss blocks the paste with nothing inserted, unlike the URL path
    async fn replay_text(&self, text: String, page: &mut dyn HostPage) -> ReplayOutcome {
        let response = find_and_replace(self.memory, &text).await;

        match response.translated_text {
            Some(translated) => {
                self.insert_or_fallback(translated, page, "Text translated and inserted!")
                    .await
            }
            None => {
                tracing::info!("Translation not found for: {}", text);
                self.notifier
                    .notify(NoticeLevel::Warning, "Translation not found.");
                ReplayOutcome::NotFound
            }
        }
    }

    async fn insert_or_fallback(
        &self,
        text: String,
        page: &mut dyn HostPage,
        success: &str,
    ) -> ReplayOutcome {
        let Err(e) = page.insert_text(&text).await else {
            self.notifier.notify(NoticeLevel::Success, success);
            return ReplayOutcome::Inserted(text);
        };

        tracing::warn!("Text insertion failed ({}), trying clipboard fallback", e);
        match self.clipboard.write_text(&text) {
            Ok(()) => {
                self.notifier.notify(
                    NoticeLevel::Warning,
                    "Translation copied to clipboard (paste manually).",
                );
                ReplayOutcome::CopiedToClipboard(text)
            }
            Err(e) => {
                tracing::error!("Clipboard fallback failed: {}", e);
                self.notifier.notify(
                    NoticeLevel::Error,
                    "Translation found, but automatic insertion failed.",
                );
                ReplayOutcome::Failed(e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::InMemoryStorage;
    use crate::test_support::{FakeClipboard, FakePage, RecordingNotifier, resources_with_urls};
    use verso_types::{LookupStatus, TranslatedItem};

    async fn memory_with(original: &str, translated: &str) -> TranslationMemory {
        let memory = TranslationMemory::open(InMemoryStorage::new()).unwrap();
        memory.append(original).await.unwrap();
        memory
            .merge_translations(&[TranslatedItem::new("1", translated)])
            .await
            .unwrap();
        memory
    }

    #[test]
    fn test_idle_paste_allows_default() {
        let mut mode = ModeMachine::new(true);
        assert_eq!(intercept_paste(&mut mode), PasteDecision::AllowDefault);
    }

    #[test]
    fn test_armed_url_is_consumed_by_one_paste() {
        let mut mode = ModeMachine::new(true);
        mode.on_selection("https://a.example/x");

        assert_eq!(
            intercept_paste(&mut mode),
            PasteDecision::Intercept(ReplayJob::Url("https://a.example/x".to_string()))
        );
        assert_eq!(intercept_paste(&mut mode), PasteDecision::AllowDefault);
    }

    #[tokio::test]
    async fn test_text_hit_inserts_translation() {
        let memory = memory_with("Welcome", "Velkommen").await;
        let (_dir, resources) = resources_with_urls(&[]);
        let clipboard = FakeClipboard::default();
        let notifier = RecordingNotifier::default();
        let mut page = FakePage::accepting();

        let replayer = Replayer::new(&memory, &resources, &clipboard, &notifier);
        let outcome = replayer
            .replay(ReplayJob::Text("Welcome".to_string()), &mut page)
            .await;

        assert_eq!(outcome, ReplayOutcome::Inserted("Velkommen".to_string()));
        assert_eq!(page.inserted, vec!["Velkommen"]);
        assert_eq!(notifier.levels(), vec![NoticeLevel::Success]);
    }

    #[tokio::test]
    async fn test_text_miss_inserts_nothing() {
        let memory = memory_with("Welcome", "Velkommen").await;
        let (_dir, resources) = resources_with_urls(&[]);
        let clipboard = FakeClipboard::default();
        let notifier = RecordingNotifier::default();
        let mut page = FakePage::accepting();

        let replayer = Replayer::new(&memory, &resources, &clipboard, &notifier);
        let outcome = replayer
            .replay(ReplayJob::Text("Goodbye".to_string()), &mut page)
            .await;

        assert_eq!(outcome, ReplayOutcome::NotFound);
        assert!(page.inserted.is_empty());
        assert!(clipboard.written().is_empty());
        assert_eq!(notifier.levels(), vec![NoticeLevel::Warning]);
    }

    #[tokio::test]
    async fn test_url_hit_and_miss() {
        let memory = TranslationMemory::open(InMemoryStorage::new()).unwrap();
        let (_dir, resources) =
            resources_with_urls(&[("https://a.example/x", "https://a.example/no/x")]);
        let clipboard = FakeClipboard::default();
        let notifier = RecordingNotifier::default();
        let mut page = FakePage::accepting();
        let replayer = Replayer::new(&memory, &resources, &clipboard, &notifier);

        let hit = replayer
            .replay(ReplayJob::Url("https://a.example/x".to_string()), &mut page)
            .await;
        assert_eq!(hit, ReplayOutcome::Inserted("https://a.example/no/x".to_string()));

        let miss = replayer
            .replay(ReplayJob::Url("https://a.example/y".to_string()), &mut page)
            .await;
        assert_eq!(miss, ReplayOutcome::InsertedOriginal("https://a.example/y".to_string()));
        assert_eq!(page.inserted, vec!["https://a.example/no/x", "https://a.example/y"]);
    }

    #[tokio::test]
    async fn test_refused_insertion_falls_back_to_clipboard() {
        let memory = memory_with("Welcome", "Velkommen").await;
        let (_dir, resources) = resources_with_urls(&[]);
        let clipboard = FakeClipboard::default();
        let notifier = RecordingNotifier::default();
        let mut page = FakePage::refusing();

        let replayer = Replayer::new(&memory, &resources, &clipboard, &notifier);
        let outcome = replayer
            .replay(ReplayJob::Text("Welcome".to_string()), &mut page)
            .await;

        assert_eq!(outcome, ReplayOutcome::CopiedToClipboard("Velkommen".to_string()));
        assert_eq!(clipboard.written(), vec!["Velkommen"]);
        assert_eq!(notifier.levels(), vec![NoticeLevel::Warning]);
    }

    #[tokio::test]
    async fn test_insertion_and_clipboard_both_fail() {
        let memory = memory_with("Welcome", "Velkommen").await;
        let (_dir, resources) = resources_with_urls(&[]);
        let clipboard = FakeClipboard::broken();
        let notifier = RecordingNotifier::default();
        let mut page = FakePage::refusing();

        let replayer = Replayer::new(&memory, &resources, &clipboard, &notifier);
        let outcome = replayer
            .replay(ReplayJob::Text("Welcome".to_string()), &mut page)
            .await;

        assert!(matches!(outcome, ReplayOutcome::Failed(_)));
        assert_eq!(notifier.levels(), vec![NoticeLevel::Error]);
    }

    #[tokio::test]
    async fn test_lookup_contract_responses() {
        let memory = memory_with("Welcome", "Velkommen").await;
        let (_dir, resources) = resources_with_urls(&[("http://a", "http://b")]);

        let found = find_and_replace(&memory, "Welcome").await;
        assert_eq!(found, FindResponse::found("Velkommen"));
        assert_eq!(find_and_replace(&memory, "x").await.status, LookupStatus::NotFound);

        let url = find_url_translation(&resources, "http://a").await;
        assert_eq!(url.translated_url.as_deref(), Some("http://b"));
    }
}
