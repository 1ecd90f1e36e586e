use verso_types::{CopyStatus, RemoveLastResponse, RemoveStatus, Selection, TextCopiedResponse};

use crate::error::StoreError;
use crate::store::{AppendOutcome, TranslationMemory};

/// Plain text of a selection, trimmed
pub fn extract_text(selection: &Selection) -> String {
    let text = match selection {
        Selection::EditableRange { value, start, end } => {
            let (from, to) = if start <= end { (*start, *end) } else { (*end, *start) };
            value.chars().skip(from).take(to - from).collect()
        }
        Selection::Fragment { markup } => strip_markup(markup),
        Selection::Plain { text } => text.clone(),
    };

    text.trim().to_string()
}

/// Text content of a markup fragment, tags dropped and entities decoded
fn strip_markup(markup: &str) -> String {
    scraper::Html::parse_fragment(markup)
        .root_element()
        .text()
        .collect()
}

/// Turns copy actions into translation-memory entries
pub struct CaptureController<'a> {
    memory: &'a TranslationMemory,
}

impl<'a> CaptureController<'a> {
    pub fn new(memory: &'a TranslationMemory) -> Self {
        Self { memory }
    }

    /// Handle a copy action; `None` when nothing usable was selected
    pub async fn on_copy(
        &self,
        selection: &Selection,
    ) -> Result<Option<TextCopiedResponse>, StoreError> {
        let text = extract_text(selection);
        if text.is_empty() {
            tracing::debug!("No text selected or selection is empty");
            return Ok(None);
        }

        tracing::debug!("Selected text: {}", text);
        self.text_copied(&text).await.map(Some)
    }

    /// `textCopied(text)`: store unless translation mode is active
    pub async fn text_copied(&self, text: &str) -> Result<TextCopiedResponse, StoreError> {
        if self.memory.mode_active().await {
            tracing::info!("Translation mode active, text not saved: {}", text);
            return Ok(TextCopiedResponse {
                status: CopyStatus::IgnoredModeActive,
                entry: None,
            });
        }

        let response = match self.memory.append(text).await? {
            AppendOutcome::Created(entry) => TextCopiedResponse {
                status: CopyStatus::Success,
                entry: Some(entry),
            },
            AppendOutcome::Duplicate(entry) => TextCopiedResponse {
                status: CopyStatus::Duplicate,
                entry: Some(entry),
            },
        };

        Ok(response)
    }

    /// `removeLastCopiedText()`
    pub async fn remove_last_copied_text(&self) -> Result<RemoveLastResponse, StoreError> {
        let response = match self.memory.remove_last().await? {
            Some(entry) => RemoveLastResponse {
                status: RemoveStatus::Success,
                removed: Some(entry),
            },
            None => RemoveLastResponse {
                status: RemoveStatus::NotFound,
                removed: None,
            },
        };

        Ok(response)
    }
}
