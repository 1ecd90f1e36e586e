use std::sync::Arc;

use verso_config::translator::TranslatorConfig;
use verso_translator::{CompletionProvider, PromptSettings, build_request, normalize_reply};
use verso_types::{BatchItem, BatchResponse};

use crate::error::BatchError;
use crate::resources::Resources;
use crate::store::TranslationMemory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchReport {
    pub submitted: usize,
    pub recovered: usize,
    pub updated: usize,
}

impl BatchReport {
    pub fn message(&self) -> String {
        if self.updated == 0 {
            "No applicable translations found.".to_string()
        } else {
            format!("{} translations processed.", self.updated)
        }
    }
}

/// Sends untranslated entries to the completion service in one round trip.
///
/// Overlapping calls are not excluded; both may read the same entries and the
/// later merge wins.
pub struct BatchRequester {
    provider: Arc<dyn CompletionProvider>,
    settings: PromptSettings,
}

impl BatchRequester {
    pub fn new(provider: Arc<dyn CompletionProvider>, settings: PromptSettings) -> Self {
        Self { provider, settings }
    }

    pub fn from_config(provider: Arc<dyn CompletionProvider>, config: &TranslatorConfig) -> Self {
        Self::new(
            provider,
            PromptSettings {
                model: config.model.clone(),
                target_language: config.target_language.clone(),
                protected_terms: config.protected_terms.clone(),
            },
        )
    }

    pub async fn request(
        &self,
        memory: &TranslationMemory,
        resources: &Resources,
        batch: &[BatchItem],
    ) -> Result<BatchReport, BatchError> {
        if batch.is_empty() {
            return Err(BatchError::NoTexts);
        }

        let keywords = resources.ensure_keywords().await;
        if keywords.is_empty() {
            tracing::error!("Keyword context unavailable, batch request refused");
            return Err(BatchError::MissingKeywordContext);
        }

        if resources.ensure_urls().await == 0 {
            tracing::warn!("URL translations unavailable, continuing without them");
        }

        let request = build_request(&self.settings, &keywords, batch)?;
        tracing::info!(
            "Requesting {} translations from {}",
            batch.len(),
            self.provider.metadata().name
        );

        let reply = self.provider.complete(&request).await.map_err(|e| {
            tracing::error!("Translation request failed: {}", e);
            BatchError::Upstream(e)
        })?;

        let items = normalize_reply(&reply);
        if items.is_empty() {
            tracing::warn!("No translations recognized in reply: {}", reply);
            return Err(BatchError::MalformedResponse);
        }

        let updated = memory.merge_translations(&items).await?;

        Ok(BatchReport {
            submitted: batch.len(),
            recovered: items.len(),
            updated,
        })
    }

    /// `requestBatchTranslation(entries)`
    pub async fn request_batch_translation(
        &self,
        memory: &TranslationMemory,
        resources: &Resources,
        batch: &[BatchItem],
    ) -> BatchResponse {
        match self.request(memory, resources, batch).await {
            Ok(report) => BatchResponse::success(report.message()),
            Err(e) => BatchResponse::error(e.to_string()),
        }
    }
}
