use verso_types::BatchItem;

use crate::{ChatMessage, CompletionRequest};

/// Knobs for the fixed instruction block
#[derive(Debug, Clone)]
pub struct PromptSettings {
    pub model: String,
    pub target_language: String,
    pub protected_terms: Vec<String>,
}

fn system_instruction(target_language: &str) -> String {
    format!(
        "You are a translation assistant. Translate from any language into {target_language}. \
         Reply only with JSON following the requested schema."
    )
}

fn instruction_block(settings: &PromptSettings) -> String {
    let protected = if settings.protected_terms.is_empty() {
        String::new()
    } else {
        format!(
            "- Do not translate: {} and product names written in uppercase.\n",
            settings
                .protected_terms
                .iter()
                .map(|term| format!("\"{term}\""))
                .collect::<Vec<_>>()
                .join(", ")
        )
    };

    format!(
        "# Objective\n\
         Translate every \"originalText\" below into {lang}.\n\
         \n\
         # Rules\n\
         {protected}\
         - Keep a length similar to the original and keep its formatting and markup exactly.\n\
         - Never change URLs, file paths, HTML tags, attributes, placeholders (e.g. %%sitename%%), serialized arrays, code or technical IDs.\n\
         - Translate link text but not the link target.\n\
         - Use the SEO keywords from the context where they fit naturally.\n\
         \n\
         # Output format\n\
         Reply with a JSON array of objects, one per input, in input order:\n\
         [\n  {{\"ID\": \"<ID>\", \"translatedText\": \"<{lang} translation>\"}}\n]\n",
        lang = settings.target_language,
    )
}

/// Build the single completion request for a batch.
///
/// The keyword context and the batch are embedded as JSON so the service sees
/// exactly the IDs it has to echo back.
pub fn build_request(
    settings: &PromptSettings,
    keywords: &[String],
    batch: &[BatchItem],
) -> Result<CompletionRequest, serde_json::Error> {
    let keywords_json = serde_json::to_string(keywords)?;
    let batch_json = serde_json::to_string(batch)?;

    let user = format!(
        "{}\n# Context\n**SEO keywords:** {}\n**Texts to translate:** {}\n",
        instruction_block(settings),
        keywords_json,
        batch_json
    );

    Ok(CompletionRequest {
        model: settings.model.clone(),
        messages: vec![
            ChatMessage::system(system_instruction(&settings.target_language)),
            ChatMessage::user(user),
        ],
    })
}
