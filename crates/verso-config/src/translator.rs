use std::env;

use serde::{Deserialize, Serialize};

fn default_model() -> String {
    "o4-mini-2025-04-16".to_string()
}

fn default_api_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_target_language() -> String {
    "Norwegian".to_string()
}

fn default_protected_terms() -> Vec<String> {
    vec!["B2B Lighting Company".to_string()]
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslatorConfig {
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Names that must reach the output untranslated
    #[serde(default = "default_protected_terms")]
    pub protected_terms: Vec<String>,
}

impl TranslatorConfig {
    pub fn new() -> Self {
        let defaults = Self::default();

        Self {
            api_key: env::var("OPENAI_API_KEY").unwrap_or(defaults.api_key),
            api_url: env::var("VERSO_API_URL").unwrap_or(defaults.api_url),
            model: env::var("VERSO_MODEL").unwrap_or(defaults.model),
            target_language: env::var("VERSO_TARGET_LANGUAGE")
                .unwrap_or(defaults.target_language),
            protected_terms: defaults.protected_terms,
        }
    }
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: default_api_url(),
            model: default_model(),
            target_language: default_target_language(),
            protected_terms: default_protected_terms(),
        }
    }
}
