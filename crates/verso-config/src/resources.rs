use std::env;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

fn default_keywords_path() -> PathBuf {
    PathBuf::from("resources/keywords.json")
}

fn default_urls_path() -> PathBuf {
    PathBuf::from("resources/url_translations.json")
}

/// Bundled read-only tables
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ResourcesConfig {
    /// JSON array of keyword strings
    #[serde(default = "default_keywords_path")]
    pub keywords_path: PathBuf,
    /// JSON array of `{original, translated}` rows
    #[serde(default = "default_urls_path")]
    pub urls_path: PathBuf,
}

impl ResourcesConfig {
    pub fn new() -> Self {
        let keywords_path = env::var("VERSO_KEYWORDS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_keywords_path());
        let urls_path = env::var("VERSO_URLS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_urls_path());

        Self {
            keywords_path,
            urls_path,
        }
    }
}

impl Default for ResourcesConfig {
    fn default() -> Self {
        Self {
            keywords_path: default_keywords_path(),
            urls_path: default_urls_path(),
        }
    }
}
