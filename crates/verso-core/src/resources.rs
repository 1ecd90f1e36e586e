use std::path::{Path, PathBuf};

use tokio::sync::RwLock;
use verso_config::resources::ResourcesConfig;
use verso_types::UrlEntry;

use crate::error::LoadError;

pub struct ResourceLoader;

impl ResourceLoader {
    /// Keyword context: a JSON array of strings
    pub fn load_keywords(path: &Path) -> Result<Vec<String>, LoadError> {
        tracing::info!("Loading keywords from file: {}", path.display());
        let json = read(path)?;
        let keywords: Vec<String> =
            serde_json::from_str(&json).map_err(|e| LoadError::ParseError(e.to_string()))?;
        tracing::info!("Loaded {} keywords", keywords.len());
        Ok(keywords)
    }

    /// URL lookup table: a JSON array of `{original, translated}`
    pub fn load_url_table(path: &Path) -> Result<Vec<UrlEntry>, LoadError> {
        tracing::info!("Loading URL translations from file: {}", path.display());
        let json = read(path)?;
        let table: Vec<UrlEntry> =
            serde_json::from_str(&json).map_err(|e| LoadError::ParseError(e.to_string()))?;
        tracing::info!("Loaded {} URL translations", table.len());
        Ok(table)
    }
}

fn read(path: &Path) -> Result<String, LoadError> {
    if !path.exists() {
        return Err(LoadError::FileNotFound(path.display().to_string()));
    }
    Ok(std::fs::read_to_string(path)?)
}

/// Read-only tables shared by every page context.
///
/// A table that failed to load stays empty and is retried once the next time
/// it is needed.
pub struct Resources {
    keywords_path: PathBuf,
    urls_path: PathBuf,
    keywords: RwLock<Vec<String>>,
    urls: RwLock<Vec<UrlEntry>>,
}

impl Resources {
    /// Load both tables; failures are logged and leave the table empty
    pub fn load(config: &ResourcesConfig) -> Self {
        let keywords = load_or_empty(
            ResourceLoader::load_keywords(&config.keywords_path),
            "keywords",
        );
        let urls = load_or_empty(
            ResourceLoader::load_url_table(&config.urls_path),
            "URL translations",
        );

        Self {
            keywords_path: config.keywords_path.clone(),
            urls_path: config.urls_path.clone(),
            keywords: RwLock::new(keywords),
            urls: RwLock::new(urls),
        }
    }

    /// Nothing loaded yet; the first lookup triggers the load
    pub fn empty(config: &ResourcesConfig) -> Self {
        Self {
            keywords_path: config.keywords_path.clone(),
            urls_path: config.urls_path.clone(),
            keywords: RwLock::new(Vec::new()),
            urls: RwLock::new(Vec::new()),
        }
    }

    pub async fn keywords(&self) -> Vec<String> {
        self.keywords.read().await.clone()
    }

    /// Keyword context, reloading once if currently empty
    pub async fn ensure_keywords(&self) -> Vec<String> {
        {
            let keywords = self.keywords.read().await;
            if !keywords.is_empty() {
                return keywords.clone();
            }
        }

        tracing::info!("Keywords not loaded or empty, reloading");
        let mut keywords = self.keywords.write().await;
        if keywords.is_empty() {
            *keywords = load_or_empty(
                ResourceLoader::load_keywords(&self.keywords_path),
                "keywords",
            );
        }
        keywords.clone()
    }

    /// Number of URL rows, reloading once if currently empty
    pub async fn ensure_urls(&self) -> usize {
        {
            let urls = self.urls.read().await;
            if !urls.is_empty() {
                return urls.len();
            }
        }

        tracing::warn!("URL translations not loaded or empty, reloading");
        let mut urls = self.urls.write().await;
        if urls.is_empty() {
            *urls = load_or_empty(
                ResourceLoader::load_url_table(&self.urls_path),
                "URL translations",
            );
        }
        urls.len()
    }

    /// Translated URL for an exact original, reloading the table once if empty
    pub async fn find_url(&self, url: &str) -> Option<String> {
        self.ensure_urls().await;
        self.urls
            .read()
            .await
            .iter()
            .find(|entry| entry.original == url)
            .map(|entry| entry.translated.clone())
    }
}

fn load_or_empty<T>(result: Result<Vec<T>, LoadError>, what: &str) -> Vec<T> {
    match result {
        Ok(table) => table,
        Err(e) => {
            tracing::error!("Failed to load {}: {}", what, e);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(dir: &Path) -> ResourcesConfig {
        ResourcesConfig {
            keywords_path: dir.join("keywords.json"),
            urls_path: dir.join("urls.json"),
        }
    }

    #[tokio::test]
    async fn test_load_both_tables() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keywords.json"), r#"["lamper","lys"]"#).unwrap();
        std::fs::write(
            dir.path().join("urls.json"),
            r#"[{"original":"https://a.example/x","translated":"https://a.example/no/x"}]"#,
        )
        .unwrap();

        let resources = Resources::load(&config(dir.path()));
        assert_eq!(resources.keywords().await, vec!["lamper", "lys"]);
        assert_eq!(
            resources.find_url("https://a.example/x").await.as_deref(),
            Some("https://a.example/no/x")
        );
        assert_eq!(resources.find_url("https://a.example/y").await, None);
    }

    #[tokio::test]
    async fn test_missing_files_degrade_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        let resources = Resources::load(&config(dir.path()));

        assert!(resources.ensure_keywords().await.is_empty());
        assert_eq!(resources.find_url("https://a.example/x").await, None);
    }

    #[tokio::test]
    async fn test_unparseable_file_degrades_to_empty() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("keywords.json"), "lamper, lys").unwrap();

        let resources = Resources::load(&config(dir.path()));
        assert!(resources.keywords().await.is_empty());
    }

    #[tokio::test]
    async fn test_empty_tables_reload_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        let resources = Resources::load(&config(dir.path()));
        assert!(resources.keywords().await.is_empty());

        std::fs::write(dir.path().join("keywords.json"), r#"["lys"]"#).unwrap();
        std::fs::write(
            dir.path().join("urls.json"),
            r#"[{"original":"https://a.example/x","translated":"https://b.example/x"}]"#,
        )
        .unwrap();

        assert_eq!(resources.ensure_keywords().await, vec!["lys"]);
        assert_eq!(
            resources.find_url("https://a.example/x").await.as_deref(),
            Some("https://b.example/x")
        );
    }

    #[test]
    fn test_loader_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = ResourceLoader::load_keywords(&dir.path().join("none.json"));
        assert!(matches!(missing, Err(LoadError::FileNotFound(_))));

        let path = dir.path().join("bad.json");
        std::fs::write(&path, r#"{"original":1}"#).unwrap();
        assert!(matches!(
            ResourceLoader::load_url_table(&path),
            Err(LoadError::ParseError(_))
        ));
    }
}
