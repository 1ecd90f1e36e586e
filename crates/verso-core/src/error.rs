use verso_translator::TranslateError;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Stored data is corrupt: {0}")]
    Corrupt(String),

    #[error("No entry ID left after {0}")]
    IdsExhausted(u64),
}

/// Failure loading a bundled read-only table
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum BatchError {
    #[error("No texts provided for translation")]
    NoTexts,

    #[error("Keyword context could not be loaded, refusing to build the translation request")]
    MissingKeywordContext,

    #[error("Network or API error: {0}")]
    Upstream(#[from] TranslateError),

    #[error("Unexpected reply format: no translations could be extracted")]
    MalformedResponse,

    #[error("Failed to build request: {0}")]
    Request(#[from] serde_json::Error),

    #[error("Storage error: {0}")]
    Storage(#[from] StoreError),
}

/// The page refused programmatic insertion, or the clipboard was unavailable
#[derive(Debug, thiserror::Error)]
pub enum InsertionError {
    #[error("Page refused text insertion: {0}")]
    Refused(String),

    #[error("Clipboard unavailable: {0}")]
    Clipboard(String),
}
