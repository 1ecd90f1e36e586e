//! Request/response shapes exchanged between the page side and the store side.

use serde::{Deserialize, Serialize};

use crate::entry::TextEntry;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CopyStatus {
    Success,
    Duplicate,
    IgnoredModeActive,
}

/// Reply to `textCopied(text)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextCopiedResponse {
    pub status: CopyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<TextEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RemoveStatus {
    Success,
    NotFound,
}

/// Reply to `removeLastCopiedText()`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveLastResponse {
    pub status: RemoveStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub removed: Option<TextEntry>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupStatus {
    Found,
    NotFound,
}

/// Reply to `findAndReplace(originalText)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindResponse {
    pub status: LookupStatus,
    #[serde(
        rename = "translatedText",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_text: Option<String>,
}

impl FindResponse {
    pub fn found(translated_text: impl Into<String>) -> Self {
        Self {
            status: LookupStatus::Found,
            translated_text: Some(translated_text.into()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: LookupStatus::NotFound,
            translated_text: None,
        }
    }
}

/// Reply to `findUrlTranslation(url)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FindUrlResponse {
    pub status: LookupStatus,
    #[serde(
        rename = "translatedUrl",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub translated_url: Option<String>,
}

impl FindUrlResponse {
    pub fn found(translated_url: impl Into<String>) -> Self {
        Self {
            status: LookupStatus::Found,
            translated_url: Some(translated_url.into()),
        }
    }

    pub fn not_found() -> Self {
        Self {
            status: LookupStatus::NotFound,
            translated_url: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    Success,
    Error,
}

/// Reply to `requestBatchTranslation(entries)`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchResponse {
    pub status: BatchStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Success,
            message: Some(message.into()),
            error: None,
        }
    }

    pub fn error(error: impl Into<String>) -> Self {
        Self {
            status: BatchStatus::Error,
            message: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_wire_names() {
        let response = TextCopiedResponse {
            status: CopyStatus::IgnoredModeActive,
            entry: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert_eq!(json, r#"{"status":"ignored_mode_active"}"#);

        let json = serde_json::to_string(&FindResponse::found("Hei")).unwrap();
        assert_eq!(json, r#"{"status":"found","translatedText":"Hei"}"#);
    }
}
