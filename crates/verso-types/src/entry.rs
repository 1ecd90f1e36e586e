use serde::{Deserialize, Serialize};

/// One original/translated pair of the translation memory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEntry {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "originalText")]
    pub original_text: String,
    /// Empty while the entry is untranslated
    #[serde(rename = "translatedText", default)]
    pub translated_text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl TextEntry {
    pub fn new(id: impl Into<String>, original_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            original_text: original_text.into(),
            translated_text: String::new(),
            tag: None,
        }
    }

    pub fn is_translated(&self) -> bool {
        !self.translated_text.is_empty()
    }

    /// Numeric value of the ID, if it is a decimal string
    pub fn numeric_id(&self) -> Option<u64> {
        self.id.trim().parse().ok()
    }

    pub fn to_batch_item(&self) -> BatchItem {
        BatchItem {
            id: self.id.clone(),
            original_text: self.original_text.clone(),
        }
    }
}

/// Row of the bundled URL lookup table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlEntry {
    pub original: String,
    pub translated: String,
}

/// Untranslated entry as submitted to the translation service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchItem {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "originalText")]
    pub original_text: String,
}

/// One recovered `{ID, translatedText}` pair from the service reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranslatedItem {
    #[serde(rename = "ID")]
    pub id: String,
    #[serde(rename = "translatedText", default)]
    pub translated_text: String,
}

impl TranslatedItem {
    pub fn new(id: impl Into<String>, translated_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            translated_text: translated_text.into(),
        }
    }
}

/// Persisted user switches
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    #[serde(rename = "modeActive")]
    pub mode_active: bool,
    #[serde(rename = "tagsEnabled")]
    pub tags_enabled: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_wire_keys() {
        let mut entry = TextEntry::new("4", "Hello");
        entry.translated_text = "Hei".to_string();

        let json = serde_json::to_value(&entry).unwrap();
        assert_eq!(json["ID"], "4");
        assert_eq!(json["originalText"], "Hello");
        assert_eq!(json["translatedText"], "Hei");
        assert!(json.get("tag").is_none());
    }

    #[test]
    fn test_entry_missing_translation_defaults_to_empty() {
        let entry: TextEntry =
            serde_json::from_str(r#"{"ID":"1","originalText":"Hello"}"#).unwrap();
        assert!(!entry.is_translated());
        assert_eq!(entry.numeric_id(), Some(1));
    }
}
