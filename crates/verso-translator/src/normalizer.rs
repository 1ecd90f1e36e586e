//! Recovery of `{ID, translatedText}` pairs from an unreliable completion reply.
//!
//! The reply is run through an ordered chain of stages. Every stage is total:
//! it never fails, it only declines with `None`. The first stage that
//! recognizes the reply decides the result, even when that result is empty;
//! if every stage declines the result is empty.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use verso_types::TranslatedItem;

const ID_KEY: &str = "ID";
const TEXT_KEY: &str = "translatedText";

type Stage = fn(&str) -> Option<Vec<TranslatedItem>>;

const STAGES: &[(&str, Stage)] = &[("strict", strict_decode), ("scan", scan_fragments)];

/// Run the stages in order, the first one that recognizes the reply wins.
pub fn normalize_reply(raw: &str) -> Vec<TranslatedItem> {
    for (name, stage) in STAGES {
        if let Some(items) = stage(raw) {
            tracing::debug!("Normalizer stage '{}' recovered {} items", name, items.len());
            return items;
        }
    }

    tracing::debug!("Normalizer recovered nothing from {} bytes", raw.len());
    Vec::new()
}

/// Strict JSON decode of the whole reply.
///
/// Lists pass through element by element, a single `{ID, translatedText}`
/// record is wrapped, any other object is read as an `ID -> translation`
/// mapping. Scalars and undecodable text yield `None`.
pub fn strict_decode(raw: &str) -> Option<Vec<TranslatedItem>> {
    let value: Value = serde_json::from_str(raw).ok()?;

    match value {
        Value::Array(items) => Some(items.iter().filter_map(item_from_value).collect()),
        Value::Object(map) if map.contains_key(ID_KEY) && map.contains_key(TEXT_KEY) => {
            Some(record_from_map(&map).into_iter().collect())
        }
        Value::Object(map) => Some(items_from_mapping(&map)),
        _ => None,
    }
}

static FRAGMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#""ID"\s*:\s*"([^"]+)"\s*,\s*"translatedText"\s*:\s*"([^"]*?)"\s*(?:,|\})"#)
        .unwrap()
});

/// Pattern scan for `"ID": "..", "translatedText": ".."` fragments anywhere in
/// the text, in order of appearance.
pub fn scan_fragments(raw: &str) -> Option<Vec<TranslatedItem>> {
    let items: Vec<TranslatedItem> = FRAGMENT
        .captures_iter(raw)
        .map(|caps| TranslatedItem::new(&caps[1], &caps[2]))
        .collect();

    if items.is_empty() { None } else { Some(items) }
}

/// IDs arrive as strings or bare numbers
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// List element; missing fields read as empty and are skipped at merge
fn item_from_value(value: &Value) -> Option<TranslatedItem> {
    let Value::Object(map) = value else {
        return None;
    };
    let field = |key: &str| map.get(key).and_then(value_as_text).unwrap_or_default();

    Some(TranslatedItem {
        id: field(ID_KEY),
        translated_text: field(TEXT_KEY),
    })
}

fn record_from_map(map: &Map<String, Value>) -> Option<TranslatedItem> {
    let id = map.get(ID_KEY).and_then(value_as_text)?;
    let translated_text = map
        .get(TEXT_KEY)
        .and_then(value_as_text)
        .unwrap_or_default();

    Some(TranslatedItem { id, translated_text })
}

fn items_from_mapping(map: &Map<String, Value>) -> Vec<TranslatedItem> {
    map.iter()
        .filter_map(|(key, value)| match value {
            Value::String(text) => Some(TranslatedItem::new(key.as_str(), text.as_str())),
            Value::Object(nested) => {
                let text = nested.get(TEXT_KEY).and_then(value_as_text)?;
                let id = nested
                    .get(ID_KEY)
                    .and_then(value_as_text)
                    .filter(|id| !id.is_empty())
                    .unwrap_or_else(|| key.clone());
                Some(TranslatedItem::new(id, text))
            }
            _ => None,
        })
        .collect()
}
