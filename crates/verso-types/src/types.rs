use serde::{Deserialize, Serialize};

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Something happened on the host page
    Page(PageEvent),
    /// New text seen by the clipboard watcher, treated as a copy action
    ClipboardText(String),
}

/// Events forwarded by the page bridge, one JSON text frame each
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageEvent {
    Copy { selection: Selection },
    Select { text: String },
    Paste,
    SetMode { active: bool },
    RemoveLast,
    /// Submit every untranslated entry to the translation service
    RequestTranslations,
    /// Reply to `insertText`: whether the page accepted the insertion
    InsertResult { ok: bool },
}

/// What the user had selected when a copy action fired
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Selection {
    /// Focus was on an editable control; `start..end` are char offsets into `value`
    EditableRange {
        value: String,
        start: usize,
        end: usize,
    },
    /// Free-form page selection as markup
    Fragment { markup: String },
    Plain { text: String },
}

/// Instructions sent back to the page bridge
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum PageCommand {
    /// First reply to every paste: let the page paste normally
    AllowDefault,
    /// First reply to every paste: cancel the default paste, a result follows
    PreventDefault,
    /// The page answers with `insertResult`
    InsertText { text: String },
    Notify { level: NoticeLevel, message: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}
