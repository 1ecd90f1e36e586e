use std::mem;

/// Selection waiting to be replayed by the next paste
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Armed {
    #[default]
    Idle,
    Text(String),
    Url(String),
}

/// Absolute http(s) URL prefix
pub fn is_absolute_url(text: &str) -> bool {
    text.starts_with("http://") || text.starts_with("https://")
}

/// Translation-mode state of one page context.
///
/// Mirrors the persisted mode flag and holds at most one armed selection.
#[derive(Debug, Default)]
pub struct ModeMachine {
    active: bool,
    armed: Armed,
}

impl ModeMachine {
    pub fn new(active: bool) -> Self {
        Self {
            active,
            armed: Armed::Idle,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn armed(&self) -> &Armed {
        &self.armed
    }

    /// Follow the persisted flag. Turning mode off discards any armed selection.
    pub fn set_active(&mut self, active: bool) {
        if !active && self.armed != Armed::Idle {
            tracing::debug!("Mode disabled, discarding armed selection");
        }
        self.active = active;
        if !active {
            self.armed = Armed::Idle;
        }
    }

    /// Re-arm from a page selection. Ignored while mode is off or when blank.
    pub fn on_selection(&mut self, selection: &str) -> Option<&Armed> {
        if !self.active {
            return None;
        }

        let selection = selection.trim();
        if selection.is_empty() {
            return None;
        }

        self.armed = if is_absolute_url(selection) {
            tracing::debug!("URL selected for translation on paste: {}", selection);
            Armed::Url(selection.to_string())
        } else {
            tracing::debug!("Text selected for translation on paste: {}", selection);
            Armed::Text(selection.to_string())
        };
        Some(&self.armed)
    }

    /// Consume the armed selection, leaving `Idle`
    pub fn take_armed(&mut self) -> Armed {
        mem::take(&mut self.armed)
    }
}
