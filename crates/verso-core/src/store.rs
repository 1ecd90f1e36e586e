use std::collections::HashMap;

use tokio::sync::{RwLock, RwLockReadGuard, broadcast};
use verso_types::{BatchItem, Preferences, TextEntry, TranslatedItem};

use crate::error::StoreError;
use crate::storage::MemoryStorage;

/// Tags given to the first entries when tagging is enabled, in order
pub const ENTRY_TAGS: [&str; 6] = [
    "Title_50-70_chars",
    "H1",
    "First_paragraph",
    "Focus_keyphrase",
    "SEO_Title_50-70_chars",
    "Meta_description_120-157_chars",
];

/// Result of [`TranslationMemory::append`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppendOutcome {
    Created(TextEntry),
    Duplicate(TextEntry),
}

/// Broadcast after every committed mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreChange {
    Appended(TextEntry),
    Removed(TextEntry),
    Updated(TextEntry),
    Merged { updated: usize },
    Replaced { len: usize },
    Cleared,
    ModeChanged(bool),
    TagsChanged(bool),
}

/// Ordered entries plus an ID index
#[derive(Debug, Clone, Default)]
struct MemoryTable {
    entries: Vec<TextEntry>,
    by_id: HashMap<String, usize>,
}

impl MemoryTable {
    fn new(entries: Vec<TextEntry>) -> Self {
        let mut table = Self {
            entries,
            by_id: HashMap::new(),
        };
        table.reindex();
        table
    }

    /// First occurrence wins when a manual edit introduced repeated IDs
    fn reindex(&mut self) {
        self.by_id.clear();
        for (index, entry) in self.entries.iter().enumerate() {
            self.by_id.entry(entry.id.clone()).or_insert(index);
        }
    }

    fn next_id(&self) -> Result<String, StoreError> {
        match self.entries.iter().filter_map(TextEntry::numeric_id).max() {
            None => Ok("1".to_string()),
            Some(max) => max
                .checked_add(1)
                .map(|id| id.to_string())
                .ok_or(StoreError::IdsExhausted(max)),
        }
    }

    fn find_original(&self, text: &str) -> Option<&TextEntry> {
        self.entries.iter().find(|entry| entry.original_text == text)
    }

    fn get_mut(&mut self, id: &str) -> Option<&mut TextEntry> {
        let index = *self.by_id.get(id)?;
        self.entries.get_mut(index)
    }

    fn apply_tags(&mut self, enabled: bool) {
        for (entry, tag) in self.entries.iter_mut().zip(ENTRY_TAGS) {
            entry.tag = enabled.then(|| tag.to_string());
        }
    }
}

/// Persisted translation memory.
///
/// Storage is the source of truth: the CLI and a running session may both
/// write the same data directory. Each mutation runs under one write lock,
/// re-reads the stored collection, changes it, saves it, and only then
/// commits it to the cache, so a failed save leaves memory untouched and no
/// writer in or out of the process loses another's update. Reads refresh the
/// cache first and fall back to it when storage cannot be read.
pub struct TranslationMemory {
    storage: Box<dyn MemoryStorage>,
    table: RwLock<MemoryTable>,
    preferences: RwLock<Preferences>,
    changes: broadcast::Sender<StoreChange>,
}

impl TranslationMemory {
    pub fn open(storage: impl MemoryStorage + 'static) -> Result<Self, StoreError> {
        let entries = storage.load_entries()?;
        let preferences = storage.load_preferences()?;
        let (changes, _) = broadcast::channel(64);

        tracing::info!(
            "Translation memory opened: {} entries, mode active: {}",
            entries.len(),
            preferences.mode_active
        );

        Ok(Self {
            storage: Box::new(storage),
            table: RwLock::new(MemoryTable::new(entries)),
            preferences: RwLock::new(preferences),
            changes,
        })
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreChange> {
        self.changes.subscribe()
    }

    fn publish(&self, change: StoreChange) {
        // no receivers is fine
        let _ = self.changes.send(change);
    }

    fn load_table(&self) -> Result<MemoryTable, StoreError> {
        Ok(MemoryTable::new(self.storage.load_entries()?))
    }

    /// Table refreshed from storage, downgraded to a read guard
    async fn fresh_table(&self) -> RwLockReadGuard<'_, MemoryTable> {
        let mut table = self.table.write().await;
        match self.load_table() {
            Ok(loaded) => *table = loaded,
            Err(e) => tracing::warn!("Reading stored entries failed, using cached copy: {}", e),
        }
        table.downgrade()
    }

    /// Preferences refreshed from storage.
    ///
    /// Flags changed by another writer are published like local changes.
    async fn fresh_preferences(&self) -> Preferences {
        let mut cached = self.preferences.write().await;
        let loaded = match self.storage.load_preferences() {
            Ok(loaded) => loaded,
            Err(e) => {
                tracing::warn!("Reading stored preferences failed, using cached copy: {}", e);
                return *cached;
            }
        };
        let previous = std::mem::replace(&mut *cached, loaded);
        drop(cached);

        if previous.mode_active != loaded.mode_active {
            tracing::info!("Translation mode changed outside this session: {}", loaded.mode_active);
            self.publish(StoreChange::ModeChanged(loaded.mode_active));
        }
        if previous.tags_enabled != loaded.tags_enabled {
            self.publish(StoreChange::TagsChanged(loaded.tags_enabled));
        }
        loaded
    }

    /// Store `text` under the next ID unless an entry already has it verbatim
    pub async fn append(&self, text: &str) -> Result<AppendOutcome, StoreError> {
        let tags_enabled = self.fresh_preferences().await.tags_enabled;
        let mut table = self.table.write().await;
        let mut next = self.load_table()?;

        if let Some(existing) = next.find_original(text) {
            tracing::debug!("Duplicate text, not stored (ID {})", existing.id);
            let existing = existing.clone();
            *table = next;
            return Ok(AppendOutcome::Duplicate(existing));
        }

        let mut entry = TextEntry::new(next.next_id()?, text);
        if tags_enabled {
            entry.tag = ENTRY_TAGS
                .get(next.entries.len())
                .map(|tag| tag.to_string());
        }
        next.entries.push(entry.clone());
        next.reindex();

        self.storage.save_entries(&next.entries)?;
        *table = next;
        drop(table);

        tracing::info!("Text saved with ID {}", entry.id);
        self.publish(StoreChange::Appended(entry.clone()));
        Ok(AppendOutcome::Created(entry))
    }

    pub async fn find_by_original(&self, text: &str) -> Option<TextEntry> {
        self.fresh_table().await.find_original(text).cloned()
    }

    pub async fn get(&self, id: &str) -> Option<TextEntry> {
        let table = self.fresh_table().await;
        let index = *table.by_id.get(id)?;
        table.entries.get(index).cloned()
    }

    pub async fn remove_last(&self) -> Result<Option<TextEntry>, StoreError> {
        let mut table = self.table.write().await;
        let mut next = self.load_table()?;
        if next.entries.is_empty() {
            tracing::debug!("Nothing to remove");
            *table = next;
            return Ok(None);
        }

        let removed = next.entries.pop();
        next.reindex();

        self.storage.save_entries(&next.entries)?;
        *table = next;
        drop(table);

        if let Some(removed) = &removed {
            tracing::info!("Last entry removed (ID {})", removed.id);
            self.publish(StoreChange::Removed(removed.clone()));
        }
        Ok(removed)
    }

    /// Apply recovered translations by ID; returns how many entries changed.
    ///
    /// Items with an empty translation or an unknown ID are skipped.
    pub async fn merge_translations(&self, batch: &[TranslatedItem]) -> Result<usize, StoreError> {
        let mut table = self.table.write().await;
        let mut next = self.load_table()?;
        let mut updated = 0;

        for item in batch {
            if item.translated_text.is_empty() {
                continue;
            }
            if let Some(entry) = next.get_mut(&item.id) {
                entry.translated_text = item.translated_text.clone();
                updated += 1;
            }
        }

        if updated > 0 {
            self.storage.save_entries(&next.entries)?;
        }
        *table = next;
        drop(table);

        if updated > 0 {
            tracing::info!("{} entries updated with translations", updated);
            self.publish(StoreChange::Merged { updated });
        }

        Ok(updated)
    }

    /// Manual edit of one entry's translation
    pub async fn set_translation(
        &self,
        id: &str,
        translated_text: &str,
    ) -> Result<Option<TextEntry>, StoreError> {
        let mut table = self.table.write().await;
        let mut next = self.load_table()?;

        let Some(entry) = next.get_mut(id) else {
            *table = next;
            return Ok(None);
        };
        entry.translated_text = translated_text.to_string();
        let entry = entry.clone();

        self.storage.save_entries(&next.entries)?;
        *table = next;
        drop(table);

        self.publish(StoreChange::Updated(entry.clone()));
        Ok(Some(entry))
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        self.storage.save_entries(&[])?;
        *table = MemoryTable::default();
        drop(table);

        tracing::info!("All entries cleared");
        self.publish(StoreChange::Cleared);
        Ok(())
    }

    /// Replace the whole collection, as the review panel's editor does
    pub async fn replace_all(&self, entries: Vec<TextEntry>) -> Result<(), StoreError> {
        let mut table = self.table.write().await;
        let next = MemoryTable::new(entries);

        self.storage.save_entries(&next.entries)?;
        let len = next.entries.len();
        *table = next;
        drop(table);

        self.publish(StoreChange::Replaced { len });
        Ok(())
    }

    pub async fn entries(&self) -> Vec<TextEntry> {
        self.fresh_table().await.entries.clone()
    }

    pub async fn len(&self) -> usize {
        self.fresh_table().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.fresh_table().await.entries.is_empty()
    }

    /// Entries still waiting for a translation, reduced to what the service needs
    pub async fn untranslated(&self) -> Vec<BatchItem> {
        self.fresh_table()
            .await
            .entries
            .iter()
            .filter(|entry| !entry.is_translated())
            .map(TextEntry::to_batch_item)
            .collect()
    }

    /// Case-insensitive substring search over both texts; blank term returns all
    pub async fn search(&self, term: &str) -> Vec<TextEntry> {
        let term = term.trim().to_lowercase();
        let table = self.fresh_table().await;

        if term.is_empty() {
            return table.entries.clone();
        }

        table
            .entries
            .iter()
            .filter(|entry| {
                entry.original_text.to_lowercase().contains(&term)
                    || entry.translated_text.to_lowercase().contains(&term)
            })
            .cloned()
            .collect()
    }

    pub async fn export_json(&self) -> Result<String, StoreError> {
        let table = self.fresh_table().await;
        Ok(serde_json::to_string_pretty(&table.entries)?)
    }

    pub async fn preferences(&self) -> Preferences {
        self.fresh_preferences().await
    }

    pub async fn mode_active(&self) -> bool {
        self.fresh_preferences().await.mode_active
    }

    pub async fn set_mode_active(&self, active: bool) -> Result<(), StoreError> {
        let mut preferences = self.preferences.write().await;
        let next = Preferences {
            mode_active: active,
            ..self.storage.load_preferences()?
        };

        self.storage.save_preferences(&next)?;
        *preferences = next;
        drop(preferences);

        tracing::info!("Translation mode set to: {}", active);
        self.publish(StoreChange::ModeChanged(active));
        Ok(())
    }

    /// Persist the tagging switch and tag or untag the first entries
    pub async fn set_tags_enabled(&self, enabled: bool) -> Result<(), StoreError> {
        let mut preferences = self.preferences.write().await;
        let mut table = self.table.write().await;

        let mut next = self.load_table()?;
        next.apply_tags(enabled);
        let next_preferences = Preferences {
            tags_enabled: enabled,
            ..self.storage.load_preferences()?
        };

        self.storage.save_preferences(&next_preferences)?;
        self.storage.save_entries(&next.entries)?;
        *preferences = next_preferences;
        *table = next;
        drop(table);
        drop(preferences);

        self.publish(StoreChange::TagsChanged(enabled));
        Ok(())
    }
}
