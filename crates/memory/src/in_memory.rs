//! In-memory store — useful for testing and ephemeral sessions.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;
use switchboard_core::error::StoreError;
use switchboard_core::memory::{MemoryEntry, MemoryStore, RecallQuery};
use switchboard_core::preferences::{PreferenceLookup, PreferenceRecord, PREFERENCES_NAMESPACE};
use uuid::Uuid;

/// An in-memory store backing both the memory and the preference seams.
///
/// Memory entries live in a Vec, preference records in a map keyed by
/// `(namespace, caller_id)` with last-write-wins semantics. Locks are std
/// rather than tokio because preference lookups are synchronous.
pub struct InMemoryStore {
    entries: RwLock<Vec<MemoryEntry>>,
    preferences: RwLock<HashMap<(String, String), PreferenceRecord>>,
}

fn poisoned(what: &str) -> StoreError {
    StoreError::Storage(format!("{what} lock poisoned"))
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
            preferences: RwLock::new(HashMap::new()),
        }
    }

    /// File a preference record under `(namespace, caller_id)`.
    /// A later write for the same key replaces the earlier record.
    pub fn set_preference(
        &self,
        namespace: &str,
        caller_id: &str,
        record: PreferenceRecord,
    ) -> Result<(), StoreError> {
        let mut prefs = self
            .preferences
            .write()
            .map_err(|_| poisoned("preferences"))?;
        prefs.insert((namespace.to_string(), caller_id.to_string()), record);
        Ok(())
    }

    /// Shorthand: file a communication style under the preferences namespace.
    pub fn set_style(&self, caller_id: &str, style: &str) -> Result<(), StoreError> {
        self.set_preference(
            PREFERENCES_NAMESPACE,
            caller_id,
            PreferenceRecord::with_style(style),
        )
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceLookup for InMemoryStore {
    fn lookup(
        &self,
        namespace: &str,
        caller_id: &str,
    ) -> Result<Option<PreferenceRecord>, StoreError> {
        let prefs = self
            .preferences
            .read()
            .map_err(|_| poisoned("preferences"))?;
        Ok(prefs
            .get(&(namespace.to_string(), caller_id.to_string()))
            .cloned())
    }
}

#[async_trait]
impl MemoryStore for InMemoryStore {
    fn name(&self) -> &str {
        "in_memory"
    }

    async fn remember(&self, mut entry: MemoryEntry) -> Result<String, StoreError> {
        if entry.id.is_empty() {
            entry.id = Uuid::new_v4().to_string();
        }
        let id = entry.id.clone();
        self.entries
            .write()
            .map_err(|_| poisoned("entries"))?
            .push(entry);
        Ok(id)
    }

    async fn recall(&self, query: RecallQuery) -> Result<Vec<MemoryEntry>, StoreError> {
        let entries = self.entries.read().map_err(|_| poisoned("entries"))?;
        let query_lower = query.text.to_lowercase();
        let terms: Vec<&str> = query_lower.split_whitespace().collect();

        let mut results: Vec<MemoryEntry> = entries
            .iter()
            .filter(|e| e.caller_id == query.caller_id)
            .filter_map(|e| {
                let content_lower = e.content.to_lowercase();
                // Term occurrence count, normalized by content length so long
                // entries don't win on volume alone.
                let hits: usize = terms.iter().map(|t| content_lower.matches(t).count()).sum();
                if hits == 0 {
                    return None;
                }
                let mut e = e.clone();
                e.score = hits as f32 / (e.content.len() as f32 / 100.0).max(1.0);
                Some(e)
            })
            .collect();

        results.sort_by(|a, b| {
            b.score
                .partial_cmp(&a.score)
                .unwrap_or(std::cmp::Ordering::Equal)
        });
        results.truncate(query.limit);

        Ok(results)
    }

    async fn forget(&self, id: &str) -> Result<bool, StoreError> {
        let mut entries = self.entries.write().map_err(|_| poisoned("entries"))?;
        let len_before = entries.len();
        entries.retain(|e| e.id != id);
        Ok(entries.len() < len_before)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(self.entries.read().map_err(|_| poisoned("entries"))?.len())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries
            .write()
            .map_err(|_| poisoned("entries"))?
            .clear();
        Ok(())
    }
}
