//! No-op store — discards everything, recalls nothing.
//!
//! Used when the memory backend is set to `none`: every run starts cold and
//! no preference record is ever found.

use async_trait::async_trait;
use switchboard_core::error::StoreError;
use switchboard_core::memory::{MemoryEntry, MemoryStore, RecallQuery};
use switchboard_core::preferences::{PreferenceLookup, PreferenceRecord};
use uuid::Uuid;

pub struct NoopStore;

impl NoopStore {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoopStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceLookup for NoopStore {
    fn lookup(
        &self,
        _namespace: &str,
        _caller_id: &str,
    ) -> Result<Option<PreferenceRecord>, StoreError> {
        Ok(None)
    }
}

#[async_trait]
impl MemoryStore for NoopStore {
    fn name(&self) -> &str {
        "none"
    }

    async fn remember(&self, entry: MemoryEntry) -> Result<String, StoreError> {
        // Hand back a plausible id so callers can't tell the write was dropped.
        if entry.id.is_empty() {
            Ok(Uuid::new_v4().to_string())
        } else {
            Ok(entry.id)
        }
    }

    async fn recall(&self, _query: RecallQuery) -> Result<Vec<MemoryEntry>, StoreError> {
        Ok(Vec::new())
    }

    async fn forget(&self, _id: &str) -> Result<bool, StoreError> {
        Ok(false)
    }

    async fn count(&self) -> Result<usize, StoreError> {
        Ok(0)
    }

    async fn clear(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
