//! Shared test doubles for pipeline tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use switchboard_core::error::StoreError;
use switchboard_core::memory::{MemoryEntry, MemoryStore, RecallQuery};
use switchboard_core::preferences::{PreferenceLookup, PreferenceRecord};

/// A preference lookup that always fails with the given message.
pub struct FailingLookup {
    message: String,
}

impl FailingLookup {
    pub fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

impl PreferenceLookup for FailingLookup {
    fn lookup(
        &self,
        _namespace: &str,
        _caller_id: &str,
    ) -> Result<Option<PreferenceRecord>, StoreError> {
        Err(StoreError::QueryFailed(self.message.clone()))
    }
}

/// A preference lookup that counts calls and serves one fixed record.
pub struct CountingLookup {
    record: Option<PreferenceRecord>,
    calls: AtomicUsize,
}

impl CountingLookup {
    pub fn with_style(style: &str) -> Self {
        Self {
            record: Some(PreferenceRecord::with_style(style)),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn without_record() -> Self {
        Self {
            record: None,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl PreferenceLookup for CountingLookup {
    fn lookup(
        &self,
        _namespace: &str,
        _caller_id: &str,
    ) -> Result<Option<PreferenceRecord>, StoreError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.record.clone())
    }
}

/// A memory store whose recall and remember paths can be made to fail.
pub struct FailingStore {
    fail_recall: bool,
    fail_remember: bool,
}

impl FailingStore {
    /// Recall errors, writes succeed.
    pub fn recall_offline() -> Self {
        Self {
            fail_recall: true,
            fail_remember: false,
        }
    }

    /// Writes error, recall succeeds (empty).
    pub fn write_refused() -> Self {
        Self {
            fail_recall: false,
            fail_remember: true,
        }
    }
}

#[async_trait::async_trait]
impl MemoryStore for FailingStore {
    fn name(&self) -> &str {
        "failing"
    }

    async fn remember(&self, entry: MemoryEntry) -> Result<String, StoreError> {
        if self.fail_remember {
            return Err(StoreError::Storage("write refused".into()));
        }
        Ok(if entry.id.is_empty() {
            "stub-id".into()
        } else {
            entry.id
        })
    }

    async fn recall(&self, _query: RecallQuery) -> Result<Vec<MemoryEntry>, StoreError> {
        if self.fail_recall {
            return Err(StoreError::Storage("vector index offline".into()));
        }
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
