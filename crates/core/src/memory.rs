//! Memory trait — cross-session continuity for callers.
//!
//! The memory store lets the orchestrator recall what earlier sessions
//! concluded and persist a summary of the current one. Entries are scoped
//! to a caller; recall never crosses callers.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// One remembered fact or session summary for a caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemoryEntry {
    /// Unique ID (assigned by the store when empty).
    pub id: String,

    /// Which caller this memory belongs to.
    pub caller_id: String,

    /// The remembered text.
    pub content: String,

    /// Structured metadata (originating agent, topic, ...).
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,

    /// When this memory was created.
    pub created_at: DateTime<Utc>,

    /// Relevance score (set by recall).
    #[serde(default)]
    pub score: f32,
}

impl MemoryEntry {
    pub fn new(caller_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            id: String::new(),
            caller_id: caller_id.into(),
            content: content.into(),
            metadata: serde_json::Map::new(),
            created_at: Utc::now(),
            score: 0.0,
        }
    }

    /// Attach a string metadata field.
    pub fn with_metadata(mut self, key: &str, value: impl Into<String>) -> Self {
        self.metadata
            .insert(key.into(), serde_json::Value::String(value.into()));
        self
    }
}

/// A recall query scoped to one caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecallQuery {
    /// The search text.
    pub text: String,

    /// Whose memories to search.
    pub caller_id: String,

    /// Maximum number of results.
    #[serde(default = "default_limit")]
    pub limit: usize,
}

fn default_limit() -> usize {
    5
}

impl RecallQuery {
    pub fn new(text: impl Into<String>, caller_id: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            caller_id: caller_id.into(),
            limit: default_limit(),
        }
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// The memory store boundary.
///
/// Implementations: in-memory (testing, ephemeral sessions), none (no-op).
#[async_trait]
pub trait MemoryStore: Send + Sync {
    /// The store name (e.g. "in_memory", "none").
    fn name(&self) -> &str;

    /// Persist an entry, returning its id.
    async fn remember(&self, entry: MemoryEntry) -> std::result::Result<String, StoreError>;

    /// Recall entries relevant to the query, best first.
    async fn recall(&self, query: RecallQuery)
        -> std::result::Result<Vec<MemoryEntry>, StoreError>;

    /// Delete an entry by id. Returns whether anything was removed.
    async fn forget(&self, id: &str) -> std::result::Result<bool, StoreError>;

    /// Total number of stored entries.
    async fn count(&self) -> std::result::Result<usize, StoreError>;

    /// Remove all entries.
    async fn clear(&self) -> std::result::Result<(), StoreError>;
}
