//! Stored caller preferences and the lookup seam.
//!
//! Preference records live in an externally owned keyspace addressed by
//! `(namespace, caller_id)`. The runtime reads them through the
//! [`PreferenceLookup`] trait and never writes through it; seeding and
//! updates are the store implementation's business.

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Namespace under which preference records are filed.
pub const PREFERENCES_NAMESPACE: &str = "preferences";

/// Style applied when a record exists but names none.
pub const DEFAULT_COMMUNICATION_STYLE: &str = "balanced";

/// A caller's stored preference record.
///
/// The payload is an open map so callers can file additional fields without
/// a schema change; the resolver only reads `communication_style`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PreferenceRecord {
    /// The stored key/value payload.
    #[serde(default)]
    pub value: serde_json::Map<String, serde_json::Value>,
}

impl PreferenceRecord {
    pub fn new() -> Self {
        Self::default()
    }

    /// A record carrying just a communication style.
    pub fn with_style(style: impl Into<String>) -> Self {
        let mut value = serde_json::Map::new();
        value.insert(
            "communication_style".into(),
            serde_json::Value::String(style.into()),
        );
        Self { value }
    }

    /// The caller's communication style.
    ///
    /// Falls back to [`DEFAULT_COMMUNICATION_STYLE`] when the field is
    /// absent or not a string.
    pub fn communication_style(&self) -> &str {
        self.value
            .get("communication_style")
            .and_then(|v| v.as_str())
            .unwrap_or(DEFAULT_COMMUNICATION_STYLE)
    }
}

/// Read access to namespaced per-caller records.
///
/// Implementations own the keyspace. Lookups are synchronous point-in-time
/// reads with no transactional guarantee: a record swapped concurrently may
/// or may not be observed. Each request reads exactly once.
pub trait PreferenceLookup: Send + Sync {
    /// Fetch the record filed under `(namespace, caller_id)`, if any.
    ///
    /// `Ok(None)` means the caller has no record; it is not an error.
    fn lookup(
        &self,
        namespace: &str,
        caller_id: &str,
    ) -> std::result::Result<Option<PreferenceRecord>, StoreError>;
}
