//! Error types for the Switchboard domain.
//!
//! Uses `thiserror` for ergonomic error definitions.
//! Each bounded context has its own error variant.

use thiserror::Error;

/// The top-level error type for all Switchboard operations.
#[derive(Debug, Error)]
pub enum Error {
    // --- Prompt resolution errors ---
    #[error("Resolve error: {0}")]
    Resolve(#[from] ResolveError),

    // --- Store errors ---
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    // --- Provider errors ---
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    // --- Configuration errors ---
    #[error("Configuration error: {message}")]
    Config { message: String },

    // --- Serialization ---
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // --- Generic ---
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;

// --- Bounded context errors ---

/// Errors from prompt resolution.
///
/// A failed preference lookup surfaces here unchanged; the resolver never
/// retries or substitutes a default for it.
#[derive(Debug, Clone, Error)]
pub enum ResolveError {
    #[error("caller_id must not be empty")]
    EmptyCallerId,

    #[error("Preference lookup failed: {0}")]
    Lookup(#[from] StoreError),
}

/// Errors from the memory and preference stores.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),
}

/// Errors from model providers.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    #[error("Script exhausted: call #{call} exceeds the {scripted}-reply script")]
    ScriptExhausted { call: usize, scripted: usize },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_error_displays_correctly() {
        let err = Error::Resolve(ResolveError::EmptyCallerId);
        assert!(err.to_string().contains("caller_id"));
    }

    #[test]
    fn lookup_failure_keeps_store_error_message() {
        let store_err = StoreError::QueryFailed("connection refused".into());
        let err: ResolveError = store_err.into();
        assert!(err.to_string().contains("Preference lookup failed"));
        assert!(err.to_string().contains("connection refused"));
    }

    #[test]
    fn provider_error_displays_correctly() {
        let err = Error::Provider(ProviderError::ScriptExhausted {
            call: 4,
            scripted: 3,
        });
        assert_eq!(
            err.to_string(),
            "Provider error: Script exhausted: call #4 exceeds the 3-reply script"
        );
    }

    #[test]
    fn script_exhaustion_reads_cleanly_with_one_reply() {
        let err = ProviderError::ScriptExhausted {
            call: 2,
            scripted: 1,
        };
        assert_eq!(
            err.to_string(),
            "Script exhausted: call #2 exceeds the 1-reply script"
        );
    }
}
