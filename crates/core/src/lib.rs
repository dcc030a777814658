//! # Switchboard Core
//!
//! Domain types, traits, and error definitions for the Switchboard assistant
//! runtime. This crate has **zero framework dependencies** — it defines the
//! domain model that all other crates implement against.
//!
//! ## Design Philosophy
//!
//! Every subsystem is defined as a trait here. Implementations live in their
//! respective crates. This enables:
//! - Swapping implementations via configuration
//! - Easy testing with mock/stub implementations
//! - Clean dependency graph (all crates depend inward on core)

pub mod error;
pub mod memory;
pub mod message;
pub mod preferences;
pub mod provider;
pub mod request;

// Re-export key types at crate root for ergonomics
pub use error::{Error, ProviderError, ResolveError, Result, StoreError};
pub use memory::{MemoryEntry, MemoryStore, RecallQuery};
pub use message::{Message, Role};
pub use preferences::{
    PreferenceLookup, PreferenceRecord, DEFAULT_COMMUNICATION_STYLE, PREFERENCES_NAMESPACE,
};
pub use provider::{Provider, ProviderRequest, ProviderResponse, Usage};
pub use request::RequestContext;
