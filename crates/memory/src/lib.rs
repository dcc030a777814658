//! Store implementations for Switchboard.
//!
//! Both stores implement the two core seams: `MemoryStore` for session
//! continuity and `PreferenceLookup` for per-caller personalization.

pub mod in_memory;
pub mod noop;

pub use in_memory::InMemoryStore;
pub use noop::NoopStore;
