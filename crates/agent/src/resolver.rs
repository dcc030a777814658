//! Deterministic system-prompt resolution.
//!
//! Every model call in the pipeline starts from a prompt produced here. The
//! resolver stacks up to three layers, always in the same order:
//!
//! ```text
//! ┌────────────────────────────────────────────────┐
//! │ base                  (always)                 │
//! │ conversation_length   (message_count > 10)     │
//! │ preference            (stored record found)    │
//! └────────────────────────────────────────────────┘
//! ```
//!
//! Layers are joined with single newlines. The resolver holds no state of
//! its own, so the same context against the same preference data always
//! produces the same prompt.

use serde::Serialize;
use std::fmt;
use switchboard_core::error::ResolveError;
use switchboard_core::preferences::{PreferenceLookup, PREFERENCES_NAMESPACE};
use switchboard_core::request::RequestContext;
use tracing::debug;

/// Opening line of every resolved prompt.
pub const BASE_PROMPT: &str = "You are a helpful assistant.";

/// Message counts strictly above this add the conciseness reminder.
/// A conversation of exactly this length does not qualify.
pub const LONG_CONVERSATION_THRESHOLD: u32 = 10;

const LONG_CONVERSATION_PROMPT: &str = "This is a long conversation - be extra concise.";

// ── Types ─────────────────────────────────────────────────────────────────

/// Which rule produced a segment of the resolved prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextLayer {
    Base,
    ConversationLength,
    Preference,
}

impl fmt::Display for ContextLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ContextLayer::Base => "base",
            ContextLayer::ConversationLength => "conversation_length",
            ContextLayer::Preference => "preference",
        };
        write!(f, "{name}")
    }
}

/// Output of one resolution: ordered prompt segments tagged by layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedPrompt {
    segments: Vec<(ContextLayer, String)>,
}

impl ResolvedPrompt {
    /// The ordered `(layer, text)` pairs making up the prompt.
    pub fn segments(&self) -> &[(ContextLayer, String)] {
        &self.segments
    }

    pub fn has_layer(&self, layer: ContextLayer) -> bool {
        self.segments.iter().any(|(l, _)| *l == layer)
    }

    /// Join the segment texts into the final prompt string.
    pub fn render(&self) -> String {
        self.segments
            .iter()
            .map(|(_, text)| text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl fmt::Display for ResolvedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}

// ── Resolver ──────────────────────────────────────────────────────────────

/// Stateless prompt resolver.
///
/// Constructed once and shared; all request-specific input arrives through
/// [`resolve`](PromptResolver::resolve).
#[derive(Debug, Clone, Copy, Default)]
pub struct PromptResolver;

impl PromptResolver {
    pub fn new() -> Self {
        Self
    }

    /// Resolve the system prompt for one request.
    ///
    /// Performs exactly one preference lookup, and only after the context
    /// validates. A lookup returning no record is a normal outcome; a lookup
    /// that fails aborts resolution with the store's error intact.
    pub fn resolve(
        &self,
        context: &RequestContext,
        preferences: &dyn PreferenceLookup,
    ) -> Result<ResolvedPrompt, ResolveError> {
        context.validate()?;

        debug!(
            caller_id = %context.caller_id,
            message_count = context.message_count,
            "resolving system prompt"
        );

        let mut segments = vec![(ContextLayer::Base, BASE_PROMPT.to_string())];

        if context.message_count > LONG_CONVERSATION_THRESHOLD {
            debug!(
                message_count = context.message_count,
                "long conversation, adding conciseness reminder"
            );
            segments.push((
                ContextLayer::ConversationLength,
                LONG_CONVERSATION_PROMPT.to_string(),
            ));
        }

        match preferences.lookup(PREFERENCES_NAMESPACE, &context.caller_id)? {
            Some(record) => {
                let style = record.communication_style();
                debug!(style = %style, "applying stored communication style");
                segments.push((
                    ContextLayer::Preference,
                    format!("User prefers {style} responses."),
                ));
            }
            None => {
                debug!(caller_id = %context.caller_id, "no stored preferences");
            }
        }

        let resolved = ResolvedPrompt { segments };
        debug!(prompt = %resolved, "system prompt resolved");
        Ok(resolved)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{CountingLookup, FailingLookup};
    use switchboard_core::preferences::PreferenceRecord;
    use switchboard_memory::InMemoryStore;

    fn ctx(caller_id: &str, message_count: u32) -> RequestContext {
        RequestContext::new(caller_id, message_count)
    }

    #[test]
    fn short_conversation_without_record_yields_base_only() {
        let store = InMemoryStore::new();
        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 3), &store)
            .unwrap();

        assert_eq!(prompt.render(), "You are a helpful assistant.");
        assert!(prompt.has_layer(ContextLayer::Base));
        assert!(!prompt.has_layer(ContextLayer::ConversationLength));
        assert!(!prompt.has_layer(ContextLayer::Preference));
    }

    #[test]
    fn long_conversation_adds_conciseness_reminder() {
        let store = InMemoryStore::new();
        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 15), &store)
            .unwrap();

        assert_eq!(
            prompt.render(),
            "You are a helpful assistant.\nThis is a long conversation - be extra concise."
        );
    }

    #[test]
    fn threshold_is_strictly_greater() {
        let store = InMemoryStore::new();
        let resolver = PromptResolver::new();

        let at = resolver.resolve(&ctx("ashley", 10), &store).unwrap();
        assert!(!at.has_layer(ContextLayer::ConversationLength));

        let above = resolver.resolve(&ctx("ashley", 11), &store).unwrap();
        assert!(above.has_layer(ContextLayer::ConversationLength));
    }

    #[test]
    fn stored_style_is_woven_in() {
        let store = InMemoryStore::new();
        store.set_style("ashley", "formal").unwrap();

        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 5), &store)
            .unwrap();

        assert_eq!(
            prompt.render(),
            "You are a helpful assistant.\nUser prefers formal responses."
        );
    }

    #[test]
    fn record_without_style_falls_back_to_balanced() {
        let store = InMemoryStore::new();
        store
            .set_preference(PREFERENCES_NAMESPACE, "ashley", PreferenceRecord::new())
            .unwrap();

        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 11), &store)
            .unwrap();

        assert_eq!(
            prompt.render(),
            "You are a helpful assistant.\n\
             This is a long conversation - be extra concise.\n\
             User prefers balanced responses."
        );
    }

    #[test]
    fn layers_stack_in_fixed_order() {
        let store = InMemoryStore::new();
        store.set_style("ashley", "concise").unwrap();

        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 42), &store)
            .unwrap();

        let layers: Vec<ContextLayer> =
            prompt.segments().iter().map(|(layer, _)| *layer).collect();
        assert_eq!(
            layers,
            vec![
                ContextLayer::Base,
                ContextLayer::ConversationLength,
                ContextLayer::Preference
            ]
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let store = InMemoryStore::new();
        store.set_style("ashley", "formal").unwrap();
        let resolver = PromptResolver::new();

        let first = resolver.resolve(&ctx("ashley", 12), &store).unwrap();
        let second = resolver.resolve(&ctx("ashley", 12), &store).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn zero_message_count_resolves_to_base() {
        let store = InMemoryStore::new();
        let prompt = PromptResolver::new()
            .resolve(&ctx("ashley", 0), &store)
            .unwrap();
        assert_eq!(prompt.render(), BASE_PROMPT);
    }

    #[test]
    fn empty_caller_id_fails_before_lookup() {
        let lookup = CountingLookup::without_record();
        let err = PromptResolver::new()
            .resolve(&ctx("", 5), &lookup)
            .unwrap_err();

        assert!(matches!(err, ResolveError::EmptyCallerId));
        assert_eq!(lookup.calls(), 0);
    }

    #[test]
    fn exactly_one_lookup_per_resolution() {
        let lookup = CountingLookup::with_style("formal");
        PromptResolver::new()
            .resolve(&ctx("ashley", 3), &lookup)
            .unwrap();
        assert_eq!(lookup.calls(), 1);
    }

    #[test]
    fn lookup_failure_aborts_resolution() {
        let lookup = FailingLookup::new("connection reset by peer");
        let err = PromptResolver::new()
            .resolve(&ctx("ashley", 3), &lookup)
            .unwrap_err();

        assert!(matches!(err, ResolveError::Lookup(_)));
        assert!(err.to_string().contains("connection reset by peer"));
    }
}
