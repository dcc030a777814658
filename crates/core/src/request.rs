//! Request-scoped context descriptor.

use serde::{Deserialize, Serialize};

use crate::error::ResolveError;

/// Per-request facts handed to the prompt resolver by the hosting pipeline.
///
/// Built fresh for every request and never mutated downstream. The
/// `caller_id` is opaque: it is a lookup key, not an identity the runtime
/// inspects or validates beyond non-emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestContext {
    /// Stable identifier for the calling user or session.
    pub caller_id: String,

    /// How many messages the surrounding conversation has accumulated.
    pub message_count: u32,
}

impl RequestContext {
    pub fn new(caller_id: impl Into<String>, message_count: u32) -> Self {
        Self {
            caller_id: caller_id.into(),
            message_count,
        }
    }

    /// Reject contexts the resolver cannot act on.
    ///
    /// An empty `caller_id` would make the preference lookup meaningless,
    /// so it fails here before any store is touched.
    pub fn validate(&self) -> std::result::Result<(), ResolveError> {
        if self.caller_id.is_empty() {
            return Err(ResolveError::EmptyCallerId);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_context_passes() {
        let ctx = RequestContext::new("user-42", 7);
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn empty_caller_id_rejected() {
        let ctx = RequestContext::new("", 3);
        assert!(matches!(ctx.validate(), Err(ResolveError::EmptyCallerId)));
    }

    #[test]
    fn zero_message_count_is_valid() {
        let ctx = RequestContext::new("user-42", 0);
        assert!(ctx.validate().is_ok());
    }

    #[test]
    fn context_serialization_roundtrip() {
        let ctx = RequestContext::new("user-42", 11);
        let json = serde_json::to_string(&ctx).unwrap();
        let parsed: RequestContext = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, ctx);
    }
}
