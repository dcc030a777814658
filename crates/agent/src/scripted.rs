//! A provider that replays scripted responses.
//!
//! Stands in for a live model API so demos and tests can drive the whole
//! pipeline deterministically. Every request is recorded in call order,
//! which lets callers inspect exactly what each pipeline step sent.

use std::sync::{Mutex, MutexGuard};
use switchboard_core::error::ProviderError;
use switchboard_core::message::Message;
use switchboard_core::provider::{Provider, ProviderRequest, ProviderResponse, Usage};

struct ScriptState {
    replies: Vec<String>,
    requests: Vec<ProviderRequest>,
    served: usize,
}

pub struct ScriptedProvider {
    state: Mutex<ScriptState>,
}

impl ScriptedProvider {
    pub fn new<I, S>(replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: Mutex::new(ScriptState {
                replies: replies.into_iter().map(Into::into).collect(),
                requests: Vec::new(),
                served: 0,
            }),
        }
    }

    /// Requests seen so far, in call order. Includes the request that
    /// exhausted the script, if any.
    pub fn requests(&self) -> Vec<ProviderRequest> {
        self.lock().requests.clone()
    }

    /// How many replies have been served.
    pub fn served(&self) -> usize {
        self.lock().served
    }

    fn lock(&self) -> MutexGuard<'_, ScriptState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn estimate_tokens(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

#[async_trait::async_trait]
impl Provider for ScriptedProvider {
    fn name(&self) -> &str {
        "scripted"
    }

    async fn complete(&self, request: ProviderRequest) -> Result<ProviderResponse, ProviderError> {
        let mut state = self.lock();
        state.requests.push(request.clone());

        let call = state.served + 1;
        let Some(reply) = state.replies.get(state.served).cloned() else {
            return Err(ProviderError::ScriptExhausted {
                call,
                scripted: state.replies.len(),
            });
        };
        state.served += 1;

        let prompt_tokens: u32 = request
            .messages
            .iter()
            .map(|m| estimate_tokens(&m.content))
            .sum();
        let completion_tokens = estimate_tokens(&reply);

        Ok(ProviderResponse {
            message: Message::assistant(reply),
            usage: Some(Usage {
                prompt_tokens,
                completion_tokens,
                total_tokens: prompt_tokens + completion_tokens,
            }),
            model: request.model,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(model: &str, content: &str) -> ProviderRequest {
        ProviderRequest::new(model, vec![Message::user(content)])
    }

    #[tokio::test]
    async fn serves_replies_in_order() {
        let provider = ScriptedProvider::new(["first", "second"]);

        let a = provider.complete(request("m", "one")).await.unwrap();
        let b = provider.complete(request("m", "two")).await.unwrap();

        assert_eq!(a.message.content, "first");
        assert_eq!(b.message.content, "second");
        assert_eq!(provider.served(), 2);
    }

    #[tokio::test]
    async fn records_requests_and_echoes_model() {
        let provider = ScriptedProvider::new(["ok"]);

        let response = provider
            .complete(request("palmyra-fin", "estimate the PV"))
            .await
            .unwrap();

        assert_eq!(response.model, "palmyra-fin");
        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].messages[0].content, "estimate the PV");
    }

    #[tokio::test]
    async fn exhaustion_is_a_typed_error() {
        let provider = ScriptedProvider::new(["only one"]);
        provider.complete(request("m", "a")).await.unwrap();

        let err = provider.complete(request("m", "b")).await.unwrap_err();
        assert!(matches!(
            err,
            ProviderError::ScriptExhausted {
                call: 2,
                scripted: 1
            }
        ));
        assert_eq!(
            err.to_string(),
            "Script exhausted: call #2 exceeds the 1-reply script"
        );

        // The exhausting request is still recorded.
        assert_eq!(provider.requests().len(), 2);
        assert_eq!(provider.served(), 1);
    }

    #[tokio::test]
    async fn usage_counts_both_sides() {
        let provider = ScriptedProvider::new(["three word reply"]);
        let response = provider
            .complete(request("m", "a four word prompt"))
            .await
            .unwrap();

        let usage = response.usage.unwrap();
        assert_eq!(usage.prompt_tokens, 4);
        assert_eq!(usage.completion_tokens, 3);
        assert_eq!(usage.total_tokens, 7);
    }
}
