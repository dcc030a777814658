//! The orchestration pipeline.
//!
//! The orchestrator receives a query, recalls prior context, resolves the
//! caller's personalization, routes the query to a domain specialist,
//! delegates the task, synthesizes a final answer, and persists a session
//! summary for future runs.
//!
//! # Architecture
//!
//! ```text
//! User Query
//!      │
//!      ▼
//! ┌──────────────┐     ┌────────────────┐
//! │ Orchestrator │ ◄── │ Memory recall  │
//! │ (palmyra-x5) │ ◄── │ Personalization│
//! └──┬───────────┘     └────────────────┘
//!    │ routes
//!    ▼
//! ┌───────────┐ ┌─────────┐ ┌──────────┐
//! │ financial │ │ medical │ │ creative │
//! └───────────┘ └─────────┘ └──────────┘
//! ```
//!
//! Memory failures never abort a run: recall degrades to a placeholder and
//! a failed summary write is logged and dropped. A failed preference lookup
//! does abort, since silently skipping personalization would produce answers
//! the caller did not ask for.

use chrono::Utc;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use switchboard_core::error::Result;
use switchboard_core::memory::{MemoryEntry, MemoryStore, RecallQuery};
use switchboard_core::message::Message;
use switchboard_core::preferences::PreferenceLookup;
use switchboard_core::provider::{Provider, ProviderRequest};
use switchboard_core::request::RequestContext;
use tracing::{debug, info, warn};

use crate::resolver::{PromptResolver, ResolvedPrompt};
use crate::specialists::{self, layered_system, specialist, Domain, SpecialistAgent};

const NO_MEMORY_PLACEHOLDER: &str = "(No relevant prior memory found.)";

/// Per-domain model and temperature overrides.
#[derive(Debug, Clone, Default)]
pub struct SpecialistOverride {
    pub model: Option<String>,
    pub temperature: Option<f32>,
}

/// Result of one orchestrated run.
#[derive(Debug, Clone, Serialize)]
pub struct OrchestrationResult {
    /// The synthesized final answer.
    pub answer: String,
    /// Which specialist handled the query.
    pub specialist: Domain,
    /// The task the router phrased for the specialist.
    pub task: String,
    /// The specialist's raw answer, before synthesis.
    pub specialist_answer: String,
    /// How many prior memories informed the run.
    pub recalled: usize,
    /// Id of the stored session summary, if the write succeeded.
    pub summary_id: Option<String>,
}

/// Routes queries to domain specialists and synthesizes their answers.
pub struct Orchestrator {
    provider: Arc<dyn Provider>,
    store: Arc<dyn MemoryStore>,
    preferences: Arc<dyn PreferenceLookup>,
    resolver: PromptResolver,
    router_model: String,
    router_temperature: f32,
    recall_limit: usize,
    summary_max_chars: usize,
    max_tokens: Option<u32>,
    overrides: HashMap<Domain, SpecialistOverride>,
}

impl Orchestrator {
    pub fn new(
        provider: Arc<dyn Provider>,
        store: Arc<dyn MemoryStore>,
        preferences: Arc<dyn PreferenceLookup>,
    ) -> Self {
        let profile = specialists::orchestrator();
        Self {
            provider,
            store,
            preferences,
            resolver: PromptResolver::new(),
            router_model: profile.model.to_string(),
            router_temperature: profile.temperature,
            recall_limit: 5,
            summary_max_chars: 800,
            max_tokens: None,
            overrides: HashMap::new(),
        }
    }

    /// Use a different model for routing and synthesis.
    pub fn with_router_model(mut self, model: impl Into<String>, temperature: f32) -> Self {
        self.router_model = model.into();
        self.router_temperature = temperature;
        self
    }

    /// How many prior memories to recall per run.
    pub fn with_recall_limit(mut self, limit: usize) -> Self {
        self.recall_limit = limit;
        self
    }

    /// Character budget for the persisted session summary.
    pub fn with_summary_max_chars(mut self, max_chars: usize) -> Self {
        self.summary_max_chars = max_chars;
        self
    }

    /// Token cap applied to every model call.
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Override one specialist's model or temperature.
    pub fn with_specialist_override(
        mut self,
        domain: Domain,
        spec_override: SpecialistOverride,
    ) -> Self {
        self.overrides.insert(domain, spec_override);
        self
    }

    /// Run the full pipeline for one query.
    pub async fn run(
        &self,
        topic: &str,
        context: &RequestContext,
    ) -> Result<OrchestrationResult> {
        info!(caller_id = %context.caller_id, topic, "Orchestrator: starting run");

        // ── Step 1: Recall prior context ──
        let (memory_context, recalled) = self.recall_context(topic, &context.caller_id).await;

        // ── Step 2: Resolve personalization ──
        let personalization = self.resolver.resolve(context, self.preferences.as_ref())?;

        // ── Step 3: Route to a specialist ──
        let (domain, task) = self.route(topic, &memory_context, &personalization).await?;
        info!(specialist = %domain, task = %task, "Orchestrator: routed");

        // ── Step 4: Delegate ──
        let specialist_answer = self.delegate(domain, &task, &personalization).await?;

        // ── Step 5: Synthesize ──
        let answer = self
            .synthesize(topic, domain, &specialist_answer, &personalization)
            .await?;

        // ── Step 6: Persist session summary ──
        let summary_id = self
            .persist_summary(topic, &context.caller_id, &answer)
            .await;

        info!(
            specialist = %domain,
            recalled,
            stored = summary_id.is_some(),
            "Orchestrator: run complete"
        );

        Ok(OrchestrationResult {
            answer,
            specialist: domain,
            task,
            specialist_answer,
            recalled,
            summary_id,
        })
    }

    /// Recall prior memories for the caller, formatted for the router.
    ///
    /// Failures degrade to a placeholder so a dead store cannot take the
    /// whole pipeline down with it.
    async fn recall_context(&self, topic: &str, caller_id: &str) -> (String, usize) {
        let query = RecallQuery::new(topic, caller_id).with_limit(self.recall_limit);
        match self.store.recall(query).await {
            Ok(memories) if memories.is_empty() => (NO_MEMORY_PLACEHOLDER.to_string(), 0),
            Ok(memories) => {
                debug!(count = memories.len(), "Orchestrator: recalled prior context");
                let context = memories
                    .iter()
                    .map(|m| format!("- {}", m.content))
                    .collect::<Vec<_>>()
                    .join("\n");
                (context, memories.len())
            }
            Err(e) => {
                warn!(error = %e, "Orchestrator: memory recall failed, continuing without context");
                (format!("(Memory unavailable: {e})"), 0)
            }
        }
    }

    /// Ask the router model which specialist should handle the query.
    async fn route(
        &self,
        topic: &str,
        memory_context: &str,
        personalization: &ResolvedPrompt,
    ) -> Result<(Domain, String)> {
        let specialist_list: String = Domain::all()
            .iter()
            .map(|d| format!("- {}: {}", d, specialist(*d).description))
            .collect::<Vec<_>>()
            .join("\n");

        let routing_prompt = format!(
            "MEMORY CONTEXT:\n{memory_context}\n\n\
            USER QUERY:\n{topic}\n\n\
            TASK:\n\
            Decide which specialist should handle this query.\n\n\
            Available specialists:\n{specialist_list}\n\n\
            Respond with one line in the format: specialist: task description"
        );

        let request = ProviderRequest::new(
            self.router_model.clone(),
            vec![
                Message::system(layered_system(specialists::orchestrator(), personalization)),
                Message::user(routing_prompt),
            ],
        )
        .with_temperature(self.router_temperature);

        let response = self.provider.complete(self.capped(request)).await?;
        Ok(self.parse_route(&response.message.content, topic))
    }

    /// Parse a "specialist: task" reply line.
    ///
    /// Unparseable replies fall back to the first domain with the original
    /// topic as the task, so a rambling router cannot stall the run.
    fn parse_route(&self, reply: &str, topic: &str) -> (Domain, String) {
        for line in reply.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if let Some((name, task)) = line.split_once(':') {
                if let Some(domain) = specialists::domain_for_name(name) {
                    let task = task.trim();
                    let task = if task.is_empty() {
                        topic.to_string()
                    } else {
                        task.to_string()
                    };
                    return (domain, task);
                }
            }
        }

        let fallback = Domain::all()[0];
        warn!(reply, fallback = %fallback, "Orchestrator: unparseable routing reply");
        (fallback, topic.to_string())
    }

    /// Hand the task to the routed specialist.
    async fn delegate(
        &self,
        domain: Domain,
        task: &str,
        personalization: &ResolvedPrompt,
    ) -> Result<String> {
        let mut agent = SpecialistAgent::new(self.provider.clone(), domain);
        if let Some(spec_override) = self.overrides.get(&domain) {
            if let Some(model) = &spec_override.model {
                agent = agent.with_model(model.clone());
            }
            if let Some(temperature) = spec_override.temperature {
                agent = agent.with_temperature(temperature);
            }
        }
        if let Some(limit) = self.max_tokens {
            agent = agent.with_max_tokens(limit);
        }

        agent.answer_with(task, personalization).await
    }

    /// Fold the specialist's answer into a final response.
    async fn synthesize(
        &self,
        topic: &str,
        domain: Domain,
        specialist_answer: &str,
        personalization: &ResolvedPrompt,
    ) -> Result<String> {
        let specialist_name = specialist(domain).name;
        let synthesis_prompt = format!(
            "Original question: {topic}\n\n\
            {specialist_name} result:\n{specialist_answer}\n\n\
            Provide a unified, domain-specific final response."
        );

        let request = ProviderRequest::new(
            self.router_model.clone(),
            vec![
                Message::system(layered_system(specialists::orchestrator(), personalization)),
                Message::user(synthesis_prompt),
            ],
        )
        .with_temperature(self.router_temperature);

        let response = self.provider.complete(self.capped(request)).await?;
        Ok(response.message.content)
    }

    /// Store a session summary for future recall. Failures are logged, not
    /// propagated.
    async fn persist_summary(&self, topic: &str, caller_id: &str, answer: &str) -> Option<String> {
        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");
        let content = format!(
            "Session summary for '{topic}' at {timestamp}:\n{}",
            truncate_chars(answer, self.summary_max_chars)
        );
        let entry = MemoryEntry::new(caller_id, content)
            .with_metadata("agent", specialists::orchestrator().name)
            .with_metadata("topic", topic);

        match self.store.remember(entry).await {
            Ok(id) => {
                debug!(id = %id, "Orchestrator: stored session summary");
                Some(id)
            }
            Err(e) => {
                warn!(error = %e, "Orchestrator: could not store session summary");
                None
            }
        }
    }

    fn capped(&self, request: ProviderRequest) -> ProviderRequest {
        match self.max_tokens {
            Some(limit) => request.with_max_tokens(limit),
            None => request,
        }
    }
}

/// Cut at a character boundary so multibyte text cannot split a summary.
fn truncate_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((idx, _)) => &s[..idx],
        None => s,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────
