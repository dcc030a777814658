//! The orchestration pipeline — the heart of Switchboard.
//!
//! A run follows a **Recall → Personalize → Route → Delegate → Synthesize →
//! Persist** cycle:
//!
//! 1. **Recall** prior session summaries for the caller from the memory store
//! 2. **Personalize** the system prompt via the [`PromptResolver`]
//! 3. **Route** the query to a specialist (financial, medical, creative)
//! 4. **Delegate** the task to that specialist's model
//! 5. **Synthesize** a unified final answer from the specialist's result
//! 6. **Persist** a session summary back to the memory store
//!
//! Recall and persist degrade gracefully when the store misbehaves; prompt
//! resolution does not, so a failed preference lookup aborts the run.

pub mod orchestrator;
pub mod resolver;
pub mod scripted;
pub mod specialists;

#[cfg(test)]
pub(crate) mod test_support;

pub use orchestrator::{OrchestrationResult, Orchestrator, SpecialistOverride};
pub use resolver::{
    ContextLayer, PromptResolver, ResolvedPrompt, BASE_PROMPT, LONG_CONVERSATION_THRESHOLD,
};
pub use scripted::ScriptedProvider;
pub use specialists::{AgentProfile, Domain, SpecialistAgent};
