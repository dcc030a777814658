//! The specialist catalog — one profile per supported domain.
//!
//! Each profile pins a Palmyra model, a sampling temperature, and a fixed
//! system prompt. Profiles are static data; [`SpecialistAgent`] binds one to
//! a provider and answers tasks with the caller's personalization layered
//! under the profile prompt.

use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use switchboard_core::error::Result;
use switchboard_core::message::Message;
use switchboard_core::preferences::PreferenceLookup;
use switchboard_core::provider::{Provider, ProviderRequest};
use switchboard_core::request::RequestContext;
use tracing::debug;

use crate::resolver::{PromptResolver, ResolvedPrompt};

// ── Domains ───────────────────────────────────────────────────────────────

/// The domains Switchboard can route to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Domain {
    Financial,
    Medical,
    Creative,
}

impl Domain {
    /// All routable domains, in routing-fallback order.
    pub fn all() -> [Domain; 3] {
        [Domain::Financial, Domain::Medical, Domain::Creative]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Domain::Financial => "financial",
            Domain::Medical => "medical",
            Domain::Creative => "creative",
        }
    }

    /// The user-turn prompt handed to this domain's specialist.
    pub fn task_prompt(&self, task: &str) -> String {
        format!("Generate a {} plan or concept for: {}", self.as_str(), task)
    }
}

impl fmt::Display for Domain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Profiles ──────────────────────────────────────────────────────────────

/// A named model persona: which model to call and how to frame it.
#[derive(Debug, Clone, Copy)]
pub struct AgentProfile {
    pub name: &'static str,
    pub description: &'static str,
    pub model: &'static str,
    pub temperature: f32,
    pub system_prompt: &'static str,
}

const FINANCIAL_SYSTEM_PROMPT: &str = r#"You are FinancialMentorAI, a specialized assistant for financial education and market analysis.
Your capabilities include:

1. Personal Finance Guidance (Informational):
    - Budgeting and Saving Strategies: Explaining various methods for personal financial management,
    such as the 50/30/20 rule, zero-based budgeting, and strategies for building an emergency fund.
    - Debt Management Concepts: Discussing different approaches to reducing debt,
    such as the "avalanche" and "snowball" methods, and explaining concepts like debt consolidation.
    - Retirement Planning Education: Providing overviews of retirement accounts like 401(k)s,
    IRAs (Traditional and Roth), and explaining concepts like employer matching and vesting periods.
    - Investment Principles: Teaching core investment concepts like asset allocation, diversification,
    risk tolerance, and the difference between active and passive investing.

2. Financial Education & Literacy:
    - Economic Concepts Explained: Breaking down fundamental economic indicators and principles,
    such as inflation, interest rates, GDP, and their impact on personal finances and markets.
    - Financial Markets Overview: Explaining the function of stock, bond, and commodity markets,
    and how securities are traded.
    - Understanding Financial Instruments: Detailing various investment types, including stocks,
    bonds, mutual funds, ETFs, options, and cryptocurrencies.
    - How to Read Financial Statements: Guiding users on interpreting corporate financial documents
    like the income statement, balance sheet, and cash flow statement for informational purposes.

3. Ethical & Compliance Protocol:
    - Crucial Limitation: You are an AI and not a licensed or registered financial advisor, planner,
    or broker. Your primary role is to provide financial information and education.
    - No Personalized Advice: You must never provide personalized investment advice, recommendations,
    or financial planning tailored to an individual's specific situation. All information is for general
    informational and educational purposes only.
    - Mandatory Risk Disclosure: You must always state that all investments involve risk, including the potential loss
    of principal, and that past performance is not indicative of future results.
    - "Consult a Professional" Directive: You must conclude any substantive financial discussion
    by strongly advising the user to consult with a qualified and licensed financial professional
    before making any financial decisions."#;

const MEDICAL_SYSTEM_PROMPT: &str = r#"You are MedicalKnowledgeAI, a specialized assistant for medical education and health information.
Your capabilities include:

1. Clinical Information Support:
    - Medical Condition Explanation: Providing detailed, easy-to-understand descriptions of diseases,
    disorders, and injuries.
    - Symptom Analysis (Informational): Discussing possible causes and implications of symptoms
    for educational purposes, without providing a diagnosis.
    - Treatment & Procedure Overviews: Explaining common medical treatments, surgical procedures,
    and therapies, including their purpose, risks, and benefits.
    - Medication Information: Detailing drug classes, mechanisms of action, common dosages, side effects,
    and potential interactions, based on established pharmacological data.

2. Medical Science Education:
    - Anatomy and Physiology: Teaching the structure (anatomy) and function (physiology) of the human body,
    from organ systems to the cellular level.
    - Pathophysiology: Explaining how diseases disrupt normal bodily functions.
    - Pharmacology Fundamentals: Breaking down the principles of how drugs are absorbed, distributed,
    metabolized, and excreted.
    - Genetics and Hereditary Conditions: Explaining the role of genetics in health and disease.

3. Communication & Safety Protocol:
    - Crucial Limitation: You are an AI and not a medical professional.
    Your primary role is to provide information for educational purposes.
    You must never provide a diagnosis, offer personalized medical advice,
    or replace a consultation with a qualified healthcare provider.
    - Patient-Friendly Language: Using clear, simple, and empathetic language to make complex topics accessible.
    - Evidence-Based Information: Citing reputable sources (e.g., WHO, CDC, NIH, major medical journals)
    to support the information provided.
    - Mandatory "Consult a Doctor" Directive: Concluding any substantive medical discussion
    by strongly advising the user to consult with a healthcare professional for diagnosis and treatment.

Focus on providing clear, evidence-based, and easily understandable information.
Always prioritize user safety by reinforcing the importance of professional medical consultation."#;

const CREATIVE_SYSTEM_PROMPT: &str = r#"You are CreativeCompanionAI, a specialized assistant for writing, ideation, and creative generation.
Your capabilities include:

1. Creative Writing Support:
    - Story and Scene Drafting: Producing short fiction, scenes, and narrative outlines
    in a requested genre, tone, or point of view.
    - Poetry and Verse: Composing poems in common forms and in free verse,
    with attention to rhythm, imagery, and economy of language.
    - Dialogue and Character Work: Writing natural dialogue and sketching characters
    with distinct voices, motivations, and flaws.
    - Revision Suggestions: Offering concrete line edits and structural changes
    that keep the author's voice intact.

2. Ideation & Brainstorming:
    - Concept Generation: Producing varied, unexpected ideas for stories, campaigns,
    products, names, and titles rather than many variations of a single idea.
    - Outline Building: Turning a loose premise into a workable structure
    with acts, beats, or sections.
    - Creative Constraints: Using prompts, word limits, and formal constraints
    to push past obvious directions.

3. Craft & Feedback Protocol:
    - Constructive Critique: When asked for feedback, leading with what works,
    then giving specific, actionable suggestions.
    - Originality: Avoiding cliches and never imitating the distinctive style
    of any single living author.
    - Audience Awareness: Matching register, length, and content to the stated
    audience and purpose."#;

const ORCHESTRATOR_SYSTEM_PROMPT: &str = r#"You are KnowledgeAssistant, the orchestrator coordinating specialized domain agents.

Your role:
- Route user questions to the correct specialized agent based on their domain.
- Weigh any prior session context supplied with the query before deciding.
- Synthesize specialist results into a cohesive final summary.

Routing logic:
- If the query involves biology, symptoms, treatment, or diagnosis, route to the medical specialist.
- If the query involves money, investments, ROI, valuation, or forecasting, route to the financial specialist.
- If the query involves writing, ideation, or creative generation, route to the creative specialist."#;

static FINANCIAL: AgentProfile = AgentProfile {
    name: "FinancialMentorAI",
    description: "Handles financial education and market analysis.",
    model: "palmyra-fin",
    temperature: 0.6,
    system_prompt: FINANCIAL_SYSTEM_PROMPT,
};

static MEDICAL: AgentProfile = AgentProfile {
    name: "MedicalKnowledgeAI",
    description: "Handles medical education and health information.",
    model: "palmyra-med",
    temperature: 0.7,
    system_prompt: MEDICAL_SYSTEM_PROMPT,
};

static CREATIVE: AgentProfile = AgentProfile {
    name: "CreativeCompanionAI",
    description: "Handles writing, ideation, and creative generation.",
    model: "palmyra-creative",
    temperature: 0.8,
    system_prompt: CREATIVE_SYSTEM_PROMPT,
};

static ORCHESTRATOR: AgentProfile = AgentProfile {
    name: "KnowledgeAssistant",
    description: "Routes user queries to the appropriate specialized agent and synthesizes results.",
    model: "palmyra-x5",
    temperature: 0.2,
    system_prompt: ORCHESTRATOR_SYSTEM_PROMPT,
};

/// The profile for a domain's specialist.
pub fn specialist(domain: Domain) -> &'static AgentProfile {
    match domain {
        Domain::Financial => &FINANCIAL,
        Domain::Medical => &MEDICAL,
        Domain::Creative => &CREATIVE,
    }
}

/// The routing and synthesis profile.
pub fn orchestrator() -> &'static AgentProfile {
    &ORCHESTRATOR
}

/// Map a model-produced or config-provided name onto a domain.
///
/// Accepts the domain word or the profile name, case-insensitively.
pub fn domain_for_name(name: &str) -> Option<Domain> {
    let name = name.trim().to_lowercase();
    Domain::all()
        .into_iter()
        .find(|d| name == d.as_str() || name == specialist(*d).name.to_lowercase())
}

/// Stack the caller's personalization under a profile's system prompt.
pub(crate) fn layered_system(profile: &AgentProfile, personalization: &ResolvedPrompt) -> String {
    format!("{}\n\n{}", profile.system_prompt, personalization.render())
}

// ── Specialist agent ──────────────────────────────────────────────────────

/// One domain specialist bound to a provider.
pub struct SpecialistAgent {
    provider: Arc<dyn Provider>,
    domain: Domain,
    resolver: PromptResolver,
    model_override: Option<String>,
    temperature_override: Option<f32>,
    max_tokens: Option<u32>,
}

impl SpecialistAgent {
    pub fn new(provider: Arc<dyn Provider>, domain: Domain) -> Self {
        Self {
            provider,
            domain,
            resolver: PromptResolver::new(),
            model_override: None,
            temperature_override: None,
            max_tokens: None,
        }
    }

    /// Use a different model than the profile's default.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model_override = Some(model.into());
        self
    }

    /// Use a different sampling temperature than the profile's default.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature_override = Some(temperature);
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    pub fn domain(&self) -> Domain {
        self.domain
    }

    pub fn profile(&self) -> &'static AgentProfile {
        specialist(self.domain)
    }

    /// Answer a task as this specialist, resolving personalization first.
    pub async fn answer(
        &self,
        task: &str,
        context: &RequestContext,
        preferences: &dyn PreferenceLookup,
    ) -> Result<String> {
        let personalization = self.resolver.resolve(context, preferences)?;
        self.answer_with(task, &personalization).await
    }

    /// Answer a task with personalization layers already resolved.
    pub async fn answer_with(
        &self,
        task: &str,
        personalization: &ResolvedPrompt,
    ) -> Result<String> {
        let profile = self.profile();
        let model = self.model_override.as_deref().unwrap_or(profile.model);
        let temperature = self.temperature_override.unwrap_or(profile.temperature);

        debug!(
            specialist = profile.name,
            model, temperature, "dispatching specialist task"
        );

        let mut request = ProviderRequest::new(
            model,
            vec![
                Message::system(layered_system(profile, personalization)),
                Message::user(self.domain.task_prompt(task)),
            ],
        )
        .with_temperature(temperature);
        if let Some(limit) = self.max_tokens {
            request = request.with_max_tokens(limit);
        }

        let response = self.provider.complete(request).await?;
        Ok(response.message.content)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scripted::ScriptedProvider;
    use switchboard_core::message::Role;
    use switchboard_memory::InMemoryStore;

    #[test]
    fn domain_names_round_trip() {
        for domain in Domain::all() {
            assert_eq!(domain_for_name(domain.as_str()), Some(domain));
            assert_eq!(domain_for_name(specialist(domain).name), Some(domain));
        }
    }

    #[test]
    fn domain_lookup_is_case_insensitive() {
        assert_eq!(domain_for_name("Financial"), Some(Domain::Financial));
        assert_eq!(domain_for_name("  MEDICAL  "), Some(Domain::Medical));
        assert_eq!(domain_for_name("creativecompanionai"), Some(Domain::Creative));
        assert_eq!(domain_for_name("astrology"), None);
    }

    #[test]
    fn task_prompt_carries_the_domain() {
        assert_eq!(
            Domain::Financial.task_prompt("estimate the present value"),
            "Generate a financial plan or concept for: estimate the present value"
        );
        assert_eq!(
            Domain::Medical.task_prompt("explain hypertension stages"),
            "Generate a medical plan or concept for: explain hypertension stages"
        );
    }

    #[test]
    fn profiles_pin_their_models() {
        assert_eq!(specialist(Domain::Financial).model, "palmyra-fin");
        assert_eq!(specialist(Domain::Medical).model, "palmyra-med");
        assert_eq!(specialist(Domain::Creative).model, "palmyra-creative");
        assert_eq!(orchestrator().model, "palmyra-x5");
    }

    #[tokio::test]
    async fn specialist_answers_with_profile_framing() {
        let provider = Arc::new(ScriptedProvider::new([
            "Hypertension is staged by blood pressure ranges.",
        ]));
        let store = InMemoryStore::new();
        let agent = SpecialistAgent::new(provider.clone(), Domain::Medical);

        let answer = agent
            .answer(
                "explain hypertension stages",
                &RequestContext::new("ashley", 4),
                &store,
            )
            .await
            .unwrap();

        assert_eq!(answer, "Hypertension is staged by blood pressure ranges.");

        let requests = provider.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].model, "palmyra-med");
        assert_eq!(requests[0].temperature, 0.7);
        assert_eq!(requests[0].messages[0].role, Role::System);
        assert!(requests[0].messages[0].content.contains("MedicalKnowledgeAI"));
        assert!(requests[0].messages[0]
            .content
            .contains("You are a helpful assistant."));
        assert_eq!(
            requests[0].messages[1].content,
            "Generate a medical plan or concept for: explain hypertension stages"
        );
    }

    #[tokio::test]
    async fn overrides_replace_profile_defaults() {
        let provider = Arc::new(ScriptedProvider::new(["ok"]));
        let store = InMemoryStore::new();
        let agent = SpecialistAgent::new(provider.clone(), Domain::Financial)
            .with_model("palmyra-fin-32k")
            .with_temperature(0.3)
            .with_max_tokens(512);

        agent
            .answer("budgeting basics", &RequestContext::new("ashley", 1), &store)
            .await
            .unwrap();

        let requests = provider.requests();
        assert_eq!(requests[0].model, "palmyra-fin-32k");
        assert_eq!(requests[0].temperature, 0.3);
        assert_eq!(requests[0].max_tokens, Some(512));
    }

    #[tokio::test]
    async fn stored_style_reaches_the_specialist_prompt() {
        let provider = Arc::new(ScriptedProvider::new(["ok"]));
        let store = InMemoryStore::new();
        store.set_style("ashley", "formal").unwrap();

        SpecialistAgent::new(provider.clone(), Domain::Creative)
            .answer("a haiku about rivers", &RequestContext::new("ashley", 2), &store)
            .await
            .unwrap();

        let requests = provider.requests();
        assert!(requests[0].messages[0]
            .content
            .contains("User prefers formal responses."));
    }
}
