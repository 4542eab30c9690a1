use futures_util::future::join_all;
use tracing::{debug, error, info};

use crate::agents::{Persona, PersonaKind};
use crate::config::LlmConfig;
use crate::constants::events;
use crate::data::MarketSnapshot;
use crate::decision::Decision;
use crate::error::AnalysisError;
use crate::llm::{CompletionGateway, LLMClient};
use crate::parser;
use crate::prompt::build_prompt;

/// Prompt builder -> completion gateway -> decision parser, for one persona.
///
/// Holds no per-call state; concurrent `analyze` calls are independent.
pub struct PersonaAnalyzer<G = LLMClient> {
    persona: Persona,
    gateway: G,
}

impl PersonaAnalyzer<LLMClient> {
    /// Fails fast with [`AnalysisError::Config`] when no API key resolves.
    pub fn from_config(persona: Persona, config: &LlmConfig) -> Result<Self, AnalysisError> {
        Ok(Self::new(persona, LLMClient::from_config(config)?))
    }
}

impl<G: CompletionGateway> PersonaAnalyzer<G> {
    pub fn new(persona: Persona, gateway: G) -> Self {
        Self { persona, gateway }
    }

    pub fn persona(&self) -> &Persona {
        &self.persona
    }

    pub fn kind(&self) -> PersonaKind {
        self.persona.kind
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Only an invalid snapshot or a gateway failure is an error; any reply
    /// text resolves to a decision.
    pub async fn analyze(&self, snapshot: &MarketSnapshot) -> Result<Decision, AnalysisError> {
        snapshot.validate()?;

        let prompt = build_prompt(snapshot, &self.persona.profile);
        debug!(event = events::PROMPT_BUILT, persona = self.persona.name, "{}", prompt);

        info!(
            "🤖 [AGENT] Sending request to {} ({})...",
            self.persona.name,
            snapshot.symbol.as_deref().unwrap_or("unknown symbol")
        );
        let reply = match self.gateway.complete(self.persona.system_prompt, &prompt).await {
            Ok(reply) => reply,
            Err(e) => {
                error!(event = events::GATEWAY_FAILED, "❌ {} request failed: {}", self.persona.name, e);
                return Err(e.into());
            }
        };
        info!(event = events::COMPLETION_RECEIVED, "🤖 [AGENT] Response from {}: {}", self.persona.name, reply);

        Ok(parser::parse(&reply, snapshot.current_price))
    }
}

/// Run several analyzers on the same snapshot concurrently. Results keep the
/// order of `analyzers`.
pub async fn analyze_all<G: CompletionGateway>(
    snapshot: &MarketSnapshot,
    analyzers: &[PersonaAnalyzer<G>],
) -> Vec<(PersonaKind, Result<Decision, AnalysisError>)> {
    join_all(
        analyzers
            .iter()
            .map(|analyzer| async move { (analyzer.kind(), analyzer.analyze(snapshot).await) }),
    )
    .await
}
