use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs,
    },
    Client,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::config::LlmConfig;
use crate::error::{ConfigError, GatewayError};

/// Text-completion capability behind the decision pipeline.
///
/// Implementations bound their own request time and report every failure as
/// a [`GatewayError`]; callers never retry.
#[async_trait]
pub trait CompletionGateway: Send + Sync {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GatewayError>;
}

#[async_trait]
impl<T: CompletionGateway + ?Sized> CompletionGateway for Arc<T> {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GatewayError> {
        (**self).complete(system_prompt, user_prompt).await
    }
}

/// OpenAI-compatible chat completion client (Zhipu GLM by default).
#[derive(Clone)]
pub struct LLMClient {
    pub client: Client<OpenAIConfig>,
    pub model: String,
    temperature: f32,
    max_tokens: u32,
    timeout: Duration,
}

impl LLMClient {
    pub fn new(api_key: String, base_url: Option<String>, model: String) -> Self {
        let defaults = LlmConfig::default();
        let mut config = OpenAIConfig::new().with_api_key(api_key);
        if let Some(url) = base_url {
            config = config.with_api_base(url);
        }
        let client = Client::with_config(config);
        Self {
            client,
            model,
            temperature: defaults.temperature,
            max_tokens: defaults.max_tokens,
            timeout: defaults.timeout(),
        }
    }

    /// Build from configuration, resolving the credential.
    pub fn from_config(config: &LlmConfig) -> Result<Self, ConfigError> {
        let api_key = config.resolve_api_key()?;
        Ok(Self::new(api_key, Some(config.base_url.clone()), config.model.clone())
            .with_sampling(config.temperature, config.max_tokens)
            .with_timeout(config.timeout()))
    }

    pub fn with_sampling(mut self, temperature: f32, max_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub async fn chat(&self, system_prompt: &str, user_input: &str) -> Result<String, GatewayError> {
        info!("🤖 Sending request to LLM (Model: {})...", self.model);

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .max_tokens(self.max_tokens)
            .messages([
                ChatCompletionRequestMessage::System(
                    ChatCompletionRequestSystemMessageArgs::default()
                        .content(system_prompt)
                        .build()?,
                ),
                ChatCompletionRequestMessage::User(
                    ChatCompletionRequestUserMessageArgs::default()
                        .content(user_input)
                        .build()?,
                ),
            ])
            .build()?;

        let response = tokio::time::timeout(self.timeout, self.client.chat().create(request))
            .await
            .map_err(|_| GatewayError::Timeout {
                timeout_secs: self.timeout.as_secs(),
            })??;

        info!("🤖 LLM Response received.");

        // No choices is a malformed reply, not a gateway failure.
        Ok(response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[async_trait]
impl CompletionGateway for LLMClient {
    async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, GatewayError> {
        self.chat(system_prompt, user_prompt).await
    }
}

impl From<OpenAIError> for GatewayError {
    fn from(err: OpenAIError) -> Self {
        let message = err.to_string();
        match err {
            OpenAIError::Reqwest(_) => GatewayError::Transport(message),
            OpenAIError::ApiError(_) => GatewayError::classify(message),
            _ => GatewayError::Api(message),
        }
    }
}
