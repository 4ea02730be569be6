use anyhow::{Context, Result};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{ChatCompletionRequestUserMessageArgs, CreateChatCompletionRequestArgs},
};
use async_trait::async_trait;
use tracing::debug;

/// A generic client for interacting with an LLM.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Sends a single prompt and returns the model's text reply.
    async fn complete(&self, prompt: String) -> Result<String>;
}

/// An implementation of `LLMClient` for any OpenAI-compatible API.
pub struct OpenAICompatibleClient {
    client: Client<OpenAIConfig>,
    model: String,
    temperature: f32,
}

impl OpenAICompatibleClient {
    /// Creates a new client for an OpenAI-compatible service.
    ///
    /// # Arguments
    ///
    /// * `config` - The configuration for the OpenAI client, including API key and base URL.
    /// * `model` - The specific model identifier to use for chat completions (e.g., "gpt-4o").
    /// * `temperature` - Sampling temperature; `0.0` keeps answers deterministic.
    pub fn new(config: OpenAIConfig, model: String, temperature: f32) -> Self {
        Self {
            client: Client::with_config(config),
            model,
            temperature,
        }
    }
}

#[async_trait]
impl LLMClient for OpenAICompatibleClient {
    async fn complete(&self, prompt: String) -> Result<String> {
        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model)
            .temperature(self.temperature)
            .messages(vec![
                ChatCompletionRequestUserMessageArgs::default()
                    .content(prompt)
                    .build()?
                    .into(),
            ])
            .build()?;

        let response = self.client.chat().create(request).await?;
        debug!(model = %self.model, choices = response.choices.len(), "LLM responded");

        let answer = response
            .choices
            .into_iter()
            .next()
            .context("No response choice from LLM")?
            .message
            .content
            .context("No content in LLM response")?;

        Ok(answer)
    }
}
