//! Gemini LLM Gateway implementation

use super::client::GeminiClient;
use super::error::GeminiError;
use super::types::GenerateContentRequest;
use async_trait::async_trait;
use sage_application::{GatewayError, LlmGateway};
use sage_domain::Prompt;
use tracing::{debug, info};

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-lite";

/// LLM Gateway backed by the Gemini REST API
#[derive(Debug)]
pub struct GeminiGateway {
    client: GeminiClient,
    model: String,
    temperature: f32,
    max_output_tokens: u32,
}

impl GeminiGateway {
    pub fn new(client: GeminiClient, model: impl Into<String>) -> Self {
        let model = model.into();
        info!("GeminiGateway initialized with model {}", model);
        Self {
            client,
            model,
            temperature: 0.5,
            max_output_tokens: 1024,
        }
    }

    /// Default sampling settings; a prompt's own temperature wins.
    pub fn with_generation(mut self, temperature: f32, max_output_tokens: u32) -> Self {
        self.temperature = temperature;
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn request_for(&self, prompt: &Prompt) -> GenerateContentRequest {
        GenerateContentRequest::from_prompt(prompt, self.temperature, self.max_output_tokens)
    }
}

#[async_trait]
impl LlmGateway for GeminiGateway {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let request = self.request_for(prompt);
        let response = self.client.generate_content(&self.model, &request).await?;

        let text = response.text().ok_or_else(|| {
            GeminiError::EmptyResponse(response.stop_reason().unwrap_or("unknown").to_string())
        })?;
        debug!(step = prompt.label, bytes = text.len(), "Gemini responded");
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
