//! LLM configuration from TOML (`[llm]` section)

use serde::{Deserialize, Serialize};

/// Raw LLM configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLlmConfig {
    /// Gemini model name
    pub model: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    pub max_output_tokens: u32,
    /// Default sampling temperature (0.0 - 2.0)
    pub temperature: f32,
    /// Deadline for each LLM call
    pub timeout_seconds: u64,
    /// Extra attempts after a retryable failure
    pub max_retries: usize,
    pub retry_backoff_ms: u64,
    /// Override for the API base URL
    pub base_url: Option<String>,
}

impl Default for FileLlmConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-flash-lite".to_string(),
            api_key_env: "GOOGLE_API_KEY".to_string(),
            max_output_tokens: 1024,
            temperature: 0.5,
            timeout_seconds: 60,
            max_retries: 0,
            retry_backoff_ms: 500,
            base_url: None,
        }
    }
}
