//! LLM Gateway port
//!
//! Defines the interface for communicating with LLM providers.

use async_trait::async_trait;
use sage_domain::Prompt;
use thiserror::Error;

/// Errors that can occur during LLM gateway operations.
///
/// Every variant is transient from an agent's point of view: the call
/// failed, and the agent falls back to its static payload.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Timeout")]
    Timeout,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Whether repeating the same request could succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            GatewayError::ConnectionError(_)
                | GatewayError::RateLimited(_)
                | GatewayError::Timeout
                | GatewayError::RequestFailed(_)
        )
    }
}

/// Gateway for LLM communication
///
/// Text in, text out. Implementations (adapters) live in the
/// infrastructure layer.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Send one prompt and return the model's text.
    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError>;

    /// Model identifier, for logs
    fn model_name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_retryable_classification() {
        assert!(GatewayError::Timeout.is_retryable());
        assert!(GatewayError::RateLimited("quota".to_string()).is_retryable());
        assert!(!GatewayError::Unauthorized("bad key".to_string()).is_retryable());
        assert!(!GatewayError::InvalidResponse("no candidates".to_string()).is_retryable());
    }
}
