//! Error types for the Gemini adapter

use sage_application::GatewayError;
use thiserror::Error;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Invalid API key: {0}")]
    Unauthorized(String),

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Response contained no text (reason: {0})")]
    EmptyResponse(String),
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::Timeout,
            GeminiError::Http(e) => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Api { status, message } if status >= 500 => {
                GatewayError::RequestFailed(format!("{}: {}", status, message))
            }
            GeminiError::Api { status, message } => {
                GatewayError::Other(format!("{}: {}", status, message))
            }
            GeminiError::RateLimited(m) => GatewayError::RateLimited(m),
            GeminiError::Unauthorized(m) => GatewayError::Unauthorized(m),
            GeminiError::Decode(m) => GatewayError::InvalidResponse(m),
            GeminiError::EmptyResponse(reason) => {
                GatewayError::InvalidResponse(format!("empty response ({})", reason))
            }
        }
    }
}
