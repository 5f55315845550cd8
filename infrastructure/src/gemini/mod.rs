//! Gemini adapter
//!
//! Implements the [`LlmGateway`](sage_application::LlmGateway) port over the
//! Gemini `generateContent` REST endpoint.

pub mod client;
pub mod error;
pub mod gateway;
pub mod types;
