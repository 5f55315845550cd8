//! Infrastructure layer for SAGE
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, plus configuration and student data loading.

pub mod config;
pub mod data;
pub mod gemini;
pub mod logging;

// Re-export commonly used types
pub use config::{ConfigLoader, ConfigValidationError, FileConfig, FileDataConfig, FileOutputConfig};
pub use data::{DataLoadError, DataLoader, StudentData};
pub use gemini::{
    client::GeminiClient,
    error::GeminiError,
    gateway::{DEFAULT_MODEL, GeminiGateway},
};
pub use logging::JsonlConversationLogger;
