//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod data;
mod llm;
mod logging;
mod output;
mod repl;
mod turn;

pub use data::FileDataConfig;
pub use llm::FileLlmConfig;
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use turn::FileTurnConfig;

use sage_application::ExecutionParams;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;

/// Configuration validation errors
#[derive(Error, Debug, PartialEq)]
pub enum ConfigValidationError {
    #[error("llm.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("llm.model cannot be empty")]
    EmptyModelName,

    #[error("llm.temperature must be between 0.0 and 2.0, got {0}")]
    InvalidTemperature(f32),

    #[error("data.lookahead_days must be between 0 and 366, got {0}")]
    InvalidLookahead(i64),
}

/// Longest calendar window the planner may look ahead.
pub const MAX_LOOKAHEAD_DAYS: i64 = 366;

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini model and call policy
    pub llm: FileLlmConfig,
    /// Student data sources
    pub data: FileDataConfig,
    /// Coordinator history settings
    pub turn: FileTurnConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Transcript and file logging
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.llm.timeout_seconds == 0 {
            return Err(ConfigValidationError::InvalidTimeout);
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigValidationError::EmptyModelName);
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigValidationError::InvalidTemperature(
                self.llm.temperature,
            ));
        }

        if !(0..=MAX_LOOKAHEAD_DAYS).contains(&self.data.lookahead_days) {
            return Err(ConfigValidationError::InvalidLookahead(
                self.data.lookahead_days,
            ));
        }

        Ok(())
    }

    /// Application-level knobs derived from this file
    pub fn execution_params(&self) -> ExecutionParams {
        ExecutionParams::default()
            .with_llm_timeout(Some(Duration::from_secs(self.llm.timeout_seconds)))
            .with_retries(
                self.llm.max_retries,
                Duration::from_millis(self.llm.retry_backoff_ms),
            )
            .with_coordinator_history(self.turn.history_window, self.turn.history_truncate)
            .with_lookahead_days(self.data.lookahead_days)
    }
}
