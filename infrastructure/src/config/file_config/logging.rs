//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// JSONL transcript of turn events
    pub conversation_log: Option<PathBuf>,
    /// Directory for daily-rolling diagnostic logs
    pub log_dir: Option<PathBuf>,
}
