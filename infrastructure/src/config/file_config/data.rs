//! Student data configuration from TOML (`[data]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw data source configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileDataConfig {
    /// `{"profiles": [...]}` document
    pub profile: Option<PathBuf>,
    /// `{"events": [...]}` document
    pub calendar: Option<PathBuf>,
    /// `{"tasks": [...]}` document
    pub tasks: Option<PathBuf>,
    /// Profile to select from the profiles document
    pub student_id: String,
    /// How far ahead calendar events are considered
    pub lookahead_days: i64,
}

impl Default for FileDataConfig {
    fn default() -> Self {
        Self {
            profile: None,
            calendar: None,
            tasks: None,
            student_id: "student_123".to_string(),
            lookahead_days: 7,
        }
    }
}
