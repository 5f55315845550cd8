//! `[output]` section

use sage_domain::OutputFormat;
use serde::{Deserialize, Serialize};

/// How single-turn and chat results are printed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// `full`, `reply` or `json`; `--output` overrides it
    pub format: OutputFormat,
    /// ANSI colors in console output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Reply,
            color: true,
        }
    }
}
