//! Output format value object

use serde::{Deserialize, Serialize};

/// How a turn's outcome is rendered
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Routing decision plus a section per agent
    Full,
    /// Only the assistant reply (default)
    #[default]
    Reply,
    /// The whole turn outcome as JSON
    Json,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Full => "full",
            OutputFormat::Reply => "reply",
            OutputFormat::Json => "json",
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(OutputFormat::Full),
            "reply" => Ok(OutputFormat::Reply),
            "json" => Ok(OutputFormat::Json),
            other => Err(format!("unknown output format '{}' (expected full, reply or json)", other)),
        }
    }
}
