//! Progress phases of one turn

use serde::{Deserialize, Serialize};

/// Phase of a turn, in execution order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Coordinator decides which agents run
    Coordination,
    /// Learning style and energy pattern are derived
    ProfileAnalysis,
    /// One router-selected group of agents (0-based)
    AgentGroup(usize),
    /// Results are merged into the assistant reply
    Synthesis,
}

impl Phase {
    pub fn as_str(&self) -> &str {
        match self {
            Phase::Coordination => "coordination",
            Phase::ProfileAnalysis => "profile_analysis",
            Phase::AgentGroup(_) => "agent_group",
            Phase::Synthesis => "synthesis",
        }
    }

    pub fn display_name(&self) -> String {
        match self {
            Phase::Coordination => "Coordination".to_string(),
            Phase::ProfileAnalysis => "Profile Analysis".to_string(),
            Phase::AgentGroup(index) => format!("Agent Group {}", index + 1),
            Phase::Synthesis => "Synthesis".to_string(),
        }
    }
}

impl std::fmt::Display for Phase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}
