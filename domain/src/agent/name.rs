//! Agent name value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Specialist agents that can be routed to (Value Object)
///
/// Serialized in the wire form used by Coordinator decisions
/// (`PLANNER`, `NOTEWRITER`, `ADVISOR`). Variants are declared in
/// alphabetical order of their wire names so that the derived ordering
/// sorts by agent name.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "UPPERCASE")]
pub enum AgentName {
    /// Provides ranked academic guidance
    Advisor,
    /// Writes study notes adapted to the learning style
    NoteWriter,
    /// Builds a schedule from the calendar and task list
    Planner,
}

impl AgentName {
    /// Every known agent, in the order they are presented to the Coordinator.
    pub const ALL: [AgentName; 3] = [AgentName::Planner, AgentName::NoteWriter, AgentName::Advisor];

    /// Wire identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentName::Advisor => "ADVISOR",
            AgentName::NoteWriter => "NOTEWRITER",
            AgentName::Planner => "PLANNER",
        }
    }

    /// Human-readable label
    pub fn display_name(&self) -> &'static str {
        match self {
            AgentName::Advisor => "Advisor",
            AgentName::NoteWriter => "Note Writer",
            AgentName::Planner => "Planner",
        }
    }

    /// One-line capability description, used in the Coordinator prompt.
    pub fn description(&self) -> &'static str {
        match self {
            AgentName::Advisor => "Provides personalized academic guidance",
            AgentName::NoteWriter => "Creates study materials and content summaries",
            AgentName::Planner => "Handles scheduling and time management",
        }
    }
}

impl std::fmt::Display for AgentName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for AgentName {
    type Err = DomainError;

    /// Case-insensitive; `_`, `-` and spaces are ignored so that
    /// `note_writer` and `Note Writer` both resolve.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "PLANNER" => Ok(AgentName::Planner),
            "NOTEWRITER" => Ok(AgentName::NoteWriter),
            "ADVISOR" => Ok(AgentName::Advisor),
            _ => Err(DomainError::UnknownAgent(s.trim().to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_roundtrip() {
        for agent in AgentName::ALL {
            let parsed: AgentName = agent.as_str().parse().unwrap();
            assert_eq!(agent, parsed);
        }
    }

    #[test]
    fn test_lenient_parsing() {
        assert_eq!("planner".parse::<AgentName>().unwrap(), AgentName::Planner);
        assert_eq!("note_writer".parse::<AgentName>().unwrap(), AgentName::NoteWriter);
        assert_eq!(" Advisor ".parse::<AgentName>().unwrap(), AgentName::Advisor);
    }

    #[test]
    fn test_unknown_name() {
        let err = "TUTOR".parse::<AgentName>().unwrap_err();
        assert_eq!(err, DomainError::UnknownAgent("TUTOR".to_string()));
    }

    #[test]
    fn test_serde_uses_wire_names() {
        let json = serde_json::to_string(&AgentName::NoteWriter).unwrap();
        assert_eq!(json, "\"NOTEWRITER\"");
        let agent: AgentName = serde_json::from_str("\"ADVISOR\"").unwrap();
        assert_eq!(agent, AgentName::Advisor);
    }

    #[test]
    fn test_ordering_is_alphabetical() {
        let mut agents = AgentName::ALL.to_vec();
        agents.sort();
        assert_eq!(
            agents,
            vec![AgentName::Advisor, AgentName::NoteWriter, AgentName::Planner]
        );
    }
}
