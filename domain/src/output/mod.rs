//! Agent outputs and partial updates.
//!
//! Each agent produces exactly one [`AgentOutput`] per turn, wrapped in a
//! [`PartialUpdate`] that the aggregator merges into the conversation state.
//!
//! | Agent | Output |
//! |-------|--------|
//! | Planner | [`SchedulePlan`] |
//! | NoteWriter | [`NoteSet`] |
//! | Advisor | [`AdviceSet`] |
//! | any (on failure) | [`FallbackPayload`] |

pub mod advice;
pub mod notes;
pub mod schedule;
pub mod update;

pub use advice::{AdviceSet, RankedAction};
pub use notes::{NoteSet, TopicNotes};
pub use schedule::{SchedulePlan, TimeBlock};
pub use update::{FailureKind, PartialUpdate, UpdateStatus};

use crate::agent::AgentName;
use serde::{Deserialize, Serialize};

/// Static payload substituted for an agent whose run failed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FallbackPayload {
    /// User-facing message
    pub message: String,
    /// Why the agent failed
    pub kind: FailureKind,
}

impl FallbackPayload {
    pub fn for_agent(agent: AgentName, kind: FailureKind) -> Self {
        let message = match agent {
            AgentName::Planner => {
                "I couldn't put together a study plan right now. Please try again in a moment."
            }
            AgentName::NoteWriter => {
                "I couldn't generate study notes right now. Please try again in a moment."
            }
            AgentName::Advisor => {
                "I couldn't prepare academic guidance right now. Please try again in a moment."
            }
        };
        Self {
            message: message.to_string(),
            kind,
        }
    }
}

/// Typed result of one agent run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AgentOutput {
    Schedule(SchedulePlan),
    Notes(NoteSet),
    Advice(AdviceSet),
    Fallback(FallbackPayload),
}

impl AgentOutput {
    pub fn fallback(agent: AgentName, kind: FailureKind) -> Self {
        AgentOutput::Fallback(FallbackPayload::for_agent(agent, kind))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, AgentOutput::Fallback(_))
    }

    /// Markdown rendering used for the assistant reply.
    pub fn render(&self) -> String {
        match self {
            AgentOutput::Schedule(plan) => plan.render(),
            AgentOutput::Notes(notes) => notes.render(),
            AgentOutput::Advice(advice) => advice.render(),
            AgentOutput::Fallback(fallback) => fallback.message.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_message_per_agent() {
        let planner = FallbackPayload::for_agent(AgentName::Planner, FailureKind::Transient);
        let advisor = FallbackPayload::for_agent(AgentName::Advisor, FailureKind::Malformed);
        assert!(planner.message.contains("study plan"));
        assert!(advisor.message.contains("guidance"));
        assert_eq!(advisor.kind, FailureKind::Malformed);
    }

    #[test]
    fn test_tagged_serialization() {
        let output = AgentOutput::fallback(AgentName::NoteWriter, FailureKind::Transient);
        let json = serde_json::to_value(&output).unwrap();
        assert_eq!(json["type"], "fallback");
        assert_eq!(json["kind"], "transient");
        assert_eq!(json["message"], output.render());
        let back: AgentOutput = serde_json::from_value(json).unwrap();
        assert_eq!(back, output);
    }
}
