//! Assistant reply composed at the end of a turn

use super::router::ExecutionPlan;
use crate::agent::AgentName;
use crate::output::AgentOutput;
use crate::state::ConversationState;
use serde::{Deserialize, Serialize};

/// Sent when the Coordinator selects no agent
pub const SHORT_CIRCUIT_REPLY: &str = "I'm not sure how to help with that yet. \
I can build a study schedule, write study notes for your courses, or give you academic advice. \
Could you tell me a bit more about what you need?";

/// One agent's section of the reply
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentBreakdown {
    pub agent: AgentName,
    pub degraded: bool,
    pub output: AgentOutput,
}

/// The user-facing result of a turn: one message plus per-agent sections
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub breakdown: Vec<AgentBreakdown>,
}

impl AssistantReply {
    /// Compose the reply from the agents' results, in execution order.
    pub fn compose(state: &ConversationState, plan: &ExecutionPlan) -> Self {
        let breakdown: Vec<AgentBreakdown> = plan
            .agents()
            .filter_map(|agent| {
                state.output(agent).map(|output| AgentBreakdown {
                    agent,
                    degraded: output.is_fallback(),
                    output: output.clone(),
                })
            })
            .collect();

        if breakdown.is_empty() {
            return Self::short_circuit();
        }

        let text = breakdown
            .iter()
            .map(|b| format!("## {}\n\n{}", b.agent.display_name(), b.output.render()))
            .collect::<Vec<_>>()
            .join("\n\n");

        Self { text, breakdown }
    }

    pub fn short_circuit() -> Self {
        Self {
            text: SHORT_CIRCUIT_REPLY.to_string(),
            breakdown: Vec::new(),
        }
    }

    pub fn is_short_circuit(&self) -> bool {
        self.breakdown.is_empty()
    }

    pub fn degraded_count(&self) -> usize {
        self.breakdown.iter().filter(|b| b.degraded).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{FailureKind, SchedulePlan, TimeBlock};

    fn plan(phases: Vec<Vec<AgentName>>) -> ExecutionPlan {
        ExecutionPlan {
            phases,
            dropped: Vec::new(),
        }
    }

    #[test]
    fn test_compose_in_execution_order() {
        let mut state = ConversationState::default();
        state.results.insert(
            AgentName::Planner,
            AgentOutput::Schedule(
                SchedulePlan::new("Week").with_block(TimeBlock::new("9", "10", "Essay")),
            ),
        );
        state
            .results
            .insert(AgentName::Advisor, AgentOutput::fallback(AgentName::Advisor, FailureKind::Transient));

        let reply = AssistantReply::compose(
            &state,
            &plan(vec![vec![AgentName::Planner], vec![AgentName::Advisor]]),
        );
        assert_eq!(reply.breakdown.len(), 2);
        assert_eq!(reply.breakdown[0].agent, AgentName::Planner);
        assert_eq!(reply.degraded_count(), 1);
        assert!(reply.text.find("Essay").unwrap() < reply.text.find("guidance").unwrap());
    }

    #[test]
    fn test_empty_plan_short_circuits() {
        let reply = AssistantReply::compose(&ConversationState::default(), &plan(vec![]));
        assert!(reply.is_short_circuit());
        assert_eq!(reply.text, SHORT_CIRCUIT_REPLY);
    }
}
