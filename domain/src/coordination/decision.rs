//! Coordinator decision (Value Object)

use crate::agent::AgentName;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Structured routing output of the Coordinator.
///
/// Agent names are kept in their wire form: the decision is parsed from
/// LLM text and may name agents that do not exist. Resolving them against
/// [`AgentName`] is the router's job.
///
/// `priority` is carried for reporting only; no scheduling reads it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoordinatorDecision {
    pub required_agents: Vec<String>,
    #[serde(default)]
    pub priority: BTreeMap<String, i64>,
    #[serde(default)]
    pub concurrent_groups: Vec<Vec<String>>,
    #[serde(default)]
    pub reasoning: String,
}

impl CoordinatorDecision {
    /// Decision naming the given agents, all in a single concurrent group,
    /// prioritized in the order given.
    pub fn for_agents(agents: &[AgentName], reasoning: impl Into<String>) -> Self {
        let names: Vec<String> = agents.iter().map(|a| a.as_str().to_string()).collect();
        let priority = names
            .iter()
            .enumerate()
            .map(|(i, name)| (name.clone(), i as i64 + 1))
            .collect();
        let concurrent_groups = if names.is_empty() {
            Vec::new()
        } else {
            vec![names.clone()]
        };
        Self {
            required_agents: names,
            priority,
            concurrent_groups,
            reasoning: reasoning.into(),
        }
    }

    /// Planner-only decision used when coordination itself fails.
    pub fn fallback() -> Self {
        Self::for_agents(
            &[AgentName::Planner],
            "Error in coordination. Falling back to planner.",
        )
    }

    /// Decision that routes to nothing
    pub fn empty(reasoning: impl Into<String>) -> Self {
        Self::for_agents(&[], reasoning)
    }
}
