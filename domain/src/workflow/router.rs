//! Router: Coordinator decision to ordered agent groups

use crate::agent::AgentName;
use crate::coordination::CoordinatorDecision;
use serde::{Deserialize, Serialize};

/// Ordered agent groups for one turn.
///
/// Groups run one after another; agents inside a group run concurrently.
/// Every agent appears at most once across all phases.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionPlan {
    pub phases: Vec<Vec<AgentName>>,
    /// Names in the decision that match no agent
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dropped: Vec<String>,
}

impl ExecutionPlan {
    /// True when no agent will run; the turn short-circuits.
    pub fn is_empty(&self) -> bool {
        self.phases.is_empty()
    }

    pub fn agent_count(&self) -> usize {
        self.phases.iter().map(Vec::len).sum()
    }

    /// All scheduled agents in execution order
    pub fn agents(&self) -> impl Iterator<Item = AgentName> + '_ {
        self.phases.iter().flatten().copied()
    }

    pub fn contains(&self, agent: AgentName) -> bool {
        self.agents().any(|a| a == agent)
    }
}

/// Turn a decision into an [`ExecutionPlan`].
///
/// - `required_agents` is authoritative: an empty set yields an empty plan
/// - unknown names are dropped and recorded in [`ExecutionPlan::dropped`]
/// - group order follows `concurrent_groups` verbatim; `priority` is ignored
/// - names grouped but not required are ignored
/// - a name repeated in a later group only runs in its first group
/// - required names missing from every group run in one trailing group
/// - empty groups are removed
pub fn route(decision: &CoordinatorDecision) -> ExecutionPlan {
    let mut dropped: Vec<String> = Vec::new();
    let mut resolve = |name: &str| -> Option<AgentName> {
        match name.parse::<AgentName>() {
            Ok(agent) => Some(agent),
            Err(_) => {
                let name = name.trim().to_string();
                if !dropped.contains(&name) {
                    dropped.push(name);
                }
                None
            }
        }
    };

    let mut required: Vec<AgentName> = Vec::new();
    for name in &decision.required_agents {
        if let Some(agent) = resolve(name)
            && !required.contains(&agent)
        {
            required.push(agent);
        }
    }

    let mut phases: Vec<Vec<AgentName>> = Vec::new();
    let mut scheduled: Vec<AgentName> = Vec::new();

    for group in &decision.concurrent_groups {
        let mut phase = Vec::new();
        for name in group {
            if let Some(agent) = resolve(name)
                && required.contains(&agent)
                && !scheduled.contains(&agent)
            {
                scheduled.push(agent);
                phase.push(agent);
            }
        }
        if !phase.is_empty() {
            phases.push(phase);
        }
    }

    let trailing: Vec<AgentName> = required
        .iter()
        .copied()
        .filter(|a| !scheduled.contains(a))
        .collect();
    if !trailing.is_empty() {
        phases.push(trailing);
    }

    ExecutionPlan { phases, dropped }
}
