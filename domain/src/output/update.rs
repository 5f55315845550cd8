//! Partial update value object

use crate::agent::AgentName;
use crate::output::AgentOutput;
use crate::state::Record;
use serde::{Deserialize, Serialize};

/// Why an agent produced a fallback instead of its real output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailureKind {
    /// The LLM call failed (network, quota, deadline)
    Transient,
    /// The LLM answered but the text could not be parsed
    Malformed,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Transient => "transient",
            FailureKind::Malformed => "malformed",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether the update carries the agent's real output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum UpdateStatus {
    Complete,
    Degraded { kind: FailureKind, reason: String },
}

/// The incremental record one agent contributes to the conversation state.
///
/// `output` lands in `results[agent]`. The mapping fragments are
/// deep-merged into the matching state fields; most agents leave them empty.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartialUpdate {
    pub agent: AgentName,
    pub output: AgentOutput,
    pub status: UpdateStatus,
    #[serde(default, skip_serializing_if = "Record::is_empty")]
    pub profile: Record,
    #[serde(default, skip_serializing_if = "Record::is_empty")]
    pub calendar: Record,
    #[serde(default, skip_serializing_if = "Record::is_empty")]
    pub tasks: Record,
}

impl PartialUpdate {
    /// A successful agent result
    pub fn complete(agent: AgentName, output: AgentOutput) -> Self {
        Self {
            agent,
            output,
            status: UpdateStatus::Complete,
            profile: Record::new(),
            calendar: Record::new(),
            tasks: Record::new(),
        }
    }

    /// A degraded-but-present result carrying the agent's static fallback
    pub fn degraded(agent: AgentName, kind: FailureKind, reason: impl Into<String>) -> Self {
        Self {
            status: UpdateStatus::Degraded {
                kind,
                reason: reason.into(),
            },
            ..Self::complete(agent, AgentOutput::fallback(agent, kind))
        }
    }

    pub fn with_profile(mut self, fragment: Record) -> Self {
        self.profile = fragment;
        self
    }

    pub fn with_calendar(mut self, fragment: Record) -> Self {
        self.calendar = fragment;
        self
    }

    pub fn with_tasks(mut self, fragment: Record) -> Self {
        self.tasks = fragment;
        self
    }

    pub fn is_degraded(&self) -> bool {
        matches!(self.status, UpdateStatus::Degraded { .. })
    }
}
