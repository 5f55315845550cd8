//! Agents: LLM-backed units that turn a conversation snapshot into results.
//!
//! | Type | Role | LLM calls |
//! |------|------|-----------|
//! | [`Coordinator`] | picks agents and groups | 1 |
//! | [`ProfileAnalyzer`] | learning style, energy pattern | 0-1 |
//! | [`Planner`] | calendar, tasks, then plan | 3 |
//! | [`NoteWriter`] | notes per mentioned course | 1 per topic |
//! | [`Advisor`] | ranked guidance | 1 |
//!
//! Only the last three implement [`Agent`] and can be routed to; the first
//! two run before routing and never fail.

pub mod advisor;
pub mod caller;
pub mod coordinator;
pub mod note_writer;
pub mod planner;
pub mod profile_analyzer;

#[cfg(test)]
pub(crate) mod fake;

pub use advisor::Advisor;
pub use caller::GatewayCaller;
pub use coordinator::Coordinator;
pub use note_writer::NoteWriter;
pub use planner::Planner;
pub use profile_analyzer::ProfileAnalyzer;

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::GatewayError;
use async_trait::async_trait;
use sage_domain::{AgentName, ConversationState, FailureKind, ParseError, PartialUpdate};
use std::collections::BTreeMap;
use std::sync::Arc;
use thiserror::Error;

/// Why an agent run failed
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM call failed: {0}")]
    Transient(#[from] GatewayError),

    #[error("Malformed response: {0}")]
    Malformed(#[from] ParseError),
}

impl AgentError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AgentError::Transient(_) => FailureKind::Transient,
            AgentError::Malformed(_) => FailureKind::Malformed,
        }
    }
}

/// A routable agent.
///
/// Receives an immutable snapshot of the conversation state and returns
/// its contribution as a [`PartialUpdate`]; it never writes shared state.
#[async_trait]
pub trait Agent: Send + Sync {
    fn name(&self) -> AgentName;

    async fn run(&self, snapshot: &ConversationState) -> Result<PartialUpdate, AgentError>;
}

/// Lookup table from agent name to implementation
#[derive(Clone, Default)]
pub struct AgentRegistry {
    agents: BTreeMap<AgentName, Arc<dyn Agent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Planner, NoteWriter and Advisor sharing one caller
    pub fn standard(caller: GatewayCaller, params: &ExecutionParams) -> Self {
        Self::new()
            .register(Arc::new(Planner::new(caller.clone(), params)))
            .register(Arc::new(NoteWriter::new(caller.clone(), params)))
            .register(Arc::new(Advisor::new(caller, params)))
    }

    /// Add an agent, replacing any registered under the same name.
    pub fn register(mut self, agent: Arc<dyn Agent>) -> Self {
        self.agents.insert(agent.name(), agent);
        self
    }

    pub fn get(&self, name: AgentName) -> Option<Arc<dyn Agent>> {
        self.agents.get(&name).cloned()
    }

    pub fn names(&self) -> Vec<AgentName> {
        self.agents.keys().copied().collect()
    }
}

impl std::fmt::Debug for AgentRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AgentRegistry")
            .field("agents", &self.names())
            .finish()
    }
}
