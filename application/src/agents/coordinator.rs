//! Coordinator: decides which agents handle the request

use super::GatewayCaller;
use crate::config::ExecutionParams;
use sage_domain::{
    ConversationState, CoordinatorDecision, PromptTemplate, StudentContext, history_summary,
    parse_coordinator_response,
};
use tracing::{info, warn};

/// Produces the [`CoordinatorDecision`] for a turn.
///
/// Never fails: a gateway error yields [`CoordinatorDecision::fallback`],
/// and unparseable text is handled by keyword matching.
pub struct Coordinator {
    caller: GatewayCaller,
    history_window: usize,
    history_truncate: usize,
}

impl Coordinator {
    pub fn new(caller: GatewayCaller, params: &ExecutionParams) -> Self {
        Self {
            caller,
            history_window: params.coordinator_history_window,
            history_truncate: params.coordinator_history_truncate,
        }
    }

    pub async fn decide(&self, state: &ConversationState) -> CoordinatorDecision {
        let context = StudentContext::analyze(state).to_pretty_json();
        let history = history_summary(
            state.prior_messages(),
            self.history_window,
            self.history_truncate,
        );
        let prompt = PromptTemplate::coordinator(state.current_request(), &context, &history);

        match self.caller.call(&prompt).await {
            Ok(response) => {
                let decision = parse_coordinator_response(&response);
                info!(
                    agents = ?decision.required_agents,
                    groups = decision.concurrent_groups.len(),
                    "Coordinator decided"
                );
                decision
            }
            Err(e) => {
                warn!("Coordination failed, falling back to planner: {}", e);
                CoordinatorDecision::fallback()
            }
        }
    }
}
