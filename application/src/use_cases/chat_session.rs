//! Multi-turn chat session
//!
//! Owns the request-scoped context between turns: the student's data
//! records and the message history.

use super::run_turn::{RunTurnError, RunTurnInput, RunTurnUseCase, TurnOutcome};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::ProgressNotifier;
use sage_domain::{Message, Record, Role};
use std::sync::Arc;
use tracing::debug;

/// Conversation with one student across several turns
pub struct ChatSession<G: LlmGateway + 'static> {
    use_case: Arc<RunTurnUseCase<G>>,
    profile: Record,
    calendar: Record,
    tasks: Record,
    history: Vec<Message>,
}

impl<G: LlmGateway + 'static> ChatSession<G> {
    pub fn new(use_case: Arc<RunTurnUseCase<G>>) -> Self {
        Self {
            use_case,
            profile: Record::new(),
            calendar: Record::new(),
            tasks: Record::new(),
            history: Vec::new(),
        }
    }

    pub fn with_data(mut self, profile: Record, calendar: Record, tasks: Record) -> Self {
        self.profile = profile;
        self.calendar = calendar;
        self.tasks = tasks;
        self
    }

    pub fn use_case(&self) -> &RunTurnUseCase<G> {
        &self.use_case
    }

    /// Run one turn. History only advances when the turn succeeds.
    pub async fn send(
        &mut self,
        request: &str,
        progress: &dyn ProgressNotifier,
    ) -> Result<TurnOutcome, RunTurnError> {
        let input = RunTurnInput::new(request)
            .with_history(self.history.clone())
            .with_data(self.profile.clone(), self.calendar.clone(), self.tasks.clone());
        let outcome = self.use_case.execute_with_progress(input, progress).await?;
        self.history = outcome.state.message_history.clone();
        debug!(messages = self.history.len(), "Chat history updated");
        Ok(outcome)
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Completed turns, counted by user messages.
    pub fn turn_count(&self) -> usize {
        self.history.iter().filter(|m| m.role == Role::User).count()
    }
}
