//! Conversation state (Entity)

use crate::agent::AgentName;
use crate::coordination::CoordinatorDecision;
use crate::output::AgentOutput;
use crate::profile::ProfileAnalysis;
use crate::state::message::{Message, Role};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// A JSON object used for the externally supplied profile, calendar and
/// task records.
pub type Record = serde_json::Map<String, Value>;

/// The shared record threaded through every step of a turn.
///
/// Owned exclusively by the workflow driver. Agents receive an immutable
/// snapshot and return a [`PartialUpdate`](crate::output::PartialUpdate);
/// only the aggregator mutates the authoritative copy.
///
/// `results` is keyed by [`AgentName`], so it can never hold anything but
/// agent outputs. The Coordinator decision and the profile analysis are
/// kept in their own turn-local fields.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConversationState {
    /// Ordered message history; append-only within a turn
    pub message_history: Vec<Message>,
    /// Personal info, learning preferences, academic info
    #[serde(default)]
    pub profile: Record,
    /// `{"events": [...]}`
    #[serde(default)]
    pub calendar: Record,
    /// `{"tasks": [...]}`
    #[serde(default)]
    pub tasks: Record,
    /// One entry per agent that ran this turn
    #[serde(default)]
    pub results: BTreeMap<AgentName, AgentOutput>,
    /// Routing decision for the current turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decision: Option<CoordinatorDecision>,
    /// Profile analysis derived once per turn
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_analysis: Option<ProfileAnalysis>,
}

impl ConversationState {
    pub fn new(profile: Record, calendar: Record, tasks: Record) -> Self {
        Self {
            profile,
            calendar,
            tasks,
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.message_history = history;
        self
    }

    /// Append a message to the history.
    pub fn push_message(&mut self, message: Message) {
        self.message_history.push(message);
    }

    /// The request being answered: the most recent user message.
    pub fn current_request(&self) -> &str {
        self.message_history
            .iter()
            .rev()
            .find(|m| m.role == Role::User)
            .map(|m| m.content.as_str())
            .unwrap_or("")
    }

    /// History preceding the current request.
    pub fn prior_messages(&self) -> &[Message] {
        match self.message_history.last() {
            Some(last) if last.is_user() => {
                &self.message_history[..self.message_history.len() - 1]
            }
            _ => &self.message_history,
        }
    }

    /// Calendar events; a missing or malformed `events` key reads as empty.
    pub fn events(&self) -> &[Value] {
        array_field(&self.calendar, "events")
    }

    /// Task items; a missing or malformed `tasks` key reads as empty.
    pub fn task_items(&self) -> &[Value] {
        array_field(&self.tasks, "tasks")
    }

    /// `profile.learning_preferences`, if present.
    pub fn learning_preferences(&self) -> Option<&Record> {
        self.profile
            .get("learning_preferences")
            .and_then(Value::as_object)
    }

    /// `profile.academic_info.current_courses`; empty when absent.
    pub fn current_courses(&self) -> &[Value] {
        self.profile
            .get("academic_info")
            .and_then(Value::as_object)
            .map(|info| array_field(info, "current_courses"))
            .unwrap_or(&[])
    }

    /// Profile analysis for this turn, or a static derivation from the
    /// profile record when the analyzer has not run.
    pub fn profile_analysis_or_default(&self) -> ProfileAnalysis {
        self.profile_analysis
            .clone()
            .unwrap_or_else(|| ProfileAnalysis::from_profile(&self.profile))
    }

    pub fn output(&self, agent: AgentName) -> Option<&AgentOutput> {
        self.results.get(&agent)
    }
}

fn array_field<'a>(record: &'a Record, key: &str) -> &'a [Value] {
    record
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_missing_collections_read_as_empty() {
        let state = ConversationState::default();
        assert!(state.events().is_empty());
        assert!(state.task_items().is_empty());
        assert!(state.current_courses().is_empty());
        assert!(state.learning_preferences().is_none());
    }

    #[test]
    fn test_malformed_collections_read_as_empty() {
        let state = ConversationState::new(
            record(json!({"academic_info": "n/a"})),
            record(json!({"events": "none"})),
            record(json!({"tasks": 3})),
        );
        assert!(state.events().is_empty());
        assert!(state.task_items().is_empty());
        assert!(state.current_courses().is_empty());
    }

    #[test]
    fn test_current_request_and_prior_messages() {
        let state = ConversationState::default().with_history(vec![
            Message::user("first"),
            Message::assistant("answer"),
            Message::user("second"),
        ]);
        assert_eq!(state.current_request(), "second");
        assert_eq!(state.prior_messages().len(), 2);
    }

    #[test]
    fn test_prior_messages_after_reply() {
        let state = ConversationState::default()
            .with_history(vec![Message::user("q"), Message::assistant("a")]);
        assert_eq!(state.current_request(), "q");
        assert_eq!(state.prior_messages().len(), 2);
    }

    #[test]
    fn test_courses_lookup() {
        let state = ConversationState::new(
            record(json!({"academic_info": {"current_courses": [{"name": "Calculus III"}]}})),
            Record::new(),
            Record::new(),
        );
        assert_eq!(state.current_courses().len(), 1);
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut state = ConversationState::new(
            record(json!({"name": "Ada"})),
            record(json!({"events": []})),
            Record::new(),
        );
        state.push_message(Message::user("hello"));
        let json = serde_json::to_string(&state).unwrap();
        let back: ConversationState = serde_json::from_str(&json).unwrap();
        assert_eq!(state, back);
    }
}
