//! NoteWriter: study notes per mentioned course

use super::{Agent, AgentError, GatewayCaller};
use crate::config::ExecutionParams;
use async_trait::async_trait;
use futures::future::join_all;
use sage_domain::{
    AgentName, AgentOutput, ConversationState, NoteSet, PartialUpdate, PromptTemplate,
    StudentContext, history_summary, parse_topic_notes,
};
use tracing::{info, warn};

const MAX_TOPIC_CHARS: usize = 80;

pub struct NoteWriter {
    caller: GatewayCaller,
    history_window: usize,
    history_truncate: usize,
}

impl NoteWriter {
    pub fn new(caller: GatewayCaller, params: &ExecutionParams) -> Self {
        Self {
            caller,
            history_window: params.agent_history_window,
            history_truncate: params.agent_history_truncate,
        }
    }

    /// Courses named in the request; the request itself when none is.
    pub fn topics(snapshot: &ConversationState) -> Vec<String> {
        let courses = StudentContext::mentioned_courses(snapshot);
        if !courses.is_empty() {
            return courses;
        }
        let request = snapshot.current_request().trim();
        vec![sage_domain::core::string::truncate(request, MAX_TOPIC_CHARS)]
    }
}

#[async_trait]
impl Agent for NoteWriter {
    fn name(&self) -> AgentName {
        AgentName::NoteWriter
    }

    async fn run(&self, snapshot: &ConversationState) -> Result<PartialUpdate, AgentError> {
        let style = snapshot.profile_analysis_or_default().learning_style;
        let request = snapshot.current_request();
        let history = history_summary(
            snapshot.prior_messages(),
            self.history_window,
            self.history_truncate,
        );
        let topics = Self::topics(snapshot);

        let calls = topics.iter().map(|topic| async {
            let prompt = PromptTemplate::note_topic(request, topic, style, &history);
            let response = self.caller.call(&prompt).await?;
            Ok::<_, AgentError>(parse_topic_notes(topic, &response)?)
        });

        let mut notes = NoteSet::new(style);
        let mut first_error = None;
        for (topic, result) in topics.iter().zip(join_all(calls).await) {
            match result {
                Ok(topic_notes) => notes = notes.with_topic(topic_notes),
                Err(e) => {
                    warn!(topic = topic.as_str(), "NoteWriter: topic failed: {}", e);
                    first_error.get_or_insert(e);
                }
            }
        }

        if notes.topics.is_empty()
            && let Some(e) = first_error
        {
            return Err(e);
        }

        info!(topics = notes.topics.len(), style = %style, "NoteWriter produced notes");
        Ok(PartialUpdate::complete(
            AgentName::NoteWriter,
            AgentOutput::Notes(notes),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fake::{NOTES, ScriptedGateway};
    use crate::ports::llm_gateway::GatewayError;
    use sage_domain::{LearningStyle, Message, ProfileAnalysis, Record};
    use serde_json::json;
    use std::sync::Arc;

    fn writer(gateway: Arc<ScriptedGateway>) -> NoteWriter {
        let params = ExecutionParams::default();
        NoteWriter::new(GatewayCaller::new(gateway, &params), &params)
    }

    fn snapshot(request: &str) -> ConversationState {
        let profile = json!({
            "academic_info": {"current_courses": [
                {"name": "Calculus III"},
                {"name": "Data Structures"},
                {"name": "Ethics"}
            ]}
        });
        let mut state = ConversationState::new(
            profile.as_object().cloned().unwrap(),
            Record::new(),
            Record::new(),
        )
        .with_history(vec![Message::user(request)]);
        state.profile_analysis = Some(ProfileAnalysis {
            learning_style: LearningStyle::Kinesthetic,
            ..Default::default()
        });
        state
    }

    #[test]
    fn test_topics_from_mentioned_courses() {
        let state = snapshot("notes for calculus iii and data structures please");
        assert_eq!(
            NoteWriter::topics(&state),
            vec!["Calculus III".to_string(), "Data Structures".to_string()]
        );
    }

    #[test]
    fn test_topic_defaults_to_request() {
        let state = snapshot("Explain recursion");
        assert_eq!(NoteWriter::topics(&state), vec!["Explain recursion".to_string()]);
    }

    #[tokio::test]
    async fn test_one_call_per_topic() {
        let gateway = Arc::new(ScriptedGateway::new().respond("notewriter", NOTES));
        let state = snapshot("notes for calculus iii and data structures please");
        let update = writer(gateway.clone()).run(&state).await.unwrap();

        assert_eq!(gateway.call_count("notewriter"), 2);
        for prompt in gateway.prompts("notewriter") {
            assert!(prompt.system.contains("LEARNING STYLE: kinesthetic"));
        }
        match update.output {
            AgentOutput::Notes(notes) => {
                assert_eq!(notes.learning_style, LearningStyle::Kinesthetic);
                assert_eq!(notes.topics.len(), 2);
                assert_eq!(notes.topics[0].topic, "Calculus III");
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_partial_topic_failure_keeps_the_rest() {
        let gateway = Arc::new(
            ScriptedGateway::new()
                .respond("notewriter", NOTES)
                .enqueue("notewriter", Err(GatewayError::Timeout)),
        );
        let state = snapshot("notes for calculus iii and data structures please");
        let update = writer(gateway).run(&state).await.unwrap();
        match update.output {
            AgentOutput::Notes(notes) => assert_eq!(notes.topics.len(), 1),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_all_topics_failing_is_an_error() {
        let gateway = Arc::new(ScriptedGateway::new().respond("notewriter", "   "));
        let err = writer(gateway).run(&snapshot("Explain recursion")).await.unwrap_err();
        assert!(matches!(err, AgentError::Malformed(_)));
    }
}
