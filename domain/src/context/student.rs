//! Student context (Value Object)
//!
//! A compact view of the conversation state that the Coordinator sees
//! when deciding which agents to run.

use crate::state::ConversationState;
use serde::Serialize;
use serde_json::Value;

/// Summary of who the student is and how loaded their week is
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentContext {
    pub major: String,
    pub academic_year: Value,
    pub learning_style: Value,
    /// First current course whose name appears in the request
    pub course: Option<Value>,
    pub upcoming_events: usize,
    pub active_tasks: usize,
    pub study_patterns: Value,
}

impl StudentContext {
    /// Build the context for the current request. Missing profile keys
    /// fall back to `"Unknown"`, `null` or empty objects.
    pub fn analyze(state: &ConversationState) -> Self {
        let personal = state.profile.get("personal_info");
        let prefs = state.learning_preferences();

        let major = personal
            .and_then(|p| p.get("major"))
            .and_then(Value::as_str)
            .unwrap_or("Unknown")
            .to_string();
        let academic_year = personal
            .and_then(|p| p.get("academic_year"))
            .cloned()
            .unwrap_or(Value::Null);
        let learning_style = prefs
            .and_then(|p| p.get("learning_style"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));
        let study_patterns = prefs
            .and_then(|p| p.get("study_patterns"))
            .cloned()
            .unwrap_or_else(|| Value::Object(Default::default()));

        Self {
            major,
            academic_year,
            learning_style,
            course: Self::matching_course(state).cloned(),
            upcoming_events: state.events().len(),
            active_tasks: state.task_items().len(),
            study_patterns,
        }
    }

    /// First course in `academic_info.current_courses` whose `name`
    /// occurs in the request (case-insensitive).
    pub fn matching_course(state: &ConversationState) -> Option<&Value> {
        let request = state.current_request().to_lowercase();
        state.current_courses().iter().find(|course| {
            course
                .get("name")
                .and_then(Value::as_str)
                .map(|name| !name.is_empty() && request.contains(&name.to_lowercase()))
                .unwrap_or(false)
        })
    }

    /// Names of every current course mentioned in the request, in profile order.
    pub fn mentioned_courses(state: &ConversationState) -> Vec<String> {
        let request = state.current_request().to_lowercase();
        state
            .current_courses()
            .iter()
            .filter_map(|course| course.get("name").and_then(Value::as_str))
            .filter(|name| !name.is_empty() && request.contains(&name.to_lowercase()))
            .map(str::to_string)
            .collect()
    }

    pub fn to_pretty_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Message, Record};
    use serde_json::json;

    fn state_with(profile: Value, request: &str) -> ConversationState {
        let mut state = ConversationState::new(
            profile.as_object().cloned().unwrap(),
            json!({"events": [{"summary": "Lecture"}, {"summary": "Match"}]})
                .as_object()
                .cloned()
                .unwrap(),
            Record::new(),
        );
        state.push_message(Message::user(request));
        state
    }

    #[test]
    fn test_analyze_full_profile() {
        let state = state_with(
            json!({
                "personal_info": {"major": "Computer Science", "academic_year": 3},
                "learning_preferences": {"learning_style": "visual"},
                "academic_info": {"current_courses": [
                    {"name": "Data Structures"},
                    {"name": "Calculus III"}
                ]}
            }),
            "Help me cram calculus iii for tomorrow",
        );
        let ctx = StudentContext::analyze(&state);
        assert_eq!(ctx.major, "Computer Science");
        assert_eq!(ctx.academic_year, json!(3));
        assert_eq!(ctx.course, Some(json!({"name": "Calculus III"})));
        assert_eq!(ctx.upcoming_events, 2);
        assert_eq!(ctx.active_tasks, 0);
    }

    #[test]
    fn test_analyze_empty_profile_defaults() {
        let state = state_with(json!({}), "anything");
        let ctx = StudentContext::analyze(&state);
        assert_eq!(ctx.major, "Unknown");
        assert_eq!(ctx.academic_year, Value::Null);
        assert!(ctx.course.is_none());
        assert_eq!(ctx.learning_style, json!({}));
    }

    #[test]
    fn test_mentioned_courses() {
        let state = state_with(
            json!({"academic_info": {"current_courses": [
                {"name": "Physics"}, {"name": "Chemistry"}, {"name": "History"}
            ]}}),
            "notes for chemistry and physics please",
        );
        assert_eq!(
            StudentContext::mentioned_courses(&state),
            vec!["Physics".to_string(), "Chemistry".to_string()]
        );
    }
}
