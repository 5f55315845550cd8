//! Prompt domain
//!
//! Templates for every LLM round-trip of a turn, plus the history summary
//! embedded in them. Pure functions of their inputs.

mod template;

pub use template::PromptTemplate;

use crate::core::string::truncate;
use crate::state::Message;

/// Rendered when there is no prior history to summarize
pub const EMPTY_HISTORY: &str = "This is the start of the conversation.";

/// One LLM request: a system instruction, an optional user message and
/// an optional sampling temperature override.
#[derive(Debug, Clone, PartialEq)]
pub struct Prompt {
    /// Which step issued the prompt (`coordinator`, `planner.calendar`, ...)
    pub label: &'static str,
    pub system: String,
    pub user: Option<String>,
    pub temperature: Option<f32>,
}

impl Prompt {
    pub fn new(label: &'static str, system: impl Into<String>) -> Self {
        Self {
            label,
            system: system.into(),
            user: None,
            temperature: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.user = Some(user.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// System and user text joined, for gateways without role support.
    pub fn text(&self) -> String {
        match &self.user {
            Some(user) => format!("{}\n\n{}", self.system, user),
            None => self.system.clone(),
        }
    }
}

/// Summarize prior messages as `Role: content` lines.
///
/// Keeps the last `window` messages, each truncated to `max_chars`.
pub fn history_summary(messages: &[Message], window: usize, max_chars: usize) -> String {
    if messages.is_empty() || window == 0 {
        return EMPTY_HISTORY.to_string();
    }

    let start = messages.len().saturating_sub(window);
    messages[start..]
        .iter()
        .map(|m| format!("{}: {}", m.role.label(), truncate(&m.content, max_chars)))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_history_summary_window_and_truncation() {
        let messages = vec![
            Message::user("one"),
            Message::assistant("two"),
            Message::user("three"),
            Message::assistant("a long answer that goes on"),
        ];
        let summary = history_summary(&messages, 2, 6);
        assert_eq!(summary, "User: three\nAssistant: a long...");
    }

    #[test]
    fn test_history_summary_empty() {
        assert_eq!(history_summary(&[], 4, 400), EMPTY_HISTORY);
    }

    #[test]
    fn test_prompt_text() {
        let prompt = Prompt::new("advisor", "system").with_user("user");
        assert_eq!(prompt.text(), "system\n\nuser");
        assert_eq!(Prompt::new("advisor", "only").text(), "only");
    }
}
