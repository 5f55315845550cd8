//! Execution parameters for one turn.
//!
//! [`ExecutionParams`] groups the knobs that control how agents call the
//! LLM and how much history they see. These are application-layer
//! concerns, not domain policy.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Turn execution parameters.
///
/// | Knob | Default | Used by |
/// |------|---------|---------|
/// | `llm_timeout` | 60s | every LLM call |
/// | `max_retries` | 0 | every LLM call |
/// | `retry_backoff` | 500ms | every LLM call (doubles per retry) |
/// | `coordinator_history` | 6 msgs / 300 chars | Coordinator |
/// | `agent_history` | 4 msgs / 400 chars | Planner, NoteWriter, Advisor |
/// | `planner_temperature` | 0.5 | plan generation |
/// | `lookahead_days` | 7 | Planner calendar analysis |
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionParams {
    /// Deadline for each LLM call; `None` waits indefinitely.
    pub llm_timeout: Option<Duration>,
    /// Extra attempts after a retryable gateway failure.
    pub max_retries: usize,
    /// Delay before the first retry.
    pub retry_backoff: Duration,
    pub coordinator_history_window: usize,
    pub coordinator_history_truncate: usize,
    pub agent_history_window: usize,
    pub agent_history_truncate: usize,
    pub planner_temperature: f32,
    pub lookahead_days: i64,
}

impl Default for ExecutionParams {
    fn default() -> Self {
        Self {
            llm_timeout: Some(Duration::from_secs(60)),
            max_retries: 0,
            retry_backoff: Duration::from_millis(500),
            coordinator_history_window: 6,
            coordinator_history_truncate: 300,
            agent_history_window: 4,
            agent_history_truncate: 400,
            planner_temperature: 0.5,
            lookahead_days: 7,
        }
    }
}

impl ExecutionParams {
    // ==================== Builder Methods ====================

    pub fn with_llm_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.llm_timeout = timeout;
        self
    }

    pub fn with_retries(mut self, max_retries: usize, backoff: Duration) -> Self {
        self.max_retries = max_retries;
        self.retry_backoff = backoff;
        self
    }

    pub fn with_coordinator_history(mut self, window: usize, truncate: usize) -> Self {
        self.coordinator_history_window = window;
        self.coordinator_history_truncate = truncate;
        self
    }

    pub fn with_planner_temperature(mut self, temperature: f32) -> Self {
        self.planner_temperature = temperature;
        self
    }

    pub fn with_lookahead_days(mut self, days: i64) -> Self {
        self.lookahead_days = days;
        self
    }
}
