//! Scripted gateway shared by the unit tests of this crate.

use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use async_trait::async_trait;
use sage_domain::Prompt;
use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

pub const COORDINATOR_ALL: &str = r#"Thought: exam week.
Decision: everyone.
```json
{"required_agents": ["PLANNER", "NOTEWRITER", "ADVISOR"], "priority": {"PLANNER": 1, "NOTEWRITER": 2, "ADVISOR": 3}, "concurrent_groups": [["PLANNER", "NOTEWRITER", "ADVISOR"]], "reasoning": "needs all three"}
```"#;

pub const PROFILE: &str = r#"{"learning_style": "visual", "energy_pattern": {"morning": "peak"}, "executive_function_notes": "short sessions"}"#;

pub const PLAN: &str = r#"```json
{"summary": "Week plan", "time_blocks": [{"start": "09:00", "end": "10:30", "activity": "Calculus practice"}], "emergency_protocols": ["Walk it off"]}
```"#;

pub const NOTES: &str = r#"{"notes": "Integrals add up slices.", "key_points": ["Draw the region"]}"#;

pub const ADVICE: &str = r#"{"summary": "Pace yourself", "actions": [{"rank": 1, "action": "Start early", "rationale": "less stress"}]}"#;

/// Gateway answering by prompt label.
///
/// Queued results are served first, then the label's default. Unscripted
/// labels fail with [`GatewayError::Other`].
#[derive(Default)]
pub struct ScriptedGateway {
    queued: Mutex<HashMap<&'static str, VecDeque<Result<String, GatewayError>>>>,
    defaults: Mutex<HashMap<&'static str, Result<String, GatewayError>>>,
    calls: Mutex<Vec<Prompt>>,
    delay: Option<Duration>,
}

impl ScriptedGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every step answers with a well-formed response; the coordinator
    /// selects all three agents in one group.
    pub fn happy() -> Self {
        Self::new()
            .respond("coordinator", COORDINATOR_ALL)
            .respond("profile_analyzer", PROFILE)
            .respond("planner.calendar", "- Tuesday afternoon is free")
            .respond("planner.tasks", "1. Essay first")
            .respond("planner.plan", PLAN)
            .respond("notewriter", NOTES)
            .respond("advisor", ADVICE)
    }

    pub fn respond(self, label: &'static str, text: &str) -> Self {
        self.defaults
            .lock()
            .unwrap()
            .insert(label, Ok(text.to_string()));
        self
    }

    pub fn fail(self, label: &'static str, error: GatewayError) -> Self {
        self.defaults.lock().unwrap().insert(label, Err(error));
        self
    }

    pub fn enqueue(self, label: &'static str, result: Result<String, GatewayError>) -> Self {
        self.queued
            .lock()
            .unwrap()
            .entry(label)
            .or_default()
            .push_back(result);
        self
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn call_count(&self, label: &str) -> usize {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.label == label)
            .count()
    }

    pub fn total_calls(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn prompts(&self, label: &str) -> Vec<Prompt> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.label == label)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl LlmGateway for ScriptedGateway {
    async fn generate(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        self.calls.lock().unwrap().push(prompt.clone());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        let queued = self
            .queued
            .lock()
            .unwrap()
            .get_mut(prompt.label)
            .and_then(VecDeque::pop_front);
        if let Some(result) = queued {
            return result;
        }

        self.defaults
            .lock()
            .unwrap()
            .get(prompt.label)
            .cloned()
            .unwrap_or_else(|| Err(GatewayError::Other(format!("no script for {}", prompt.label))))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
