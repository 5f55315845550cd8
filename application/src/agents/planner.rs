//! Planner: calendar analysis → task analysis → plan generation

use super::{Agent, AgentError, GatewayCaller};
use crate::config::ExecutionParams;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sage_domain::state::time::{event_start, window_end, within};
use sage_domain::{
    AgentName, AgentOutput, ConversationState, PartialUpdate, PromptTemplate, Record,
    history_summary, parse_schedule_plan,
};
use serde_json::{Value, json};
use tracing::{debug, info};

/// Builds a study schedule in three fixed LLM round-trips.
///
/// The two analyses are also returned as `planner_analysis` fragments of
/// the calendar and task records.
pub struct Planner {
    caller: GatewayCaller,
    lookahead_days: i64,
    temperature: f32,
    history_window: usize,
    history_truncate: usize,
}

impl Planner {
    pub fn new(caller: GatewayCaller, params: &ExecutionParams) -> Self {
        Self {
            caller,
            lookahead_days: params.lookahead_days,
            temperature: params.planner_temperature,
            history_window: params.agent_history_window,
            history_truncate: params.agent_history_truncate,
        }
    }

    /// Events starting within the lookahead window from `now`. Events
    /// without a readable start time are skipped.
    pub fn upcoming_events(&self, snapshot: &ConversationState, now: DateTime<Utc>) -> Vec<Value> {
        let until = window_end(now, self.lookahead_days);
        snapshot
            .events()
            .iter()
            .filter(|event| event_start(event).is_some_and(|start| within(start, now, until)))
            .cloned()
            .collect()
    }

    async fn run_at(
        &self,
        snapshot: &ConversationState,
        now: DateTime<Utc>,
    ) -> Result<PartialUpdate, AgentError> {
        let events = self.upcoming_events(snapshot, now);
        debug!(events = events.len(), "Planner: analyzing calendar");
        let calendar_analysis = self
            .caller
            .call(&PromptTemplate::calendar_analysis(&Value::Array(events.clone()).to_string()))
            .await?;

        let tasks = Value::Array(snapshot.task_items().to_vec());
        debug!("Planner: analyzing tasks");
        let task_analysis = self
            .caller
            .call(&PromptTemplate::task_analysis(&tasks.to_string()))
            .await?;

        let history = history_summary(
            snapshot.prior_messages(),
            self.history_window,
            self.history_truncate,
        );
        let prompt = PromptTemplate::plan_generation(
            snapshot.current_request(),
            &snapshot.profile_analysis_or_default(),
            &calendar_analysis,
            &task_analysis,
            &history,
        )
        .with_temperature(self.temperature);
        let response = self.caller.call(&prompt).await?;
        let plan = parse_schedule_plan(&response)?;

        info!(blocks = plan.time_blocks.len(), "Planner produced a schedule");

        Ok(
            PartialUpdate::complete(AgentName::Planner, AgentOutput::Schedule(plan))
                .with_calendar(fragment(json!({
                    "analysis": calendar_analysis,
                    "events_considered": events.len(),
                    "lookahead_days": self.lookahead_days,
                })))
                .with_tasks(fragment(json!({ "analysis": task_analysis }))),
        )
    }
}

fn fragment(analysis: Value) -> Record {
    let mut record = Record::new();
    record.insert("planner_analysis".to_string(), analysis);
    record
}

#[async_trait]
impl Agent for Planner {
    fn name(&self) -> AgentName {
        AgentName::Planner
    }

    async fn run(&self, snapshot: &ConversationState) -> Result<PartialUpdate, AgentError> {
        self.run_at(snapshot, Utc::now()).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fake::ScriptedGateway;
    use crate::ports::llm_gateway::GatewayError;
    use chrono::TimeZone;
    use sage_domain::{Message, ParseError};
    use std::sync::Arc;

    fn record(value: Value) -> Record {
        value.as_object().cloned().unwrap()
    }

    fn planner(gateway: Arc<ScriptedGateway>) -> Planner {
        let params = ExecutionParams::default();
        Planner::new(GatewayCaller::new(gateway, &params), &params)
    }

    fn snapshot() -> ConversationState {
        ConversationState::new(
            Record::new(),
            record(json!({"events": [
                {"summary": "Lecture", "start": {"dateTime": "2026-03-02T09:00:00Z"}},
                {"summary": "Match", "start": {"dateTime": "2026-03-05T18:00:00"}},
                {"summary": "Too late", "start": {"dateTime": "2026-03-20T09:00:00Z"}},
                {"summary": "Past", "start": {"dateTime": "2026-02-01T09:00:00Z"}},
                {"summary": "Broken", "start": {"dateTime": "someday"}}
            ]})),
            record(json!({"tasks": [{"title": "Essay", "due": "2026-03-04T23:59:00Z"}]})),
        )
        .with_history(vec![Message::user("Create a study schedule for this week")])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 3, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_upcoming_events_window() {
        let planner = planner(Arc::new(ScriptedGateway::new()));
        let events = planner.upcoming_events(&snapshot(), now());
        let names: Vec<&str> = events.iter().map(|e| e["summary"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Lecture", "Match"]);
    }

    #[test]
    fn test_unbounded_lookahead_includes_far_events() {
        let params = ExecutionParams::default().with_lookahead_days(i64::MAX);
        let planner = Planner::new(GatewayCaller::new(Arc::new(ScriptedGateway::new()), &params), &params);
        let events = planner.upcoming_events(&snapshot(), now());
        let names: Vec<&str> = events.iter().map(|e| e["summary"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["Lecture", "Match", "Too late"]);
    }

    #[tokio::test]
    async fn test_three_stage_pipeline() {
        let gateway = Arc::new(ScriptedGateway::happy());
        let update = planner(gateway.clone()).run_at(&snapshot(), now()).await.unwrap();

        assert_eq!(gateway.call_count("planner.calendar"), 1);
        assert_eq!(gateway.call_count("planner.tasks"), 1);
        assert_eq!(gateway.call_count("planner.plan"), 1);

        let calendar_prompt = &gateway.prompts("planner.calendar")[0];
        let sent = calendar_prompt.user.as_deref().unwrap();
        assert!(sent.contains("Lecture") && !sent.contains("Too late"));

        let plan_prompt = &gateway.prompts("planner.plan")[0];
        assert_eq!(plan_prompt.temperature, Some(0.5));
        assert!(plan_prompt.system.contains("Tuesday afternoon is free"));
        assert!(plan_prompt.system.contains("Essay first"));

        match &update.output {
            AgentOutput::Schedule(plan) => assert!(!plan.time_blocks.is_empty()),
            other => panic!("unexpected output {:?}", other),
        }
        assert_eq!(update.calendar["planner_analysis"]["events_considered"], 2);
        assert_eq!(update.tasks["planner_analysis"]["analysis"], "1. Essay first");
    }

    #[tokio::test]
    async fn test_missing_calendar_and_tasks_are_empty() {
        let gateway = Arc::new(ScriptedGateway::happy());
        let state = ConversationState::default().with_history(vec![Message::user("plan")]);
        let update = planner(gateway.clone()).run(&state).await.unwrap();
        assert_eq!(gateway.prompts("planner.calendar")[0].user.as_deref(), Some("[]"));
        assert_eq!(gateway.prompts("planner.tasks")[0].user.as_deref(), Some("[]"));
        assert!(!update.is_degraded());
    }

    #[tokio::test]
    async fn test_gateway_failure_is_transient() {
        let gateway = Arc::new(
            ScriptedGateway::happy().fail("planner.tasks", GatewayError::Timeout),
        );
        let err = planner(gateway.clone()).run_at(&snapshot(), now()).await.unwrap_err();
        assert!(matches!(err, AgentError::Transient(GatewayError::Timeout)));
        assert_eq!(gateway.call_count("planner.plan"), 0);
    }

    #[tokio::test]
    async fn test_unparseable_plan_is_malformed() {
        let gateway = Arc::new(ScriptedGateway::happy().respond("planner.plan", "Just relax."));
        let err = planner(gateway).run_at(&snapshot(), now()).await.unwrap_err();
        assert!(matches!(err, AgentError::Malformed(ParseError::NotFound(_))));
    }
}
