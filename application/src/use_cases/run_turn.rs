//! Run Turn use case
//!
//! Drives one request through the fixed pipeline:
//! Coordinator → ProfileAnalyzer → Router → agent groups → Aggregator → reply.

use crate::agents::{Agent, AgentRegistry, Coordinator, GatewayCaller, ProfileAnalyzer};
use crate::config::ExecutionParams;
use crate::ports::conversation_logger::{
    ConversationEvent, ConversationLogger, NoConversationLogger,
};
use crate::ports::llm_gateway::LlmGateway;
use crate::ports::progress::{NoProgress, ProgressNotifier};
use sage_domain::{
    AgentName, AssistantReply, ConversationState, CoordinatorDecision, ExecutionPlan,
    FailureKind, Message, PartialUpdate, Phase, Record, merge, route, workflow::append_reply,
};
use serde::Serialize;
use serde_json::json;
use std::collections::BTreeSet;
use std::sync::Arc;
use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Errors that can occur before a turn starts.
///
/// Agent failures never surface here; they degrade the affected agent's
/// result instead.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RunTurnError {
    #[error("Request is empty")]
    EmptyRequest,
}

/// Input for the RunTurn use case
#[derive(Debug, Clone, Default)]
pub struct RunTurnInput {
    /// The user's request for this turn
    pub request: String,
    /// Messages from earlier turns
    pub history: Vec<Message>,
    pub profile: Record,
    pub calendar: Record,
    pub tasks: Record,
}

impl RunTurnInput {
    pub fn new(request: impl Into<String>) -> Self {
        Self {
            request: request.into(),
            ..Default::default()
        }
    }

    pub fn with_history(mut self, history: Vec<Message>) -> Self {
        self.history = history;
        self
    }

    pub fn with_data(mut self, profile: Record, calendar: Record, tasks: Record) -> Self {
        self.profile = profile;
        self.calendar = calendar;
        self.tasks = tasks;
        self
    }
}

/// Everything a turn produced
#[derive(Debug, Clone, Serialize)]
pub struct TurnOutcome {
    /// Final state, with the assistant reply appended to the history
    pub state: ConversationState,
    pub decision: CoordinatorDecision,
    pub plan: ExecutionPlan,
    pub reply: AssistantReply,
}

/// Use case for running one conversation turn
pub struct RunTurnUseCase<G: LlmGateway + 'static> {
    gateway: Arc<G>,
    coordinator: Coordinator,
    profile_analyzer: ProfileAnalyzer,
    registry: AgentRegistry,
    logger: Arc<dyn ConversationLogger>,
}

impl<G: LlmGateway + 'static> RunTurnUseCase<G> {
    pub fn new(gateway: Arc<G>, params: ExecutionParams) -> Self {
        let caller = GatewayCaller::new(gateway.clone(), &params);
        Self {
            coordinator: Coordinator::new(caller.clone(), &params),
            profile_analyzer: ProfileAnalyzer::new(caller.clone()),
            registry: AgentRegistry::standard(caller, &params),
            gateway,
            logger: Arc::new(NoConversationLogger),
        }
    }

    pub fn with_logger(mut self, logger: Arc<dyn ConversationLogger>) -> Self {
        self.logger = logger;
        self
    }

    /// Replace the agent lookup table.
    pub fn with_registry(mut self, registry: AgentRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn model_name(&self) -> &str {
        self.gateway.model_name()
    }

    pub fn agent_names(&self) -> Vec<AgentName> {
        self.registry.names()
    }

    /// Execute the use case with default (no-op) progress
    pub async fn execute(&self, input: RunTurnInput) -> Result<TurnOutcome, RunTurnError> {
        self.execute_with_progress(input, &NoProgress).await
    }

    /// Execute the use case with progress callbacks
    pub async fn execute_with_progress(
        &self,
        input: RunTurnInput,
        progress: &dyn ProgressNotifier,
    ) -> Result<TurnOutcome, RunTurnError> {
        let request = input.request.trim();
        if request.is_empty() {
            return Err(RunTurnError::EmptyRequest);
        }

        let mut state = ConversationState::new(input.profile, input.calendar, input.tasks)
            .with_history(input.history);
        state.push_message(Message::user(request));

        info!("Starting turn: {}", sage_domain::core::string::truncate(request, 80));

        // Coordination
        progress.on_phase_start(&Phase::Coordination, 1);
        let decision = self.coordinator.decide(&state).await;
        progress.on_phase_complete(&Phase::Coordination);

        let plan = route(&decision);
        if !plan.dropped.is_empty() {
            debug!(dropped = ?plan.dropped, "Dropped unknown agent names");
        }
        self.logger.log(ConversationEvent::new(
            "coordinator_decision",
            json!({
                "decision": decision,
                "phases": plan.phases,
                "dropped": plan.dropped,
            }),
        ));
        state.decision = Some(decision.clone());

        if plan.is_empty() {
            info!("No agent selected, short-circuiting");
            let reply = AssistantReply::short_circuit();
            return Ok(self.finish(state, decision, plan, reply));
        }

        // Profile analysis
        progress.on_phase_start(&Phase::ProfileAnalysis, 1);
        let analysis = self.profile_analyzer.analyze(&state).await;
        progress.on_phase_complete(&Phase::ProfileAnalysis);
        self.logger.log(ConversationEvent::new(
            "profile_analysis",
            json!({ "analysis": analysis }),
        ));
        state.profile_analysis = Some(analysis);

        // Agent groups, one after another
        for (index, group) in plan.phases.iter().enumerate() {
            let phase = Phase::AgentGroup(index);
            info!("{}: {:?}", phase.display_name(), group);
            progress.on_phase_start(&phase, group.len());
            let updates = self.run_group(&state, group, &phase, progress).await;
            state = merge(state, updates);
            progress.on_phase_complete(&phase);
        }

        // Synthesis
        progress.on_phase_start(&Phase::Synthesis, 1);
        let reply = AssistantReply::compose(&state, &plan);
        progress.on_phase_complete(&Phase::Synthesis);

        Ok(self.finish(state, decision, plan, reply))
    }

    /// Run one group concurrently against a shared snapshot.
    ///
    /// Every scheduled agent yields exactly one update: a failure, an
    /// unregistered name or a crashed task becomes a degraded update for
    /// that agent only.
    async fn run_group(
        &self,
        state: &ConversationState,
        group: &[AgentName],
        phase: &Phase,
        progress: &dyn ProgressNotifier,
    ) -> Vec<PartialUpdate> {
        let snapshot = Arc::new(state.clone());
        let mut join_set = JoinSet::new();
        let mut pending: BTreeSet<AgentName> = BTreeSet::new();
        let mut updates = Vec::with_capacity(group.len());

        for &name in group {
            let Some(agent) = self.registry.get(name) else {
                warn!("Agent {} is not registered", name);
                progress.on_task_complete(phase, name, false);
                updates.push(self.degrade(name, FailureKind::Transient, "agent not registered"));
                continue;
            };
            pending.insert(name);
            let snapshot = Arc::clone(&snapshot);
            join_set.spawn(async move {
                let result = agent.run(&snapshot).await;
                (name, result)
            });
        }

        while let Some(result) = join_set.join_next().await {
            match result {
                Ok((name, Ok(update))) => {
                    info!("Agent {} completed", name);
                    pending.remove(&name);
                    progress.on_task_complete(phase, name, true);
                    self.logger.log(ConversationEvent::new(
                        "agent_output",
                        json!({ "agent": name, "output": update.output }),
                    ));
                    updates.push(update);
                }
                Ok((name, Err(e))) => {
                    warn!("Agent {} failed, using fallback: {}", name, e);
                    pending.remove(&name);
                    progress.on_task_complete(phase, name, false);
                    updates.push(self.degrade(name, e.kind(), e.to_string()));
                }
                Err(e) => {
                    warn!("Task join error: {}", e);
                }
            }
        }

        for name in pending {
            progress.on_task_complete(phase, name, false);
            updates.push(self.degrade(name, FailureKind::Transient, "agent task did not complete"));
        }

        updates
    }

    fn degrade(&self, agent: AgentName, kind: FailureKind, reason: impl Into<String>) -> PartialUpdate {
        let reason = reason.into();
        self.logger.log(ConversationEvent::new(
            "agent_fallback",
            json!({ "agent": agent, "kind": kind, "reason": reason }),
        ));
        PartialUpdate::degraded(agent, kind, reason)
    }

    fn finish(
        &self,
        mut state: ConversationState,
        decision: CoordinatorDecision,
        plan: ExecutionPlan,
        reply: AssistantReply,
    ) -> TurnOutcome {
        append_reply(&mut state, reply.text.clone());
        self.logger.log(ConversationEvent::new(
            "turn_complete",
            json!({
                "agents": reply.breakdown.iter().map(|b| b.agent).collect::<Vec<_>>(),
                "degraded": reply.degraded_count(),
                "short_circuit": reply.is_short_circuit(),
            }),
        ));
        info!(
            agents = reply.breakdown.len(),
            degraded = reply.degraded_count(),
            "Turn complete"
        );
        TurnOutcome {
            state,
            decision,
            plan,
            reply,
        }
    }
}
