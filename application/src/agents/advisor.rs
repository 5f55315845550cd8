//! Advisor: ranked academic guidance

use super::{Agent, AgentError, GatewayCaller};
use crate::config::ExecutionParams;
use async_trait::async_trait;
use sage_domain::{
    AgentName, AgentOutput, ConversationState, PartialUpdate, PromptTemplate, history_summary,
    parse_advice_set,
};
use serde_json::Value;
use tracing::info;

pub struct Advisor {
    caller: GatewayCaller,
    history_window: usize,
    history_truncate: usize,
}

impl Advisor {
    pub fn new(caller: GatewayCaller, params: &ExecutionParams) -> Self {
        Self {
            caller,
            history_window: params.agent_history_window,
            history_truncate: params.agent_history_truncate,
        }
    }
}

#[async_trait]
impl Agent for Advisor {
    fn name(&self) -> AgentName {
        AgentName::Advisor
    }

    async fn run(&self, snapshot: &ConversationState) -> Result<PartialUpdate, AgentError> {
        let profile = format!("{:#}", Value::Object(snapshot.profile.clone()));
        let history = history_summary(
            snapshot.prior_messages(),
            self.history_window,
            self.history_truncate,
        );
        let prompt = PromptTemplate::advisor(
            snapshot.current_request(),
            &profile,
            &snapshot.profile_analysis_or_default(),
            &history,
        );

        let response = self.caller.call(&prompt).await?;
        let advice = parse_advice_set(&response)?;
        info!(actions = advice.actions.len(), "Advisor produced guidance");

        Ok(PartialUpdate::complete(
            AgentName::Advisor,
            AgentOutput::Advice(advice),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agents::fake::{ADVICE, ScriptedGateway};
    use crate::ports::llm_gateway::GatewayError;
    use sage_domain::Message;
    use serde_json::json;
    use std::sync::Arc;

    fn advisor(gateway: Arc<ScriptedGateway>) -> Advisor {
        let params = ExecutionParams::default();
        Advisor::new(GatewayCaller::new(gateway, &params), &params)
    }

    fn snapshot() -> ConversationState {
        let profile = json!({"personal_info": {"major": "Biology"}});
        ConversationState::new(
            profile.as_object().cloned().unwrap(),
            Default::default(),
            Default::default(),
        )
        .with_history(vec![
            Message::user("I have three deadlines"),
            Message::assistant("Let's sort them"),
            Message::user("Which one first?"),
        ])
    }

    #[tokio::test]
    async fn test_advice_from_single_call() {
        let gateway = Arc::new(ScriptedGateway::new().respond("advisor", ADVICE));
        let update = advisor(gateway.clone()).run(&snapshot()).await.unwrap();

        let prompts = gateway.prompts("advisor");
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].system.contains("Biology"));
        assert!(prompts[0].system.contains("REQUEST: Which one first?"));
        assert!(prompts[0].system.contains("User: I have three deadlines"));

        match update.output {
            AgentOutput::Advice(advice) => {
                assert_eq!(advice.actions[0].action, "Start early");
            }
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_numbered_list_is_accepted() {
        let gateway = Arc::new(
            ScriptedGateway::new().respond("advisor", "1. Email the TA - quick win\n2. Sleep"),
        );
        let update = advisor(gateway).run(&snapshot()).await.unwrap();
        match update.output {
            AgentOutput::Advice(advice) => assert_eq!(advice.actions.len(), 2),
            other => panic!("unexpected output {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_failure_propagates() {
        let gateway = Arc::new(
            ScriptedGateway::new().fail("advisor", GatewayError::Unauthorized("key".into())),
        );
        let err = advisor(gateway).run(&snapshot()).await.unwrap_err();
        assert!(matches!(err, AgentError::Transient(_)));
    }
}
