//! Gateway calls with a deadline and bounded retry

use crate::config::ExecutionParams;
use crate::ports::llm_gateway::{GatewayError, LlmGateway};
use sage_domain::Prompt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Shared handle agents use to reach the LLM.
///
/// Each call is bounded by `llm_timeout`; expiry becomes
/// [`GatewayError::Timeout`]. Retryable failures are repeated up to
/// `max_retries` times with exponential backoff.
#[derive(Clone)]
pub struct GatewayCaller {
    gateway: Arc<dyn LlmGateway>,
    timeout: Option<Duration>,
    max_retries: usize,
    backoff: Duration,
}

impl GatewayCaller {
    pub fn new(gateway: Arc<dyn LlmGateway>, params: &ExecutionParams) -> Self {
        Self {
            gateway,
            timeout: params.llm_timeout,
            max_retries: params.max_retries,
            backoff: params.retry_backoff,
        }
    }

    pub fn model_name(&self) -> &str {
        self.gateway.model_name()
    }

    pub async fn call(&self, prompt: &Prompt) -> Result<String, GatewayError> {
        let mut attempt = 0;
        loop {
            debug!(step = prompt.label, attempt, "Calling LLM");
            let result = match self.timeout {
                Some(limit) => tokio::time::timeout(limit, self.gateway.generate(prompt))
                    .await
                    .unwrap_or(Err(GatewayError::Timeout)),
                None => self.gateway.generate(prompt).await,
            };

            match result {
                Ok(text) => return Ok(text),
                Err(e) if attempt < self.max_retries && e.is_retryable() => {
                    let delay = self.backoff.saturating_mul(1u32 << attempt.min(16));
                    warn!(
                        step = prompt.label,
                        attempt = attempt + 1,
                        "LLM call failed ({}), retrying in {:?}",
                        e,
                        delay
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
