//! Profile analyzer: learning style, energy pattern, executive function

use super::GatewayCaller;
use sage_domain::{
    ConversationState, ProfileAnalysis, PromptTemplate, parse_profile_analysis,
};
use serde_json::Value;
use tracing::{debug, warn};

/// Derives the turn's [`ProfileAnalysis`].
///
/// The static reading of the profile record is the fallback whenever the
/// LLM call or its parsing fails; an empty profile skips the call.
pub struct ProfileAnalyzer {
    caller: GatewayCaller,
}

impl ProfileAnalyzer {
    pub fn new(caller: GatewayCaller) -> Self {
        Self { caller }
    }

    pub async fn analyze(&self, state: &ConversationState) -> ProfileAnalysis {
        let fallback = ProfileAnalysis::from_profile(&state.profile);
        if state.profile.is_empty() {
            debug!("Empty profile, skipping profile analysis");
            return fallback;
        }

        let profile = format!("{:#}", Value::Object(state.profile.clone()));
        let response = match self.caller.call(&PromptTemplate::profile_analyzer(&profile)).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Profile analysis failed, using profile defaults: {}", e);
                return fallback;
            }
        };

        match parse_profile_analysis(&response, &fallback) {
            Ok(analysis) => {
                debug!(style = %analysis.learning_style, "Profile analyzed");
                analysis
            }
            Err(e) => {
                warn!("Unreadable profile analysis, using profile defaults: {}", e);
                fallback
            }
        }
    }
}
