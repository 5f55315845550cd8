//! Application layer for SAGE
//!
//! This crate contains the agents, the turn driver, port definitions and
//! execution parameters. It depends only on the domain layer.

pub mod agents;
pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use agents::{Agent, AgentError, AgentRegistry, GatewayCaller};
pub use config::ExecutionParams;
pub use ports::{
    conversation_logger::{ConversationEvent, ConversationLogger, NoConversationLogger},
    llm_gateway::{GatewayError, LlmGateway},
    progress::{NoProgress, ProgressNotifier},
};
pub use use_cases::chat_session::ChatSession;
pub use use_cases::run_turn::{RunTurnError, RunTurnInput, RunTurnUseCase, TurnOutcome};
