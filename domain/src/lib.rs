//! Domain layer for SAGE
//!
//! This crate contains the core types and pure logic of a turn. It has no
//! dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Turn
//!
//! One user request flows through a fixed pipeline:
//!
//! ```text
//! Coordinator → ProfileAnalyzer → Router → agent groups → Aggregator → reply
//! ```
//!
//! - **Coordinator decision**: which agents run and how they are grouped
//! - **Router**: decision to ordered groups (sequential between, concurrent within)
//! - **Partial update**: what one agent contributes; merged by the aggregator
//!
//! ## Agents
//!
//! - **Planner**: schedule built from the calendar and task list
//! - **NoteWriter**: study notes adapted to the learning style
//! - **Advisor**: ranked academic guidance

pub mod agent;
pub mod config;
pub mod context;
pub mod coordination;
pub mod core;
pub mod output;
pub mod parsing;
pub mod profile;
pub mod prompt;
pub mod state;
pub mod workflow;

// Re-export commonly used types
pub use agent::AgentName;
pub use config::OutputFormat;
pub use context::StudentContext;
pub use coordination::CoordinatorDecision;
pub use core::error::DomainError;
pub use output::{
    AdviceSet, AgentOutput, FailureKind, FallbackPayload, NoteSet, PartialUpdate, RankedAction,
    SchedulePlan, TimeBlock, TopicNotes, UpdateStatus,
};
pub use parsing::{
    ParseError, extract_json_object, parse_advice_set, parse_coordinator_response,
    parse_decision_json, parse_profile_analysis, parse_schedule_plan, parse_topic_notes,
};
pub use profile::{LearningStyle, ProfileAnalysis};
pub use prompt::{Prompt, PromptTemplate, history_summary};
pub use state::{ConversationState, Message, Record, Role};
pub use workflow::{
    AgentBreakdown, AssistantReply, ExecutionPlan, MergeStrategy, Phase, StateField, merge, route,
};
