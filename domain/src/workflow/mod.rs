//! Turn workflow: routing, aggregation and reply composition.
//!
//! The driver that sequences these lives in the application layer; the
//! pieces here are pure functions over domain values.

pub mod aggregator;
pub mod phase;
pub mod reply;
pub mod router;

pub use aggregator::{MERGE_TABLE, MergeStrategy, StateField, append_reply, deep_merge, merge, strategy_for};
pub use phase::Phase;
pub use reply::{AgentBreakdown, AssistantReply, SHORT_CIRCUIT_REPLY};
pub use router::{ExecutionPlan, route};
