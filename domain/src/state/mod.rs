//! Conversation state threaded through one turn.
//!
//! - [`ConversationState`]: the shared record owned by the workflow driver
//! - [`Message`] / [`Role`]: message history entries
//! - [`time`]: datetime helpers for calendar events and tasks

pub mod conversation;
pub mod message;
pub mod time;

pub use conversation::{ConversationState, Record};
pub use message::{Message, Role};
