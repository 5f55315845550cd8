//! Interactive chat module
//!
//! Provides a readline-based chat interface that keeps one conversation
//! going across turns.

mod repl;

pub use repl::{ChatRepl, CommandOutcome};
