//! Agent identity.
//!
//! [`AgentName`] is the closed set of specialist agents a Coordinator
//! decision can name. It is the only vocabulary the router accepts.

pub mod name;

pub use name::AgentName;
