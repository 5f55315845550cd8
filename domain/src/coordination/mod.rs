//! Coordinator decisions.

pub mod decision;

pub use decision::CoordinatorDecision;
