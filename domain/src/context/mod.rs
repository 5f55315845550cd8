//! Student context summarized for the Coordinator.

pub mod student;

pub use student::StudentContext;
