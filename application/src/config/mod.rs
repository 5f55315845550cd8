//! Application-level configuration.
//!
//! - [`ExecutionParams`] controls LLM call deadlines, retries and the
//!   history each step sees

pub mod execution_params;

pub use execution_params::ExecutionParams;
