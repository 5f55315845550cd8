//! Student profile analysis.

pub mod analysis;

pub use analysis::{LearningStyle, ProfileAnalysis};
