//! Progress notification port
//!
//! Defines the interface for reporting progress during a turn.

use sage_domain::{AgentName, Phase};

/// Callback for progress updates during a turn
///
/// Implementations live in the presentation layer and can display
/// progress in various ways (progress bars, plain text, ...).
pub trait ProgressNotifier: Send + Sync {
    /// Called when a phase starts
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize);

    /// Called when an agent finishes within an agent group
    fn on_task_complete(&self, phase: &Phase, agent: AgentName, success: bool);

    /// Called when a phase completes
    fn on_phase_complete(&self, phase: &Phase);
}

/// No-op progress notifier for when progress reporting is not needed
pub struct NoProgress;

impl ProgressNotifier for NoProgress {
    fn on_phase_start(&self, _phase: &Phase, _total_tasks: usize) {}
    fn on_task_complete(&self, _phase: &Phase, _agent: AgentName, _success: bool) {}
    fn on_phase_complete(&self, _phase: &Phase) {}
}
