//! Progress reporting for turn execution

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use sage_application::ProgressNotifier;
use sage_domain::{AgentName, Phase};
use std::sync::Mutex;

/// Reports progress during a turn with progress bars
pub struct ProgressReporter {
    multi: MultiProgress,
    phase_bar: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            multi: MultiProgress::new(),
            phase_bar: Mutex::new(None),
        }
    }

    fn phase_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    /// Single-step phases get a spinner, agent groups a bar.
    fn bar_for(&self, phase: &Phase, total_tasks: usize) -> ProgressBar {
        match phase {
            Phase::AgentGroup(_) => {
                let pb = self.multi.add(ProgressBar::new(total_tasks as u64));
                pb.set_style(Self::phase_style());
                pb
            }
            _ => {
                let pb = self.multi.add(ProgressBar::new_spinner());
                pb.set_style(Self::spinner_style());
                pb.enable_steady_tick(std::time::Duration::from_millis(100));
                pb
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        let pb = self.bar_for(phase, total_tasks);
        pb.set_prefix(phase.display_name());
        pb.set_message("Working...");

        if let Ok(mut slot) = self.phase_bar.lock() {
            *slot = Some(pb);
        }
    }

    fn on_task_complete(&self, _phase: &Phase, agent: AgentName, success: bool) {
        if let Ok(slot) = self.phase_bar.lock()
            && let Some(pb) = slot.as_ref()
        {
            let status = if success {
                format!("{} {}", "v".green(), agent.display_name())
            } else {
                format!("{} {}", "x".red(), agent.display_name())
            };
            pb.set_message(status);
            pb.inc(1);
        }
    }

    fn on_phase_complete(&self, phase: &Phase) {
        if let Ok(mut slot) = self.phase_bar.lock()
            && let Some(pb) = slot.take()
        {
            pb.finish_with_message(format!("{} complete", phase.display_name().green()));
        }
    }
}

/// Simple text-based progress on stderr (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_phase_start(&self, phase: &Phase, total_tasks: usize) {
        match phase {
            Phase::AgentGroup(_) => eprintln!(
                "{} {} ({} agents)",
                "->".cyan(),
                phase.display_name().bold(),
                total_tasks
            ),
            _ => eprintln!("{} {}", "->".cyan(), phase.display_name().bold()),
        }
    }

    fn on_task_complete(&self, _phase: &Phase, agent: AgentName, success: bool) {
        if success {
            eprintln!("  {} {}", "v".green(), agent.display_name());
        } else {
            eprintln!("  {} {} (fallback)", "x".red(), agent.display_name());
        }
    }

    fn on_phase_complete(&self, _phase: &Phase) {}
}
