//! Planner output

use serde::{Deserialize, Serialize};

/// One scheduled block of time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlock {
    /// Start, as written by the planner (e.g. `Mon 14:00`, `2PM`)
    pub start: String,
    /// End, same convention as `start`
    pub end: String,
    /// What to do in this block
    pub activity: String,
    /// Optional focus technique or note (e.g. `3x20min sprints`)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<String>,
}

impl TimeBlock {
    pub fn new(start: impl Into<String>, end: impl Into<String>, activity: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            activity: activity.into(),
            focus: None,
        }
    }

    pub fn with_focus(mut self, focus: impl Into<String>) -> Self {
        self.focus = Some(focus.into());
        self
    }
}

/// A study schedule produced by the Planner
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulePlan {
    /// Short overview of the plan
    #[serde(default)]
    pub summary: String,
    /// Ordered time blocks
    pub time_blocks: Vec<TimeBlock>,
    /// What to do when focus or energy breaks down
    #[serde(default)]
    pub emergency_protocols: Vec<String>,
}

impl SchedulePlan {
    pub fn new(summary: impl Into<String>) -> Self {
        Self {
            summary: summary.into(),
            ..Default::default()
        }
    }

    pub fn with_block(mut self, block: TimeBlock) -> Self {
        self.time_blocks.push(block);
        self
    }

    pub fn with_protocol(mut self, protocol: impl Into<String>) -> Self {
        self.emergency_protocols.push(protocol.into());
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.summary.is_empty() {
            out.push_str(&self.summary);
            out.push_str("\n\n");
        }
        for block in &self.time_blocks {
            out.push_str(&format!("- {}-{}: {}", block.start, block.end, block.activity));
            if let Some(focus) = &block.focus {
                out.push_str(&format!(" ({})", focus));
            }
            out.push('\n');
        }
        if !self.emergency_protocols.is_empty() {
            out.push_str("\nEmergency protocols:\n");
            for protocol in &self.emergency_protocols {
                out.push_str(&format!("- {}\n", protocol));
            }
        }
        out.trim_end().to_string()
    }
}
