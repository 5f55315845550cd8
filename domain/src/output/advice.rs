//! Advisor output

use serde::{Deserialize, Serialize};

/// One recommended action; rank 1 is most important
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankedAction {
    pub rank: u32,
    pub action: String,
    #[serde(default)]
    pub rationale: String,
}

/// Ranked guidance produced by the Advisor
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdviceSet {
    #[serde(default)]
    pub summary: String,
    pub actions: Vec<RankedAction>,
}

impl AdviceSet {
    pub fn render(&self) -> String {
        let mut out = String::new();
        if !self.summary.is_empty() {
            out.push_str(&self.summary);
            out.push_str("\n\n");
        }
        for action in &self.actions {
            out.push_str(&format!("{}. {}", action.rank, action.action));
            if !action.rationale.is_empty() {
                out.push_str(&format!(" - {}", action.rationale));
            }
            out.push('\n');
        }
        out.trim_end().to_string()
    }
}
