//! Response parsing: raw LLM text to typed records.
//!
//! Pure domain logic with no I/O: JSON extraction and text pattern
//! matching. Every parser prefers a JSON object (fenced or bare) and falls
//! back to reading the free-form text the model tends to produce anyway.
//!
//! | Function | Produces | Failure |
//! |----------|----------|---------|
//! | [`parse_coordinator_response`] | [`CoordinatorDecision`](crate::CoordinatorDecision) | never (defaults) |
//! | [`parse_profile_analysis`] | [`ProfileAnalysis`](crate::ProfileAnalysis) | [`ParseError`] |
//! | [`parse_schedule_plan`] | [`SchedulePlan`](crate::SchedulePlan) | [`ParseError`] |
//! | [`parse_topic_notes`] | [`TopicNotes`](crate::TopicNotes) | [`ParseError`] |
//! | [`parse_advice_set`] | [`AdviceSet`](crate::AdviceSet) | [`ParseError`] |

mod advice;
mod decision;
mod json_block;
mod notes;
mod profile;
mod schedule;

pub use advice::parse_advice_set;
pub use decision::{parse_coordinator_response, parse_decision_json};
pub use json_block::extract_json_object;
pub use notes::parse_topic_notes;
pub use profile::parse_profile_analysis;
pub use schedule::parse_schedule_plan;

use thiserror::Error;

/// Structured parsing failures (the Malformed error class)
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty response")]
    Empty,

    #[error("No {0} found in response")]
    NotFound(&'static str),

    #[error("Invalid {record}: {detail}")]
    Invalid {
        record: &'static str,
        detail: String,
    },
}

/// Strip list markers (`-`, `*`, `•`, `1.`, `2)`) from the start of a line.
pub(crate) fn strip_list_marker(line: &str) -> &str {
    let trimmed = line.trim();
    if let Some(rest) = trimmed
        .strip_prefix("- ")
        .or_else(|| trimmed.strip_prefix("* "))
        .or_else(|| trimmed.strip_prefix("• "))
    {
        return rest.trim();
    }
    strip_number_marker(trimmed).unwrap_or(trimmed)
}

/// `"3. Do this"` → `Some("Do this")`; also accepts `3)`.
pub(crate) fn strip_number_marker(line: &str) -> Option<&str> {
    let digits = line.chars().take_while(|c| c.is_ascii_digit()).count();
    if digits == 0 || digits > 3 {
        return None;
    }
    let rest = &line[digits..];
    rest.strip_prefix(". ")
        .or_else(|| rest.strip_prefix(") "))
        .map(str::trim)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_list_marker() {
        assert_eq!(strip_list_marker("  - item"), "item");
        assert_eq!(strip_list_marker("• bullet"), "bullet");
        assert_eq!(strip_list_marker("12. twelve"), "twelve");
        assert_eq!(strip_list_marker("plain"), "plain");
    }

    #[test]
    fn test_strip_number_marker() {
        assert_eq!(strip_number_marker("1. first"), Some("first"));
        assert_eq!(strip_number_marker("2) second"), Some("second"));
        assert_eq!(strip_number_marker("2026 was a year"), None);
        assert_eq!(strip_number_marker("no number"), None);
    }
}
