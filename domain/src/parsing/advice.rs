//! Advisor guidance parsing.

use super::json_block::extract_json_object;
use super::{ParseError, strip_number_marker};
use crate::output::{AdviceSet, RankedAction};
use serde_json::Value;

/// Parse the Advisor's response into ranked actions.
///
/// # Supported Formats
///
/// 1. **JSON**: `{"summary": .., "actions": [{"rank", "action", "rationale"}]}`;
///    missing ranks follow list order
/// 2. **Numbered list**: `1. Action - rationale`; text before the first
///    item is the summary, indented lines extend the previous rationale
///
/// Actions are returned sorted by rank. No actions is an error.
pub fn parse_advice_set(response: &str) -> Result<AdviceSet, ParseError> {
    let text = response.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut advice = match extract_json_object(text) {
        Some(Value::Object(obj)) if obj.contains_key("actions") => {
            let items = obj
                .get("actions")
                .and_then(Value::as_array)
                .ok_or_else(|| ParseError::Invalid {
                    record: "advice",
                    detail: "actions must be a list".to_string(),
                })?;
            AdviceSet {
                summary: obj
                    .get("summary")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .trim()
                    .to_string(),
                actions: items
                    .iter()
                    .enumerate()
                    .filter_map(|(i, item)| action_from_json(i, item))
                    .collect(),
            }
        }
        _ => advice_from_text(text),
    };

    if advice.actions.is_empty() {
        return Err(ParseError::NotFound("ranked actions"));
    }
    advice.actions.sort_by_key(|a| a.rank);
    Ok(advice)
}

fn action_from_json(index: usize, item: &Value) -> Option<RankedAction> {
    match item {
        Value::String(s) if !s.trim().is_empty() => Some(RankedAction {
            rank: index as u32 + 1,
            action: s.trim().to_string(),
            rationale: String::new(),
        }),
        Value::Object(obj) => {
            let action = obj.get("action").and_then(Value::as_str)?.trim().to_string();
            let rank = obj
                .get("rank")
                .and_then(Value::as_u64)
                .map(|r| r as u32)
                .unwrap_or(index as u32 + 1);
            let rationale = obj
                .get("rationale")
                .or_else(|| obj.get("why"))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .trim()
                .to_string();
            Some(RankedAction {
                rank,
                action,
                rationale,
            })
        }
        _ => None,
    }
}

fn advice_from_text(text: &str) -> AdviceSet {
    let mut summary_lines: Vec<&str> = Vec::new();
    let mut actions: Vec<RankedAction> = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        if let Some(item) = strip_number_marker(trimmed) {
            let item = item.replace("**", "");
            let (action, rationale) = split_rationale(&item);
            actions.push(RankedAction {
                rank: actions.len() as u32 + 1,
                action,
                rationale,
            });
        } else if let Some(last) = actions.last_mut() {
            if line.starts_with(char::is_whitespace) {
                let extra = trimmed.trim_start_matches(['-', '*']).trim();
                if !last.rationale.is_empty() {
                    last.rationale.push(' ');
                }
                last.rationale.push_str(extra);
            }
        } else {
            summary_lines.push(trimmed);
        }
    }

    AdviceSet {
        summary: summary_lines.join(" "),
        actions,
    }
}

/// `"Do X - because Y"` / `"Do X: because Y"` → `("Do X", "because Y")`
fn split_rationale(item: &str) -> (String, String) {
    for sep in [" - ", " — ", ": "] {
        if let Some((action, rationale)) = item.split_once(sep) {
            return (action.trim().to_string(), rationale.trim().to_string());
        }
    }
    (item.trim().to_string(), String::new())
}
