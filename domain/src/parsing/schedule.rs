//! Planner schedule parsing.

use super::json_block::extract_json_object;
use super::{ParseError, strip_list_marker};
use crate::output::{SchedulePlan, TimeBlock};
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;

/// `Mon 09:00-10:30: Calculus`, `2PM - 5PM Deep work`, `14:00 to 15:00 | Review`
static TIME_BLOCK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?x)
        ^(?:\*\*)?
        (?P<day>[A-Za-z]{3,9}\.?,?\s+)?
        (?P<start>\d{1,2}(?::\d{2})?\s*(?:[AaPp]\.?[Mm]\.?)?)
        \s*(?:-|–|to)\s*
        (?P<end>\d{1,2}(?::\d{2})?\s*(?:[AaPp]\.?[Mm]\.?)?)
        (?:\*\*)?
        \s*[:|–-]?\s*
        (?P<rest>.+)$",
    )
    .expect("time block pattern is valid")
});

/// Parse the Planner's final response into a [`SchedulePlan`].
///
/// # Supported Formats
///
/// 1. **JSON** (preferred): `{"summary": .., "time_blocks": [{"start", "end", "activity", "focus"}], "emergency_protocols": [..]}`
/// 2. **Text**: one block per line (`09:00-10:30: Calculus (Pomodoro)`), with
///    bullets under an "Emergency" heading collected as protocols
///
/// A plan without any time block is rejected.
pub fn parse_schedule_plan(response: &str) -> Result<SchedulePlan, ParseError> {
    if response.trim().is_empty() {
        return Err(ParseError::Empty);
    }

    let plan = match extract_json_object(response) {
        Some(Value::Object(obj)) if obj.contains_key("time_blocks") || obj.contains_key("schedule") => {
            plan_from_json(&obj)?
        }
        _ => plan_from_text(response),
    };

    if plan.time_blocks.is_empty() {
        return Err(ParseError::NotFound("time blocks"));
    }
    Ok(plan)
}

/// Field values are kept as written. A plan in its own serialized shape
/// deserializes directly; other key spellings go through the alias lookup.
fn plan_from_json(obj: &Map<String, Value>) -> Result<SchedulePlan, ParseError> {
    if let Ok(plan) = serde_json::from_value::<SchedulePlan>(Value::Object(obj.clone())) {
        return Ok(plan);
    }

    let blocks = obj
        .get("time_blocks")
        .or_else(|| obj.get("schedule"))
        .and_then(Value::as_array)
        .ok_or_else(|| ParseError::Invalid {
            record: "schedule plan",
            detail: "time_blocks must be a list".to_string(),
        })?;

    let time_blocks = blocks.iter().filter_map(block_from_json).collect();

    let emergency_protocols = obj
        .get("emergency_protocols")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    Ok(SchedulePlan {
        summary: text_field(obj, &["summary", "overview"]).unwrap_or_default(),
        time_blocks,
        emergency_protocols,
    })
}

fn block_from_json(value: &Value) -> Option<TimeBlock> {
    let obj = value.as_object()?;
    let start = text_field(obj, &["start", "start_time"])?;
    let end = text_field(obj, &["end", "end_time"]).unwrap_or_default();
    let activity = text_field(obj, &["activity", "task", "title", "description"])?;

    Some(TimeBlock {
        focus: text_field(obj, &["focus", "technique"]),
        ..TimeBlock::new(start, end, activity)
    })
}

fn text_field(obj: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| obj.get(*k).and_then(Value::as_str))
        .map(str::to_string)
}

fn plan_from_text(response: &str) -> SchedulePlan {
    let mut plan = SchedulePlan::default();
    let mut in_emergency = false;

    for line in response.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        let content = strip_list_marker(trimmed);

        if let Some(block) = block_from_line(content) {
            in_emergency = false;
            plan.time_blocks.push(block);
            continue;
        }

        if trimmed.to_lowercase().contains("emergency") && !is_bullet(trimmed) {
            in_emergency = true;
            continue;
        }

        if in_emergency {
            if is_bullet(trimmed) {
                plan.emergency_protocols.push(content.replace("**", ""));
                continue;
            }
            in_emergency = false;
        }

        if plan.summary.is_empty() && plan.time_blocks.is_empty() {
            let heading = content.trim_start_matches('#').replace("**", "");
            let heading = heading.trim();
            if !heading.is_empty() && !heading.ends_with(':') {
                plan.summary = heading.to_string();
            }
        }
    }

    plan
}

fn block_from_line(line: &str) -> Option<TimeBlock> {
    let caps = TIME_BLOCK_RE.captures(line)?;
    let day = caps.name("day").map(|m| m.as_str().trim()).unwrap_or("");
    let start = caps.name("start")?.as_str().trim();
    let end = caps.name("end")?.as_str().trim();
    let rest = caps.name("rest")?.as_str().replace("**", "");
    let rest = rest.trim();

    let start = if day.is_empty() {
        start.to_string()
    } else {
        format!("{} {}", day.trim_end_matches(','), start)
    };

    // Trailing "(...)" is the focus note
    if rest.ends_with(')')
        && let Some(open) = rest.rfind('(')
        && open > 0
    {
        let activity = rest[..open].trim();
        let focus = rest[open + 1..rest.len() - 1].trim();
        return Some(TimeBlock::new(start, end, activity).with_focus(focus));
    }

    Some(TimeBlock::new(start, end, rest))
}

fn is_bullet(line: &str) -> bool {
    strip_list_marker(line) != line.trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_json_plan() {
        let response = r#"Here is your plan:
```json
{
  "summary": "Exam prep for Calculus",
  "time_blocks": [
    {"start": "09:00", "end": "10:30", "activity": "Practice integrals", "focus": "Pomodoro"},
    {"start_time": "11:00", "end_time": "12:00", "task": "Review notes"}
  ],
  "emergency_protocols": ["If stuck, switch to flashcards"]
}
```"#;
        let plan = parse_schedule_plan(response).unwrap();
        assert_eq!(plan.summary, "Exam prep for Calculus");
        assert_eq!(plan.time_blocks.len(), 2);
        assert_eq!(plan.time_blocks[0].focus.as_deref(), Some("Pomodoro"));
        assert_eq!(plan.time_blocks[1].activity, "Review notes");
        assert_eq!(plan.emergency_protocols, vec!["If stuck, switch to flashcards"]);
    }

    #[test]
    fn test_serialized_plan_parses_back() {
        let plan = SchedulePlan::new("Week plan")
            .with_block(TimeBlock::new("Mon 14:00", "Mon 15:00", "Essay draft"))
            .with_protocol("Take a 10 minute walk");
        let json = serde_json::to_string_pretty(&plan).unwrap();
        assert_eq!(parse_schedule_plan(&json).unwrap(), plan);
    }

    #[test]
    fn test_padded_strings_and_empty_focus_survive() {
        let plan = SchedulePlan::new(" Week ")
            .with_block(TimeBlock::new(" Mon 09:00", "10:00 ", "  Reading  ").with_focus(""))
            .with_protocol(" Breathe ");
        let json = serde_json::to_string_pretty(&plan).unwrap();
        let parsed = parse_schedule_plan(&json).unwrap();
        assert_eq!(parsed, plan);
        assert_eq!(parsed.time_blocks[0].focus.as_deref(), Some(""));
    }

    #[test]
    fn test_alias_keys_keep_values_as_written() {
        let response = r#"{"overview": " Light week ", "schedule": [
            {"start_time": "09:00", "end_time": "10:00", "task": " Flashcards ", "technique": ""}
        ]}"#;
        let plan = parse_schedule_plan(response).unwrap();
        assert_eq!(plan.summary, " Light week ");
        assert_eq!(plan.time_blocks[0].activity, " Flashcards ");
        assert_eq!(plan.time_blocks[0].focus.as_deref(), Some(""));
    }

    #[test]
    fn test_text_plan() {
        let response = "\
## Study plan for exam week

- 09:00-10:30: Calculus practice (3x25min sprints)
- **2PM - 5PM**: Physics lab report
- Tue 14:00 to 15:00 | Group study

Emergency protocols:
- Energy crash: 20 minute nap
- Overwhelmed: pick one task only

Good luck!";
        let plan = parse_schedule_plan(response).unwrap();
        assert_eq!(plan.summary, "Study plan for exam week");
        assert_eq!(plan.time_blocks.len(), 3);

        let first = &plan.time_blocks[0];
        assert_eq!(first.start, "09:00");
        assert_eq!(first.end, "10:30");
        assert_eq!(first.activity, "Calculus practice");
        assert_eq!(first.focus.as_deref(), Some("3x25min sprints"));

        assert_eq!(plan.time_blocks[1].start, "2PM");
        assert_eq!(plan.time_blocks[1].activity, "Physics lab report");
        assert_eq!(plan.time_blocks[2].start, "Tue 14:00");
        assert_eq!(plan.time_blocks[2].activity, "Group study");

        assert_eq!(
            plan.emergency_protocols,
            vec!["Energy crash: 20 minute nap", "Overwhelmed: pick one task only"]
        );
    }

    #[test]
    fn test_no_blocks_is_rejected() {
        assert_eq!(
            parse_schedule_plan("Just study a lot this week."),
            Err(ParseError::NotFound("time blocks"))
        );
        assert_eq!(
            parse_schedule_plan(r#"{"summary": "x", "time_blocks": []}"#),
            Err(ParseError::NotFound("time blocks"))
        );
        assert_eq!(parse_schedule_plan(""), Err(ParseError::Empty));
    }

    #[test]
    fn test_wrong_block_shape_is_invalid() {
        assert!(matches!(
            parse_schedule_plan(r#"{"time_blocks": "all day"}"#),
            Err(ParseError::Invalid { .. })
        ));
    }
}
