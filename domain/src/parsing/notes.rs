//! NoteWriter notes parsing.

use super::json_block::extract_json_object;
use super::{ParseError, strip_list_marker};
use crate::output::TopicNotes;
use serde_json::Value;

/// Parse notes written for `topic`.
///
/// Accepts `{"notes": "...", "key_points": [...]}` or plain markdown. For
/// plain text the whole response is the notes body and its bullet lines
/// become the key points.
pub fn parse_topic_notes(topic: &str, response: &str) -> Result<TopicNotes, ParseError> {
    let text = response.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    if let Some(Value::Object(obj)) = extract_json_object(text)
        && let Some(notes) = obj.get("notes").and_then(Value::as_str)
    {
        let key_points = obj
            .get("key_points")
            .and_then(Value::as_array)
            .map(|items| {
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .map(str::to_string)
                    .collect()
            })
            .unwrap_or_default();
        let topic = obj
            .get("topic")
            .and_then(Value::as_str)
            .filter(|t| !t.trim().is_empty())
            .unwrap_or(topic);

        if notes.trim().is_empty() {
            return Err(ParseError::NotFound("notes"));
        }
        return Ok(TopicNotes {
            topic: topic.trim().to_string(),
            notes: notes.trim().to_string(),
            key_points,
        });
    }

    let key_points = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && strip_list_marker(line) != *line)
        .map(|line| strip_list_marker(line).replace("**", ""))
        .collect();

    Ok(TopicNotes {
        topic: topic.trim().to_string(),
        notes: text.to_string(),
        key_points,
    })
}
