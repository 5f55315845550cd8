//! Locate a JSON object inside LLM text.

use serde_json::Value;

/// Extract the first JSON object from a response.
///
/// Tried in order:
/// 1. ` ```json ` (or bare ` ``` `) fenced blocks whose body is an object
/// 2. The whole response, if it is an object
/// 3. The span from the first `{` to the last `}`
pub fn extract_json_object(response: &str) -> Option<Value> {
    let mut in_block = false;
    let mut block = String::new();

    for line in response.lines() {
        let trimmed = line.trim();
        if !in_block && trimmed.starts_with("```") {
            in_block = true;
            block.clear();
        } else if in_block && trimmed == "```" {
            in_block = false;
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&block) {
                return Some(value);
            }
        } else if in_block {
            block.push_str(line);
            block.push('\n');
        }
    }

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(response.trim()) {
        return Some(value);
    }

    if let Some(start) = response.find('{')
        && let Some(end) = response.rfind('}')
        && end > start
        && let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(&response[start..=end])
    {
        return Some(value);
    }

    None
}
