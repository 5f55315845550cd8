//! Profile analysis parsing.

use super::ParseError;
use super::json_block::extract_json_object;
use crate::profile::{LearningStyle, ProfileAnalysis};
use serde_json::Value;

/// Parse the profile analyzer's response.
///
/// JSON fields override `fallback` one by one. Without JSON, the style is
/// detected from the prose and the prose itself becomes the executive
/// function notes.
pub fn parse_profile_analysis(
    response: &str,
    fallback: &ProfileAnalysis,
) -> Result<ProfileAnalysis, ParseError> {
    let text = response.trim();
    if text.is_empty() {
        return Err(ParseError::Empty);
    }

    let Some(Value::Object(obj)) = extract_json_object(text) else {
        return Ok(ProfileAnalysis {
            learning_style: LearningStyle::detect(text).unwrap_or(fallback.learning_style),
            energy_pattern: fallback.energy_pattern.clone(),
            executive_function_notes: text.to_string(),
        });
    };

    let learning_style = match obj.get("learning_style") {
        None | Some(Value::Null) => fallback.learning_style,
        Some(Value::String(s)) => s
            .parse()
            .ok()
            .or_else(|| LearningStyle::detect(s))
            .unwrap_or(fallback.learning_style),
        Some(_) => {
            return Err(ParseError::Invalid {
                record: "profile analysis",
                detail: "learning_style must be a string".to_string(),
            });
        }
    };

    let energy_pattern = match obj.get("energy_pattern").and_then(Value::as_object) {
        Some(map) if !map.is_empty() => map
            .iter()
            .map(|(k, v)| {
                let text = v.as_str().map(str::to_string).unwrap_or_else(|| v.to_string());
                (k.clone(), text)
            })
            .collect(),
        _ => fallback.energy_pattern.clone(),
    };

    let executive_function_notes = obj
        .get("executive_function_notes")
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_else(|| fallback.executive_function_notes.clone());

    Ok(ProfileAnalysis {
        learning_style,
        energy_pattern,
        executive_function_notes,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn fallback() -> ProfileAnalysis {
        ProfileAnalysis {
            learning_style: LearningStyle::Auditory,
            energy_pattern: BTreeMap::from([("morning".to_string(), "high".to_string())]),
            executive_function_notes: "from profile".to_string(),
        }
    }

    #[test]
    fn test_json_analysis() {
        let response = r#"```json
{"learning_style": "visual", "energy_pattern": {"evening": "peak"}, "executive_function_notes": "Needs short sessions"}
```"#;
        let analysis = parse_profile_analysis(response, &fallback()).unwrap();
        assert_eq!(analysis.learning_style, LearningStyle::Visual);
        assert_eq!(analysis.energy_pattern.get("evening").unwrap(), "peak");
        assert!(!analysis.energy_pattern.contains_key("morning"));
        assert_eq!(analysis.executive_function_notes, "Needs short sessions");
    }

    #[test]
    fn test_partial_json_keeps_fallback_fields() {
        let analysis = parse_profile_analysis(r#"{"learning_style": "Kinesthetic"}"#, &fallback()).unwrap();
        assert_eq!(analysis.learning_style, LearningStyle::Kinesthetic);
        assert_eq!(analysis.energy_pattern, fallback().energy_pattern);
        assert_eq!(analysis.executive_function_notes, "from profile");
    }

    #[test]
    fn test_prose_analysis() {
        let response = "The student is a strongly visual learner who fades after 8pm.";
        let analysis = parse_profile_analysis(response, &fallback()).unwrap();
        assert_eq!(analysis.learning_style, LearningStyle::Visual);
        assert_eq!(analysis.executive_function_notes, response);
    }

    #[test]
    fn test_prose_without_style_keeps_fallback_style() {
        let analysis = parse_profile_analysis("Works best in short bursts.", &fallback()).unwrap();
        assert_eq!(analysis.learning_style, LearningStyle::Auditory);
    }

    #[test]
    fn test_empty_and_invalid() {
        assert_eq!(parse_profile_analysis("  \n", &fallback()), Err(ParseError::Empty));
        assert!(matches!(
            parse_profile_analysis(r#"{"learning_style": 4}"#, &fallback()),
            Err(ParseError::Invalid { .. })
        ));
    }
}
