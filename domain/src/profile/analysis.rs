//! Profile analysis (Value Object)
//!
//! Derived once per turn by the profile analyzer and read-only afterward.

use crate::core::error::DomainError;
use crate::state::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// Dominant learning style
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LearningStyle {
    Visual,
    Auditory,
    Kinesthetic,
    #[default]
    Mixed,
}

impl LearningStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            LearningStyle::Visual => "visual",
            LearningStyle::Auditory => "auditory",
            LearningStyle::Kinesthetic => "kinesthetic",
            LearningStyle::Mixed => "mixed",
        }
    }

    /// Find a style keyword in free text. Returns `None` when no style
    /// or more than one distinct style is mentioned.
    pub fn detect(text: &str) -> Option<Self> {
        let lower = text.to_lowercase();
        let found: Vec<LearningStyle> = [
            (LearningStyle::Visual, &["visual"][..]),
            (LearningStyle::Auditory, &["auditory", "aural"][..]),
            (LearningStyle::Kinesthetic, &["kinesthetic", "kinaesthetic", "hands-on"][..]),
        ]
        .into_iter()
        .filter(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(style, _)| style)
        .collect();

        match found.as_slice() {
            [single] => Some(*single),
            _ if lower.contains("mixed") || lower.contains("multimodal") => {
                Some(LearningStyle::Mixed)
            }
            _ => None,
        }
    }
}

impl std::fmt::Display for LearningStyle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for LearningStyle {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "visual" => Ok(LearningStyle::Visual),
            "auditory" => Ok(LearningStyle::Auditory),
            "kinesthetic" => Ok(LearningStyle::Kinesthetic),
            "mixed" => Ok(LearningStyle::Mixed),
            _ => Err(DomainError::InvalidLearningStyle(s.to_string())),
        }
    }
}

/// How the student learns and when they have energy to do it
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub learning_style: LearningStyle,
    /// Time block (e.g. `morning`) to descriptor (e.g. `peak focus`)
    #[serde(default)]
    pub energy_pattern: BTreeMap<String, String>,
    #[serde(default)]
    pub executive_function_notes: String,
}

impl ProfileAnalysis {
    /// Static derivation from the profile record, used when no LLM
    /// analysis is available.
    ///
    /// Reads `learning_preferences.learning_style` (a string, or an object
    /// with `primary`/`type`) and the string-valued entries of
    /// `learning_preferences.study_patterns` (or its `energy_levels` object).
    pub fn from_profile(profile: &Record) -> Self {
        let prefs = profile.get("learning_preferences").and_then(Value::as_object);

        let learning_style = prefs
            .and_then(|p| p.get("learning_style"))
            .and_then(style_from_value)
            .unwrap_or_default();

        let patterns = prefs
            .and_then(|p| p.get("study_patterns"))
            .and_then(Value::as_object);
        let energy_source = patterns
            .and_then(|p| p.get("energy_levels"))
            .and_then(Value::as_object)
            .or(patterns);
        let energy_pattern = energy_source
            .map(|m| {
                m.iter()
                    .filter_map(|(k, v)| v.as_str().map(|s| (k.clone(), s.to_string())))
                    .collect()
            })
            .unwrap_or_default();

        let executive_function_notes = profile
            .get("personal_info")
            .and_then(|p| p.get("considerations").or_else(|| p.get("notes")))
            .map(value_to_text)
            .unwrap_or_default();

        Self {
            learning_style,
            energy_pattern,
            executive_function_notes,
        }
    }
}

fn style_from_value(value: &Value) -> Option<LearningStyle> {
    match value {
        Value::String(s) => s.parse().ok().or_else(|| LearningStyle::detect(s)),
        Value::Object(map) => map
            .get("primary")
            .or_else(|| map.get("type"))
            .or_else(|| map.get("style"))
            .and_then(style_from_value),
        _ => None,
    }
}

fn value_to_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(value_to_text)
            .collect::<Vec<_>>()
            .join("; "),
        other => other.to_string(),
    }
}
