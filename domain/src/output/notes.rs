//! NoteWriter output

use crate::profile::LearningStyle;
use serde::{Deserialize, Serialize};

/// Notes for a single topic
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicNotes {
    pub topic: String,
    pub notes: String,
    #[serde(default)]
    pub key_points: Vec<String>,
}

/// Study notes tagged with the learning style they were written for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteSet {
    pub learning_style: LearningStyle,
    pub topics: Vec<TopicNotes>,
}

impl NoteSet {
    pub fn new(learning_style: LearningStyle) -> Self {
        Self {
            learning_style,
            topics: Vec::new(),
        }
    }

    pub fn with_topic(mut self, notes: TopicNotes) -> Self {
        self.topics.push(notes);
        self
    }

    pub fn render(&self) -> String {
        self.topics
            .iter()
            .map(|t| {
                let mut section = format!("### {}\n{}", t.topic, t.notes.trim());
                if !t.key_points.is_empty() && !t.notes.contains(&t.key_points[0]) {
                    section.push_str("\n\nKey points:");
                    for point in &t.key_points {
                        section.push_str(&format!("\n- {}", point));
                    }
                }
                section
            })
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}
