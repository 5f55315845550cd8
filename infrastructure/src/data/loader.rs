//! Student data loader
//!
//! Reads the three JSON documents a turn runs against and narrows them to
//! what matters now: the selected student's profile, upcoming events and
//! open tasks.

use crate::config::FileDataConfig;
use chrono::{DateTime, Utc};
use sage_domain::Record;
use sage_domain::state::time::{event_start, task_due, window_end, within};
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur while loading student data
#[derive(Error, Debug)]
pub enum DataLoadError {
    #[error("Failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("{0} must contain a JSON object")]
    NotAnObject(PathBuf),
}

/// The profile, calendar and task records for one student
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StudentData {
    pub profile: Record,
    /// `{"events": [...]}`
    pub calendar: Record,
    /// `{"tasks": [...]}`
    pub tasks: Record,
}

impl StudentData {
    pub fn event_count(&self) -> usize {
        count(&self.calendar, "events")
    }

    pub fn task_count(&self) -> usize {
        count(&self.tasks, "tasks")
    }
}

fn count(record: &Record, key: &str) -> usize {
    record.get(key).and_then(Value::as_array).map_or(0, Vec::len)
}

/// Loads student data from local JSON files.
///
/// Any document may be left unconfigured; it then loads as an empty record.
#[derive(Debug, Clone)]
pub struct DataLoader {
    profile_path: Option<PathBuf>,
    calendar_path: Option<PathBuf>,
    tasks_path: Option<PathBuf>,
    student_id: String,
    lookahead_days: i64,
}

impl DataLoader {
    pub fn new(student_id: impl Into<String>) -> Self {
        Self {
            profile_path: None,
            calendar_path: None,
            tasks_path: None,
            student_id: student_id.into(),
            lookahead_days: 7,
        }
    }

    pub fn from_config(config: &FileDataConfig) -> Self {
        Self {
            profile_path: config.profile.clone(),
            calendar_path: config.calendar.clone(),
            tasks_path: config.tasks.clone(),
            student_id: config.student_id.clone(),
            lookahead_days: config.lookahead_days,
        }
    }

    pub fn with_paths(
        mut self,
        profile: Option<PathBuf>,
        calendar: Option<PathBuf>,
        tasks: Option<PathBuf>,
    ) -> Self {
        self.profile_path = profile;
        self.calendar_path = calendar;
        self.tasks_path = tasks;
        self
    }

    pub fn with_lookahead_days(mut self, days: i64) -> Self {
        self.lookahead_days = days;
        self
    }

    pub fn student_id(&self) -> &str {
        &self.student_id
    }

    pub fn load(&self) -> Result<StudentData, DataLoadError> {
        self.load_at(Utc::now())
    }

    /// Load relative to `now`, which bounds the event and task filters.
    pub fn load_at(&self, now: DateTime<Utc>) -> Result<StudentData, DataLoadError> {
        let profile = match read_document(self.profile_path.as_deref())? {
            Some(doc) => select_profile(&doc, &self.student_id),
            None => Record::new(),
        };
        if profile.is_empty() {
            debug!(student_id = %self.student_id, "No profile found");
        }

        let calendar = match read_document(self.calendar_path.as_deref())? {
            Some(doc) => wrap("events", upcoming_events(&doc, now, self.lookahead_days)),
            None => Record::new(),
        };

        let tasks = match read_document(self.tasks_path.as_deref())? {
            Some(doc) => wrap("tasks", active_tasks(&doc, now)),
            None => Record::new(),
        };

        Ok(StudentData {
            profile,
            calendar,
            tasks,
        })
    }
}

fn read_document(path: Option<&Path>) -> Result<Option<Record>, DataLoadError> {
    let Some(path) = path else {
        return Ok(None);
    };
    let text = fs::read_to_string(path).map_err(|source| DataLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let value: Value = serde_json::from_str(&text).map_err(|source| DataLoadError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    match value {
        Value::Object(map) => Ok(Some(map)),
        _ => Err(DataLoadError::NotAnObject(path.to_path_buf())),
    }
}

fn wrap(key: &str, items: Vec<Value>) -> Record {
    let mut record = Record::new();
    record.insert(key.to_string(), Value::Array(items));
    record
}

fn items<'a>(doc: &'a Record, key: &str) -> &'a [Value] {
    doc.get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}

/// The entry of `profiles` whose `id` is `student_id`; empty when absent.
pub fn select_profile(doc: &Record, student_id: &str) -> Record {
    items(doc, "profiles")
        .iter()
        .filter_map(Value::as_object)
        .find(|p| p.get("id").and_then(Value::as_str) == Some(student_id))
        .cloned()
        .unwrap_or_default()
}

/// Events starting within `[now, now + days]`.
pub fn upcoming_events(doc: &Record, now: DateTime<Utc>, days: i64) -> Vec<Value> {
    let until = window_end(now, days);
    items(doc, "events")
        .iter()
        .filter(|event| match event_start(event) {
            Some(start) => within(start, now, until),
            None => {
                warn!("Skipping calendar event without a readable start time");
                false
            }
        })
        .cloned()
        .collect()
}

/// Tasks with status `needsAction` that are due after `now`.
///
/// Kept tasks gain a normalized `due_datetime` (RFC 3339, UTC).
pub fn active_tasks(doc: &Record, now: DateTime<Utc>) -> Vec<Value> {
    items(doc, "tasks")
        .iter()
        .filter_map(|task| {
            let Some(due) = task_due(task) else {
                warn!("Skipping task without a readable due date");
                return None;
            };
            let open = task.get("status").and_then(Value::as_str) == Some("needsAction");
            if !open || due <= now {
                return None;
            }
            let mut task = task.clone();
            if let Value::Object(map) = &mut task {
                map.insert("due_datetime".to_string(), Value::String(due.to_rfc3339()));
            }
            Some(task)
        })
        .collect()
}
