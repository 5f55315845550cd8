//! JSONL file writer for conversation events.
//!
//! Each [`ConversationEvent`] is serialized as a single JSON line with a
//! `type` field and `timestamp`, appended to the file via a buffered writer.
//! Reopening an existing log appends, so one file can span many sessions;
//! lines carry a `session` stamp and the 1-based `turn` they belong to.

use chrono::{SecondsFormat, Utc};
use sage_application::{ConversationEvent, ConversationLogger};
use serde_json::{Value, json};
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::warn;

/// JSONL conversation logger that writes one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`. Flushes on `Drop`.
pub struct JsonlConversationLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
    session: String,
    turn: AtomicU64,
}

/// Event that closes a turn; the next line starts a new one.
const TURN_COMPLETE: &str = "turn_complete";

/// Where a line sits in the log
struct LineContext {
    timestamp: String,
    session: String,
    turn: u64,
}

impl JsonlConversationLogger {
    /// Create a new logger writing to the given path.
    ///
    /// Creates the file (and parent directories) if they don't exist.
    /// Returns `None` if the file cannot be opened.
    pub fn new(path: impl AsRef<Path>) -> Option<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && let Err(e) = std::fs::create_dir_all(parent)
        {
            warn!(
                "Could not create conversation log directory {}: {}",
                parent.display(),
                e
            );
            return None;
        }

        let file = match OpenOptions::new().create(true).append(true).open(path) {
            Ok(f) => f,
            Err(e) => {
                warn!(
                    "Could not open conversation log file {}: {}",
                    path.display(),
                    e
                );
                return None;
            }
        };

        Some(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
            session: now_stamp(),
            turn: AtomicU64::new(1),
        })
    }

    /// Get the path to the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Turn the next event will be recorded under.
    pub fn current_turn(&self) -> u64 {
        self.turn.load(Ordering::SeqCst)
    }
}

fn now_stamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Render one event as a JSONL line. Object payloads are flattened next
/// to the envelope fields; anything else goes under `data`.
fn render_line(event: ConversationEvent, ctx: LineContext) -> Option<String> {
    let mut record = match event.payload {
        Value::Object(map) => map,
        data => {
            let mut map = serde_json::Map::new();
            map.insert("data".to_string(), data);
            map
        }
    };
    record.insert("type".to_string(), Value::from(event.event_type));
    record.insert("timestamp".to_string(), Value::String(ctx.timestamp));
    record.insert("session".to_string(), Value::String(ctx.session));
    record.insert("turn".to_string(), json!(ctx.turn));
    serde_json::to_string(&record).ok()
}

impl ConversationLogger for JsonlConversationLogger {
    fn log(&self, event: ConversationEvent) {
        // Counter moves under the writer lock so lines stay in turn order
        let Ok(mut writer) = self.writer.lock() else {
            return;
        };

        let closes_turn = event.event_type == TURN_COMPLETE;
        let ctx = LineContext {
            timestamp: now_stamp(),
            session: self.session.clone(),
            turn: self.turn.load(Ordering::SeqCst),
        };
        if let Some(line) = render_line(event, ctx) {
            let _ = writeln!(writer, "{}", line);
            let _ = writer.flush();
        }
        if closes_turn {
            self.turn.fetch_add(1, Ordering::SeqCst);
        }
    }
}

impl Drop for JsonlConversationLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
