//! Chat REPL settings (`[repl]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileReplConfig {
    /// Show a progress bar while a turn runs
    pub show_progress: bool,
    /// Readline history; defaults to the platform data dir
    pub history_file: Option<PathBuf>,
    /// Maximum readline entries kept
    pub max_history: usize,
}

impl Default for FileReplConfig {
    fn default() -> Self {
        Self {
            show_progress: true,
            history_file: None,
            max_history: 500,
        }
    }
}
