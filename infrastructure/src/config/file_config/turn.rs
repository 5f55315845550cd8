//! Turn configuration from TOML (`[turn]` section)

use serde::{Deserialize, Serialize};

/// How much history the Coordinator sees
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileTurnConfig {
    pub history_window: usize,
    pub history_truncate: usize,
}

impl Default for FileTurnConfig {
    fn default() -> Self {
        Self {
            history_window: 6,
            history_truncate: 300,
        }
    }
}
