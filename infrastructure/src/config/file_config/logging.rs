//! Logging configuration from TOML (`[logging]` section)

use serde::{Deserialize, Serialize};

/// Raw logging configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write diagnostics to this file instead of stderr
    pub file: Option<String>,
    /// Append a JSONL record of every change to this file
    pub activity_log: Option<String>,
}
