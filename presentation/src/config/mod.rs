//! Presentation-level configuration
//!
//! Configuration for output formatting and REPL behavior, resolved from
//! the config file and command-line flags by the binary.

use askboard_domain::OutputFormat;
use std::path::PathBuf;

/// Output configuration for the presentation layer
#[derive(Debug, Clone)]
pub struct OutputConfig {
    pub format: OutputFormat,
    /// Enable colored terminal output
    pub color: bool,
    /// Show spinners
    pub show_progress: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Text,
            color: true,
            show_progress: true,
        }
    }
}

impl OutputConfig {
    /// Spinners only make sense for text output
    pub fn spinner_visible(&self) -> bool {
        self.show_progress && self.format == OutputFormat::Text
    }
}

/// REPL configuration for the presentation layer
#[derive(Debug, Clone, Default)]
pub struct ReplConfig {
    /// Path to history file; `None` keeps no history
    pub history_file: Option<PathBuf>,
}
