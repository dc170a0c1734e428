//! Board configuration from TOML (`[board]` section)

use askboard_domain::BoardVariant;
use serde::{Deserialize, Serialize};

pub const DEFAULT_TITLE: &str = "Questions for my Demo";

/// Raw board configuration from TOML
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileBoardConfig {
    /// `open` (free-text names) or `authenticated` (magic-code sign-in)
    pub variant: BoardVariant,
    /// Heading shown above the board
    pub title: String,
}

impl Default for FileBoardConfig {
    fn default() -> Self {
        Self {
            variant: BoardVariant::Open,
            title: DEFAULT_TITLE.to_string(),
        }
    }
}
