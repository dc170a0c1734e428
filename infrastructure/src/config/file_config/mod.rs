//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and use domain types where appropriate.

mod board;
mod logging;
mod output;
mod repl;
mod store;

pub use board::{DEFAULT_TITLE, FileBoardConfig};
pub use logging::FileLoggingConfig;
pub use output::FileOutputConfig;
pub use repl::FileReplConfig;
pub use store::{DEFAULT_API_URI, DEFAULT_POLL_INTERVAL_MS, FileStoreConfig, StoreBackend};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Configuration validation errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigValidationError {
    #[error("store.timeout_seconds cannot be 0")]
    InvalidTimeout,

    #[error("store.poll_interval_ms cannot be 0")]
    InvalidPollInterval,

    #[error("store.app_id is required for the hosted backend")]
    MissingAppId,

    #[error("board.title cannot be empty")]
    EmptyTitle,
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    pub board: FileBoardConfig,
    pub store: FileStoreConfig,
    pub output: FileOutputConfig,
    pub repl: FileReplConfig,
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Check values serde cannot rule out on its own.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.store.timeout_seconds == Some(0) {
            return Err(ConfigValidationError::InvalidTimeout);
        }
        if self.store.poll_interval_ms == 0 {
            return Err(ConfigValidationError::InvalidPollInterval);
        }
        if self.store.backend == StoreBackend::Hosted
            && self.store.app_id.as_deref().is_none_or(|id| id.trim().is_empty())
        {
            return Err(ConfigValidationError::MissingAppId);
        }
        if self.board.title.trim().is_empty() {
            return Err(ConfigValidationError::EmptyTitle);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use askboard_domain::{BoardVariant, OutputFormat};

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[board]
variant = "authenticated"
title = "Ask me anything"

[store]
backend = "memory"
snapshot_path = "~/.local/share/askboard/questions.json"

[output]
format = "json"

[repl]
history_file = "~/.local/share/askboard/history.txt"

[logging]
activity_log = "activity.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.board.variant, BoardVariant::Authenticated);
        assert_eq!(config.board.title, "Ask me anything");
        assert_eq!(
            config.store.snapshot_path.as_deref(),
            Some("~/.local/share/askboard/questions.json")
        );
        assert_eq!(config.output.format, Some(OutputFormat::Json));
        assert!(config.output.color);
        assert!(config.repl.history_file.is_some());
        assert_eq!(config.logging.activity_log.as_deref(), Some("activity.jsonl"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: FileConfig = toml::from_str("").unwrap();
        assert_eq!(config, FileConfig::default());
        assert_eq!(config.board.variant, BoardVariant::Open);
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_timeout() {
        let mut config = FileConfig::default();
        config.store.timeout_seconds = Some(0);
        assert_eq!(config.validate(), Err(ConfigValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validate_zero_poll_interval() {
        let mut config = FileConfig::default();
        config.store.poll_interval_ms = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigValidationError::InvalidPollInterval)
        );
    }

    #[test]
    fn test_validate_hosted_requires_app_id() {
        let mut config = FileConfig::default();
        config.store.backend = StoreBackend::Hosted;
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingAppId));

        config.store.app_id = Some("  ".to_string());
        assert_eq!(config.validate(), Err(ConfigValidationError::MissingAppId));

        config.store.app_id = Some("demo".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = FileConfig::default();
        config.board.title = String::new();
        assert_eq!(config.validate(), Err(ConfigValidationError::EmptyTitle));
    }
}
