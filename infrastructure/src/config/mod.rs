//! Configuration file loading for askboard
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. Environment variables `ASKBOARD_<SECTION>__<KEY>`
//! 2. `--config <path>` specified file
//! 3. Project root: `./askboard.toml` or `./.askboard.toml`
//! 4. Global: `$XDG_CONFIG_HOME/askboard/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigValidationError, DEFAULT_API_URI, DEFAULT_POLL_INTERVAL_MS, DEFAULT_TITLE,
    FileBoardConfig, FileConfig, FileLoggingConfig, FileOutputConfig, FileReplConfig,
    FileStoreConfig, StoreBackend,
};
pub use loader::ConfigLoader;
