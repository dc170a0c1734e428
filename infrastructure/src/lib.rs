//! Infrastructure layer for askboard
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.
//!
//! # Features
//!
//! - `hosted`: HTTP adapters for the hosted real-time backend (`reqwest`)

pub mod auth;
pub mod clock;
pub mod config;
#[cfg(feature = "hosted")]
pub mod hosted;
pub mod logging;
pub mod store;

// Re-export commonly used types
pub use auth::{FileSessionStore, LocalAuthGateway, SentCode};
pub use clock::SystemClock;
pub use config::{
    ConfigLoader, ConfigValidationError, FileBoardConfig, FileConfig, FileLoggingConfig,
    FileOutputConfig, FileReplConfig, FileStoreConfig, StoreBackend,
};
#[cfg(feature = "hosted")]
pub use hosted::{HostedAuthGateway, HostedClient, HostedError, HostedQuestionStore, HostedSettings};
pub use logging::JsonlActivityLogger;
pub use store::MemoryQuestionStore;
