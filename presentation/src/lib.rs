//! Presentation layer for askboard
//!
//! This crate contains CLI definitions, output formatters,
//! progress indicators, and the interactive board.

pub mod cli;
pub mod config;
pub mod output;
pub mod progress;
pub mod repl;

// Re-export commonly used types
pub use cli::commands::{Cli, Command, OutputFormatArg, VariantArg, join_words};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use output::formatter::{OutputFormatter, formatter_for};
pub use output::json::JsonFormatter;
pub use output::listener::ConsoleBoardListener;
pub use progress::spinner::FetchSpinner;
pub use repl::{BoardRepl, BoardServices};
