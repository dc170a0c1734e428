//! Output formatter trait

use askboard_domain::{BoardView, OutputFormat};

/// Renders board views for the terminal or for scripts
pub trait OutputFormatter: Send + Sync {
    /// Title, questions, leaderboard, total and footer
    fn board(&self, title: &str, view: &BoardView) -> String;

    /// Questions only
    fn questions(&self, view: &BoardView) -> String;

    /// Leaderboard only
    fn leaderboard(&self, view: &BoardView) -> String;

    /// Shown while data is being fetched
    fn loading(&self) -> String;

    /// Shown when data could not be fetched
    fn fetch_error(&self, message: &str) -> String;
}

/// Formatter for the requested output format
pub fn formatter_for(format: OutputFormat) -> Box<dyn OutputFormatter> {
    match format {
        OutputFormat::Text => Box::new(super::console::ConsoleFormatter),
        OutputFormat::Json => Box::new(super::json::JsonFormatter),
    }
}
