//! JSON output for scripting

use crate::output::formatter::OutputFormatter;
use askboard_domain::BoardView;
use serde_json::json;

/// Formats the board as pretty-printed JSON
pub struct JsonFormatter;

impl JsonFormatter {
    fn render(value: serde_json::Value) -> String {
        serde_json::to_string_pretty(&value).unwrap_or_else(|_| "{}".to_string())
    }
}

impl OutputFormatter for JsonFormatter {
    fn board(&self, title: &str, view: &BoardView) -> String {
        Self::render(json!({
            "title": title,
            "questions": view.questions,
            "leaderboard": view.leaderboard,
            "total": view.total,
        }))
    }

    fn questions(&self, view: &BoardView) -> String {
        Self::render(json!(view.questions))
    }

    fn leaderboard(&self, view: &BoardView) -> String {
        Self::render(json!(view.leaderboard))
    }

    fn loading(&self) -> String {
        Self::render(json!({ "status": "loading" }))
    }

    fn fetch_error(&self, message: &str) -> String {
        Self::render(json!({ "status": "error", "message": message }))
    }
}
