//! Live board rendering for `watch`

use crate::output::formatter::OutputFormatter;
use askboard_application::BoardListener;
use askboard_domain::BoardView;
use std::io::Write;

/// Redraws the whole board on every update
pub struct ConsoleBoardListener {
    formatter: Box<dyn OutputFormatter>,
    title: String,
    clear_screen: bool,
}

impl ConsoleBoardListener {
    pub fn new(formatter: Box<dyn OutputFormatter>, title: impl Into<String>) -> Self {
        Self {
            formatter,
            title: title.into(),
            clear_screen: true,
        }
    }

    /// Append updates instead of redrawing (JSON output, logs)
    pub fn append_only(mut self) -> Self {
        self.clear_screen = false;
        self
    }

    fn emit(&self, text: &str, redraw: bool) {
        let mut stdout = std::io::stdout().lock();
        if redraw && self.clear_screen {
            // ANSI: clear screen, cursor home
            let _ = write!(stdout, "\x1b[2J\x1b[H");
        }
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

impl BoardListener for ConsoleBoardListener {
    fn on_loading(&self) {
        self.emit(&self.formatter.loading(), false);
    }

    fn on_board(&self, board: &BoardView) {
        self.emit(&self.formatter.board(&self.title, board), true);
    }

    fn on_error(&self, message: &str) {
        self.emit(&self.formatter.fetch_error(message), false);
    }
}
