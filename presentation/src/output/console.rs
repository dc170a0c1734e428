//! Console output formatter for the board

use crate::output::formatter::OutputFormatter;
use askboard_domain::{BoardView, LeaderboardEntry, QuestionRow};
use colored::Colorize;

pub const FOOTER: &str = "Ask as many unique questions as you can!";

/// Formats the board for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the full board
    pub fn format_board(title: &str, view: &BoardView) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(title));
        output.push('\n');

        output.push_str(&Self::format_questions(view));
        output.push_str(&Self::format_leaderboard(view));

        output.push_str(&format!(
            "\n{} {}\n",
            "Total questions:".cyan().bold(),
            view.total
        ));
        output.push_str(&Self::footer());

        output
    }

    /// Questions in store order. Rows the viewer owns show their id so they
    /// can be edited or deleted.
    pub fn format_questions(view: &BoardView) -> String {
        let mut output = Self::section_header("Questions Asked");
        if view.questions.is_empty() {
            output.push_str(&format!("{}\n", "No questions yet.".dimmed()));
        }
        for row in &view.questions {
            output.push_str(&Self::question_line(row));
            output.push('\n');
        }
        output
    }

    pub fn format_leaderboard(view: &BoardView) -> String {
        let mut output = Self::section_header("Leaderboard");
        if view.leaderboard.is_empty() {
            output.push_str(&format!("{}\n", "No askers yet.".dimmed()));
        }
        for (rank, entry) in view.leaderboard.iter().enumerate() {
            output.push_str(&Self::leaderboard_line(rank + 1, entry));
            output.push('\n');
        }
        output
    }

    fn question_line(row: &QuestionRow) -> String {
        let question = &row.question;
        let line = format!("{}: {}", question.asker().as_str().bold(), question.text());
        if row.editable {
            format!(
                "{} {} {}",
                line,
                format!("({})", question.id()).dimmed(),
                "[editable]".yellow()
            )
        } else {
            line
        }
    }

    fn leaderboard_line(rank: usize, entry: &LeaderboardEntry) -> String {
        format!(
            "{}. {} - {}",
            rank,
            entry.identity.bold(),
            entry.count_label()
        )
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n{}\n", FOOTER.green(), "=".repeat(60).cyan())
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn board(&self, title: &str, view: &BoardView) -> String {
        Self::format_board(title, view)
    }

    fn questions(&self, view: &BoardView) -> String {
        Self::format_questions(view)
    }

    fn leaderboard(&self, view: &BoardView) -> String {
        Self::format_leaderboard(view)
    }

    fn loading(&self) -> String {
        "Fetching data...".dimmed().to_string()
    }

    fn fetch_error(&self, message: &str) -> String {
        format!("Error fetching data: {}", message).red().to_string()
    }
}
