//! Board view model: everything one screen of the board shows.

use super::ownership::can_modify;
use crate::auth::value_objects::UserId;
use crate::leaderboard::{LeaderboardEntry, aggregate_leaderboard};
use crate::question::entities::Question;
use serde::Serialize;

/// A question as seen by a particular viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QuestionRow {
    #[serde(flatten)]
    pub question: Question,
    /// Whether edit/delete controls are shown for this row
    pub editable: bool,
}

/// Questions (in store order), the leaderboard and the total count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    pub questions: Vec<QuestionRow>,
    pub leaderboard: Vec<LeaderboardEntry>,
    pub total: usize,
}

impl BoardView {
    pub fn build(questions: Vec<Question>, viewer: Option<&UserId>) -> Self {
        let leaderboard = aggregate_leaderboard(&questions);
        let total = questions.len();
        let questions = questions
            .into_iter()
            .map(|question| {
                let editable = can_modify(&question, viewer);
                QuestionRow { question, editable }
            })
            .collect();

        Self {
            questions,
            leaderboard,
            total,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Rows the viewer may edit or delete
    pub fn editable_rows(&self) -> impl Iterator<Item = &QuestionRow> {
        self.questions.iter().filter(|row| row.editable)
    }
}
