//! Leaderboard aggregation.
//!
//! The leaderboard is a derived view: it is rebuilt from the current set of
//! questions on every read and never stored.
//!
//! Ordering is by count, highest first. Identities with equal counts keep
//! the order in which they first appear in the input.

use crate::core::string::pluralize;
use crate::question::entities::Question;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One ranked row of the leaderboard
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// The asker identity being counted
    pub identity: String,
    /// Number of questions asked under that identity
    pub count: usize,
}

impl LeaderboardEntry {
    pub fn new(identity: impl Into<String>, count: usize) -> Self {
        Self {
            identity: identity.into(),
            count,
        }
    }

    /// `"2 questions"`
    pub fn count_label(&self) -> String {
        question_count_label(self.count)
    }
}

/// Count questions per asker and rank the askers.
pub fn aggregate_leaderboard<'a, I>(questions: I) -> Vec<LeaderboardEntry>
where
    I: IntoIterator<Item = &'a Question>,
{
    let mut index: HashMap<&'a str, usize> = HashMap::new();
    let mut entries: Vec<LeaderboardEntry> = Vec::new();

    for question in questions {
        let identity = question.asker().as_str();
        match index.get(identity) {
            Some(&slot) => entries[slot].count += 1,
            None => {
                index.insert(identity, entries.len());
                entries.push(LeaderboardEntry::new(identity, 1));
            }
        }
    }

    // sort_by is stable: ties stay in first-seen order
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    entries
}

/// `"1 question"` / `"N questions"`
pub fn question_count_label(count: usize) -> String {
    pluralize(count, "question", "questions")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::question::value_objects::{AskerIdentity, QuestionId, QuestionText, Timestamp};
    use std::collections::HashSet;

    fn q(identity: &str) -> Question {
        Question::new(
            QuestionId::generate(),
            AskerIdentity::try_new(identity).unwrap(),
            QuestionText::try_new("?").unwrap(),
            Timestamp::from_millis(0),
        )
    }

    fn questions(identities: &[&str]) -> Vec<Question> {
        identities.iter().map(|i| q(i)).collect()
    }

    #[test]
    fn test_empty_input() {
        assert!(aggregate_leaderboard(&Vec::<Question>::new()).is_empty());
    }

    #[test]
    fn test_alice_bob_alice() {
        let board = aggregate_leaderboard(&questions(&["alice", "bob", "alice"]));
        assert_eq!(
            board,
            vec![
                LeaderboardEntry::new("alice", 2),
                LeaderboardEntry::new("bob", 1)
            ]
        );
    }

    #[test]
    fn test_tie_keeps_first_seen_order() {
        let board = aggregate_leaderboard(&questions(&["x", "y"]));
        assert_eq!(
            board,
            vec![LeaderboardEntry::new("x", 1), LeaderboardEntry::new("y", 1)]
        );

        let board = aggregate_leaderboard(&questions(&["y", "x"]));
        assert_eq!(board[0].identity, "y");
    }

    #[test]
    fn test_higher_count_overtakes_earlier_identity() {
        let board = aggregate_leaderboard(&questions(&["a", "b", "c", "c", "b", "c"]));
        let order: Vec<_> = board.iter().map(|e| (e.identity.as_str(), e.count)).collect();
        assert_eq!(order, vec![("c", 3), ("b", 2), ("a", 1)]);
    }

    #[test]
    fn test_counts_partition_the_input() {
        let input = questions(&["d", "a", "b", "a", "c", "d", "d", "e", "b", "a", "a"]);
        let board = aggregate_leaderboard(&input);

        let distinct: HashSet<_> = input.iter().map(|q| q.asker().as_str()).collect();
        assert_eq!(board.len(), distinct.len());
        assert_eq!(board.iter().map(|e| e.count).sum::<usize>(), input.len());
        assert!(board.windows(2).all(|w| w[0].count >= w[1].count));
    }

    #[test]
    fn test_aggregation_is_idempotent() {
        let input = questions(&["m", "n", "m", "o", "n", "p"]);
        assert_eq!(aggregate_leaderboard(&input), aggregate_leaderboard(&input));
    }

    #[test]
    fn test_identity_is_case_sensitive() {
        let board = aggregate_leaderboard(&questions(&["Alice", "alice"]));
        assert_eq!(board.len(), 2);
    }

    #[test]
    fn test_count_label() {
        assert_eq!(LeaderboardEntry::new("a", 1).count_label(), "1 question");
        assert_eq!(LeaderboardEntry::new("a", 3).count_label(), "3 questions");
    }
}
