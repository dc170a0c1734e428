//! Domain error types

use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Asker name cannot be empty")]
    EmptyAsker,

    #[error("Question text cannot be empty")]
    EmptyText,

    #[error("Invalid email: {0}")]
    InvalidEmail(String),

    #[error("Malformed question record {id}: {reason}")]
    MalformedRecord { id: String, reason: String },

    #[error("Cannot apply '{event}' while {from}")]
    InvalidAuthTransition { from: String, event: String },

    #[error("Only the author of question {0} can change it")]
    NotOwner(String),

    #[error("Sign in first")]
    NotSignedIn,

    #[error("Editing and deleting questions requires an authenticated board")]
    UnsupportedInOpenBoard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_owner_display() {
        let error = DomainError::NotOwner("q1".to_string());
        assert_eq!(error.to_string(), "Only the author of question q1 can change it");
    }
}
