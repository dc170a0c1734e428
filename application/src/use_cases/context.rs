//! Who is acting on which board.

use askboard_domain::{BoardVariant, DomainError, User, UserId};

/// Acting context passed to every use case
#[derive(Debug, Clone, Default)]
pub struct BoardContext {
    pub variant: BoardVariant,
    /// Signed-in user (authenticated boards only)
    pub user: Option<User>,
}

impl BoardContext {
    pub fn open() -> Self {
        Self {
            variant: BoardVariant::Open,
            user: None,
        }
    }

    pub fn authenticated(user: Option<User>) -> Self {
        Self {
            variant: BoardVariant::Authenticated,
            user,
        }
    }

    /// Identifier used for ownership checks
    pub fn viewer(&self) -> Option<&UserId> {
        self.user.as_ref().map(|u| &u.id)
    }

    pub fn require_user(&self) -> Result<&User, DomainError> {
        self.user.as_ref().ok_or(DomainError::NotSignedIn)
    }
}
