//! Session store port
//!
//! Keeps the signed-in user between runs of the client.

use askboard_domain::User;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session I/O error: {0}")]
    Io(String),

    #[error("Corrupt session data: {0}")]
    Corrupt(String),
}

/// Persistence for the current session
pub trait SessionStore: Send + Sync {
    /// The saved user, if any
    fn load(&self) -> Result<Option<User>, SessionError>;

    fn save(&self, user: &User) -> Result<(), SessionError>;

    /// Forget the saved user. Clearing an empty store is not an error.
    fn clear(&self) -> Result<(), SessionError>;
}

/// Session store that remembers nothing between runs
pub struct NoSessionStore;

impl SessionStore for NoSessionStore {
    fn load(&self) -> Result<Option<User>, SessionError> {
        Ok(None)
    }

    fn save(&self, _user: &User) -> Result<(), SessionError> {
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        Ok(())
    }
}
