//! Auth gateway port
//!
//! Magic-code authentication is delegated to an external collaborator: it
//! emails a one-time code and later exchanges that code for a session.

use askboard_domain::{Email, User};
use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during authentication
#[derive(Error, Debug)]
pub enum AuthError {
    /// The collaborator refused the request; carries its message
    #[error("{0}")]
    Rejected(String),

    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Request timed out")]
    Timeout,
}

impl AuthError {
    /// Message suitable for showing next to the form that failed
    pub fn user_message(&self) -> String {
        match self {
            AuthError::Rejected(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

/// Magic-code authentication
#[async_trait]
pub trait AuthGateway: Send + Sync {
    /// Email a one-time code to `email`
    async fn send_magic_code(&self, email: &Email) -> Result<(), AuthError>;

    /// Exchange a code for a signed-in user
    async fn verify_magic_code(&self, email: &Email, code: &str) -> Result<User, AuthError>;

    /// End the user's session with the collaborator
    async fn sign_out(&self, user: &User) -> Result<(), AuthError>;
}
