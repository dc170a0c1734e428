//! Magic-code sign-in flow
//!
//! `Unauthenticated -> (email submitted) -> CodeSent -> (code verified) -> Authenticated`
//!
//! Failures never move the flow backwards on their own: a failed code
//! request leaves the state where it was, a failed verification stays in
//! `CodeSent`. The latest failure message is kept for display and cleared
//! by the next successful transition.

use super::value_objects::{Email, User};
use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// State of the sign-in flow
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum AuthState {
    /// No session; waiting for an email
    #[default]
    Unauthenticated,
    /// A one-time code was sent; waiting for the code
    CodeSent { email: Email },
    /// Signed in
    Authenticated { user: User },
}

impl AuthState {
    pub fn as_str(&self) -> &str {
        match self {
            AuthState::Unauthenticated => "unauthenticated",
            AuthState::CodeSent { .. } => "code_sent",
            AuthState::Authenticated { .. } => "authenticated",
        }
    }
}

impl std::fmt::Display for AuthState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Sign-in flow with its last error message
#[derive(Debug, Clone, Default)]
pub struct AuthFlow {
    state: AuthState,
    error: Option<String>,
}

impl AuthFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    /// Last failure message, if the most recent step failed
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// The signed-in user, if any
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            AuthState::Authenticated { user } => Some(user),
            _ => None,
        }
    }

    /// The email a code is pending for, if any
    pub fn pending_email(&self) -> Option<&Email> {
        match &self.state {
            AuthState::CodeSent { email } => Some(email),
            _ => None,
        }
    }

    /// Whether a code may be requested from the current state.
    ///
    /// Re-requesting from `CodeSent` is allowed (resend or change email).
    pub fn can_request_code(&self) -> bool {
        !matches!(self.state, AuthState::Authenticated { .. })
    }

    /// Fails with `InvalidAuthTransition` when a code may not be requested now.
    pub fn ensure_can_request_code(&self) -> Result<(), DomainError> {
        if self.can_request_code() {
            Ok(())
        } else {
            Err(self.invalid("code_requested"))
        }
    }

    /// The email a code is pending for, or `InvalidAuthTransition`.
    pub fn require_pending_email(&self) -> Result<&Email, DomainError> {
        self.pending_email().ok_or_else(|| self.invalid("verify_code"))
    }

    /// A code was sent to `email`.
    pub fn code_requested(&mut self, email: Email) -> Result<(), DomainError> {
        self.ensure_can_request_code()?;
        self.state = AuthState::CodeSent { email };
        self.error = None;
        Ok(())
    }

    /// Sending the code failed; state is unchanged.
    pub fn code_request_failed(&mut self, message: impl Into<String>) {
        self.error = Some(message.into());
    }

    /// The pending code was accepted.
    pub fn verified(&mut self, user: User) -> Result<(), DomainError> {
        if self.pending_email().is_none() {
            return Err(self.invalid("verified"));
        }
        self.state = AuthState::Authenticated { user };
        self.error = None;
        Ok(())
    }

    /// The code was rejected; stays in `CodeSent`.
    pub fn verification_failed(&mut self, message: impl Into<String>) -> Result<(), DomainError> {
        if self.pending_email().is_none() {
            return Err(self.invalid("verification_failed"));
        }
        self.error = Some(message.into());
        Ok(())
    }

    /// Abandon a pending code and go back to entering an email.
    pub fn restart(&mut self) -> Result<(), DomainError> {
        if self.pending_email().is_none() {
            return Err(self.invalid("restart"));
        }
        self.state = AuthState::Unauthenticated;
        self.error = None;
        Ok(())
    }

    pub fn signed_out(&mut self) -> Result<(), DomainError> {
        if self.user().is_none() {
            return Err(self.invalid("signed_out"));
        }
        self.state = AuthState::Unauthenticated;
        self.error = None;
        Ok(())
    }

    /// Restore a previously established session.
    pub fn resume(&mut self, user: User) {
        self.state = AuthState::Authenticated { user };
        self.error = None;
    }

    fn invalid(&self, event: &str) -> DomainError {
        DomainError::InvalidAuthTransition {
            from: self.state.as_str().to_string(),
            event: event.to_string(),
        }
    }
}
