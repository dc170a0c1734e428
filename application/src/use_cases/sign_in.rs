//! Sign In use case
//!
//! Drives an [`AuthFlow`] through the magic-code exchange with the auth
//! collaborator, persisting the resulting session so later runs start
//! signed in.

use super::shared::bounded;
use crate::config::BehaviorConfig;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::auth_gateway::{AuthError, AuthGateway};
use crate::ports::session_store::{NoSessionStore, SessionStore};
use askboard_domain::{AuthFlow, DomainError, Email, User};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors that can occur while signing in or out
#[derive(Error, Debug)]
pub enum SignInError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl SignInError {
    /// Message to show next to the form that failed
    pub fn user_message(&self) -> String {
        match self {
            SignInError::Domain(e) => e.to_string(),
            SignInError::Auth(e) => e.user_message(),
        }
    }
}

/// Use case for the magic-code sign-in flow
pub struct SignInUseCase {
    gateway: Arc<dyn AuthGateway>,
    sessions: Arc<dyn SessionStore>,
    behavior: BehaviorConfig,
    activity: Arc<dyn ActivityLogger>,
}

impl SignInUseCase {
    pub fn new(gateway: Arc<dyn AuthGateway>) -> Self {
        Self {
            gateway,
            sessions: Arc::new(NoSessionStore),
            behavior: BehaviorConfig::default(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_sessions(mut self, sessions: Arc<dyn SessionStore>) -> Self {
        self.sessions = sessions;
        self
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Put a previously saved session into `flow`.
    ///
    /// A missing or unreadable session leaves the flow signed out.
    pub fn restore(&self, flow: &mut AuthFlow) -> Option<User> {
        match self.sessions.load() {
            Ok(Some(user)) => {
                info!(user = %user.email, "Restored session");
                flow.resume(user.clone());
                Some(user)
            }
            Ok(None) => None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable session");
                None
            }
        }
    }

    /// Email a one-time code. On failure the flow keeps its state and
    /// records the message.
    pub async fn send_code(&self, flow: &mut AuthFlow, email: &str) -> Result<(), SignInError> {
        flow.ensure_can_request_code()?;

        let email = match Email::parse(email) {
            Ok(email) => email,
            Err(e) => {
                flow.code_request_failed(e.to_string());
                return Err(e.into());
            }
        };

        let sent = bounded(
            self.behavior.timeout,
            self.gateway.send_magic_code(&email),
            || AuthError::Timeout,
        )
        .await;
        if let Err(e) = sent {
            warn!(error = %e, "Sending magic code failed");
            flow.code_request_failed(e.user_message());
            return Err(e.into());
        }

        info!(email = %email, "Magic code sent");
        self.activity.log(ActivityEvent::new(
            "magic_code_sent",
            serde_json::json!({ "email": email.as_str() }),
        ));
        flow.code_requested(email)?;
        Ok(())
    }

    /// Exchange `code` for a session. A rejected code leaves the flow
    /// waiting for another attempt.
    pub async fn verify_code(&self, flow: &mut AuthFlow, code: &str) -> Result<User, SignInError> {
        let email = flow.require_pending_email()?.clone();

        let verified = bounded(
            self.behavior.timeout,
            self.gateway.verify_magic_code(&email, code.trim()),
            || AuthError::Timeout,
        )
        .await;
        let user = match verified {
            Ok(user) => user,
            Err(e) => {
                warn!(error = %e, "Magic code rejected");
                flow.verification_failed(e.user_message())?;
                return Err(e.into());
            }
        };

        if let Err(e) = self.sessions.save(&user) {
            warn!(error = %e, "Could not persist session");
        }
        info!(user = %user.email, "Signed in");
        self.activity.log(ActivityEvent::new(
            "signed_in",
            serde_json::json!({ "userId": user.id.as_str(), "email": user.email.as_str() }),
        ));
        flow.verified(user.clone())?;
        Ok(user)
    }

    /// End the session. The local session is cleared even when the
    /// collaborator cannot be reached.
    pub async fn sign_out(&self, flow: &mut AuthFlow) -> Result<(), SignInError> {
        let user = flow.user().cloned().ok_or(DomainError::NotSignedIn)?;

        let result = bounded(
            self.behavior.timeout,
            self.gateway.sign_out(&user),
            || AuthError::Timeout,
        )
        .await;
        if let Err(e) = result {
            warn!(error = %e, "Remote sign-out failed; clearing local session anyway");
        }
        if let Err(e) = self.sessions.clear() {
            warn!(error = %e, "Could not clear saved session");
        }

        info!(user = %user.email, "Signed out");
        self.activity.log(ActivityEvent::new(
            "signed_out",
            serde_json::json!({ "userId": user.id.as_str() }),
        ));
        flow.signed_out()?;
        Ok(())
    }
}
