//! Magic-code authentication through the hosted service.

use super::client::{HostedClient, HostedError};
use askboard_application::{AuthError, AuthGateway};
use askboard_domain::{Email, User, UserId};
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;

impl From<HostedError> for AuthError {
    fn from(e: HostedError) -> Self {
        match e {
            HostedError::Connection(message) | HostedError::Decode(message) => {
                AuthError::Connection(message)
            }
            HostedError::Timeout => AuthError::Timeout,
            HostedError::Status { message, .. } => AuthError::Rejected(message),
        }
    }
}

#[derive(Debug, Deserialize)]
struct VerifyResponse {
    user: WireUser,
}

#[derive(Debug, Deserialize)]
struct WireUser {
    id: String,
    email: Option<String>,
}

pub struct HostedAuthGateway {
    client: HostedClient,
}

impl HostedAuthGateway {
    pub fn new(client: HostedClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl AuthGateway for HostedAuthGateway {
    async fn send_magic_code(&self, email: &Email) -> Result<(), AuthError> {
        self.client
            .post("/admin/send_magic_code", json!({ "email": email.as_str() }))
            .await?;
        Ok(())
    }

    async fn verify_magic_code(&self, email: &Email, code: &str) -> Result<User, AuthError> {
        let body = self
            .client
            .post(
                "/admin/verify_magic_code",
                json!({ "email": email.as_str(), "code": code }),
            )
            .await?;
        parse_user(body, email)
    }

    async fn sign_out(&self, user: &User) -> Result<(), AuthError> {
        self.client
            .post("/admin/sign_out", json!({ "email": user.email.as_str() }))
            .await?;
        Ok(())
    }
}

/// The signed-in user from a verify response; falls back to the email the
/// code was sent to when the service omits it.
fn parse_user(body: serde_json::Value, requested: &Email) -> Result<User, AuthError> {
    let response: VerifyResponse = serde_json::from_value(body)
        .map_err(|e| AuthError::Connection(format!("Malformed response: {}", e)))?;
    let email = match response.user.email.as_deref().map(Email::parse) {
        Some(Ok(email)) => email,
        _ => requested.clone(),
    };
    Ok(User::new(UserId::new(response.user.id), email))
}
