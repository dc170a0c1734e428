//! Offline magic-code authentication.
//!
//! Stands in for the hosted auth collaborator when the board runs against
//! the memory store. Codes are six digits, single use, and "delivered" to
//! an in-memory outbox (and the log) instead of an inbox. A user id is
//! derived from the email, so the same address always signs in as the
//! same user, across runs too.

use askboard_application::{AuthError, AuthGateway};
use askboard_domain::{Email, User, UserId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::collections::hash_map::RandomState;
use std::hash::BuildHasher;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// A code that was "sent"
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SentCode {
    pub email: Email,
    pub code: String,
}

/// Called with every code as it is "sent"
pub type Delivery = Box<dyn Fn(&SentCode) + Send + Sync>;

#[derive(Default)]
pub struct LocalAuthGateway {
    pending: Mutex<HashMap<Email, String>>,
    outbox: Mutex<Vec<SentCode>>,
    fixed_code: Option<String>,
    delivery: Option<Delivery>,
    hasher: RandomState,
    issued: AtomicU64,
}

impl LocalAuthGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Always issue `code` (demos and tests).
    pub fn with_fixed_code(mut self, code: impl Into<String>) -> Self {
        self.fixed_code = Some(code.into());
        self
    }

    /// Hand each code to `delivery` (e.g. print it for the user).
    pub fn with_delivery(mut self, delivery: impl Fn(&SentCode) + Send + Sync + 'static) -> Self {
        self.delivery = Some(Box::new(delivery));
        self
    }

    /// Every code sent so far, oldest first
    pub fn outbox(&self) -> Vec<SentCode> {
        self.outbox
            .lock()
            .map(|outbox| outbox.clone())
            .unwrap_or_default()
    }

    /// The most recent code sent to `email`
    pub fn last_code_for(&self, email: &Email) -> Option<String> {
        self.outbox()
            .into_iter()
            .rev()
            .find(|sent| &sent.email == email)
            .map(|sent| sent.code)
    }

    /// Stable id for `email`
    pub fn user_id_for(email: &Email) -> UserId {
        UserId::new(format!("local-{:016x}", fnv1a(email.as_str().as_bytes())))
    }

    fn next_code(&self, email: &Email) -> String {
        if let Some(code) = &self.fixed_code {
            return code.clone();
        }
        let n = self.issued.fetch_add(1, Ordering::Relaxed);
        format!("{:06}", self.hasher.hash_one((email.as_str(), n)) % 1_000_000)
    }
}

fn lock_err<T>(_: T) -> AuthError {
    AuthError::Connection("auth state lock poisoned".to_string())
}

#[async_trait]
impl AuthGateway for LocalAuthGateway {
    async fn send_magic_code(&self, email: &Email) -> Result<(), AuthError> {
        let code = self.next_code(email);
        self.pending
            .lock()
            .map_err(lock_err)?
            .insert(email.clone(), code.clone());
        let sent = SentCode {
            email: email.clone(),
            code,
        };
        info!(email = %sent.email, code = %sent.code, "Issued local magic code");
        if let Some(deliver) = &self.delivery {
            deliver(&sent);
        }
        self.outbox.lock().map_err(lock_err)?.push(sent);
        Ok(())
    }

    async fn verify_magic_code(&self, email: &Email, code: &str) -> Result<User, AuthError> {
        let mut pending = self.pending.lock().map_err(lock_err)?;
        match pending.get(email).cloned() {
            None => Err(AuthError::Rejected(format!("No code was sent to {}", email))),
            Some(expected) if expected != code.trim() => {
                Err(AuthError::Rejected("Invalid code".to_string()))
            }
            Some(_) => {
                pending.remove(email);
                Ok(User::new(Self::user_id_for(email), email.clone()))
            }
        }
    }

    async fn sign_out(&self, _user: &User) -> Result<(), AuthError> {
        Ok(())
    }
}

/// 64-bit FNV-1a; stable across processes and platforms.
fn fnv1a(bytes: &[u8]) -> u64 {
    bytes.iter().fold(0xcbf2_9ce4_8422_2325, |hash, byte| {
        (hash ^ u64::from(*byte)).wrapping_mul(0x0100_0000_01b3)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(s: &str) -> Email {
        Email::parse(s).unwrap()
    }

    #[tokio::test]
    async fn test_code_round_trip() {
        let gateway = LocalAuthGateway::new();
        let alice = email("alice@example.com");

        gateway.send_magic_code(&alice).await.unwrap();
        let code = gateway.last_code_for(&alice).unwrap();
        assert_eq!(code.len(), 6);
        assert!(code.chars().all(|c| c.is_ascii_digit()));

        let user = gateway.verify_magic_code(&alice, &code).await.unwrap();
        assert_eq!(user.email, alice);
    }

    #[tokio::test]
    async fn test_code_is_single_use() {
        let gateway = LocalAuthGateway::new().with_fixed_code("424242");
        let alice = email("alice@example.com");
        gateway.send_magic_code(&alice).await.unwrap();

        gateway.verify_magic_code(&alice, "424242").await.unwrap();
        assert!(gateway.verify_magic_code(&alice, "424242").await.is_err());
    }

    #[tokio::test]
    async fn test_wrong_code_keeps_pending_code() {
        let gateway = LocalAuthGateway::new().with_fixed_code("111111");
        let alice = email("alice@example.com");
        gateway.send_magic_code(&alice).await.unwrap();

        let err = gateway.verify_magic_code(&alice, "999999").await.unwrap_err();
        assert_eq!(err.user_message(), "Invalid code");
        assert!(gateway.verify_magic_code(&alice, "111111").await.is_ok());
    }

    #[tokio::test]
    async fn test_verify_without_send() {
        let gateway = LocalAuthGateway::new();
        let err = gateway
            .verify_magic_code(&email("bob@example.com"), "000000")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::Rejected(_)));
    }

    #[tokio::test]
    async fn test_same_email_same_user() {
        let gateway = LocalAuthGateway::new().with_fixed_code("123456");
        let alice = email("Alice@Example.com");

        gateway.send_magic_code(&alice).await.unwrap();
        let first = gateway.verify_magic_code(&alice, "123456").await.unwrap();
        gateway.send_magic_code(&alice).await.unwrap();
        let second = gateway.verify_magic_code(&alice, "123456").await.unwrap();

        assert_eq!(first.id, second.id);
        assert_ne!(
            first.id,
            LocalAuthGateway::user_id_for(&email("bob@example.com"))
        );
        assert_eq!(gateway.outbox().len(), 2);
    }

    #[tokio::test]
    async fn test_delivery_callback() {
        let delivered = std::sync::Arc::new(Mutex::new(Vec::new()));
        let sink = delivered.clone();
        let gateway = LocalAuthGateway::new()
            .with_fixed_code("777777")
            .with_delivery(move |sent| sink.lock().unwrap().push(sent.code.clone()));

        gateway
            .send_magic_code(&email("carol@example.com"))
            .await
            .unwrap();
        assert_eq!(*delivered.lock().unwrap(), vec!["777777".to_string()]);
    }
}
