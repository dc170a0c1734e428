//! Question store port
//!
//! Defines the interface to the real-time store that owns the question
//! collection. Persistence, sync between clients and conflict resolution
//! all live behind this trait; the board only reads snapshots and submits
//! transactions.

use askboard_domain::{Question, QuestionId, Transaction};
use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

/// Errors that can occur during store operations
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Write rejected: {0}")]
    Rejected(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Question not found: {0}")]
    NotFound(QuestionId),

    #[error("Request timed out")]
    Timeout,

    #[error("Malformed response: {0}")]
    Malformed(String),

    #[error("Store error: {0}")]
    Other(String),
}

impl StoreError {
    /// Whether resubmitting the same request could succeed
    pub fn is_retryable(&self) -> bool {
        matches!(self, StoreError::Connection(_) | StoreError::Timeout)
    }
}

/// An update delivered on a live subscription
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEvent {
    /// The store is (re)loading the collection
    Loading,
    /// The current full collection, in store order
    Snapshot(Vec<Question>),
    /// The subscription failed; carries a human-readable message
    Error(String),
}

/// Handle for receiving live query events.
///
/// Dropping the handle ends the subscription.
pub struct Subscription {
    pub receiver: mpsc::Receiver<QueryEvent>,
}

impl Subscription {
    pub fn new(receiver: mpsc::Receiver<QueryEvent>) -> Self {
        Self { receiver }
    }

    /// Wait for the next event; `None` once the store closes the stream.
    pub async fn next(&mut self) -> Option<QueryEvent> {
        self.receiver.recv().await
    }
}

/// Real-time store holding the question collection
///
/// Implementations (adapters) live in the infrastructure layer.
#[async_trait]
pub trait QuestionStore: Send + Sync {
    /// Current collection, in store order
    async fn query(&self) -> Result<Vec<Question>, StoreError>;

    /// Live collection; a snapshot is delivered now and after every change
    async fn subscribe(&self) -> Result<Subscription, StoreError>;

    /// Apply all mutations of `tx` atomically
    async fn transact(&self, tx: Transaction) -> Result<(), StoreError>;

    /// Look up one question by id
    async fn find(&self, id: &QuestionId) -> Result<Option<Question>, StoreError> {
        Ok(self.query().await?.into_iter().find(|q| q.id() == id))
    }

    /// Fresh id for a new record
    fn generate_id(&self) -> QuestionId {
        QuestionId::generate()
    }
}
