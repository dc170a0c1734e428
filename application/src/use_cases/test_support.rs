//! Hand-written port doubles shared by the use case tests.

use crate::ports::activity_logger::{ActivityEvent, ActivityLogger};
use crate::ports::auth_gateway::{AuthError, AuthGateway};
use crate::ports::board_listener::BoardListener;
use crate::ports::question_store::{QueryEvent, QuestionStore, StoreError, Subscription};
use crate::ports::session_store::{SessionError, SessionStore};
use askboard_domain::{
    AskerIdentity, BoardView, Email, Mutation, Question, QuestionId, QuestionText, Timestamp,
    Transaction, User, UserId,
};
use async_trait::async_trait;
use std::sync::Mutex;
use tokio::sync::mpsc;

pub fn question(id: &str, asker: &str, creator: Option<&str>) -> Question {
    let q = Question::new(
        QuestionId::new(id),
        AskerIdentity::try_new(asker).unwrap(),
        QuestionText::try_new(format!("question {}", id)).unwrap(),
        Timestamp::from_millis(100),
    );
    match creator {
        Some(c) => q.with_creator(UserId::new(c)),
        None => q,
    }
}

pub fn user(id: &str, email: &str) -> User {
    User::new(UserId::new(id), Email::parse(email).unwrap())
}

// ==================== Store ====================

#[derive(Default)]
pub struct MockStore {
    pub questions: Mutex<Vec<Question>>,
    pub transactions: Mutex<Vec<Transaction>>,
    pub fail_writes: Mutex<Option<String>>,
    pub fail_reads: Mutex<Option<String>>,
    pub events: Mutex<Vec<QueryEvent>>,
    next_id: Mutex<u32>,
}

impl MockStore {
    pub fn with_questions(questions: Vec<Question>) -> Self {
        let store = Self::default();
        *store.questions.lock().unwrap() = questions;
        store
    }

    pub fn failing_writes(self, message: &str) -> Self {
        *self.fail_writes.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn failing_reads(self, message: &str) -> Self {
        *self.fail_reads.lock().unwrap() = Some(message.to_string());
        self
    }

    /// Events replayed to the next subscriber, after which the stream ends
    pub fn with_events(self, events: Vec<QueryEvent>) -> Self {
        *self.events.lock().unwrap() = events;
        self
    }

    pub fn transaction_count(&self) -> usize {
        self.transactions.lock().unwrap().len()
    }
}

#[async_trait]
impl QuestionStore for MockStore {
    async fn query(&self) -> Result<Vec<Question>, StoreError> {
        if let Some(message) = self.fail_reads.lock().unwrap().clone() {
            return Err(StoreError::Connection(message));
        }
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let events = std::mem::take(&mut *self.events.lock().unwrap());
        let (tx, rx) = mpsc::channel(events.len().max(1));
        for event in events {
            tx.try_send(event)
                .map_err(|e| StoreError::Other(e.to_string()))?;
        }
        Ok(Subscription::new(rx))
    }

    async fn transact(&self, tx: Transaction) -> Result<(), StoreError> {
        if let Some(message) = self.fail_writes.lock().unwrap().clone() {
            return Err(StoreError::Connection(message));
        }
        let mut questions = self.questions.lock().unwrap();
        for mutation in &tx.mutations {
            match mutation {
                Mutation::Create(q) => questions.push(q.clone()),
                Mutation::Update { id, text } => {
                    if let Some(slot) = questions.iter_mut().find(|q| q.id() == id) {
                        *slot = slot.clone().with_text(text.clone());
                    }
                }
                Mutation::Delete { id } => questions.retain(|q| q.id() != id),
            }
        }
        self.transactions.lock().unwrap().push(tx);
        Ok(())
    }

    fn generate_id(&self) -> QuestionId {
        let mut next = self.next_id.lock().unwrap();
        *next += 1;
        QuestionId::new(format!("id-{}", *next))
    }
}

// ==================== Auth ====================

pub struct MockAuth {
    pub valid_code: String,
    pub user_id: String,
    pub fail_send: Option<String>,
    pub sent_to: Mutex<Vec<Email>>,
    pub signed_out: Mutex<Vec<UserId>>,
}

impl MockAuth {
    pub fn new(valid_code: &str) -> Self {
        Self {
            valid_code: valid_code.to_string(),
            user_id: "user-1".to_string(),
            fail_send: None,
            sent_to: Mutex::new(Vec::new()),
            signed_out: Mutex::new(Vec::new()),
        }
    }

    pub fn failing_send(mut self, message: &str) -> Self {
        self.fail_send = Some(message.to_string());
        self
    }
}

#[async_trait]
impl AuthGateway for MockAuth {
    async fn send_magic_code(&self, email: &Email) -> Result<(), AuthError> {
        if let Some(message) = &self.fail_send {
            return Err(AuthError::Rejected(message.clone()));
        }
        self.sent_to.lock().unwrap().push(email.clone());
        Ok(())
    }

    async fn verify_magic_code(&self, email: &Email, code: &str) -> Result<User, AuthError> {
        if code == self.valid_code {
            Ok(User::new(UserId::new(self.user_id.clone()), email.clone()))
        } else {
            Err(AuthError::Rejected("Invalid code".to_string()))
        }
    }

    async fn sign_out(&self, user: &User) -> Result<(), AuthError> {
        self.signed_out.lock().unwrap().push(user.id.clone());
        Ok(())
    }
}

// ==================== Session / logging / listener ====================

#[derive(Default)]
pub struct MemorySessions {
    pub user: Mutex<Option<User>>,
}

impl SessionStore for MemorySessions {
    fn load(&self) -> Result<Option<User>, SessionError> {
        Ok(self.user.lock().unwrap().clone())
    }

    fn save(&self, user: &User) -> Result<(), SessionError> {
        *self.user.lock().unwrap() = Some(user.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.user.lock().unwrap() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingLogger {
    pub events: Mutex<Vec<(&'static str, serde_json::Value)>>,
}

impl RecordingLogger {
    pub fn types(&self) -> Vec<&'static str> {
        self.events.lock().unwrap().iter().map(|(t, _)| *t).collect()
    }
}

impl ActivityLogger for RecordingLogger {
    fn log(&self, event: ActivityEvent) {
        self.events
            .lock()
            .unwrap()
            .push((event.event_type, event.payload));
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Seen {
    Loading,
    Board(BoardView),
    Error(String),
}

#[derive(Default)]
pub struct RecordingListener {
    pub seen: Mutex<Vec<Seen>>,
}

impl BoardListener for RecordingListener {
    fn on_loading(&self) {
        self.seen.lock().unwrap().push(Seen::Loading);
    }

    fn on_board(&self, board: &BoardView) {
        self.seen.lock().unwrap().push(Seen::Board(board.clone()));
    }

    fn on_error(&self, message: &str) {
        self.seen.lock().unwrap().push(Seen::Error(message.to_string()));
    }
}
