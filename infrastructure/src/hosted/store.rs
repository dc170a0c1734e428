//! Question store backed by the hosted real-time service.
//!
//! Reads go through `/admin/query`, writes through `/admin/transact` as a
//! list of `["update" | "delete", "questions", id, attrs]` steps. Writes
//! made on behalf of a signed-in user impersonate that user (`as-email`),
//! so the service's permission rules apply to them rather than the admin
//! token's. Live updates are emulated by polling; a snapshot is only
//! emitted when the collection actually changed.

use super::client::{HostedClient, HostedError};
use askboard_application::{QueryEvent, QuestionStore, StoreError, Subscription};
use askboard_domain::{Mutation, Question, QuestionRecord, Transaction};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

const NAMESPACE: &str = "questions";

impl From<HostedError> for StoreError {
    fn from(e: HostedError) -> Self {
        match e {
            HostedError::Connection(message) => StoreError::Connection(message),
            HostedError::Timeout => StoreError::Timeout,
            HostedError::Status {
                status: 401 | 403,
                message,
            } => StoreError::PermissionDenied(message),
            HostedError::Status { message, .. } => StoreError::Rejected(message),
            HostedError::Decode(message) => StoreError::Malformed(message),
        }
    }
}

pub struct HostedQuestionStore {
    client: HostedClient,
    poll_interval: Duration,
}

impl HostedQuestionStore {
    pub fn new(client: HostedClient, poll_interval: Duration) -> Self {
        Self {
            client,
            poll_interval,
        }
    }
}

async fn fetch(client: &HostedClient) -> Result<Vec<Question>, StoreError> {
    let body = client
        .post("/admin/query", json!({ "query": { "questions": {} } }))
        .await?;
    decode_questions(&body)
}

#[async_trait]
impl QuestionStore for HostedQuestionStore {
    async fn query(&self) -> Result<Vec<Question>, StoreError> {
        fetch(&self.client).await
    }

    async fn subscribe(&self) -> Result<Subscription, StoreError> {
        let (tx, rx) = mpsc::channel(16);
        let client = self.client.clone();
        let interval = self.poll_interval;

        tokio::spawn(async move {
            if tx.send(QueryEvent::Loading).await.is_err() {
                return;
            }
            let mut last: Option<Result<Vec<Question>, String>> = None;
            loop {
                let current = fetch(&client).await.map_err(|e| e.to_string());
                if last.as_ref() != Some(&current) {
                    let event = match &current {
                        Ok(questions) => QueryEvent::Snapshot(questions.clone()),
                        Err(message) => QueryEvent::Error(message.clone()),
                    };
                    if tx.send(event).await.is_err() {
                        return;
                    }
                    last = Some(current);
                }

                tokio::select! {
                    _ = tx.closed() => return,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
        });

        Ok(Subscription::new(rx))
    }

    async fn transact(&self, tx: Transaction) -> Result<(), StoreError> {
        if tx.is_empty() {
            return Ok(());
        }
        let steps = transaction_steps(&tx);
        debug!(
            steps = tx.mutations.len(),
            actor = tx.actor_id().map(|id| id.as_str()),
            "Submitting transaction"
        );
        self.client
            .post_with_headers(
                "/admin/transact",
                json!({ "steps": steps }),
                &impersonation_headers(&tx),
            )
            .await?;
        Ok(())
    }
}

/// Decode a query response, dropping records that are not well-formed.
pub(crate) fn decode_questions(body: &Value) -> Result<Vec<Question>, StoreError> {
    let records = body
        .get(NAMESPACE)
        .and_then(Value::as_array)
        .ok_or_else(|| StoreError::Malformed(format!("missing `{}` in response", NAMESPACE)))?;

    Ok(records
        .iter()
        .filter_map(|raw| {
            let decoded = serde_json::from_value::<QuestionRecord>(raw.clone())
                .map_err(|e| e.to_string())
                .and_then(|record| Question::try_from(record).map_err(|e| e.to_string()));
            match decoded {
                Ok(question) => Some(question),
                Err(reason) => {
                    warn!("Skipping malformed question record: {}", reason);
                    None
                }
            }
        })
        .collect())
}

/// Headers that make the service evaluate `tx` as its actor.
pub(crate) fn impersonation_headers(tx: &Transaction) -> Vec<(&'static str, String)> {
    tx.actor
        .iter()
        .map(|user| ("as-email", user.email.as_str().to_string()))
        .collect()
}

/// Wire steps for every mutation of `tx`, in order.
pub(crate) fn transaction_steps(tx: &Transaction) -> Vec<Value> {
    tx.mutations
        .iter()
        .map(|mutation| match mutation {
            Mutation::Create(question) => {
                let mut attrs = serde_json::to_value(QuestionRecord::from(question))
                    .unwrap_or_else(|_| json!({}));
                if let Some(map) = attrs.as_object_mut() {
                    map.remove("id");
                }
                json!(["update", NAMESPACE, question.id().as_str(), attrs])
            }
            Mutation::Update { id, text } => {
                json!(["update", NAMESPACE, id.as_str(), { "text": text.as_str() }])
            }
            Mutation::Delete { id } => json!(["delete", NAMESPACE, id.as_str()]),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use askboard_domain::{AskerIdentity, Email, QuestionId, QuestionText, Timestamp, User, UserId};

    fn alice() -> User {
        User::new(UserId::new("u-1"), Email::parse("alice@example.com").unwrap())
    }

    #[test]
    fn test_decode_skips_malformed_records() {
        let body = json!({
            "questions": [
                { "id": "q1", "name": "alice", "text": "hi", "createdAt": 10 },
                { "id": "q2", "text": "no name", "createdAt": 11 },
                { "id": "q3", "name": "bob", "text": "yo", "createdAt": 12, "creatorId": "u-bob" },
                { "id": "q4", "name": "carol", "text": "float time", "createdAt": 1.7e12 }
            ]
        });
        let questions = decode_questions(&body).unwrap();
        let ids: Vec<_> = questions.iter().map(|q| q.id().as_str()).collect();
        assert_eq!(ids, vec!["q1", "q3", "q4"]);
        assert_eq!(questions[1].creator_id().map(|c| c.as_str()), Some("u-bob"));
        assert_eq!(questions[2].created_at().as_millis(), 1_700_000_000_000);
    }

    #[test]
    fn test_decode_requires_namespace() {
        assert!(matches!(
            decode_questions(&json!({ "other": [] })),
            Err(StoreError::Malformed(_))
        ));
    }

    #[test]
    fn test_transaction_steps() {
        let question = Question::new(
            QuestionId::new("q1"),
            AskerIdentity::try_new("alice@example.com").unwrap(),
            QuestionText::try_new("Why?").unwrap(),
            Timestamp::from_millis(99),
        )
        .with_creator(UserId::new("u-1"));

        let tx = Transaction::new(Some(alice()))
            .push(Mutation::Create(question))
            .push(Mutation::update(QuestionId::new("q1"), "Why not?").unwrap())
            .push(Mutation::delete(QuestionId::new("q1")));

        let steps = transaction_steps(&tx);
        assert_eq!(
            steps[0],
            json!(["update", "questions", "q1", {
                "name": "alice@example.com",
                "text": "Why?",
                "createdAt": 99,
                "creatorId": "u-1"
            }])
        );
        assert_eq!(steps[1], json!(["update", "questions", "q1", { "text": "Why not?" }]));
        assert_eq!(steps[2], json!(["delete", "questions", "q1"]));
    }

    #[test]
    fn test_writes_act_as_the_signed_in_user() {
        let tx = Transaction::single(Some(alice()), Mutation::delete(QuestionId::new("q1")));
        assert_eq!(
            impersonation_headers(&tx),
            vec![("as-email", "alice@example.com".to_string())]
        );

        let open = Transaction::single(None, Mutation::delete(QuestionId::new("q1")));
        assert!(impersonation_headers(&open).is_empty());
    }

    #[test]
    fn test_status_errors_map_to_store_errors() {
        let denied: StoreError = HostedError::Status {
            status: 403,
            message: "nope".to_string(),
        }
        .into();
        assert!(matches!(denied, StoreError::PermissionDenied(m) if m == "nope"));

        let rejected: StoreError = HostedError::Status {
            status: 400,
            message: "bad".to_string(),
        }
        .into();
        assert!(matches!(rejected, StoreError::Rejected(_)));
    }
}
