//! Record contract between the board and the question store.
//!
//! - [`QuestionRecord`]: the loosely-typed shape a store hands back
//! - [`QuestionDraft`]: validated form input, before an id is assigned
//! - [`Mutation`] / [`Transaction`]: the three writes the board issues
//!
//! A record read from a store is only turned into a [`Question`] when it
//! carries a non-blank `name`, a non-blank `text` and a `createdAt`.
//! Anything else is reported as [`DomainError::MalformedRecord`] and
//! callers drop it.

use crate::auth::value_objects::{User, UserId};
use crate::core::error::DomainError;
use crate::question::entities::Question;
use crate::question::value_objects::{AskerIdentity, QuestionId, QuestionText, Timestamp};
use serde::{Deserialize, Deserializer, Serialize};

/// Raw question record as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionRecord {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient_millis",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creator_id: Option<String>,
}

/// Epoch milliseconds as JSON writes them: `1700000000000` or `1.7e12`.
#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Whole(i64),
    Float(f64),
}

/// Fractional milliseconds are truncated toward zero.
fn lenient_millis<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(
        Option::<Millis>::deserialize(deserializer)?.map(|millis| match millis {
            Millis::Whole(ms) => ms,
            Millis::Float(ms) => ms.trunc() as i64,
        }),
    )
}

impl TryFrom<QuestionRecord> for Question {
    type Error = DomainError;

    fn try_from(record: QuestionRecord) -> Result<Self, Self::Error> {
        let malformed = |reason: &str| DomainError::MalformedRecord {
            id: record.id.clone(),
            reason: reason.to_string(),
        };

        let asker = record
            .name
            .clone()
            .and_then(AskerIdentity::try_new)
            .ok_or_else(|| malformed("missing name"))?;
        let text = record
            .text
            .clone()
            .and_then(QuestionText::try_new)
            .ok_or_else(|| malformed("missing text"))?;
        let created_at = record
            .created_at
            .map(Timestamp::from_millis)
            .ok_or_else(|| malformed("missing createdAt"))?;

        let question = Question::new(QuestionId::new(record.id), asker, text, created_at);
        Ok(match record.creator_id {
            Some(creator) if !creator.is_empty() => question.with_creator(UserId::new(creator)),
            _ => question,
        })
    }
}

impl From<&Question> for QuestionRecord {
    fn from(question: &Question) -> Self {
        Self {
            id: question.id().as_str().to_string(),
            name: Some(question.asker().as_str().to_string()),
            text: Some(question.text().as_str().to_string()),
            created_at: Some(question.created_at().as_millis()),
            creator_id: question.creator_id().map(|c| c.as_str().to_string()),
        }
    }
}

/// Validated form input for a new question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    asker: AskerIdentity,
    text: QuestionText,
}

impl QuestionDraft {
    /// Returns `None` if either field is empty; empty submissions are
    /// ignored rather than reported.
    pub fn new(asker: &str, text: &str) -> Option<Self> {
        Some(Self {
            asker: AskerIdentity::try_new(asker)?,
            text: QuestionText::try_new(text)?,
        })
    }

    pub fn asker(&self) -> &AskerIdentity {
        &self.asker
    }

    pub fn text(&self) -> &QuestionText {
        &self.text
    }

    /// Stamp the draft with its id, creation time and (optionally) creator.
    pub fn into_question(self, id: QuestionId, now: Timestamp, creator: Option<UserId>) -> Question {
        let question = Question::new(id, self.asker, self.text, now);
        match creator {
            Some(creator) => question.with_creator(creator),
            None => question,
        }
    }
}

/// A single write against the question collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// Insert a new record
    Create(Question),
    /// Replace the text of an existing record
    Update { id: QuestionId, text: QuestionText },
    /// Remove a record
    Delete { id: QuestionId },
}

impl Mutation {
    pub fn create(
        draft: QuestionDraft,
        id: QuestionId,
        now: Timestamp,
        creator: Option<UserId>,
    ) -> Self {
        Mutation::Create(draft.into_question(id, now, creator))
    }

    /// Returns `None` for empty text.
    pub fn update(id: QuestionId, text: &str) -> Option<Self> {
        Some(Mutation::Update {
            id,
            text: QuestionText::try_new(text)?,
        })
    }

    pub fn delete(id: QuestionId) -> Self {
        Mutation::Delete { id }
    }

    /// Key of the record this mutation touches
    pub fn target(&self) -> &QuestionId {
        match self {
            Mutation::Create(question) => question.id(),
            Mutation::Update { id, .. } | Mutation::Delete { id } => id,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Mutation::Create(_) => "create",
            Mutation::Update { .. } => "update",
            Mutation::Delete { .. } => "delete",
        }
    }
}

/// A batch of mutations applied atomically on behalf of `actor`.
///
/// The actor is the whole signed-in [`User`] so that stores which enforce
/// ownership remotely can act as that user, not just compare ids.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub actor: Option<User>,
    pub mutations: Vec<Mutation>,
}

impl Transaction {
    pub fn new(actor: Option<User>) -> Self {
        Self {
            actor,
            mutations: Vec::new(),
        }
    }

    pub fn single(actor: Option<User>, mutation: Mutation) -> Self {
        Self {
            actor,
            mutations: vec![mutation],
        }
    }

    pub fn actor_id(&self) -> Option<&UserId> {
        self.actor.as_ref().map(|user| &user.id)
    }

    pub fn push(mut self, mutation: Mutation) -> Self {
        self.mutations.push(mutation);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> QuestionRecord {
        QuestionRecord {
            id: "q1".to_string(),
            name: Some("alice".to_string()),
            text: Some("Why Rust?".to_string()),
            created_at: Some(1_000),
            creator_id: None,
        }
    }

    #[test]
    fn test_record_to_question() {
        let question = Question::try_from(record()).unwrap();
        assert_eq!(question.id().as_str(), "q1");
        assert_eq!(question.asker().as_str(), "alice");
        assert!(question.creator_id().is_none());
    }

    #[test]
    fn test_record_with_creator() {
        let mut r = record();
        r.creator_id = Some("u1".to_string());
        let question = Question::try_from(r).unwrap();
        assert_eq!(question.creator_id().map(|c| c.as_str()), Some("u1"));
    }

    #[test]
    fn test_record_missing_name_is_malformed() {
        let mut r = record();
        r.name = None;
        let err = Question::try_from(r).unwrap_err();
        assert_eq!(
            err,
            DomainError::MalformedRecord {
                id: "q1".to_string(),
                reason: "missing name".to_string()
            }
        );
    }

    #[test]
    fn test_record_blank_text_is_malformed() {
        let mut r = record();
        r.text = Some("  ".to_string());
        assert!(Question::try_from(r).is_err());
    }

    #[test]
    fn test_record_deserializes_camel_case() {
        let json = r#"{"id":"q9","name":"bob","text":"hi?","createdAt":5,"creatorId":"u2"}"#;
        let r: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.created_at, Some(5));
        assert_eq!(r.creator_id.as_deref(), Some("u2"));

        let sparse: QuestionRecord = serde_json::from_str(r#"{"id":"q10"}"#).unwrap();
        assert!(sparse.name.is_none());
    }

    #[test]
    fn test_created_at_accepts_float_millis() {
        let json = r#"{"id":"q1","name":"alice","text":"hi?","createdAt":1.7e12}"#;
        let r: QuestionRecord = serde_json::from_str(json).unwrap();
        assert_eq!(r.created_at, Some(1_700_000_000_000));
        let question = Question::try_from(r).unwrap();
        assert_eq!(question.created_at().as_millis(), 1_700_000_000_000);

        let fractional: QuestionRecord =
            serde_json::from_str(r#"{"id":"q2","createdAt":1700000000000.75}"#).unwrap();
        assert_eq!(fractional.created_at, Some(1_700_000_000_000));

        let null: QuestionRecord = serde_json::from_str(r#"{"id":"q3","createdAt":null}"#).unwrap();
        assert!(null.created_at.is_none());
    }

    #[test]
    fn test_created_at_rejects_non_numbers() {
        let result = serde_json::from_str::<QuestionRecord>(r#"{"id":"q1","createdAt":"yesterday"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_draft_rejects_empty_fields() {
        assert!(QuestionDraft::new("", "text").is_none());
        assert!(QuestionDraft::new("alice", "").is_none());
        assert!(QuestionDraft::new("alice", "   ").is_none());
        assert!(QuestionDraft::new("alice", "text").is_some());
    }

    #[test]
    fn test_create_mutation_stamps_fields() {
        let draft = QuestionDraft::new("alice", "How?").unwrap();
        let mutation = Mutation::create(
            draft,
            QuestionId::new("new-id"),
            Timestamp::from_millis(42),
            Some(UserId::new("u1")),
        );
        match &mutation {
            Mutation::Create(q) => {
                assert_eq!(q.id().as_str(), "new-id");
                assert_eq!(q.created_at().as_millis(), 42);
                assert_eq!(q.creator_id().map(|c| c.as_str()), Some("u1"));
            }
            other => panic!("expected create, got {:?}", other),
        }
        assert_eq!(mutation.target().as_str(), "new-id");
        assert_eq!(mutation.kind(), "create");
    }

    #[test]
    fn test_update_requires_text() {
        assert!(Mutation::update(QuestionId::new("q1"), "").is_none());
        let m = Mutation::update(QuestionId::new("q1"), "new text").unwrap();
        assert_eq!(m.kind(), "update");
    }

    #[test]
    fn test_question_record_roundtrip_shape() {
        let question = Question::try_from(record()).unwrap();
        assert_eq!(QuestionRecord::from(&question), record());
    }
}
