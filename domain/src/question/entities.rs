//! Question entity

use super::value_objects::{AskerIdentity, QuestionId, QuestionText, Timestamp};
use crate::auth::value_objects::UserId;
use serde::{Deserialize, Serialize};

/// A single user-submitted question (Entity)
///
/// Serialized with the same field names the store uses:
/// `id`, `name`, `text`, `createdAt` and, on authenticated boards,
/// `creatorId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Question {
    id: QuestionId,
    #[serde(rename = "name")]
    asker: AskerIdentity,
    text: QuestionText,
    created_at: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    creator_id: Option<UserId>,
}

impl Question {
    pub fn new(
        id: QuestionId,
        asker: AskerIdentity,
        text: QuestionText,
        created_at: Timestamp,
    ) -> Self {
        Self {
            id,
            asker,
            text,
            created_at,
            creator_id: None,
        }
    }

    /// Attach the creating user (authenticated boards only).
    pub fn with_creator(mut self, creator_id: UserId) -> Self {
        self.creator_id = Some(creator_id);
        self
    }

    /// Return a copy with replaced text. The text is the only mutable field.
    pub fn with_text(mut self, text: QuestionText) -> Self {
        self.text = text;
        self
    }

    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    pub fn asker(&self) -> &AskerIdentity {
        &self.asker
    }

    pub fn text(&self) -> &QuestionText {
        &self.text
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn creator_id(&self) -> Option<&UserId> {
        self.creator_id.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Question {
        Question::new(
            QuestionId::new("q1"),
            AskerIdentity::try_new("alice").unwrap(),
            QuestionText::try_new("What is Rust?").unwrap(),
            Timestamp::from_millis(1_700_000_000_000),
        )
    }

    #[test]
    fn test_serializes_store_field_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["id"], "q1");
        assert_eq!(json["name"], "alice");
        assert_eq!(json["text"], "What is Rust?");
        assert_eq!(json["createdAt"], 1_700_000_000_000i64);
        assert!(json.get("creatorId").is_none());
    }

    #[test]
    fn test_creator_serialized_when_present() {
        let question = sample().with_creator(UserId::new("u1"));
        let json = serde_json::to_value(&question).unwrap();
        assert_eq!(json["creatorId"], "u1");
    }

    #[test]
    fn test_with_text_keeps_identity() {
        let original = sample();
        let edited = original
            .clone()
            .with_text(QuestionText::try_new("What is Cargo?").unwrap());
        assert_eq!(edited.id(), original.id());
        assert_eq!(edited.asker(), original.asker());
        assert_eq!(edited.created_at(), original.created_at());
        assert_eq!(edited.text().as_str(), "What is Cargo?");
    }
}
