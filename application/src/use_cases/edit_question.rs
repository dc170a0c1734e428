//! Edit Question use case
//!
//! Replaces the text of a question the signed-in user created.

use super::context::BoardContext;
use super::shared::{ModifyQuestionError, authorize_modification, bounded};
use crate::config::BehaviorConfig;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::question_store::{QuestionStore, StoreError};
use askboard_domain::{DomainError, Mutation, Question, QuestionId, QuestionText, Transaction};
use std::sync::Arc;
use tracing::info;

/// Use case for changing a question's text
pub struct EditQuestionUseCase {
    store: Arc<dyn QuestionStore>,
    behavior: BehaviorConfig,
    activity: Arc<dyn ActivityLogger>,
}

impl EditQuestionUseCase {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            behavior: BehaviorConfig::default(),
            activity: Arc::new(NoActivityLogger),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub fn with_activity_logger(mut self, activity: Arc<dyn ActivityLogger>) -> Self {
        self.activity = activity;
        self
    }

    /// Returns the question as it reads after the edit.
    pub async fn execute(
        &self,
        ctx: &BoardContext,
        id: &QuestionId,
        new_text: &str,
    ) -> Result<Question, ModifyQuestionError> {
        let text = QuestionText::try_new(new_text).ok_or(DomainError::EmptyText)?;
        let (question, user) =
            authorize_modification(self.store.as_ref(), ctx, id, self.behavior.timeout).await?;

        let tx = Transaction::single(
            Some(user.clone()),
            Mutation::Update {
                id: id.clone(),
                text: text.clone(),
            },
        );
        bounded(self.behavior.timeout, self.store.transact(tx), || {
            StoreError::Timeout
        })
        .await?;

        info!(id = %id, "Question updated");
        self.activity.log(ActivityEvent::new(
            "question_updated",
            serde_json::json!({
                "id": id.as_str(),
                "text": text.as_str(),
                "userId": user.id.as_str(),
            }),
        ));

        Ok(question.with_text(text))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::use_cases::test_support::{MockStore, RecordingLogger, question, user};

    fn store() -> Arc<MockStore> {
        Arc::new(MockStore::with_questions(vec![
            question("q1", "alice@example.com", Some("u-alice")),
            question("q2", "bob@example.com", Some("u-bob")),
        ]))
    }

    fn alice() -> BoardContext {
        BoardContext::authenticated(Some(user("u-alice", "alice@example.com")))
    }

    #[tokio::test]
    async fn test_author_can_edit() {
        let store = store();
        let logger = Arc::new(RecordingLogger::default());
        let updated = EditQuestionUseCase::new(store.clone())
            .with_activity_logger(logger.clone())
            .execute(&alice(), &QuestionId::new("q1"), "  sharper wording ")
            .await
            .unwrap();

        assert_eq!(updated.text().as_str(), "sharper wording");
        assert_eq!(updated.asker().as_str(), "alice@example.com");
        let stored = store.questions.lock().unwrap();
        assert_eq!(stored[0].text().as_str(), "sharper wording");
        assert_eq!(logger.types(), vec!["question_updated"]);
    }

    #[tokio::test]
    async fn test_non_author_is_rejected() {
        let store = store();
        let err = EditQuestionUseCase::new(store.clone())
            .execute(&alice(), &QuestionId::new("q2"), "hijacked")
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            ModifyQuestionError::Domain(DomainError::NotOwner(_))
        ));
        assert_eq!(store.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let store = store();
        let err = EditQuestionUseCase::new(store.clone())
            .execute(&alice(), &QuestionId::new("q1"), "   ")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModifyQuestionError::Domain(DomainError::EmptyText)
        ));
        assert_eq!(store.transaction_count(), 0);
    }

    #[tokio::test]
    async fn test_open_board_cannot_edit() {
        let err = EditQuestionUseCase::new(store())
            .execute(&BoardContext::open(), &QuestionId::new("q1"), "x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModifyQuestionError::Domain(DomainError::UnsupportedInOpenBoard)
        ));
    }

    #[tokio::test]
    async fn test_signed_out_cannot_edit() {
        let err = EditQuestionUseCase::new(store())
            .execute(
                &BoardContext::authenticated(None),
                &QuestionId::new("q1"),
                "x",
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModifyQuestionError::Domain(DomainError::NotSignedIn)
        ));
    }

    #[tokio::test]
    async fn test_missing_question() {
        let err = EditQuestionUseCase::new(store())
            .execute(&alice(), &QuestionId::new("nope"), "x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModifyQuestionError::Store(StoreError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_question_without_creator_is_not_editable() {
        let store = Arc::new(MockStore::with_questions(vec![question(
            "legacy", "alice", None,
        )]));
        let err = EditQuestionUseCase::new(store)
            .execute(&alice(), &QuestionId::new("legacy"), "x")
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            ModifyQuestionError::Domain(DomainError::NotOwner(_))
        ));
    }
}
