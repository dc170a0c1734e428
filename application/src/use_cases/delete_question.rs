//! Delete Question use case

use super::context::BoardContext;
use super::shared::{ModifyQuestionError, authorize_modification, bounded};
use crate::config::BehaviorConfig;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::question_store::{QuestionStore, StoreError};
use askboard_domain::{Mutation, Question, QuestionId, Transaction};
use std::sync::Arc;
use tracing::info;

/// Use case for removing a question the signed-in user created
pub struct DeleteQuestionUseCase {
    store: Arc<dyn QuestionStore>,
    behavior: BehaviorConfig,
    activity: Arc<dyn ActivityLogger>,
}

impl DeleteQuestionUseCase {
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

    /// Returns the removed question.
    pub async fn execute(
        &self,
        ctx: &BoardContext,
        id: &QuestionId,
    ) -> Result<Question, ModifyQuestionError> {
        let (question, user) =
            authorize_modification(self.store.as_ref(), ctx, id, self.behavior.timeout).await?;

        let tx = Transaction::single(Some(user.clone()), Mutation::delete(id.clone()));
        bounded(self.behavior.timeout, self.store.transact(tx), || {
            StoreError::Timeout
        })
        .await?;

        info!(id = %id, "Question deleted");
        self.activity.log(ActivityEvent::new(
            "question_deleted",
            serde_json::json!({
                "id": id.as_str(),
                "userId": user.id.as_str(),
            }),
        ));

        Ok(question)
    }
}
