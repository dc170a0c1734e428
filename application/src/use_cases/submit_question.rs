//! Submit Question use case
//!
//! Validates the ask form and issues a single create transaction. On an
//! open board the asker is whatever name was typed; on an authenticated
//! board it is the signed-in user's email and the record carries the
//! user's id as its creator.

use super::context::BoardContext;
use super::shared::bounded;
use crate::config::BehaviorConfig;
use crate::ports::activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger};
use crate::ports::clock::Clock;
use crate::ports::question_store::{QuestionStore, StoreError};
use askboard_domain::{DomainError, Mutation, Question, QuestionDraft, Transaction};
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur while submitting a question
#[derive(Error, Debug)]
pub enum SubmitQuestionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Could not save question: {0}")]
    Store(#[from] StoreError),
}

impl SubmitQuestionError {
    /// Whether resubmitting the same input could succeed
    pub fn is_retryable(&self) -> bool {
        match self {
            SubmitQuestionError::Store(e) => e.is_retryable(),
            SubmitQuestionError::Domain(_) => false,
        }
    }
}

/// Input for the SubmitQuestion use case
#[derive(Debug, Clone, Default)]
pub struct SubmitQuestionInput {
    /// Typed name; ignored on authenticated boards
    pub asker: String,
    pub text: String,
}

impl SubmitQuestionInput {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            asker: String::new(),
            text: text.into(),
        }
    }

    pub fn with_asker(mut self, asker: impl Into<String>) -> Self {
        self.asker = asker.into();
        self
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// The question was written to the store
    Created(Question),
    /// A field was empty; nothing was written
    Ignored,
}

/// Use case for asking a new question
pub struct SubmitQuestionUseCase {
    store: Arc<dyn QuestionStore>,
    clock: Arc<dyn Clock>,
    behavior: BehaviorConfig,
    activity: Arc<dyn ActivityLogger>,
}

impl SubmitQuestionUseCase {
    pub fn new(store: Arc<dyn QuestionStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
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

    pub async fn execute(
        &self,
        ctx: &BoardContext,
        input: SubmitQuestionInput,
    ) -> Result<SubmitOutcome, SubmitQuestionError> {
        let actor = if ctx.variant.tracks_ownership() {
            Some(ctx.require_user()?.clone())
        } else {
            None
        };
        let asker = match &actor {
            Some(user) => user.email.to_string(),
            None => input.asker,
        };
        let creator = actor.as_ref().map(|user| user.id.clone());

        let Some(draft) = QuestionDraft::new(&asker, &input.text) else {
            debug!("Ignoring submission with an empty field");
            return Ok(SubmitOutcome::Ignored);
        };

        let id = self.store.generate_id();
        let question = draft.into_question(id, self.clock.now(), creator);
        let tx = Transaction::single(actor, Mutation::Create(question.clone()));

        bounded(
            self.behavior.timeout,
            self.store.transact(tx),
            || StoreError::Timeout,
        )
        .await?;

        info!(id = %question.id(), asker = %question.asker(), "Question created");
        self.activity.log(ActivityEvent::new(
            "question_created",
            serde_json::json!({
                "id": question.id().as_str(),
                "name": question.asker().as_str(),
                "text": question.text().as_str(),
                "createdAt": question.created_at().as_millis(),
                "creatorId": question.creator_id().map(|c| c.as_str()),
            }),
        ));

        Ok(SubmitOutcome::Created(question))
    }
}
