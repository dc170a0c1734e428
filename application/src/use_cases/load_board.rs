//! Load Board use case
//!
//! One-shot read of the collection, shaped into a [`BoardView`] for the
//! acting viewer.

use super::context::BoardContext;
use super::shared::bounded;
use crate::config::BehaviorConfig;
use crate::ports::question_store::{QuestionStore, StoreError};
use askboard_domain::BoardView;
use std::sync::Arc;
use tracing::debug;

/// Use case for reading the current board
pub struct LoadBoardUseCase {
    store: Arc<dyn QuestionStore>,
    behavior: BehaviorConfig,
}

impl LoadBoardUseCase {
    pub fn new(store: Arc<dyn QuestionStore>) -> Self {
        Self {
            store,
            behavior: BehaviorConfig::default(),
        }
    }

    pub fn with_behavior(mut self, behavior: BehaviorConfig) -> Self {
        self.behavior = behavior;
        self
    }

    pub async fn execute(&self, ctx: &BoardContext) -> Result<BoardView, StoreError> {
        let questions =
            bounded(self.behavior.timeout, self.store.query(), || StoreError::Timeout).await?;
        debug!(count = questions.len(), "Loaded questions");
        Ok(BoardView::build(questions, ctx.viewer()))
    }
}
