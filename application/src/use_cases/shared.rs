//! Shared helpers for use cases.

use super::context::BoardContext;
use crate::ports::question_store::{QuestionStore, StoreError};
use askboard_domain::{DomainError, Question, QuestionId, User, can_modify};
use std::future::Future;
use std::time::Duration;
use thiserror::Error;

/// Errors from edit and delete
#[derive(Error, Debug)]
pub enum ModifyQuestionError {
    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error("Could not save change: {0}")]
    Store(#[from] StoreError),
}

/// Run `fut`, failing with `timed_out()` if it outlives `timeout`.
pub(crate) async fn bounded<T, E, F>(
    timeout: Option<Duration>,
    fut: F,
    timed_out: impl FnOnce() -> E,
) -> Result<T, E>
where
    F: Future<Output = Result<T, E>>,
{
    match timeout {
        Some(limit) => match tokio::time::timeout(limit, fut).await {
            Ok(result) => result,
            Err(_) => Err(timed_out()),
        },
        None => fut.await,
    }
}

/// Load `id` and check the acting user may change it.
///
/// Edit and delete exist only on authenticated boards, only for a signed-in
/// user, and only for that user's own questions.
pub(crate) async fn authorize_modification<'a>(
    store: &dyn QuestionStore,
    ctx: &'a BoardContext,
    id: &QuestionId,
    timeout: Option<Duration>,
) -> Result<(Question, &'a User), ModifyQuestionError> {
    if !ctx.variant.tracks_ownership() {
        return Err(DomainError::UnsupportedInOpenBoard.into());
    }
    let user = ctx.require_user()?;

    let question = bounded(timeout, store.find(id), || StoreError::Timeout)
        .await?
        .ok_or_else(|| StoreError::NotFound(id.clone()))?;

    if !can_modify(&question, Some(&user.id)) {
        return Err(DomainError::NotOwner(id.to_string()).into());
    }
    Ok((question, user))
}
