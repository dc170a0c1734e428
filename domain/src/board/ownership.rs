//! Ownership rule for edit/delete affordances.

use crate::auth::value_objects::UserId;
use crate::question::entities::Question;

/// A viewer may modify a question only if the question records a creator
/// and that creator is the viewer.
pub fn can_modify(question: &Question, viewer: Option<&UserId>) -> bool {
    match (question.creator_id(), viewer) {
        (Some(creator), Some(viewer)) => creator == viewer,
        _ => false,
    }
}
