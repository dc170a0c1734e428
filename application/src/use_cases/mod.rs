//! Use cases
//!
//! Application-level operations that orchestrate domain logic.

pub mod context;
pub mod delete_question;
pub mod edit_question;
pub mod load_board;
pub(crate) mod shared;
pub mod sign_in;
pub mod submit_question;
pub mod watch_board;

#[cfg(test)]
pub(crate) mod test_support;

pub use shared::ModifyQuestionError;
