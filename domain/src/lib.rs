//! Domain layer for askboard
//!
//! This crate contains the entities, value objects and pure functions of the
//! question board. It has no dependencies on infrastructure or presentation
//! concerns and performs no I/O.
//!
//! # Core Concepts
//!
//! ## Questions and the record contract
//!
//! A [`Question`] is created from a validated [`QuestionDraft`]; every write
//! the board issues is one of the three [`Mutation`]s, batched into a
//! [`Transaction`]. Records read back from a store arrive as
//! [`QuestionRecord`]s and are only accepted when well-formed.
//!
//! ## Leaderboard
//!
//! [`aggregate_leaderboard`] counts questions per asker and ranks the askers,
//! highest count first, ties in first-seen order.
//!
//! ## Open / Authenticated boards
//!
//! - **Open** (default): free-text names, create only
//! - **Authenticated**: magic-code sign-in ([`AuthFlow`]); authors may edit
//!   and delete their own questions ([`can_modify`])

pub mod auth;
pub mod board;
pub mod config;
pub mod core;
pub mod leaderboard;
pub mod question;
pub mod record;

// Re-export commonly used types
pub use auth::{
    flow::{AuthFlow, AuthState},
    value_objects::{Email, User, UserId},
};
pub use board::{
    ownership::can_modify,
    variant::BoardVariant,
    view::{BoardView, QuestionRow},
};
pub use config::OutputFormat;
pub use core::error::DomainError;
pub use leaderboard::{LeaderboardEntry, aggregate_leaderboard, question_count_label};
pub use question::{
    entities::Question,
    value_objects::{AskerIdentity, QuestionId, QuestionText, Timestamp},
};
pub use record::{Mutation, QuestionDraft, QuestionRecord, Transaction};
