//! Application layer for askboard
//!
//! This crate contains use cases, port definitions, and application configuration.
//! It depends only on the domain layer.

pub mod config;
pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use config::BehaviorConfig;
pub use ports::{
    activity_logger::{ActivityEvent, ActivityLogger, NoActivityLogger},
    auth_gateway::{AuthError, AuthGateway},
    board_listener::{BoardListener, NoBoardListener},
    clock::{Clock, FixedClock},
    question_store::{QueryEvent, QuestionStore, StoreError, Subscription},
    session_store::{NoSessionStore, SessionError, SessionStore},
};
pub use use_cases::context::BoardContext;
pub use use_cases::delete_question::DeleteQuestionUseCase;
pub use use_cases::edit_question::EditQuestionUseCase;
pub use use_cases::load_board::LoadBoardUseCase;
pub use use_cases::shared::ModifyQuestionError;
pub use use_cases::sign_in::{SignInError, SignInUseCase};
pub use use_cases::submit_question::{
    SubmitOutcome, SubmitQuestionError, SubmitQuestionInput, SubmitQuestionUseCase,
};
pub use use_cases::watch_board::WatchBoardUseCase;
