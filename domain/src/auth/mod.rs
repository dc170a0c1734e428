//! Authentication domain (authenticated boards only).
//!
//! - [`value_objects`]: [`UserId`](value_objects::UserId),
//!   [`Email`](value_objects::Email), [`User`](value_objects::User)
//! - [`flow::AuthFlow`]: the magic-code sign-in state machine

pub mod flow;
pub mod value_objects;
