//! Question domain.
//!
//! - [`entities::Question`]: a submitted question
//! - [`value_objects`]: ids, asker identity, text and timestamps

pub mod entities;
pub mod value_objects;
