//! Interactive board
//!
//! A readline-based equivalent of the board page: ask questions, sign in
//! with a magic code, and edit or delete your own questions.

mod board_repl;
mod command;

pub use board_repl::{BoardRepl, BoardServices};
pub use command::{ReplCommand, prompt_for};
