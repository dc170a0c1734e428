//! Board domain.
//!
//! - [`variant::BoardVariant`]: open or authenticated board
//! - [`ownership::can_modify`]: who may edit or delete a question
//! - [`view::BoardView`]: questions, leaderboard and total for one viewer

pub mod ownership;
pub mod variant;
pub mod view;
