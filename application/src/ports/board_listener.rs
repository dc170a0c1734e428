//! Board listener port
//!
//! Receives every state a live board passes through. Implementations live
//! in the presentation layer.

use askboard_domain::BoardView;

/// Callback for live board updates
pub trait BoardListener: Send + Sync {
    /// The store is fetching data
    fn on_loading(&self);

    /// A fresh board is available
    fn on_board(&self, board: &BoardView);

    /// The data subscription failed
    fn on_error(&self, message: &str);
}

/// No-op listener
pub struct NoBoardListener;

impl BoardListener for NoBoardListener {
    fn on_loading(&self) {}
    fn on_board(&self, _board: &BoardView) {}
    fn on_error(&self, _message: &str) {}
}
