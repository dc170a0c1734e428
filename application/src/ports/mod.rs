//! Port definitions (interfaces for external adapters)
//!
//! Ports define the contracts that infrastructure and presentation
//! adapters must implement.

pub mod activity_logger;
pub mod auth_gateway;
pub mod board_listener;
pub mod clock;
pub mod question_store;
pub mod session_store;
