//! Structured activity logging.
//!
//! Provides [`JsonlActivityLogger`], the JSONL implementation of the
//! [`ActivityLogger`](askboard_application::ActivityLogger) port.

mod jsonl_logger;

pub use jsonl_logger::JsonlActivityLogger;
