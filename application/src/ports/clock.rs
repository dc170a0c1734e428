//! Clock port
//!
//! Creation timestamps are assigned by the submitting client at the moment
//! of submission.

use askboard_domain::Timestamp;

/// Source of the current time
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// Clock that always returns the same instant (tests, replays)
pub struct FixedClock(pub Timestamp);

impl Clock for FixedClock {
    fn now(&self) -> Timestamp {
        self.0
    }
}
