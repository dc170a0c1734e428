//! Wall-clock time source.

use askboard_application::Clock;
use askboard_domain::Timestamp;

/// Current UTC time in epoch milliseconds
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::from_millis(chrono::Utc::now().timestamp_millis())
    }
}
