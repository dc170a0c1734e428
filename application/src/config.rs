//! Application-level configuration.
//!
//! Controls how use cases talk to their collaborators.

use std::time::Duration;

/// Application behavior configuration.
///
/// `timeout` bounds every call a use case makes to the store or the auth
/// collaborator. `None` waits as long as the collaborator does.
#[derive(Debug, Clone, Default)]
pub struct BehaviorConfig {
    pub timeout: Option<Duration>,
}

impl BehaviorConfig {
    /// Creates a BehaviorConfig with a timeout specified in seconds.
    pub fn with_timeout_seconds(seconds: u64) -> Self {
        Self {
            timeout: Some(Duration::from_secs(seconds)),
        }
    }

    /// Creates a BehaviorConfig from an optional timeout in seconds.
    pub fn from_timeout_seconds(seconds: Option<u64>) -> Self {
        Self {
            timeout: seconds.map(Duration::from_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_has_no_timeout() {
        assert!(BehaviorConfig::default().timeout.is_none());
    }

    #[test]
    fn test_from_timeout_seconds() {
        assert_eq!(
            BehaviorConfig::from_timeout_seconds(Some(5)).timeout,
            Some(Duration::from_secs(5))
        );
        assert!(BehaviorConfig::from_timeout_seconds(None).timeout.is_none());
    }
}
