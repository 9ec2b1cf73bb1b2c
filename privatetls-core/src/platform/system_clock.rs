use std::time::SystemTime;

use crate::error::CredentialError;
use crate::traits::clock::Clock;

/// Clock backed by std::time::SystemTime.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_secs(&self) -> Result<u64, CredentialError> {
        SystemTime::now()
            .duration_since(SystemTime::UNIX_EPOCH)
            .map(|d| d.as_secs())
            .map_err(|e| CredentialError::Platform(format!("SystemTime error: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_now_utc_has_no_subsecond_part() {
        let now = SystemClock::new().now_utc().unwrap();
        assert_eq!(now.nanosecond(), 0);
        assert!(now.year() >= 2024);
    }
}
