//! Platform doubles for exercising failure paths.

use std::sync::atomic::{AtomicUsize, Ordering};

use crate::error::CredentialError;
use crate::platform::OsRandom;
use crate::traits::clock::Clock;
use crate::traits::random::SecureRandom;

/// 2024-06-01T12:00:00Z
pub const FIXED_NOW_SECS: u64 = 1_717_243_200;

pub struct FixedClock(pub u64);

impl Clock for FixedClock {
    fn now_secs(&self) -> Result<u64, CredentialError> {
        Ok(self.0)
    }
}

pub struct BrokenClock;

impl Clock for BrokenClock {
    fn now_secs(&self) -> Result<u64, CredentialError> {
        Err(CredentialError::Platform("clock unavailable".to_string()))
    }
}

/// Entropy source that is exhausted from the start.
pub struct FailingRandom;

impl SecureRandom for FailingRandom {
    fn fill_bytes(&self, _dest: &mut [u8]) -> Result<(), CredentialError> {
        Err(CredentialError::Platform("entropy source exhausted".to_string()))
    }
}

/// Serves `remaining` successful requests from the OS, then fails.
pub struct ExhaustingRandom {
    remaining: AtomicUsize,
}

impl ExhaustingRandom {
    pub fn new(successes: usize) -> Self {
        Self {
            remaining: AtomicUsize::new(successes),
        }
    }
}

impl SecureRandom for ExhaustingRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        let left = self.remaining.load(Ordering::SeqCst);
        if left == 0 {
            return Err(CredentialError::Platform("entropy source exhausted".to_string()));
        }
        self.remaining.store(left - 1, Ordering::SeqCst);
        OsRandom::new().fill_bytes(dest)
    }
}

/// Always returns the same bytes. Only for checking that output is copied through.
pub struct ConstantRandom(pub u8);

impl SecureRandom for ConstantRandom {
    fn fill_bytes(&self, dest: &mut [u8]) -> Result<(), CredentialError> {
        dest.fill(self.0);
        Ok(())
    }
}
