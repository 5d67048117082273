//! Bounded retry policy for the approval search
//!
//! GitHub's issue search lags behind the review state shown in the pull
//! request UI, so a freshly approved pull request may not match yet. Only
//! that "not found yet" outcome is retried; transport failures are not.

use crate::error::{Error, Result};
use std::time::Duration;

/// Default number of search attempts
pub const DEFAULT_ATTEMPTS: u32 = 2;

/// Fixed-count retry with an optional fixed delay between attempts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    attempts: u32,
    delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            attempts: DEFAULT_ATTEMPTS,
            delay: Duration::ZERO,
        }
    }
}

impl RetryPolicy {
    /// Create a policy. At least one attempt is required.
    pub fn new(attempts: u32, delay: Duration) -> Result<Self> {
        if attempts == 0 {
            return Err(Error::Config(
                "retry policy needs at least one attempt".to_string(),
            ));
        }
        Ok(Self { attempts, delay })
    }

    /// Total attempts, including the first
    #[inline]
    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Pause between consecutive attempts
    #[inline]
    pub const fn delay(&self) -> Duration {
        self.delay
    }

    /// Sleep before attempt `next` (1-based). The first attempt never waits.
    pub(crate) async fn pause_before(&self, next: u32) {
        if next > 1 && !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
    }
}
