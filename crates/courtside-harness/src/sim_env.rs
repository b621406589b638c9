//! Virtual clock for deterministic tests.

use std::sync::{
    Arc,
    atomic::{AtomicU64, Ordering},
};
use std::time::Duration;

use courtside_core::Environment;

/// Virtual instant: milliseconds since simulation start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SimInstant(u64);

impl SimInstant {
    /// Instant at the given millisecond offset.
    pub fn from_millis(millis: u64) -> Self {
        Self(millis)
    }
}

impl std::ops::Sub for SimInstant {
    type Output = Duration;

    fn sub(self, rhs: Self) -> Duration {
        Duration::from_millis(self.0.saturating_sub(rhs.0))
    }
}

/// Manually advanced monotonic clock.
///
/// `sleep` completes immediately: simulated time only moves when a test
/// calls [`SimEnv::advance`], which keeps every timing decision explicit.
#[derive(Debug, Clone, Default)]
pub struct SimEnv {
    now_millis: Arc<AtomicU64>,
}

impl SimEnv {
    /// Clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance the clock.
    pub fn advance(&self, duration: Duration) {
        let millis = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        self.now_millis.fetch_add(millis, Ordering::SeqCst);
    }
}

impl Environment for SimEnv {
    type Instant = SimInstant;

    fn now(&self) -> SimInstant {
        SimInstant(self.now_millis.load(Ordering::SeqCst))
    }

    fn sleep(&self, _duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        std::future::ready(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_is_monotonic_under_advances() {
        let env = SimEnv::new();
        let start = env.now();
        env.advance(Duration::from_millis(800));
        let later = env.now();

        assert!(later > start);
        assert_eq!(later - start, Duration::from_millis(800));
    }
}
