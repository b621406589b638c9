//! Environment abstraction for deterministic testing.
//!
//! Decouples client logic from the system clock. Typing windows, reconnect
//! backoff, and request timeouts all measure time through this trait, which
//! lets the simulation harness drive them with a virtual clock while
//! production uses real system time.

use std::time::Duration;

/// Abstract environment providing time and async sleep.
///
/// # Invariants
///
/// Implementations MUST guarantee that `now()` never goes backwards within a
/// single execution context.
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use virtual time.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait, and it should only be
    /// used by driver code (not by the pure state machines).
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}
