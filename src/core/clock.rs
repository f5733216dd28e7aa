use chrono::Utc;
use std::sync::atomic::{AtomicI64, Ordering};

/// Source of Unix timestamps (seconds) for recipe and session stamping
pub trait Clock: Send + Sync {
    fn now(&self) -> i64;
}

/// Wall clock backed by `chrono::Utc`
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> i64 {
        Utc::now().timestamp()
    }
}

/// Deterministic clock that advances by one second on every reading
///
/// Test support only: lets repository and session tests assert exact
/// timestamps. Production wiring always uses [`SystemClock`].
#[doc(hidden)]
#[derive(Debug, Default)]
pub struct SteppingClock {
    current: AtomicI64,
}

impl SteppingClock {
    pub fn starting_at(start: i64) -> Self {
        Self {
            current: AtomicI64::new(start),
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> i64 {
        self.current.fetch_add(1, Ordering::SeqCst)
    }
}
