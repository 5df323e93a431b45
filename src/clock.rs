//! Time source for cooldowns and grace periods

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Millisecond clock the classifier reads all of its timers from
pub trait Clock: Send + Sync {
    fn now_ms(&self) -> u64;

    /// Block the calling worker for `duration`
    fn sleep(&self, duration: Duration);
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_ms(&self) -> u64 {
        now_ms()
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Hand-driven clock; `sleep` advances time instead of blocking
#[derive(Debug, Default)]
pub struct ManualClock {
    now: AtomicU64,
}

impl ManualClock {
    pub fn new(start_ms: u64) -> Self {
        Self {
            now: AtomicU64::new(start_ms),
        }
    }

    pub fn advance(&self, ms: u64) {
        self.now.fetch_add(ms, Ordering::SeqCst);
    }

    pub fn set(&self, ms: u64) {
        self.now.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.now.load(Ordering::SeqCst)
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration.as_millis().try_into().unwrap_or(u64::MAX));
    }
}

/// Milliseconds since the Unix epoch
pub fn now_ms() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// True once strictly more than `cooldown_ms` has passed since `since_ms`
pub fn elapsed_beyond(now_ms: u64, since_ms: u64, cooldown_ms: u64) -> bool {
    now_ms.saturating_sub(since_ms) > cooldown_ms
}
