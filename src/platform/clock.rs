use std::cell::Cell;
use std::time::Instant;

/// Monotonic millisecond clock.
pub trait Clock {
    fn now_millis(&self) -> u64;
}

/// Wall clock measured from process start.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    #[must_use]
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now_millis(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_millis()).unwrap_or(u64::MAX)
    }
}

/// Manually advanced clock for deterministic tests.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u64>,
}

impl ManualClock {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(&self, millis: u64) {
        self.now.set(self.now.get() + millis);
    }

    pub fn set(&self, millis: u64) {
        self.now.set(millis);
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> u64 {
        self.now.get()
    }
}

/// At-most-one-call-per-interval rate limiter.
///
/// Dropped calls are not queued; pointer-move handlers tolerate losing
/// intermediate samples but must never buffer them.
#[derive(Debug, Clone, Copy)]
pub struct Throttle {
    min_interval_millis: u64,
    last_call: Option<u64>,
}

impl Throttle {
    #[must_use]
    pub const fn new(min_interval_millis: u64) -> Self {
        Self {
            min_interval_millis,
            last_call: None,
        }
    }

    /// Returns whether the call at `now_millis` may proceed, recording it if
    /// so.
    pub fn allow(&mut self, now_millis: u64) -> bool {
        if let Some(last) = self.last_call {
            if now_millis.saturating_sub(last) < self.min_interval_millis {
                return false;
            }
        }

        self.last_call = Some(now_millis);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::{Clock, ManualClock, Throttle};

    #[test]
    fn throttle_drops_calls_within_interval() {
        let clock = ManualClock::new();
        let mut throttle = Throttle::new(10);

        assert!(throttle.allow(clock.now_millis()));
        clock.advance(5);
        assert!(!throttle.allow(clock.now_millis()));
        clock.advance(5);
        assert!(throttle.allow(clock.now_millis()));
    }

    #[test]
    fn first_call_always_passes() {
        let mut throttle = Throttle::new(1000);
        assert!(throttle.allow(0));
    }
}
