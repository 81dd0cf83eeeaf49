use std::time::Duration;

/// Milliseconds since the clock was created. Monotonic.
#[derive(Default, Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd)]
pub struct Instant(u64);

impl Instant {
    pub fn from_millis(ms: u64) -> Self {
        Self(ms)
    }

    pub fn to_millis(&self) -> u64 {
        self.0
    }

    pub fn saturating_add(self, duration: Duration) -> Self {
        let ms = u64::try_from(duration.as_millis()).unwrap_or(u64::MAX);
        Self(self.0.saturating_add(ms))
    }

    pub fn saturating_duration_since(self, earlier: Instant) -> Duration {
        Duration::from_millis(self.0.saturating_sub(earlier.0))
    }
}

pub trait Clock {
    fn now(&self) -> Instant;

    /// Blocks the caller. Nothing else runs meanwhile.
    fn delay(&self, duration: Duration);
}

pub struct StdClock {
    start: std::time::Instant,
}

impl Default for StdClock {
    fn default() -> Self {
        Self {
            start: std::time::Instant::now(),
        }
    }
}

impl Clock for StdClock {
    fn now(&self) -> Instant {
        let t = std::time::Instant::now().saturating_duration_since(self.start);
        Instant(u64::try_from(t.as_millis()).unwrap_or(u64::MAX))
    }

    fn delay(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}
