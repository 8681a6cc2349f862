//! Spacing between sampling periods

use std::time::Duration;

/// Blocks between one sampling period and the next
pub trait Pacer {
    fn wait(&mut self);
}

/// Sleeps the calling thread for a fixed period
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SleepPacer {
    period: Duration,
}

impl SleepPacer {
    /// Reference sampling period
    pub const DEFAULT_PERIOD: Duration = Duration::from_millis(2000);

    pub fn new(period: Duration) -> Self {
        Self { period }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn period(&self) -> Duration {
        self.period
    }
}

impl Default for SleepPacer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_PERIOD)
    }
}

impl Pacer for SleepPacer {
    fn wait(&mut self) {
        std::thread::sleep(self.period);
    }
}

/// Returns immediately; for replays and tests
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoPacer;

impl Pacer for NoPacer {
    #[inline]
    fn wait(&mut self) {}
}
