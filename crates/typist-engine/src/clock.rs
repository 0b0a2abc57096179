//! Time sources for the sequencer.

use std::thread;
use std::time::{Duration, Instant};

use crate::cancel::CancelToken;

/// A source of time the sequencer can wait on.
pub trait Clock {
    /// Time elapsed since the clock was created.
    fn now(&self) -> Duration;

    /// Wait for `duration`, giving up early if `cancel` fires.
    ///
    /// Returns `false` if the wait was cancelled.
    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool;
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&self) -> Duration {
        (**self).now()
    }

    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        (**self).sleep(duration, cancel)
    }
}

/// Wall clock. Sleeps in short slices so a cancelled wait returns promptly.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
    slice: Duration,
}

impl SystemClock {
    /// Longest uninterrupted sleep between cancellation checks.
    pub const DEFAULT_SLICE: Duration = Duration::from_millis(10);

    pub fn new() -> Self {
        Self::with_slice(Self::DEFAULT_SLICE)
    }

    pub fn with_slice(slice: Duration) -> Self {
        Self {
            origin: Instant::now(),
            slice: slice.max(Duration::from_millis(1)),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.origin.elapsed()
    }

    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        let deadline = Instant::now() + duration;
        loop {
            if cancel.is_cancelled() {
                return false;
            }
            let now = Instant::now();
            if now >= deadline {
                return true;
            }
            thread::sleep((deadline - now).min(self.slice));
        }
    }
}

/// Virtual clock for tests: sleeping advances time instantly.
///
/// Every wait is recorded so tests can assert on pacing.
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
    now: Duration,
    waits: Vec<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every wait requested so far, in order.
    pub fn waits(&self) -> &[Duration] {
        &self.waits
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration, cancel: &CancelToken) -> bool {
        if cancel.is_cancelled() {
            return false;
        }
        self.waits.push(duration);
        self.now += duration;
        true
    }
}
