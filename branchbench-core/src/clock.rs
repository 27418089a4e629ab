//! Wall-clock measurement of opaque actions.

use std::time::Instant;

/// Measures how long an action takes, in seconds.
///
/// Implementations must not keep state between measurements so that one
/// clock can time any number of trials.
pub trait Clock {
    /// Run `action` and return its elapsed time in seconds.
    ///
    /// A failing action is not timed; its error is returned unchanged.
    fn measure<E>(&self, action: impl FnOnce() -> Result<(), E>) -> Result<f64, E>;
}

/// Monotonic wall clock with millisecond resolution.
#[derive(Debug, Clone, Copy, Default)]
pub struct WallClock;

impl Clock for WallClock {
    fn measure<E>(&self, action: impl FnOnce() -> Result<(), E>) -> Result<f64, E> {
        let start = Instant::now();
        action()?;
        let elapsed = start.elapsed().as_secs_f64();
        Ok((elapsed * 1000.0).round() / 1000.0)
    }
}

/// A clock that reports the same duration for every action.
///
/// The action still runs; only the reported time is fixed. Useful for
/// driving the runner deterministically.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock {
    seconds: f64,
}

impl FixedClock {
    /// Create a clock that reports `seconds` for every measurement.
    ///
    /// # Panics
    /// Panics if `seconds` is negative or not finite.
    pub fn new(seconds: f64) -> Self {
        assert!(
            seconds.is_finite() && seconds >= 0.0,
            "fixed duration must be a non-negative finite number"
        );
        Self { seconds }
    }
}

impl Clock for FixedClock {
    fn measure<E>(&self, action: impl FnOnce() -> Result<(), E>) -> Result<f64, E> {
        action()?;
        Ok(self.seconds)
    }
}
