//! Monotonic time source
//!
//! Delays go through [`embedded_hal::delay::DelayNs`]; this module only adds
//! the "what time is it" half needed to pace minimum dwell times.

/// A point on the monotonic timeline, microsecond resolution
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Instant {
    micros: u64,
}

impl Instant {
    /// Create an instant from microseconds since an arbitrary epoch
    pub const fn from_micros(micros: u64) -> Self {
        Self { micros }
    }

    /// Create an instant from milliseconds since an arbitrary epoch
    pub const fn from_millis(millis: u64) -> Self {
        Self {
            micros: millis.saturating_mul(1_000),
        }
    }

    /// Microseconds since the epoch
    pub const fn as_micros(&self) -> u64 {
        self.micros
    }

    /// This instant shifted forward by `millis`
    pub const fn add_millis(&self, millis: u32) -> Self {
        Self {
            micros: self.micros.saturating_add(millis as u64 * 1_000),
        }
    }

    /// Microseconds from `earlier` to `self`, zero if `earlier` is later
    pub const fn micros_since(&self, earlier: Instant) -> u64 {
        self.micros.saturating_sub(earlier.micros)
    }
}

/// Monotonic clock
pub trait Clock {
    /// Current time
    ///
    /// Must never go backwards.
    fn now(&mut self) -> Instant;
}

#[cfg(any(test, feature = "std"))]
mod std_impl {
    use super::{Clock, Instant};
    use embedded_hal::delay::DelayNs;

    /// [`Clock`] backed by `std::time::Instant`
    #[derive(Debug, Clone, Copy)]
    pub struct StdClock {
        epoch: std::time::Instant,
    }

    impl StdClock {
        /// Create a clock whose epoch is now
        pub fn new() -> Self {
            Self {
                epoch: std::time::Instant::now(),
            }
        }
    }

    impl Default for StdClock {
        fn default() -> Self {
            Self::new()
        }
    }

    impl Clock for StdClock {
        fn now(&mut self) -> Instant {
            let elapsed = self.epoch.elapsed().as_micros();
            Instant::from_micros(u64::try_from(elapsed).unwrap_or(u64::MAX))
        }
    }

    /// [`DelayNs`] backed by `std::thread::sleep`
    #[derive(Debug, Clone, Copy, Default)]
    pub struct StdDelay;

    impl DelayNs for StdDelay {
        fn delay_ns(&mut self, ns: u32) {
            std::thread::sleep(std::time::Duration::from_nanos(ns.into()));
        }
    }
}

#[cfg(any(test, feature = "std"))]
pub use std_impl::{StdClock, StdDelay};
