use crate::threshold::Threshold;

/// Shortest low pulse the sensor recognises as a read request, in milliseconds.
pub const MIN_WAKE_LOW_MS: u32 = 18;

/// Maximum time to wait (in microseconds) for the pin to change state.
///
/// The longest legal interval is the sensor's 80us response pulse.
pub const TIMEOUT_US: u32 = 100;

/// Driver configuration.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Config {
    /// Bit classification strategy.
    pub threshold: Threshold,
    /// Longest any single interval may last before the read is aborted.
    pub timeout_us: u32,
    /// How long the line is held high before the request pulse. Zero drives it low directly.
    pub wake_high_ms: u32,
    /// Length of the request pulse. Values below [`MIN_WAKE_LOW_MS`] are raised to it.
    pub wake_low_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            threshold: Threshold::default(),
            timeout_us: TIMEOUT_US,
            wake_high_ms: 0,
            wake_low_ms: 20,
        }
    }
}

impl Config {
    /// Selects the bit classification strategy.
    pub const fn with_threshold(mut self, threshold: Threshold) -> Self {
        self.threshold = threshold;
        self
    }

    /// Sets the longest interval, in microseconds, before a read times out.
    pub const fn with_timeout_us(mut self, timeout_us: u32) -> Self {
        self.timeout_us = timeout_us;
        self
    }

    /// Sets how long the line is held high before the request pulse.
    pub const fn with_wake_high_ms(mut self, wake_high_ms: u32) -> Self {
        self.wake_high_ms = wake_high_ms;
        self
    }

    /// Sets the request pulse length; clamped to [`MIN_WAKE_LOW_MS`] when driven.
    pub const fn with_wake_low_ms(mut self, wake_low_ms: u32) -> Self {
        self.wake_low_ms = wake_low_ms;
        self
    }

    /// The request pulse length actually driven on the line.
    pub const fn effective_wake_low_ms(&self) -> u32 {
        if self.wake_low_ms < MIN_WAKE_LOW_MS {
            MIN_WAKE_LOW_MS
        } else {
            self.wake_low_ms
        }
    }
}

/// Retry schedule for [`Dht::read_with_retry`](crate::Dht::read_with_retry).
///
/// The sensor needs about two seconds between conversions, so a failed read is
/// not retried immediately.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of reads, including the first.
    pub attempts: u8,
    /// Pause after a failed read, in milliseconds.
    pub backoff_ms: u32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        RetryPolicy {
            attempts: 10,
            backoff_ms: 2000,
        }
    }
}
