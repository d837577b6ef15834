//! Hardware capabilities the driver needs beyond `embedded-hal`.
//!
//! `embedded-hal` 1.0 covers reading and driving a pin ([`InputPin`], [`OutputPin`])
//! and blocking delays ([`DelayNs`](embedded_hal::delay::DelayNs)), but it has no trait
//! for switching a pin between input and output, nor a free-running clock.
//! The single-wire protocol needs both.

use embedded_hal::digital::{InputPin, OutputPin};

/// Direction of the data pin.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PinMode {
    /// High impedance; the pull-up and the sensor drive the line.
    Input,
    /// Push-pull; the host drives the line.
    Output,
}

/// A GPIO pin that can be reconfigured between input and output at runtime.
pub trait IoPin: InputPin + OutputPin {
    /// Switches the pin direction.
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error>;
}

impl<T: IoPin + ?Sized> IoPin for &mut T {
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        T::set_mode(self, mode)
    }
}

/// Monotonic microsecond clock.
///
/// The counter may wrap; callers compute elapsed time with `wrapping_sub`.
pub trait MicrosClock {
    /// Returns the current time in microseconds.
    fn now_micros(&mut self) -> u32;
}

impl<T: MicrosClock + ?Sized> MicrosClock for &mut T {
    fn now_micros(&mut self) -> u32 {
        T::now_micros(self)
    }
}
