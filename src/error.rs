use core::fmt;

/// Possible errors from the DHT driver.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Debug, PartialEq, Eq)]
pub enum DhtError<E> {
    /// Timed out waiting for the pin to leave its level.
    ///
    /// Carries the index of the transition that never ended (0 is the lead-in,
    /// 1 and 2 the sensor response, `3 + 2 * bit` and `4 + 2 * bit` the data bits).
    Timeout(usize),
    /// Checksum did not match the received data.
    ChecksumMismatch,
    /// Error from the GPIO pin (input/output).
    PinError(E),
}

impl<E> From<E> for DhtError<E> {
    fn from(value: E) -> Self {
        Self::PinError(value)
    }
}

impl<E: fmt::Debug> fmt::Display for DhtError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout(index) => write!(f, "timed out at transition {index}"),
            Self::ChecksumMismatch => f.write_str("checksum mismatch"),
            Self::PinError(e) => write!(f, "pin error: {e:?}"),
        }
    }
}

impl<E: fmt::Debug> core::error::Error for DhtError<E> {}

/// Failure to raise the scheduling priority.
///
/// Never fatal: the read goes ahead with a higher risk of timing jitter.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriorityError {
    /// The process lacks the privilege (e.g. `CAP_SYS_NICE`).
    PermissionDenied,
    /// The platform has no real-time scheduling class.
    Unsupported,
    /// Any other OS error code.
    Os(i32),
}

impl fmt::Display for PriorityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PermissionDenied => f.write_str("permission denied"),
            Self::Unsupported => f.write_str("real-time scheduling unsupported"),
            Self::Os(code) => write!(f, "os error {code}"),
        }
    }
}

impl core::error::Error for PriorityError {}
