//! Classification of captured pulses into payload bits.

use crate::capture::{BITS, PulseTrain};
use crate::payload::RawPayload;

/// Default discrimination threshold in microseconds.
///
/// A `0` is a 26-28us high pulse, a `1` about 70us.
pub const DEFAULT_THRESHOLD_US: u32 = 40;

/// How the high phase of each bit is turned into a `0` or `1`.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Threshold {
    /// Datasheet timing: a high phase strictly longer than the given
    /// number of microseconds is a `1`.
    Fixed(u32),
    /// Relative timing: the mean of the 40 low phases preceding the data bits
    /// is the threshold, and a high phase at least that long is a `1`.
    ///
    /// Tolerates clocks that run consistently fast or slow.
    Adaptive,
}

impl Default for Threshold {
    fn default() -> Self {
        Threshold::Fixed(DEFAULT_THRESHOLD_US)
    }
}

impl Threshold {
    /// Decodes the 40 data bits of `train` into a payload.
    ///
    /// The checksum is not checked here.
    pub fn decode(&self, train: &PulseTrain) -> RawPayload {
        match *self {
            Threshold::Fixed(limit) => assemble(train, |high| high > limit),
            Threshold::Adaptive => {
                let limit = mean_low(train);
                trace!("adaptive threshold: {}us", limit);
                assemble(train, |high| high >= limit)
            }
        }
    }
}

/// Integer mean of the low phases preceding each data bit.
fn mean_low(train: &PulseTrain) -> u32 {
    let sum: u64 = train.bits().map(|(low, _)| u64::from(low)).sum();
    (sum / BITS as u64) as u32
}

/// Shifts bits MSB-first into a 16-bit accumulator, latching the humidity field
/// after bit 16, the temperature field after bit 32 and the checksum after bit 40.
fn assemble<F>(train: &PulseTrain, mut is_one: F) -> RawPayload
where
    F: FnMut(u32) -> bool,
{
    let mut acc: u16 = 0;
    let mut payload = RawPayload {
        humidity: 0,
        temperature: 0,
        checksum: 0,
    };

    for (i, (_, high)) in train.bits().enumerate() {
        acc = (acc << 1) | u16::from(is_one(high));
        match i + 1 {
            16 => {
                payload.humidity = acc;
                acc = 0;
            }
            32 => {
                payload.temperature = acc;
                acc = 0;
            }
            _ => {}
        }
    }
    payload.checksum = acc as u8;
    payload
}
