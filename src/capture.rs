//! Time-critical capture of the sensor's pulse train.
//!
//! After the wake sequence the host releases the line and the sensor answers with:
//!
//! ```text
//!  idx 0        1          2          3      4        3+2i   4+2i
//!  ‾‾‾‾‾‾‾‾|__________|‾‾‾‾‾‾‾‾‾‾|_______|‾‾‾‾‾‾‾|...|_______|‾‾‾‾‾‾|__ ...
//!  lead-in   ~80us low  ~80us high  ~50us   26-28us (0) or ~70us (1)
//! ```
//!
//! Every interval is busy-polled and timed with the microsecond clock. Even
//! indices are high levels, odd indices low levels.

use embedded_hal::digital::InputPin;

use crate::error::DhtError;
use crate::io::MicrosClock;

/// Number of payload bits.
pub const BITS: usize = 40;

/// Lead-in plus the two response pulses.
const PREAMBLE: usize = 3;

/// Total number of timed intervals in one transmission.
pub const TRANSITIONS: usize = PREAMBLE + 2 * BITS;

/// Measured duration of every interval of one transmission, in microseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PulseTrain {
    durations: [u32; TRANSITIONS],
}

impl PulseTrain {
    /// Wraps already-measured durations, indexed as described in the module docs.
    pub const fn from_durations(durations: [u32; TRANSITIONS]) -> Self {
        PulseTrain { durations }
    }

    /// All durations in transmission order.
    pub fn durations(&self) -> &[u32; TRANSITIONS] {
        &self.durations
    }

    /// Low phase preceding data bit `bit`.
    pub fn bit_low(&self, bit: usize) -> u32 {
        self.durations[PREAMBLE + 2 * bit]
    }

    /// High phase of data bit `bit`; its length carries the bit value.
    pub fn bit_high(&self, bit: usize) -> u32 {
        self.durations[PREAMBLE + 2 * bit + 1]
    }

    /// `(low, high)` durations for each data bit, most significant bit first.
    pub fn bits(&self) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..BITS).map(|bit| (self.bit_low(bit), self.bit_high(bit)))
    }
}

/// Level the line holds during interval `index`.
const fn is_high_interval(index: usize) -> bool {
    index % 2 == 0
}

/// Captures a full transmission.
///
/// Must be called right after the line is released; any delay here shortens the lead-in.
/// Each interval is timed from the edge that ended the previous one, so polling
/// overhead never goes missing between intervals.
pub fn capture<P, C, E>(
    pin: &mut P,
    clock: &mut C,
    timeout_us: u32,
) -> Result<PulseTrain, DhtError<E>>
where
    P: InputPin<Error = E>,
    C: MicrosClock,
{
    let mut durations = [0u32; TRANSITIONS];
    let mut edge = clock.now_micros();
    for (index, duration) in durations.iter_mut().enumerate() {
        let next = wait_for_edge(pin, clock, is_high_interval(index), edge, timeout_us, index)?;
        *duration = next.wrapping_sub(edge);
        edge = next;
    }
    Ok(PulseTrain { durations })
}

/// Busy-polls until the line leaves `high` and returns the time the change was seen.
///
/// The line is sampled before the clock is read, so a poll delayed past the bound
/// still accepts an edge it observes. The timeout fires only when a sample shows the
/// line still at `high` and the elapsed time since `since` exceeds `timeout_us`.
fn wait_for_edge<P, C, E>(
    pin: &mut P,
    clock: &mut C,
    high: bool,
    since: u32,
    timeout_us: u32,
    index: usize,
) -> Result<u32, DhtError<E>>
where
    P: InputPin<Error = E>,
    C: MicrosClock,
{
    loop {
        let changed = pin.is_high()? != high;
        let now = clock.now_micros();
        if changed {
            return Ok(now);
        }
        if now.wrapping_sub(since) > timeout_us {
            return Err(DhtError::Timeout(index));
        }
    }
}
