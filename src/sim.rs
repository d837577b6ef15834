//! Simulated data line and microsecond clock for tests.
//!
//! Time only advances when the clock is read (one microsecond per read), and the
//! line is sampled at the current time, so a scripted pulse of `n` microseconds is
//! measured as exactly `n`.

use std::cell::Cell;
use std::collections::VecDeque;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::digital::{ErrorType, InputPin, OutputPin};

use crate::capture::{PulseTrain, TRANSITIONS};
use crate::io::{IoPin, MicrosClock, PinMode};

pub const LEAD_IN_US: u32 = 30;
pub const RESPONSE_US: u32 = 80;
pub const BIT_LOW_US: u32 = 50;
pub const ZERO_US: u32 = 27;
pub const ONE_US: u32 = 70;

/// `(high, duration)` segments of a well-formed transmission of `bytes`.
pub fn transmission(bytes: [u8; 5]) -> Vec<(bool, u32)> {
    let mut segments = vec![
        (true, LEAD_IN_US),
        (false, RESPONSE_US),
        (true, RESPONSE_US),
    ];
    for byte in bytes {
        for i in 0..8 {
            let bit = (byte >> (7 - i)) & 1;
            segments.push((false, BIT_LOW_US));
            segments.push((true, if bit == 1 { ONE_US } else { ZERO_US }));
        }
    }
    // End of frame, then the pull-up takes the line back to idle high.
    segments.push((false, BIT_LOW_US));
    segments
}

/// Appends the checksum of the four data bytes.
pub fn with_checksum(data: [u8; 4]) -> [u8; 5] {
    let sum = data.iter().fold(0u8, |sum, v| sum.wrapping_add(*v));
    [data[0], data[1], data[2], data[3], sum]
}

/// The pulse train a perfect capture of `transmission(bytes)` produces.
pub fn train(bytes: [u8; 5]) -> PulseTrain {
    let segments = transmission(bytes);
    let mut durations = [0u32; TRANSITIONS];
    for (duration, (_, length)) in durations.iter_mut().zip(segments) {
        *duration = length;
    }
    PulseTrain::from_durations(durations)
}

/// Clock sharing the line's notion of time.
pub struct SimClock {
    now: Rc<Cell<u32>>,
}

impl MicrosClock for SimClock {
    fn now_micros(&mut self) -> u32 {
        let t = self.now.get();
        self.now.set(t.wrapping_add(1));
        t
    }
}

/// A data line replaying scripted segments once the host releases it.
pub struct SimLine {
    now: Rc<Cell<u32>>,
    segments: Vec<(bool, u32)>,
    pending: VecDeque<Vec<(bool, u32)>>,
    releases: usize,
    released_at: Option<u32>,
    driven_high: bool,
    pub modes: Vec<PinMode>,
    pub writes: Vec<bool>,
}

impl SimLine {
    /// A line the host has not yet released; replay starts on `set_mode(Input)`.
    pub fn new(segments: &[(bool, u32)]) -> (Self, SimClock) {
        let now = Rc::new(Cell::new(0));
        let line = SimLine {
            now: now.clone(),
            segments: segments.to_vec(),
            pending: VecDeque::new(),
            releases: 0,
            released_at: None,
            driven_high: true,
            modes: Vec::new(),
            writes: Vec::new(),
        };
        (line, SimClock { now })
    }

    /// A line already released at time zero.
    pub fn released(segments: &[(bool, u32)]) -> (Self, SimClock) {
        Self::released_at(0, segments)
    }

    /// A line already released at `start`.
    pub fn released_at(start: u32, segments: &[(bool, u32)]) -> (Self, SimClock) {
        let (mut line, clock) = Self::new(segments);
        line.now.set(start);
        line.released_at = Some(start);
        line.releases = 1;
        (line, clock)
    }

    /// Script replayed after the next release, for simulating a retried read.
    pub fn queue(&mut self, segments: &[(bool, u32)]) {
        self.pending.push_back(segments.to_vec());
    }

    fn level(&self, t: u32) -> bool {
        let Some(released_at) = self.released_at else {
            return self.driven_high;
        };
        let mut offset = t.wrapping_sub(released_at);
        for &(high, length) in &self.segments {
            if offset < length {
                return high;
            }
            offset -= length;
        }
        true
    }
}

impl ErrorType for SimLine {
    type Error = Infallible;
}

impl InputPin for SimLine {
    fn is_high(&mut self) -> Result<bool, Self::Error> {
        Ok(self.level(self.now.get()))
    }

    fn is_low(&mut self) -> Result<bool, Self::Error> {
        self.is_high().map(|high| !high)
    }
}

impl OutputPin for SimLine {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.driven_high = false;
        self.writes.push(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        self.driven_high = true;
        self.writes.push(true);
        Ok(())
    }
}

impl IoPin for SimLine {
    fn set_mode(&mut self, mode: PinMode) -> Result<(), Self::Error> {
        self.modes.push(mode);
        match mode {
            PinMode::Input => {
                if self.releases > 0 {
                    if let Some(next) = self.pending.pop_front() {
                        self.segments = next;
                    }
                }
                self.releases += 1;
                self.released_at = Some(self.now.get());
            }
            PinMode::Output => self.released_at = None,
        }
        Ok(())
    }
}
