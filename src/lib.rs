//! DHT11/DHT22 Pulse-Timing Decoder for Embedded Rust
//!
//! This crate reads DHT11 and DHT22 (AM2302) humidity and temperature sensors by
//! timing the edges of their single-wire protocol, built on top of the
//! [`embedded-hal`] traits.
//!
//! # Features
//! - Blocking synchronous API using `embedded-hal` traits
//! - Designed for `no_std` environments
//! - Two bit classification strategies: a fixed datasheet threshold, or an adaptive
//!   threshold derived from the captured pulses themselves
//! - Scoped real-time priority around the time-critical capture
//! - Optional logging support via `defmt` or `tracing`
//!
//! # Dependencies
//! This driver depends on the following `embedded-hal` traits:
//! - [`InputPin`] and [`OutputPin`] for GPIO access, plus [`IoPin`] to switch direction
//! - [`DelayNs`] for the wake sequence
//!
//! and on a [`MicrosClock`] to time the pulses.
//!
//! # Optional Features
//! - `defmt`: Implements `defmt::Format` and logs through `defmt`
//! - `tracing`: Logs through `tracing` instead (mutually exclusive with `defmt`)
//! - `std`: Host adapters ([`host::MonotonicClock`], [`host::StdDelay`] and, on Linux,
//!   `host::SchedFifo`); enables `tracing`
//!
//! # Example
//!
//! ```ignore
//! use dht_pulse::{Dht, RetryPolicy, SensorType};
//! use dht_pulse::host::{MonotonicClock, SchedFifo, StdDelay};
//!
//! let mut dht = Dht::new(pin, StdDelay, MonotonicClock::new(), SchedFifo);
//! let reading = dht.read_with_retry(SensorType::Dht22, RetryPolicy::default())?;
//! println!("{:.1} *C, {:.1} %", reading.temperature, reading.relative_humidity);
//! ```
//!
//! [`embedded-hal`]: https://docs.rs/embedded-hal
//! [`InputPin`]: embedded_hal::digital::InputPin
//! [`OutputPin`]: embedded_hal::digital::OutputPin
//! [`DelayNs`]: embedded_hal::delay::DelayNs

#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[macro_use]
mod fmt;

pub mod capture;
pub mod config;
pub mod dht;
pub mod error;
pub mod initiator;
pub mod io;
pub mod payload;
pub mod priority;
pub mod threshold;

#[cfg(feature = "std")]
pub mod host;

#[cfg(test)]
mod sim;

pub use capture::PulseTrain;
pub use config::{Config, RetryPolicy};
pub use dht::{Dht, decode_train};
pub use error::{DhtError, PriorityError};
pub use io::{IoPin, MicrosClock, PinMode};
pub use payload::{RawPayload, Reading, SensorType};
pub use priority::{ElevatedPriority, NoPriority, PriorityControl, with_elevated_priority};
pub use threshold::Threshold;
