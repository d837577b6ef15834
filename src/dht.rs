use embedded_hal::delay::DelayNs;

use crate::capture::{self, PulseTrain};
use crate::config::{Config, RetryPolicy};
use crate::error::DhtError;
use crate::initiator;
use crate::io::{IoPin, MicrosClock};
use crate::payload::{Reading, SensorType};
use crate::priority::{PriorityControl, with_elevated_priority};
use crate::threshold::Threshold;

/// Driver for DHT11/DHT22-class single-wire sensors.
pub struct Dht<PIN, DELAY, CLOCK, SCHED> {
    pin: PIN,
    delay: DELAY,
    clock: CLOCK,
    scheduler: SCHED,
    config: Config,
}

impl<PIN, DELAY, CLOCK, SCHED, E> Dht<PIN, DELAY, CLOCK, SCHED>
where
    PIN: IoPin<Error = E>,
    DELAY: DelayNs,
    CLOCK: MicrosClock,
    SCHED: PriorityControl,
{
    /// Creates a new instance of the driver with the default [`Config`].
    ///
    /// # Arguments
    ///
    /// * `pin` - The GPIO pin connected to the data line. Must support both input and output.
    /// * `delay` - A delay provider implementing the `DelayNs` trait.
    /// * `clock` - A free-running microsecond clock used to time the pulses.
    /// * `scheduler` - Priority control; [`NoPriority`](crate::NoPriority) on bare metal.
    pub fn new(pin: PIN, delay: DELAY, clock: CLOCK, scheduler: SCHED) -> Self {
        Dht {
            pin,
            delay,
            clock,
            scheduler,
            config: Config::default(),
        }
    }

    /// Replaces the configuration.
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = config;
        self
    }

    /// The active configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Reads a temperature and humidity measurement.
    ///
    /// Sends the request, captures the transmission under elevated scheduling priority,
    /// then decodes and validates it with the default priority restored.
    /// Never retries; see [`read_with_retry`](Self::read_with_retry).
    ///
    /// # Returns
    ///
    /// * `Ok(Reading)` if the read is successful and the checksum is valid.
    /// * `Err(DhtError)` if a communication or checksum error occurs.
    pub fn read(&mut self, sensor: SensorType) -> Result<Reading, DhtError<E>> {
        let Dht {
            pin,
            delay,
            clock,
            scheduler,
            config,
        } = self;

        let train = with_elevated_priority(scheduler, || -> Result<PulseTrain, DhtError<E>> {
            initiator::initiate(pin, delay, config)?;
            capture::capture(pin, clock, config.timeout_us)
        })?;

        decode_train(&train, config.threshold, sensor)
    }

    /// Calls [`read`](Self::read) until it succeeds or `policy.attempts` reads have failed,
    /// pausing `policy.backoff_ms` after each failure except the last.
    ///
    /// Returns the error of the last attempt.
    pub fn read_with_retry(
        &mut self,
        sensor: SensorType,
        policy: RetryPolicy,
    ) -> Result<Reading, DhtError<E>> {
        let attempts = policy.attempts.max(1);
        let mut attempt = 1;
        loop {
            match self.read(sensor) {
                Ok(reading) => return Ok(reading),
                Err(e) if attempt >= attempts => return Err(e),
                Err(_) => warn!("read attempt {} of {} failed", attempt, attempts),
            }
            self.delay.delay_ms(policy.backoff_ms);
            attempt += 1;
        }
    }

    /// Sends the read request and releases the line.
    ///
    /// Only needed by callers sequencing the transaction themselves; follow it with
    /// [`decode`](Self::decode) or [`capture`](Self::capture) without any work in between.
    pub fn initiate(&mut self) -> Result<(), DhtError<E>> {
        initiator::initiate(&mut self.pin, &mut self.delay, &self.config)
    }

    /// Times the transmission following a request, without decoding it.
    pub fn capture(&mut self) -> Result<PulseTrain, DhtError<E>> {
        capture::capture(&mut self.pin, &mut self.clock, self.config.timeout_us)
    }

    /// Captures and decodes the transmission following a request.
    pub fn decode(&mut self, sensor: SensorType) -> Result<Reading, DhtError<E>> {
        let train = self.capture()?;
        decode_train(&train, self.config.threshold, sensor)
    }
}

/// Turns a captured pulse train into a validated reading.
///
/// A pure function of the durations: the same train always gives the same result.
pub fn decode_train<E>(
    train: &PulseTrain,
    threshold: Threshold,
    sensor: SensorType,
) -> Result<Reading, DhtError<E>> {
    trace!("pulse train: {:?}", train.durations());

    let payload = threshold.decode(train);
    debug!(
        "payload: {:?}, expected checksum {}",
        payload,
        payload.expected_checksum()
    );

    if !payload.is_valid() {
        return Err(DhtError::ChecksumMismatch);
    }
    Ok(payload.to_reading(sensor))
}
