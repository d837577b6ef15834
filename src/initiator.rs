use embedded_hal::delay::DelayNs;

use crate::config::Config;
use crate::error::DhtError;
use crate::io::{IoPin, PinMode};

/// Sends the read request and hands the line over to the sensor.
///
/// The host takes the line, optionally holds it high for `wake_high_ms`, pulls it
/// low for at least 18 ms, then drives it high and switches to input so the pull-up
/// and the sensor own it. Capture must start immediately afterwards.
pub fn initiate<P, D, E>(pin: &mut P, delay: &mut D, config: &Config) -> Result<(), DhtError<E>>
where
    P: IoPin<Error = E>,
    D: DelayNs,
{
    pin.set_mode(PinMode::Output)?;

    pin.set_high()?;
    if config.wake_high_ms > 0 {
        delay.delay_ms(config.wake_high_ms);
    }

    // MCU sends start request
    pin.set_low()?;
    delay.delay_ms(config.effective_wake_low_ms());

    // Release the line
    pin.set_high()?;
    pin.set_mode(PinMode::Input)?;
    Ok(())
}
