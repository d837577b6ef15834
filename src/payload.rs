/// The sensor families understood by the decoder.
///
/// Both share the wire format; they differ in how the humidity and temperature
/// fields are scaled.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SensorType {
    /// DHT11: integral humidity and temperature in the high byte of each field.
    Dht11,
    /// DHT22 / AM2302 and compatibles: tenths, with a sign bit on temperature.
    Dht22,
}

/// Reading returned by the sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Reading {
    /// Temperature in degrees Celsius.
    pub temperature: f32,
    /// Relative humidity in percent.
    pub relative_humidity: f32,
}

impl Reading {
    /// Temperature in degrees Fahrenheit.
    pub fn temperature_fahrenheit(&self) -> f32 {
        self.temperature * 1.8 + 32.0
    }
}

/// The 40-bit frame sent by the sensor.
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RawPayload {
    /// Humidity field, high byte first.
    pub humidity: u16,
    /// Temperature field, high byte first.
    pub temperature: u16,
    /// Checksum byte as transmitted.
    pub checksum: u8,
}

impl RawPayload {
    /// Builds a payload from the five bytes in transmission order.
    pub fn from_bytes(bytes: [u8; 5]) -> Self {
        let [hum_hi, hum_lo, temp_hi, temp_lo, checksum] = bytes;
        RawPayload {
            humidity: u16::from_be_bytes([hum_hi, hum_lo]),
            temperature: u16::from_be_bytes([temp_hi, temp_lo]),
            checksum,
        }
    }

    /// The five bytes in transmission order.
    pub fn to_bytes(&self) -> [u8; 5] {
        let [hum_hi, hum_lo] = self.humidity.to_be_bytes();
        let [temp_hi, temp_lo] = self.temperature.to_be_bytes();
        [hum_hi, hum_lo, temp_hi, temp_lo, self.checksum]
    }

    /// Low 8 bits of the sum of the four data bytes.
    pub fn expected_checksum(&self) -> u8 {
        self.to_bytes()[..4]
            .iter()
            .fold(0u8, |sum, v| sum.wrapping_add(*v))
    }

    /// Whether the transmitted checksum matches the data bytes.
    pub fn is_valid(&self) -> bool {
        self.checksum == self.expected_checksum()
    }

    /// Converts the raw fields into physical units.
    ///
    /// Does not look at the checksum; call [`is_valid`](Self::is_valid) first.
    pub fn to_reading(&self, sensor: SensorType) -> Reading {
        match sensor {
            SensorType::Dht11 => {
                // Fractional bytes are zero on the DHT11.
                let [hum_hi, _] = self.humidity.to_be_bytes();
                let [temp_hi, _] = self.temperature.to_be_bytes();
                Reading {
                    temperature: temp_hi as f32,
                    relative_humidity: hum_hi as f32,
                }
            }
            SensorType::Dht22 => {
                let relative_humidity = self.humidity as f32 / 10.0;

                let is_temp_negative = self.temperature & 0x8000 != 0;
                let mut temperature = (self.temperature & 0x7FFF) as f32 / 10.0;
                if is_temp_negative {
                    temperature = -temperature;
                }

                Reading {
                    temperature,
                    relative_humidity,
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::with_checksum;

    #[test]
    fn test_checksum_valid() {
        // 0x01 + 0x90 + 0x00 + 0xF6 = 0x187 -> 0x87
        let payload = RawPayload::from_bytes([0x01, 0x90, 0x00, 0xF6, 0x87]);
        assert!(payload.is_valid());
        assert_eq!(payload.expected_checksum(), 0x87);
    }

    #[test]
    fn test_checksum_single_bit_corruption() {
        let bytes = with_checksum([0x02, 0x38, 0x80, 0xC8]);
        assert!(RawPayload::from_bytes(bytes).is_valid());

        for bit in 0..8 {
            let mut corrupted = bytes;
            corrupted[4] ^= 1 << bit;
            assert!(!RawPayload::from_bytes(corrupted).is_valid(), "bit {bit}");
        }
    }

    #[test]
    fn test_dht11_conversion() {
        let payload = RawPayload::from_bytes(with_checksum([0x32, 0x00, 0x19, 0x00]));
        assert_eq!(
            payload.to_reading(SensorType::Dht11),
            Reading {
                relative_humidity: 50.0,
                temperature: 25.0,
            }
        );
    }

    #[test]
    fn test_dht11_ignores_fractional_bytes() {
        let payload = RawPayload::from_bytes(with_checksum([0x32, 0x05, 0x19, 0x07]));
        assert_eq!(
            payload.to_reading(SensorType::Dht11),
            Reading {
                relative_humidity: 50.0,
                temperature: 25.0,
            }
        );
    }

    #[test]
    fn test_dht22_negative_temp() {
        // Humidity: 0x0238 => 568 => 56.8%
        // Temperature: sign bit set, magnitude 0x00C8 => 200 => -20.0C
        let payload = RawPayload::from_bytes(with_checksum([0x02, 0x38, 0x80, 0xC8]));
        assert_eq!(
            payload.to_reading(SensorType::Dht22),
            Reading {
                relative_humidity: 56.8,
                temperature: -20.0,
            }
        );
    }

    #[test]
    fn test_dht22_positive_temp() {
        // Humidity: 55.5% -> [0x02, 0x2B] => 555
        // Temperature: 24.6C -> [0x00, 0xF6] => 246
        let payload = RawPayload::from_bytes(with_checksum([0x02, 0x2B, 0x00, 0xF6]));
        assert_eq!(
            payload.to_reading(SensorType::Dht22),
            Reading {
                relative_humidity: 55.5,
                temperature: 24.6,
            }
        );
    }

    #[test]
    fn test_byte_layout() {
        let bytes = [0x01, 0xC2, 0x00, 0xE1, 0xA4];
        let payload = RawPayload::from_bytes(bytes);
        assert_eq!(payload.humidity, 450);
        assert_eq!(payload.temperature, 225);
        assert_eq!(payload.to_bytes(), bytes);
    }

    #[test]
    fn test_fahrenheit() {
        let reading = Reading {
            temperature: 0.0,
            relative_humidity: 0.0,
        };
        assert_eq!(reading.temperature_fahrenheit(), 32.0);
    }
}
