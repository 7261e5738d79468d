//!Device configuration, deserializable from any serde source.

use serde::Deserialize;

///Configuration for one PCA9685 chip instance.
///
///Every field has a default, so an empty config document produces a
///device on bus "i2c-1" at the factory address 0x40 with the stock
///25MHz internal oscillator, running at 50Hz.
#[derive(Deserialize, Debug, Clone)]
#[serde(default)]
pub struct Pca9685Config {
    ///Bus identifier, e.g. "i2c-1". Interpreted by the transport layer.
    pub i2c_bus: String,
    ///7-bit device address on the bus.
    pub i2c_address: u8,
    ///Speed of the reference oscillator feeding the prescaler, in hertz.
    pub reference_clock_speed: u32,
    ///Initial PWM output frequency, in hertz.
    pub frequency: u32,
}

impl Default for Pca9685Config {
    fn default() -> Self {
        Self {
            i2c_bus: "i2c-1".to_string(),
            i2c_address: 0x40,
            reference_clock_speed: 25_000_000,
            frequency: 50,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Pca9685Config;

    #[test]
    fn test_defaults() {
        let config = Pca9685Config::default();
        assert_eq!(config.i2c_bus, "i2c-1");
        assert_eq!(config.i2c_address, 0x40);
        assert_eq!(config.reference_clock_speed, 25_000_000);
        assert_eq!(config.frequency, 50);
    }

    #[test]
    fn test_partial_document_falls_back_to_defaults() {
        let config: Pca9685Config =
            serde_json::from_str(r#"{"i2c_address": 65, "frequency": 100}"#).unwrap();
        assert_eq!(config.i2c_bus, "i2c-1");
        assert_eq!(config.i2c_address, 0x41);
        assert_eq!(config.reference_clock_speed, 25_000_000);
        assert_eq!(config.frequency, 100);
    }

    #[test]
    fn test_empty_document() {
        let config: Pca9685Config = serde_json::from_str("{}").unwrap();
        assert_eq!(config.i2c_address, 0x40);
    }
}
