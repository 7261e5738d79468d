//!This library binds the PCA9685 driver to a Linux/Raspberry Pi I2C
//!bus. It is a wrapper around the rppal library.
//!
//!The `open_bus` function opens an I2C bus by string identifier, and
//!`try_build_device` goes from a [`Pca9685Config`] straight to a fully
//!initialized device on that bus.

//internal error type for bus access
pub mod error;

use embedded_hal::delay::DelayNs;
use pca9685_driver::config::Pca9685Config;
use pca9685_driver::Pca9685;
use tracing::debug;

pub use rppal::i2c::I2c;

use crate::error::BusError;

///Blocking delay source backed by `std::thread::sleep`. The oscillator
///settle wait must genuinely block the calling thread, because the
///next register write in the same sequence depends on it.
pub struct Delay;

impl DelayNs for Delay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(std::time::Duration::from_nanos(u64::from(ns)));
    }
}

//accepts "i2c-1", "/dev/i2c-1" or a bare index like "1"
fn bus_index(identifier: &str) -> Result<u8, BusError> {
    let index = identifier.rsplit(['-', '/']).next().unwrap_or(identifier);
    index.parse::<u8>().map_err(|_| {
        BusError::from(format!(
            "unrecognized i2c bus identifier: {:?} (expected e.g. \"i2c-1\")",
            identifier
        ))
    })
}

///Open an I2C bus by identifier, e.g. "i2c-1".
pub fn open_bus(identifier: &str) -> Result<I2c, BusError> {
    let index = bus_index(identifier)?;
    debug!("opening i2c bus {}", index);
    I2c::with_bus(index).map_err(BusError::from)
}

///Open the bus named in `config` and bring up an initialized device
///on it, with the configured address and output frequency.
pub fn try_build_device(config: &Pca9685Config) -> Result<Pca9685<I2c, Delay>, BusError> {
    let i2c = open_bus(&config.i2c_bus)?;
    let device = Pca9685::try_build(config, i2c, Delay)?;
    Ok(device)
}

#[cfg(test)]
mod tests {
    use super::bus_index;

    #[test]
    fn test_bus_index_accepted_forms() {
        assert_eq!(bus_index("i2c-1").unwrap(), 1);
        assert_eq!(bus_index("/dev/i2c-0").unwrap(), 0);
        assert_eq!(bus_index("4").unwrap(), 4);
    }

    #[test]
    fn test_bus_index_rejected_forms() {
        for identifier in ["", "i2c-", "i2c-one", "/dev/spidev0.0"] {
            assert!(bus_index(identifier).is_err(), "{:?}", identifier);
        }
    }
}
