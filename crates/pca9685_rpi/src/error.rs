use std::fmt::{Debug, Formatter};

use pca9685_driver::error::Pca9685Error;

pub struct BusError {
    pub message: String,
}

impl Debug for BusError {
    fn fmt(&self, fmt: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        fmt.write_str(&self.message)
    }
}

impl From<&str> for BusError {
    fn from(s: &str) -> Self {
        Self {
            message: s.to_string(),
        }
    }
}

impl From<String> for BusError {
    fn from(s: String) -> Self {
        Self { message: s }
    }
}

impl From<rppal::i2c::Error> for BusError {
    fn from(err: rppal::i2c::Error) -> Self {
        Self {
            message: format!("I2cBusError - Cause: {}", err),
        }
    }
}

impl From<Pca9685Error<rppal::i2c::Error>> for BusError {
    fn from(err: Pca9685Error<rppal::i2c::Error>) -> Self {
        Self {
            message: format!("{:?}", err),
        }
    }
}
