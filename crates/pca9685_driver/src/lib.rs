//!Register-level driver for the PCA9685, a 16-channel 12-bit PWM
//!controller from NXP, attached over I2C.
//!
//!The driver is generic over the bus ([`embedded_hal::i2c::I2c`]) and
//!the settle-delay source ([`embedded_hal::delay::DelayNs`]), so the
//!whole protocol layer runs against a mock bus on a host machine. It
//!keeps an in-memory mirror of the chip configuration (MODE1, prescale,
//!per-channel duty cycles), which lets single mode-bit updates happen
//!without reading registers back from the device.
//!
//!All operations are synchronous and blocking. The only suspension is
//!the mandatory oscillator settle delay after reprogramming the
//!prescaler, which genuinely blocks the calling thread. The driver has
//!no internal locking; one device value must not be driven from two
//!threads at once.

pub mod config;
pub mod error;
pub mod registers;
pub mod timing;

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use tracing::{debug, trace};

use crate::config::Pca9685Config;
use crate::error::Pca9685Error;
use crate::registers::{
    assign_bit, ALL_LED_ON_L, AUTO_INCREMENT, GENERAL_CALL_ADDRESS, LED0_ON_L, MODE1, PRESCALE,
    REGISTERS_PER_CHANNEL, RESTART, SLEEP, SOFTWARE_RESET,
};
use crate::timing::{prescale_from_frequency, pulse_range_from_duty_cycle, OSCILLATOR_SETTLE_MS};

///Number of PWM output channels on the chip.
pub const CHANNEL_COUNT: u8 = 16;

//chip power-on register defaults, mirrored before any write
const MODE1_DEFAULT: u8 = 0x11;
const MODE2_DEFAULT: u8 = 0x04;

///Target of a duty-cycle write: one output, or the broadcast block
///that drives all sixteen outputs in one register sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    ///A single output, 0 through 15.
    Pwm(u8),
    ///The ALL_LED broadcast registers.
    All,
}

///One connected PCA9685 chip.
///
///Holds the bus handle exclusively. Construct with [`Pca9685::try_build`],
///which also programs the initial output frequency.
pub struct Pca9685<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    reference_clock_speed: u32,
    mode1: u8,
    //never written by any current operation; kept so future mode2 bit
    //toggles have a mirror to start from
    #[allow(dead_code)]
    mode2: u8,
    prescale: Option<u8>,
    duty_cycles: [Option<f64>; CHANNEL_COUNT as usize],
}

impl<I2C, D> core::fmt::Debug for Pca9685<I2C, D> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Pca9685")
            .field("address", &self.address)
            .field("reference_clock_speed", &self.reference_clock_speed)
            .field("mode1", &self.mode1)
            .field("mode2", &self.mode2)
            .field("prescale", &self.prescale)
            .field("duty_cycles", &self.duty_cycles)
            .finish_non_exhaustive()
    }
}

impl<I2C, D> Pca9685<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    ///Build a device on an already-open bus and program the initial
    ///frequency from `config`.
    ///
    ///The device address and reference clock speed are fixed for the
    ///lifetime of the returned value.
    pub fn try_build(
        config: &Pca9685Config,
        i2c: I2C,
        delay: D,
    ) -> Result<Self, Pca9685Error<I2C::Error>> {
        if config.i2c_address > 0x7F {
            return Err(Pca9685Error::invalid_argument(format!(
                "i2c address {:#04x} is not a 7-bit address",
                config.i2c_address
            )));
        }
        let mut device = Self {
            i2c,
            delay,
            address: config.i2c_address,
            reference_clock_speed: config.reference_clock_speed,
            mode1: MODE1_DEFAULT,
            mode2: MODE2_DEFAULT,
            prescale: None,
            duty_cycles: [None; CHANNEL_COUNT as usize],
        };
        device.set_frequency(config.frequency)?;
        Ok(device)
    }

    ///Broadcast the software reset command on the bus general-call
    ///address. Every PCA9685 on the bus resets to power-on defaults;
    ///the in-memory mirror is not changed.
    pub fn software_reset(&mut self) -> Result<(), Pca9685Error<I2C::Error>> {
        debug!("pca9685 software reset (general call)");
        self.i2c
            .write(GENERAL_CALL_ADDRESS, &[SOFTWARE_RESET])
            .map_err(Pca9685Error::Transport)
    }

    ///Stop the oscillator. Outputs freeze until [`Self::wake_up`].
    pub fn sleep(&mut self) -> Result<(), Pca9685Error<I2C::Error>> {
        debug!("pca9685 entering sleep");
        self.update_mode1(&[(SLEEP, true)])?;
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
        Ok(())
    }

    ///Restart the oscillator after [`Self::sleep`].
    pub fn wake_up(&mut self) -> Result<(), Pca9685Error<I2C::Error>> {
        debug!("pca9685 waking up");
        self.update_mode1(&[(SLEEP, false)])
    }

    ///Program the PWM output frequency, shared by all channels.
    ///
    ///The chip requires the oscillator to be stopped while the
    ///prescaler changes, so this emits: MODE1 (sleep) -> PRESCALE ->
    ///settle delay -> MODE1 (restart, wake, auto-increment). A
    ///transport failure aborts the sequence at the failing write.
    pub fn set_frequency(&mut self, freq_hz: u32) -> Result<(), Pca9685Error<I2C::Error>> {
        if freq_hz == 0 {
            return Err(Pca9685Error::invalid_argument(
                "frequency must be a positive number of hertz".to_string(),
            ));
        }
        let prescale = prescale_from_frequency(freq_hz, self.reference_clock_speed);
        debug!("pca9685 set frequency {}Hz (prescale {})", freq_hz, prescale);

        self.update_mode1(&[(RESTART, false), (SLEEP, true)])?;
        self.write_register(PRESCALE, prescale)?;
        self.prescale = Some(prescale);
        self.delay.delay_ms(OSCILLATOR_SETTLE_MS);
        self.update_mode1(&[(RESTART, true), (SLEEP, false), (AUTO_INCREMENT, true)])
    }

    ///Apply the given flag assignments to the MODE1 mirror and write
    ///the result to the chip in a single register write.
    ///
    ///Batching all flags into one write avoids transient mode states
    ///between per-bit writes.
    pub fn update_mode1(&mut self, flags: &[(u8, bool)]) -> Result<(), Pca9685Error<I2C::Error>> {
        let mode1 = flags
            .iter()
            .fold(self.mode1, |value, &(mask, enabled)| {
                assign_bit(value, mask, enabled)
            });
        self.write_register(MODE1, mode1)?;
        self.mode1 = mode1;
        Ok(())
    }

    ///Set the duty cycle of one channel, or of all channels through
    ///the broadcast block, as a percentage from 0.0 to 100.0.
    ///
    ///0% and 100% use the chip's dedicated full-off/full-on bits; any
    ///other value rises at tick 0 and falls at the computed tick. The
    ///duty-cycle mirror is updated only after all four register writes
    ///succeed.
    ///
    ///The chip must be awake; issuing this while asleep queues pulse
    ///values that take effect incorrectly on wake. The driver does not
    ///guard against that window.
    pub fn set_duty_cycle(
        &mut self,
        channel: Channel,
        percent: f64,
    ) -> Result<(), Pca9685Error<I2C::Error>> {
        if !(0.0..=100.0).contains(&percent) {
            return Err(Pca9685Error::invalid_argument(format!(
                "duty cycle {}% is outside 0.0-100.0",
                percent
            )));
        }
        let base = match channel {
            Channel::Pwm(ch) => {
                if ch >= CHANNEL_COUNT {
                    return Err(Pca9685Error::invalid_argument(format!(
                        "channel {} is outside 0-15",
                        ch
                    )));
                }
                LED0_ON_L + REGISTERS_PER_CHANNEL * ch
            }
            Channel::All => ALL_LED_ON_L,
        };

        let (on, off) = pulse_range_from_duty_cycle(percent);
        debug!(
            "pca9685 set {:?} duty cycle {}% (on={}, off={})",
            channel, percent, on, off
        );

        self.write_register(base, (on & 0xFF) as u8)?;
        self.write_register(base + 1, (on >> 8) as u8)?;
        self.write_register(base + 2, (off & 0xFF) as u8)?;
        self.write_register(base + 3, (off >> 8) as u8)?;

        match channel {
            Channel::Pwm(ch) => self.duty_cycles[ch as usize] = Some(percent),
            Channel::All => self.duty_cycles = [Some(percent); CHANNEL_COUNT as usize],
        }
        Ok(())
    }

    ///The 7-bit device address this driver writes to.
    pub fn address(&self) -> u8 {
        self.address
    }

    ///The prescale value last programmed, if any.
    pub fn prescale(&self) -> Option<u8> {
        self.prescale
    }

    ///The output frequency implied by the programmed prescale and the
    ///reference clock, in hertz.
    pub fn frequency(&self) -> Option<u32> {
        self.prescale.map(|prescale| {
            self.reference_clock_speed / (timing::TICKS_PER_PERIOD * (u32::from(prescale) + 1))
        })
    }

    ///The duty cycle last successfully written to `channel`, if any.
    pub fn duty_cycle(&self, channel: u8) -> Option<f64> {
        self.duty_cycles.get(channel as usize).copied().flatten()
    }

    ///Mirror of the duty cycles last written to all sixteen channels.
    pub fn duty_cycles(&self) -> &[Option<f64>; CHANNEL_COUNT as usize] {
        &self.duty_cycles
    }

    ///Release the bus handle, e.g. to close it or hand it to another
    ///device. The driver state is discarded.
    pub fn into_inner(self) -> I2C {
        self.i2c
    }

    fn write_register(&mut self, register: u8, value: u8) -> Result<(), Pca9685Error<I2C::Error>> {
        trace!("pca9685 write {:#04x} <- {:#04x}", register, value);
        self.i2c
            .write(self.address, &[register, value])
            .map_err(Pca9685Error::Transport)
    }
}
