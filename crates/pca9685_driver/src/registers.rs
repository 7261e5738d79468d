//!Register map and MODE1 bit manipulation for the PCA9685.
//!
//! Addresses and bit masks are taken from the NXP datasheet. Each PWM
//! channel owns four consecutive one-byte registers starting at
//! [`LED0_ON_L`]; the `ALL_LED_*` block broadcasts one pulse range to
//! every channel in a single sequence.

///Mode register 1.
pub const MODE1: u8 = 0x00;

///ON low byte of channel 0. Channel `n` starts at `LED0_ON_L + 4 * n`.
pub const LED0_ON_L: u8 = 0x06;
///ON high byte (4 bits plus the full-on sentinel bit) of channel 0.
pub const LED0_ON_H: u8 = 0x07;
///OFF low byte of channel 0.
pub const LED0_OFF_L: u8 = 0x08;
///OFF high byte (4 bits plus the full-off sentinel bit) of channel 0.
pub const LED0_OFF_H: u8 = 0x09;

///ON low byte of the all-channel broadcast block.
pub const ALL_LED_ON_L: u8 = 0xFA;
///ON high byte of the all-channel broadcast block.
pub const ALL_LED_ON_H: u8 = 0xFB;
///OFF low byte of the all-channel broadcast block.
pub const ALL_LED_OFF_L: u8 = 0xFC;
///OFF high byte of the all-channel broadcast block.
pub const ALL_LED_OFF_H: u8 = 0xFD;

///PWM frequency prescale register.
pub const PRESCALE: u8 = 0xFE;

///MODE1 bit: oscillator off. Prescale may only change while this is set.
pub const SLEEP: u8 = 0x10;
///MODE1 bit: advance the register address after each byte of a transaction.
pub const AUTO_INCREMENT: u8 = 0x20;
///MODE1 bit: restart PWM channels that were active before sleep.
pub const RESTART: u8 = 0x80;

///Reserved bus address every device on the bus responds to.
pub const GENERAL_CALL_ADDRESS: u8 = 0x00;
///Payload byte of the general-call software reset (SWRST).
pub const SOFTWARE_RESET: u8 = 0x06;

///ON_L/ON_H/OFF_L/OFF_H per channel.
pub const REGISTERS_PER_CHANNEL: u8 = 4;

///Set the bits of `mask` in `value` if `enabled`, clear them otherwise.
pub fn assign_bit(value: u8, mask: u8, enabled: bool) -> u8 {
    if enabled {
        value | mask
    } else {
        value & !mask
    }
}

#[cfg(test)]
mod tests {
    use super::assign_bit;

    #[test]
    fn test_assign_bit_sets_and_clears() {
        assert_eq!(assign_bit(0x00, super::SLEEP, true), 0x10);
        assert_eq!(assign_bit(0xFF, super::SLEEP, false), 0xEF);

        //already in the requested state: no change
        assert_eq!(assign_bit(0x10, super::SLEEP, true), 0x10);
        assert_eq!(assign_bit(0x00, super::RESTART, false), 0x00);

        //other bits are untouched
        assert_eq!(assign_bit(0x11, super::RESTART, true), 0x91);
        assert_eq!(assign_bit(0x91, super::RESTART, false), 0x11);
    }
}
