//!Pure timing math: output frequency to prescale divisor, and duty
//!cycle percentage to a 12-bit (on, off) tick pair. No I/O happens
//!here; the write ordering lives with the driver itself.

///Ticks in one PWM period (12-bit counter).
pub const TICKS_PER_PERIOD: u32 = 4096;

///Bit 12 of an ON or OFF pair: the "fully on"/"fully off" sentinel.
pub const FULL: u16 = 0x1000;

///Lowest prescale the chip accepts.
pub const PRESCALE_MIN: u8 = 3;
///Highest prescale the chip accepts.
pub const PRESCALE_MAX: u8 = 255;

///Oscillator settle time after reprogramming the prescale register.
///The datasheet requires at least 500us; 5ms leaves margin and matches
///common reference drivers.
pub const OSCILLATOR_SETTLE_MS: u32 = 5;

///Compute the prescale divisor for the requested output frequency.
///
///Uses the datasheet formula `round(ref_clock / (4096 * freq)) - 1`
///with round-half-away-from-zero, clamped to the valid register range.
///`freq_hz` must be nonzero; the driver rejects zero before calling.
pub fn prescale_from_frequency(freq_hz: u32, ref_clock_hz: u32) -> u8 {
    let exact = ref_clock_hz as f64 / (TICKS_PER_PERIOD as f64 * freq_hz as f64);
    let prescale = exact.round() - 1.0;
    prescale.clamp(f64::from(PRESCALE_MIN), f64::from(PRESCALE_MAX)) as u8
}

///Map a duty cycle in percent (0.0 to 100.0) to an (on, off) tick pair.
///
///0% and 100% use the dedicated full-off/full-on sentinel bit instead
///of a generic tick pair, so the output carries no residual
///1/4096-period glitch. Every other value rises at tick 0 and falls at
///the computed tick; there is no phase offset support.
pub fn pulse_range_from_duty_cycle(percent: f64) -> (u16, u16) {
    if percent == 0.0 {
        (0, FULL)
    } else if percent == 100.0 {
        (FULL, 0)
    } else {
        (0, (percent / 100.0 * 4095.0).round() as u16)
    }
}

#[cfg(test)]
mod tests {
    use super::{prescale_from_frequency, pulse_range_from_duty_cycle, FULL};

    #[test]
    fn test_prescale_datasheet_example() {
        //the 50Hz @ 25MHz operating point from the datasheet
        assert_eq!(prescale_from_frequency(50, 25_000_000), 121);
    }

    #[test]
    fn test_prescale_rounding() {
        //25e6 / (4096 * 200) = 30.52 -> rounds up to 31 -> 30
        assert_eq!(prescale_from_frequency(200, 25_000_000), 30);
        //25e6 / (4096 * 60) = 101.7 -> 102 -> 101
        assert_eq!(prescale_from_frequency(60, 25_000_000), 101);
    }

    #[test]
    fn test_prescale_clamps_to_register_range() {
        //3kHz would need prescale 1; chip minimum is 3
        assert_eq!(prescale_from_frequency(3_000, 25_000_000), 3);
        //20Hz would need prescale 304; register maximum is 255
        assert_eq!(prescale_from_frequency(20, 25_000_000), 255);

        for freq in [24, 50, 500, 1_526, 10_000] {
            assert!(prescale_from_frequency(freq, 25_000_000) >= 3);
        }
    }

    #[test]
    fn test_pulse_range_sentinels() {
        assert_eq!(pulse_range_from_duty_cycle(0.0), (0, FULL));
        assert_eq!(pulse_range_from_duty_cycle(100.0), (FULL, 0));
    }

    #[test]
    fn test_pulse_range_midpoints() {
        assert_eq!(pulse_range_from_duty_cycle(50.0), (0, 2048));
        assert_eq!(pulse_range_from_duty_cycle(25.0), (0, 1024));
        //near-extreme values still use plain tick pairs
        assert_eq!(pulse_range_from_duty_cycle(0.1), (0, 4));
        assert_eq!(pulse_range_from_duty_cycle(99.9), (0, 4091));
    }
}
