//! BK4819 transceiver register access
//!
//! Three-wire serial interface on dedicated pins: SCN frames a transfer, an
//! address byte (bit 7 set for reads) is followed by a 16-bit word, MSB
//! first, sampled on the rising SCL edge. Only the operations audio
//! playback and calibration need are provided; tuning lives elsewhere.
//!
//! The driver owns its own GPIO handle and delay, which on target are
//! zero-sized, so it can be borrowed alongside the [`crate::hal::board::Board`].

use embedded_hal::delay::DelayNs;

use crate::hal::gpio::Gpio;
use crate::hal::pins::{Direction, Pin};
use crate::radio::{AfMode, Transceiver, REG_TONE_CONFIG};

/// Registers touched by this driver
pub mod reg {
    /// Power and enable bits
    pub const POWER: u8 = 0x30;
    /// LDO and bandgap
    pub const LDO: u8 = 0x37;
    /// AF output routing
    pub const AF_OUTPUT: u8 = 0x47;
    /// TX mute
    pub const TX_MUTE: u8 = 0x50;
    /// Tone generator enable and gain
    pub const TONE_ENABLE: u8 = 0x70;
}

const READ_FLAG: u8 = 0x80;

const POWER_RX_ON: u16 = 0xBFF1;
const POWER_TONE: u16 = 0x0302;
const POWER_RX_WAKE: u16 = 0x0200;
const LDO_ACTIVE: u16 = 0x1F0F;
const LDO_SLEEP: u16 = 0x1D00;
const TX_MUTE_ON: u16 = 0xBB20;
const TX_MUTE_OFF: u16 = 0x3B20;
const AF_OUTPUT_BASE: u16 = 0x6040;
const TONE1_ENABLE: u16 = 1 << 15;
const TONE1_GAIN_LOUD: u16 = 28 << 8;
const TONE1_GAIN_QUIET: u16 = 96 << 8;

/// Tone frequency register scale: `hz * 10.3244`
fn tone_word(frequency_hz: u16) -> u16 {
    u16::try_from(u32::from(frequency_hz) * 103_244 / 10_000).unwrap_or(u16::MAX)
}

const fn af_code(mode: AfMode) -> u16 {
    match mode {
        AfMode::Mute => 0,
        AfMode::Open => 1,
        AfMode::Beep => 3,
        AfMode::Am => 7,
    }
}

/// BK4819 on the three-wire bus
pub struct Bk4819<G, D> {
    gpio: G,
    delay: D,
}

impl<G: Gpio, D: DelayNs> Bk4819<G, D> {
    /// Take the SCN/SCL/SDA lines; pin directions are set by
    /// [`crate::hal::board::Board::init_pins`]
    pub const fn new(gpio: G, delay: D) -> Self {
        Self { gpio, delay }
    }

    fn begin(&mut self) {
        self.gpio.set_output(Pin::Bk4819Scn);
        self.gpio.clear_output(Pin::Bk4819Scl);
        self.delay.delay_us(1);
        self.gpio.clear_output(Pin::Bk4819Scn);
    }

    fn end(&mut self) {
        self.gpio.set_output(Pin::Bk4819Scn);
        self.delay.delay_us(1);
        self.gpio.set_output(Pin::Bk4819Scl);
        self.gpio.set_output(Pin::Bk4819Sda);
    }

    fn shift_out(&mut self, value: u16, bits: u8) {
        self.gpio.clear_output(Pin::Bk4819Scl);
        for bit in (0..bits).rev() {
            self.gpio.write(Pin::Bk4819Sda, value & (1 << bit) != 0);
            self.delay.delay_us(1);
            self.gpio.set_output(Pin::Bk4819Scl);
            self.delay.delay_us(1);
            self.gpio.clear_output(Pin::Bk4819Scl);
        }
    }

    fn shift_in(&mut self) -> u16 {
        self.gpio.set_direction(Pin::Bk4819Sda, Direction::Input);
        self.delay.delay_us(1);
        let mut value = 0u16;
        for _ in 0..16 {
            value <<= 1;
            value |= u16::from(self.gpio.read_input(Pin::Bk4819Sda));
            self.gpio.set_output(Pin::Bk4819Scl);
            self.delay.delay_us(1);
            self.gpio.clear_output(Pin::Bk4819Scl);
            self.delay.delay_us(1);
        }
        self.gpio.set_direction(Pin::Bk4819Sda, Direction::Output);
        value
    }
}

impl<G: Gpio, D: DelayNs> Transceiver for Bk4819<G, D> {
    fn read_register(&mut self, register: u8) -> u16 {
        self.begin();
        self.shift_out(u16::from(register | READ_FLAG), 8);
        let value = self.shift_in();
        self.end();
        value
    }

    fn write_register(&mut self, register: u8, value: u16) {
        self.begin();
        self.shift_out(u16::from(register), 8);
        self.delay.delay_us(1);
        self.shift_out(value, 16);
        self.delay.delay_us(1);
        self.end();
    }

    fn play_tone(&mut self, frequency_hz: u16, tuning_gain: bool) {
        self.enter_tx_mute();
        self.set_af(AfMode::Beep);
        let gain = if tuning_gain { TONE1_GAIN_LOUD } else { TONE1_GAIN_QUIET };
        self.write_register(reg::TONE_ENABLE, TONE1_ENABLE | gain);
        self.write_register(reg::POWER, 0);
        self.write_register(reg::POWER, POWER_TONE);
        self.write_register(REG_TONE_CONFIG, tone_word(frequency_hz));
    }

    fn enter_tx_mute(&mut self) {
        self.write_register(reg::TX_MUTE, TX_MUTE_ON);
    }

    fn exit_tx_mute(&mut self) {
        self.write_register(reg::TX_MUTE, TX_MUTE_OFF);
    }

    fn set_af(&mut self, mode: AfMode) {
        self.write_register(reg::AF_OUTPUT, AF_OUTPUT_BASE | (af_code(mode) << 8));
    }

    fn rx_turn_on(&mut self) {
        self.write_register(reg::LDO, LDO_ACTIVE);
        self.delay.delay_ms(10);
        self.write_register(reg::POWER, POWER_RX_WAKE);
        self.write_register(reg::POWER, POWER_RX_ON);
    }

    fn sleep(&mut self) {
        self.write_register(reg::POWER, 0);
        self.write_register(reg::LDO, LDO_SLEEP);
    }

    fn turn_off_tones_turn_on_rx(&mut self) {
        self.write_register(reg::TONE_ENABLE, 0);
        self.set_af(AfMode::Mute);
        self.exit_tx_mute();
        self.write_register(reg::POWER, 0);
        self.write_register(reg::POWER, POWER_RX_ON);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tone_word_scaling() {
        assert_eq!(tone_word(1000), 10_324);
        assert_eq!(tone_word(500), 5_162);
        assert_eq!(tone_word(440), 4_542);
    }
}
