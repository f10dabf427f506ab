//! Voice prompt chip bus
//!
//! A one-way shift register on keypad lines 6 (strobe) and 7 (data). A long
//! strobe pulse opens the transfer, then each bit is presented on the data
//! line and latched by a strobe pulse, MSB first. The chip never answers.

use embedded_hal::delay::DelayNs;

use crate::config::{
    VOICE_BIT_GAP_US, VOICE_BIT_SETUP_US, VOICE_BIT_STROBE_US, VOICE_START_PULSE_MS,
};
use crate::hal::board::{Board, SharedLines};
use crate::hal::gpio::Gpio;
use crate::hal::pins::Pin;

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// Claim lines 6/7 as the voice chip bus
    pub fn voice(&mut self) -> VoiceBus<'_, G, D> {
        VoiceBus {
            lines: self.claim_shared(),
        }
    }
}

/// Voice chip transport
pub struct VoiceBus<'b, G: Gpio, D> {
    lines: SharedLines<'b, G, D>,
}

impl<G: Gpio, D: DelayNs> VoiceBus<'_, G, D> {
    /// Send one clip code to the chip
    pub fn send_id(&mut self, id: u8) {
        self.lines.set(Pin::VOICE_0);
        self.lines.delay_ms(VOICE_START_PULSE_MS);
        self.lines.clear(Pin::VOICE_0);

        for bit in (0..8).rev() {
            self.lines.write(Pin::VOICE_1, id & (1 << bit) != 0);
            self.lines.delay_us(VOICE_BIT_SETUP_US);
            self.lines.set(Pin::VOICE_0);
            self.lines.delay_us(VOICE_BIT_STROBE_US);
            self.lines.clear(Pin::VOICE_0);
            self.lines.delay_us(VOICE_BIT_GAP_US);
        }
    }
}
