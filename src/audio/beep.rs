//! Key and alert beeps

use embedded_hal::delay::DelayNs;

use super::AudioOutput;
use crate::config::VOX_RESUME_AFTER_BEEP;
use crate::hal::gpio::Gpio;
use crate::radio::{FmReceiver, Transceiver, REG_TONE_CONFIG};

/// Beep patterns
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum BeepKind {
    /// Nothing to play
    #[default]
    None,
    /// 1 kHz, 60 ms; key confirmation
    Khz1_60msOptional,
    /// 500 Hz double; key rejection
    Hz500_60msDoubleOptional,
    /// 440 Hz, 500 ms; always sounds
    Hz440_500ms,
    /// 500 Hz double; always sounds
    Hz500_60msDouble,
}

impl BeepKind {
    /// Sounds even with key beeps disabled
    #[must_use]
    pub const fn is_critical(self) -> bool {
        matches!(self, Self::Hz440_500ms | Self::Hz500_60msDouble)
    }

    const fn tone_hz(self) -> u16 {
        match self {
            Self::Khz1_60msOptional => 1000,
            Self::Hz500_60msDoubleOptional | Self::Hz500_60msDouble => 500,
            Self::None | Self::Hz440_500ms => 440,
        }
    }

    const fn is_double(self) -> bool {
        matches!(self, Self::Hz500_60msDoubleOptional | Self::Hz500_60msDouble)
    }

    const fn final_ms(self) -> u32 {
        match self {
            Self::Hz440_500ms => 500,
            _ => 60,
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for BeepKind {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::None => defmt::write!(f, "None"),
            Self::Khz1_60msOptional => defmt::write!(f, "1kHz/60ms"),
            Self::Hz500_60msDoubleOptional => defmt::write!(f, "500Hz/60ms x2 (optional)"),
            Self::Hz440_500ms => defmt::write!(f, "440Hz/500ms"),
            Self::Hz500_60msDouble => defmt::write!(f, "500Hz/60ms x2"),
        }
    }
}

impl<G: Gpio, D: DelayNs, T: Transceiver, F: FmReceiver> AudioOutput<'_, G, D, T, F> {
    /// Play a beep through the tone generator, blocking until done.
    ///
    /// Returns whether anything sounded. Optional kinds need `beep_control`;
    /// nothing sounds over received audio or during air copy.
    pub fn play_beep(&mut self, kind: BeepKind, beep_control: bool) -> bool {
        if kind == BeepKind::None {
            return false;
        }
        if !kind.is_critical() && !beep_control {
            return false;
        }
        if self.status.air_copy_screen || self.status.function.is_listening() {
            return false;
        }

        let tone_config = self.transceiver.read_register(REG_TONE_CONFIG);
        self.board.set_audio_path(false);
        let power_save_idle = self.status.is_power_save_idle();
        if power_save_idle {
            self.transceiver.rx_turn_on();
        }
        self.fm_mute(true);
        self.board.delay_ms(20);

        self.transceiver.play_tone(kind.tone_hz(), true);
        self.board.delay_ms(2);
        self.board.set_audio_path(true);
        self.board.delay_ms(60);

        if kind.is_double() {
            self.transceiver.exit_tx_mute();
            self.board.delay_ms(60);
            self.transceiver.enter_tx_mute();
            self.board.delay_ms(20);
        }
        self.transceiver.exit_tx_mute();
        self.board.delay_ms(kind.final_ms());
        self.transceiver.enter_tx_mute();
        self.board.delay_ms(20);
        self.board.set_audio_path(false);

        self.ticks.set_vox_resume(VOX_RESUME_AFTER_BEEP);

        self.board.delay_ms(5);
        self.transceiver.turn_off_tones_turn_on_rx();
        self.board.delay_ms(5);
        self.transceiver.write_register(REG_TONE_CONFIG, tone_config);
        if self.status.speaker_enabled {
            self.board.set_audio_path(true);
        }
        self.fm_mute(false);
        if power_save_idle {
            self.transceiver.sleep();
        }
        true
    }
}
