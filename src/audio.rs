//! Audio Output
//!
//! Beeps from the transceiver tone generator and spoken prompts from the
//! voice chip share the speaker amplifier with received audio. Everything
//! that plays borrows the pieces it needs through [`AudioOutput`] for the
//! duration of one call.

pub mod beep;
pub mod sequencer;
pub mod voice;

pub use beep::BeepKind;
pub use sequencer::{VoiceSequencer, VoiceState};
pub use voice::{VoiceId, VoiceQueue};

use crate::config::VOX_RESUME_AFTER_BEEP;
use crate::hal::board::Board;
use crate::hal::gpio::Gpio;
use crate::hal::tick::TickCounters;
use crate::radio::{FmReceiver, RadioStatus, Transceiver};

/// Everything an audio routine drives, borrowed for one call
pub struct AudioOutput<'a, G, D, T, F> {
    /// Amplifier and voice bus
    pub board: &'a mut Board<G, D>,
    /// Tone generator and AF routing
    pub transceiver: &'a mut T,
    /// Broadcast receiver
    pub fm: &'a mut F,
    /// Voice countdown and VOX hold-off
    pub ticks: &'a TickCounters,
    /// Radio state at the time of the call
    pub status: RadioStatus,
}

impl<G: Gpio, D, T: Transceiver, F: FmReceiver> AudioOutput<'_, G, D, T, F> {
    fn fm_mute(&mut self, mute: bool) {
        if self.status.fm_radio_mode {
            self.fm.mute(mute);
        }
    }

    /// Hand the speaker back to received audio once prompts are done
    fn restore_receive_audio(&mut self) {
        if self.status.function.is_listening() {
            self.transceiver.set_af(self.status.receive_af());
        }
        self.fm_mute(false);
        if !self.status.speaker_enabled {
            self.board.set_audio_path(false);
        }
        self.ticks.set_vox_resume(VOX_RESUME_AFTER_BEEP);
    }
}
