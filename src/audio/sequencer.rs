//! Voice prompt sequencing
//!
//! A sequence is queued with [`VoiceQueue::enqueue_voice_id`] and
//! [`VoiceQueue::enqueue_digits`], started with
//! [`VoiceSequencer::play_single`] and then advanced clip by clip from the
//! main loop whenever the tick counter raises the play-queued flag.

use embedded_hal::delay::DelayNs;

use super::voice::{lookup_clip, Clip, VoiceQueue};
use super::AudioOutput;
use crate::config::{VOICE_TAIL_TICKS, VOX_RESUME_DURING_VOICE};
use crate::hal::gpio::Gpio;
use crate::radio::{AfMode, FmReceiver, Transceiver};
use crate::settings::config::VoicePrompt;

/// Where playback stands
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum VoiceState {
    /// Nothing playing
    #[default]
    Idle,
    /// First clip sent, the rest follows from the tick countdown
    PlayingSingle,
    /// Working through the queue
    PlayingQueued,
}

#[cfg(feature = "embedded")]
impl defmt::Format for VoiceState {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Idle => defmt::write!(f, "Idle"),
            Self::PlayingSingle => defmt::write!(f, "PlayingSingle"),
            Self::PlayingQueued => defmt::write!(f, "PlayingQueued"),
        }
    }
}

/// Voice queue plus playback state
#[derive(Clone, Debug, Default)]
pub struct VoiceSequencer {
    /// Pending clips
    pub queue: VoiceQueue,
    state: VoiceState,
}

impl VoiceSequencer {
    /// Idle with an empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self {
            queue: VoiceQueue::new(),
            state: VoiceState::Idle,
        }
    }

    /// Current playback state
    #[must_use]
    pub const fn state(&self) -> VoiceState {
        self.state
    }

    fn stop(&mut self) {
        self.queue.clear();
        self.state = VoiceState::Idle;
    }

    /// Play slot 0 of the queue.
    ///
    /// With `blocking` the call waits out the clip and hands the speaker
    /// back before returning, dropping the rest of the queue. Otherwise the
    /// next-voice countdown is armed and queued playback continues from
    /// slot 1. An empty queue, prompts off or an unknown clip clears the
    /// queue without sounding.
    pub fn play_single<G, D, T, F>(
        &mut self,
        out: &mut AudioOutput<'_, G, D, T, F>,
        language: VoicePrompt,
        blocking: bool,
    ) where
        G: Gpio,
        D: DelayNs,
        T: Transceiver,
        F: FmReceiver,
    {
        let Some(first) = self.queue.ids().first().copied() else {
            self.stop();
            return;
        };
        let Some(Clip { code, mut ticks }) = lookup_clip(language, first) else {
            self.stop();
            return;
        };

        if out.status.function.is_listening() {
            out.transceiver.set_af(AfMode::Mute);
        }
        out.fm_mute(true);
        out.board.set_audio_path(true);
        out.ticks.set_vox_resume(VOX_RESUME_DURING_VOICE);
        out.board.delay_ms(5);
        out.board.voice().send_id(code);

        if self.queue.len() == 1 {
            ticks += VOICE_TAIL_TICKS;
        }

        if blocking {
            out.board.delay_ms(u32::from(ticks) * 10);
            out.restore_receive_audio();
            self.stop();
        } else {
            self.queue.seek(1);
            out.ticks.arm_next_voice(ticks);
            self.state = VoiceState::PlayingSingle;
        }
    }

    /// Play the next queued clip, or finish the sequence.
    ///
    /// Called when the next-voice countdown expires. A clip the language
    /// has no recording for ends the sequence.
    pub fn play_queued<G, D, T, F>(
        &mut self,
        out: &mut AudioOutput<'_, G, D, T, F>,
        language: VoicePrompt,
    ) where
        G: Gpio,
        D: DelayNs,
        T: Transceiver,
        F: FmReceiver,
    {
        if language != VoicePrompt::Off {
            if let Some(id) = self.queue.pop() {
                if let Some(Clip { code, mut ticks }) = lookup_clip(language, id) {
                    if self.queue.is_drained() {
                        ticks += VOICE_TAIL_TICKS;
                    }
                    out.board.voice().send_id(code);
                    out.ticks.arm_next_voice(ticks);
                    out.ticks.set_vox_resume(VOX_RESUME_DURING_VOICE);
                    self.state = VoiceState::PlayingQueued;
                    return;
                }
            }
        }

        out.restore_receive_audio();
        self.stop();
    }

    /// Advance playback if the countdown has expired
    pub fn poll<G, D, T, F>(&mut self, out: &mut AudioOutput<'_, G, D, T, F>, language: VoicePrompt)
    where
        G: Gpio,
        D: DelayNs,
        T: Transceiver,
        F: FmReceiver,
    {
        if out.ticks.take_play_queued() {
            self.play_queued(out, language);
        }
    }
}
