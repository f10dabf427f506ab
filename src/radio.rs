//! Radio chip seams
//!
//! The transceiver (BK4819) and the FM broadcast receiver (BK1080) are
//! driven by their own drivers elsewhere. Audio playback and calibration
//! only need the handful of operations below, plus a snapshot of what the
//! radio is doing.

use crate::types::RadioFunction;

/// Transceiver register holding the tone generator configuration
pub const REG_TONE_CONFIG: u8 = 0x71;

/// Transceiver register taking the crystal trim
pub const REG_XTAL_TRIM: u8 = 0x3B;

/// Audio routing into the speaker path
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum AfMode {
    /// Silence
    #[default]
    Mute,
    /// FM demodulator output
    Open,
    /// Tone generator
    Beep,
    /// AM demodulator output
    Am,
}

#[cfg(feature = "embedded")]
impl defmt::Format for AfMode {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Mute => defmt::write!(f, "MUTE"),
            Self::Open => defmt::write!(f, "OPEN"),
            Self::Beep => defmt::write!(f, "BEEP"),
            Self::Am => defmt::write!(f, "AM"),
        }
    }
}

/// Transceiver operations used by audio playback and calibration
pub trait Transceiver {
    /// Read a 16-bit register
    fn read_register(&mut self, register: u8) -> u16;

    /// Write a 16-bit register
    fn write_register(&mut self, register: u8, value: u16);

    /// Start the tone generator at `frequency_hz`; `tuning_gain` selects the
    /// louder setting used for local beeps
    fn play_tone(&mut self, frequency_hz: u16, tuning_gain: bool);

    /// Silence the tone generator output
    fn enter_tx_mute(&mut self);

    /// Let the tone generator through
    fn exit_tx_mute(&mut self);

    /// Route audio to the speaker path
    fn set_af(&mut self, mode: AfMode);

    /// Wake the receiver from power save
    fn rx_turn_on(&mut self);

    /// Put the chip back to sleep
    fn sleep(&mut self);

    /// Stop all tones and resume receiving
    fn turn_off_tones_turn_on_rx(&mut self);
}

/// FM broadcast receiver operations used by audio playback
pub trait FmReceiver {
    /// Mute or unmute the broadcast audio
    fn mute(&mut self, mute: bool);
}

/// What the rest of the firmware reports about the radio
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[allow(clippy::struct_excessive_bools)]
pub struct RadioStatus {
    /// Current function
    pub function: RadioFunction,
    /// Power-save duty cycle has the receiver asleep
    pub rx_idle_mode: bool,
    /// Speaker left enabled by the receive path
    pub speaker_enabled: bool,
    /// Current receive channel is AM
    pub rx_is_am: bool,
    /// FM broadcast receiver active
    pub fm_radio_mode: bool,
    /// Air-copy screen owns the radio
    pub air_copy_screen: bool,
}

impl RadioStatus {
    /// AF routing for the current receive channel
    #[must_use]
    pub const fn receive_af(&self) -> AfMode {
        if self.rx_is_am {
            AfMode::Am
        } else {
            AfMode::Open
        }
    }

    /// Power-save with the receiver parked
    #[must_use]
    pub fn is_power_save_idle(&self) -> bool {
        self.function == RadioFunction::PowerSave && self.rx_idle_mode
    }
}

/// Stand-in for boards built without the FM broadcast application.
///
/// [`RadioStatus::fm_radio_mode`] never becomes true there, so nothing ever
/// asks it to mute.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoFmReceiver;

impl FmReceiver for NoFmReceiver {
    fn mute(&mut self, _mute: bool) {}
}
