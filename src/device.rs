//! Device context
//!
//! Owns every piece of peripheral state the firmware keeps between main
//! loop iterations. The tick counters are shared with the tick interrupt
//! and are only borrowed.

use embedded_hal::delay::DelayNs;

use crate::audio::{AudioOutput, BeepKind, VoiceSequencer};
use crate::config::KEY_DEBOUNCE_TICKS;
use crate::drivers::display::Display;
use crate::drivers::eeprom::StorageResult;
use crate::drivers::keyboard::{KeyCode, KeyState};
use crate::hal::board::Board;
use crate::hal::gpio::Gpio;
use crate::hal::tick::TickCounters;
use crate::radio::{FmReceiver, RadioStatus, Transceiver};
use crate::settings::{load_calibration, Calibration, Settings};

/// One radio: board, radio chips and everything loaded at boot
pub struct Device<'t, G, D, T, F> {
    /// Pins and delay
    pub board: Board<G, D>,
    /// BK4819
    pub transceiver: T,
    /// BK1080
    pub fm: F,
    /// Frame buffer and status line
    pub display: Display,
    /// Configuration record
    pub settings: Settings,
    /// Factory calibration
    pub calibration: Calibration,
    /// Keypad debounce state
    pub keys: KeyState,
    /// Voice prompt playback
    pub voice: VoiceSequencer,
    /// Radio state reported by the radio control layer
    pub status: RadioStatus,
    ticks: &'t TickCounters,
}

macro_rules! audio_output {
    ($dev:expr) => {
        AudioOutput {
            board: &mut $dev.board,
            transceiver: &mut $dev.transceiver,
            fm: &mut $dev.fm,
            ticks: $dev.ticks,
            status: $dev.status,
        }
    };
}

impl<'t, G, D, T, F> Device<'t, G, D, T, F>
where
    G: Gpio,
    D: DelayNs,
    T: Transceiver,
    F: FmReceiver,
{
    /// Assemble a device with default settings; call [`Device::boot`] next
    pub fn new(board: Board<G, D>, transceiver: T, fm: F, ticks: &'t TickCounters) -> Self {
        Self {
            board,
            transceiver,
            fm,
            display: Display::new(),
            settings: Settings::default(),
            calibration: Calibration::default(),
            keys: KeyState::new(),
            voice: VoiceSequencer::new(),
            status: RadioStatus::default(),
            ticks,
        }
    }

    /// Bring up pins and the LCD, then load settings and calibration.
    ///
    /// A storage failure leaves the defaults in place for whatever was not
    /// loaded yet.
    ///
    /// # Errors
    ///
    /// The first EEPROM failure.
    pub fn boot(&mut self) -> StorageResult<()> {
        self.board.init_pins();
        self.display.init(&mut self.board);

        let settings = Settings::load(&mut self.board.eeprom())?;
        self.settings = settings;

        let calibration = load_calibration(
            &mut self.board.eeprom(),
            &self.settings,
            &mut self.transceiver,
        )?;
        self.calibration = calibration;

        self.board.backlight_on(self.settings.backlight, self.ticks);

        #[cfg(feature = "embedded")]
        defmt::info!(
            "settings loaded: squelch {}, backlight {}, voice {}",
            self.settings.squelch_level,
            self.settings.backlight,
            self.settings.voice_prompt.raw()
        );
        Ok(())
    }

    /// One main loop pass.
    ///
    /// Scans the keypad when the tick asked for it, advances queued voice
    /// playback and switches the backlight off when its time is up. Returns
    /// a key once it has been stable for the debounce period.
    pub fn step(&mut self) -> Option<KeyCode> {
        let mut pressed = None;
        if self.ticks.take_key_scan() {
            let key = self.board.keyboard().poll();
            if self.keys.record(key) == KEY_DEBOUNCE_TICKS && key != KeyCode::Invalid {
                pressed = Some(key);
            }
        }

        let language = self.settings.voice_prompt;
        self.voice.poll(&mut audio_output!(self), language);

        if self.ticks.take_backlight_expired() {
            self.board.backlight_force_off();
        }
        pressed
    }

    /// Play a beep, honouring the key-beep setting
    pub fn play_beep(&mut self, kind: BeepKind) -> bool {
        let beep_control = self.settings.beep_control;
        audio_output!(self).play_beep(kind, beep_control)
    }

    /// Start the queued voice sequence
    pub fn play_voice(&mut self, blocking: bool) {
        let language = self.settings.voice_prompt;
        self.voice.play_single(&mut audio_output!(self), language, blocking);
    }

    /// Tick counters shared with the interrupt
    pub const fn ticks(&self) -> &'t TickCounters {
        self.ticks
    }
}
