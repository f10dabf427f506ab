//! Matrix keypad
//!
//! Four row outputs (keypad lines 4..7) against four column inputs. The two
//! side keys short columns 0 and 1 straight to ground, so they are checked
//! first with every row released. One scan reports at most one key; the
//! first match wins and there is no debouncing here.

use embedded_hal::delay::DelayNs;

use crate::config::KEYBOARD_SETTLE_US;
use crate::hal::board::{Board, SharedLines};
use crate::hal::gpio::Gpio;
use crate::hal::pins::Pin;

/// Key identifier
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum KeyCode {
    /// Digit 0
    Key0 = 0,
    /// Digit 1
    Key1 = 1,
    /// Digit 2
    Key2 = 2,
    /// Digit 3
    Key3 = 3,
    /// Digit 4
    Key4 = 4,
    /// Digit 5
    Key5 = 5,
    /// Digit 6
    Key6 = 6,
    /// Digit 7
    Key7 = 7,
    /// Digit 8
    Key8 = 8,
    /// Digit 9
    Key9 = 9,
    /// Menu
    Menu = 10,
    /// Up arrow
    Up = 11,
    /// Down arrow
    Down = 12,
    /// Exit
    Exit = 13,
    /// Star
    Star = 14,
    /// Function
    F = 15,
    /// Push-to-talk
    Ptt = 21,
    /// Lower side key
    Side2 = 22,
    /// Upper side key
    Side1 = 23,
    /// No key
    #[default]
    Invalid = 0xFF,
}

impl KeyCode {
    /// Digit value for the number keys
    #[must_use]
    pub const fn digit(self) -> Option<u8> {
        let v = self as u8;
        if v <= 9 {
            Some(v)
        } else {
            None
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for KeyCode {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Key({})", *self as u8);
    }
}

/// Keys read on each row, indexed by column
const ROW_KEYS: [[KeyCode; 4]; 4] = [
    [KeyCode::Menu, KeyCode::Key1, KeyCode::Key4, KeyCode::Key7],
    [KeyCode::Up, KeyCode::Key2, KeyCode::Key5, KeyCode::Key8],
    [KeyCode::Down, KeyCode::Key3, KeyCode::Key6, KeyCode::Key9],
    [KeyCode::Exit, KeyCode::Star, KeyCode::Key0, KeyCode::F],
];

/// Debounce bookkeeping owned by the input handler
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyState {
    /// Latest scan result
    pub reading0: KeyCode,
    /// Previous scan result
    pub reading1: KeyCode,
    /// Consecutive identical scans
    pub debounce_counter: u16,
    /// F was pressed and is waiting for a second key
    pub was_f_key_pressed: bool,
}

impl KeyState {
    /// Nothing pressed
    #[must_use]
    pub const fn new() -> Self {
        Self {
            reading0: KeyCode::Invalid,
            reading1: KeyCode::Invalid,
            debounce_counter: 0,
            was_f_key_pressed: false,
        }
    }

    /// Record one scan. Returns the number of consecutive identical scans.
    pub fn record(&mut self, key: KeyCode) -> u16 {
        self.reading1 = self.reading0;
        self.reading0 = key;
        if self.reading0 == self.reading1 {
            self.debounce_counter = self.debounce_counter.saturating_add(1);
        } else {
            self.debounce_counter = 0;
        }
        self.debounce_counter
    }
}

impl Default for KeyState {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// Claim the row lines for a keypad scan
    pub fn keyboard(&mut self) -> Keyboard<'_, G, D> {
        Keyboard {
            lines: self.claim_shared(),
        }
    }
}

/// Keypad scanner holding the row lines
pub struct Keyboard<'b, G: Gpio, D> {
    lines: SharedLines<'b, G, D>,
}

impl<G: Gpio, D: DelayNs> Keyboard<'_, G, D> {
    fn settle(&mut self) {
        self.lines.delay_us(KEYBOARD_SETTLE_US);
    }

    fn pressed_column(&mut self) -> Option<usize> {
        Pin::COLUMNS.iter().position(|&c| !self.lines.read(c))
    }

    fn row(&mut self, row: usize) -> Option<KeyCode> {
        self.pressed_column().map(|col| ROW_KEYS[row][col])
    }

    fn scan(&mut self) -> Option<KeyCode> {
        for pin in Pin::ROWS {
            self.lines.set(pin);
        }
        self.settle();

        if !self.lines.read(Pin::Keyboard0) {
            return Some(KeyCode::Side1);
        }
        if !self.lines.read(Pin::Keyboard1) {
            return Some(KeyCode::Side2);
        }

        self.lines.clear(Pin::Keyboard4);
        self.settle();
        if let Some(key) = self.row(0) {
            return Some(key);
        }

        self.lines.clear(Pin::Keyboard5);
        self.settle();
        self.lines.set(Pin::Keyboard4);
        self.settle();
        if let Some(key) = self.row(1) {
            return Some(key);
        }

        self.lines.clear(Pin::Keyboard4);
        self.settle();
        self.lines.set(Pin::Keyboard5);
        self.settle();
        self.lines.set(Pin::Keyboard4);
        self.settle();
        self.lines.clear(Pin::Keyboard6);
        self.settle();
        if let Some(key) = self.row(2) {
            return Some(key);
        }

        self.lines.clear(Pin::Keyboard7);
        self.settle();
        self.lines.set(Pin::Keyboard6);
        self.settle();
        self.row(3)
    }

    /// Scan once and leave the rows idle: 4, 5 and 7 high, 6 low
    pub fn poll(&mut self) -> KeyCode {
        let key = self.scan().unwrap_or(KeyCode::Invalid);
        self.lines.set(Pin::Keyboard4);
        self.lines.set(Pin::Keyboard5);
        self.lines.clear(Pin::Keyboard6);
        self.lines.set(Pin::Keyboard7);
        key
    }
}
