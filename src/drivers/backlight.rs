//! LCD backlight

use crate::hal::board::Board;
use crate::hal::gpio::Gpio;
use crate::hal::pins::Pin;
use crate::hal::tick::TickCounters;

impl<G: Gpio, D> Board<G, D> {
    /// Light the backlight for the configured time.
    ///
    /// `setting` is the persisted backlight value; zero keeps it dark. The
    /// tick counter switches it off after `1 + 2 * setting` half-second
    /// steps.
    pub fn backlight_on(&mut self, setting: u8, ticks: &TickCounters) {
        if setting != 0 {
            self.backlight_force_on();
            ticks.set_backlight(1 + setting.saturating_mul(2));
        }
    }

    /// Light the backlight with no timeout
    pub fn backlight_force_on(&mut self) {
        self.gpio_mut().set_output(Pin::Backlight);
    }

    /// Switch the backlight off
    pub fn backlight_force_off(&mut self) {
        self.gpio_mut().clear_output(Pin::Backlight);
    }
}
