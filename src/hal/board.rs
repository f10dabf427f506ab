//! Board model and shared-line claims
//!
//! The keypad row lines double as the EEPROM bus (lines 4/5) and the voice
//! chip bus (lines 6/7). A bus driver gets the lines through a
//! [`SharedLines`] claim that borrows the board mutably, so two users can
//! never drive them at once, and the claim puts the lines back into the
//! keypad idle state when it is dropped.

use embedded_hal::delay::DelayNs;

use super::gpio::Gpio;
use super::pins::{Direction, Pin};

/// GPIO plus delay source for one physical radio
pub struct Board<G, D> {
    gpio: G,
    delay: D,
}

impl<G: Gpio, D> Board<G, D> {
    /// Wrap the GPIO ports and a busy-wait delay
    pub const fn new(gpio: G, delay: D) -> Self {
        Self { gpio, delay }
    }

    /// Configure pin directions and park every line at its idle level
    pub fn init_pins(&mut self) {
        for pin in Pin::COLUMNS {
            self.gpio.set_direction(pin, Direction::Input);
        }
        self.gpio.set_direction(Pin::Ptt, Direction::Input);

        for pin in Pin::ROWS {
            self.gpio.set_direction(pin, Direction::Output);
        }
        for pin in [
            Pin::Backlight,
            Pin::St7565A0,
            Pin::St7565Res,
            Pin::St7565Cs,
            Pin::St7565Sclk,
            Pin::St7565Sda,
            Pin::Bk1080,
            Pin::Bk4819Scn,
            Pin::Bk4819Scl,
            Pin::Bk4819Sda,
            Pin::Flashlight,
            Pin::AudioPath,
        ] {
            self.gpio.set_direction(pin, Direction::Output);
        }

        self.gpio.set_output(Pin::St7565Cs);
        self.gpio.clear_output(Pin::AudioPath);
        self.gpio.clear_output(Pin::Flashlight);
        self.restore_idle_lines();
    }

    /// Keypad idle: lines 4, 5 and 7 high, line 6 low, all driven
    pub fn restore_idle_lines(&mut self) {
        self.gpio.set_direction(Pin::Keyboard5, Direction::Output);
        self.gpio.set_output(Pin::Keyboard4);
        self.gpio.set_output(Pin::Keyboard5);
        self.gpio.clear_output(Pin::Keyboard6);
        self.gpio.set_output(Pin::Keyboard7);
    }

    /// Claim the keypad/EEPROM/voice lines
    pub fn claim_shared(&mut self) -> SharedLines<'_, G, D> {
        SharedLines { board: self }
    }

    /// Audio amplifier on or off
    pub fn set_audio_path(&mut self, on: bool) {
        self.gpio.write(Pin::AudioPath, on);
    }

    /// Flashlight on or off
    pub fn set_flashlight(&mut self, on: bool) {
        self.gpio.write(Pin::Flashlight, on);
    }

    /// Invert the flashlight
    pub fn toggle_flashlight(&mut self) {
        self.gpio.toggle_output(Pin::Flashlight);
    }

    /// PTT is active low
    pub fn is_ptt_pressed(&mut self) -> bool {
        !self.gpio.read_input(Pin::Ptt)
    }

    /// GPIO ports
    pub const fn gpio(&self) -> &G {
        &self.gpio
    }

    /// GPIO ports, mutably
    pub fn gpio_mut(&mut self) -> &mut G {
        &mut self.gpio
    }

    /// Delay source
    pub fn delay_mut(&mut self) -> &mut D {
        &mut self.delay
    }

    /// Give back the ports and the delay
    pub fn into_parts(self) -> (G, D) {
        (self.gpio, self.delay)
    }
}

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// Busy-wait
    pub fn delay_ms(&mut self, ms: u32) {
        self.delay.delay_ms(ms);
    }

    /// Busy-wait
    pub fn delay_us(&mut self, us: u32) {
        self.delay.delay_us(us);
    }
}

/// Exclusive use of keypad lines 4..7 for a bus transfer
pub struct SharedLines<'b, G: Gpio, D> {
    board: &'b mut Board<G, D>,
}

impl<G: Gpio, D: DelayNs> SharedLines<'_, G, D> {
    /// Drive a claimed line
    pub fn write(&mut self, pin: Pin, high: bool) {
        self.board.gpio.write(pin, high);
    }

    /// Drive a claimed line high
    pub fn set(&mut self, pin: Pin) {
        self.board.gpio.set_output(pin);
    }

    /// Drive a claimed line low
    pub fn clear(&mut self, pin: Pin) {
        self.board.gpio.clear_output(pin);
    }

    /// Sample a line
    pub fn read(&mut self, pin: Pin) -> bool {
        self.board.gpio.read_input(pin)
    }

    /// Change a line's direction
    pub fn set_direction(&mut self, pin: Pin, direction: Direction) {
        self.board.gpio.set_direction(pin, direction);
    }

    /// Busy-wait
    pub fn delay_us(&mut self, us: u32) {
        self.board.delay.delay_us(us);
    }

    /// Busy-wait
    pub fn delay_ms(&mut self, ms: u32) {
        self.board.delay.delay_ms(ms);
    }
}

impl<G: Gpio, D> Drop for SharedLines<'_, G, D> {
    fn drop(&mut self) {
        self.board.restore_idle_lines();
    }
}
