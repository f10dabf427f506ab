//! ST7565 serial transport
//!
//! Write-only, MSB-first, clocked on the rising SCLK edge. A0 low selects
//! commands, A0 high selects display data. Chip select is held low for the
//! lifetime of an [`LcdBus`].

use embedded_hal::delay::DelayNs;

use crate::config::{LCD_CLOCK_DELAY_NS, LCD_RESET_ASSERT_MS, LCD_RESET_RECOVERY_MS};
use crate::hal::board::Board;
use crate::hal::gpio::Gpio;
use crate::hal::pins::Pin;

/// ST7565 commands
pub mod cmd {
    /// Software reset
    pub const RESET: u8 = 0xE2;
    /// LCD bias 1/9
    pub const BIAS_1_9: u8 = 0xA2;
    /// COM output scan direction: normal
    pub const COM_NORMAL: u8 = 0xC0;
    /// SEG direction: reversed
    pub const SEG_REVERSE: u8 = 0xA1;
    /// Normal (non-inverted) display
    pub const DISPLAY_NORMAL: u8 = 0xA6;
    /// Show RAM contents
    pub const ALL_POINTS_OFF: u8 = 0xA4;
    /// Regulation resistor ratio
    pub const REGULATION_RATIO: u8 = 0x24;
    /// Electronic volume mode set, followed by the level byte
    pub const SET_CONTRAST: u8 = 0x81;
    /// Electronic volume level
    pub const CONTRAST_LEVEL: u8 = 0x1F;
    /// Power control: booster, regulator, follower
    pub const POWER_BOOSTER: u8 = 0x2B;
    /// Power control: regulator, follower
    pub const POWER_REGULATOR: u8 = 0x2E;
    /// Power control: everything on
    pub const POWER_ALL: u8 = 0x2F;
    /// Display start line 0
    pub const START_LINE_0: u8 = 0x40;
    /// Display on
    pub const DISPLAY_ON: u8 = 0xAF;
    /// Page address base
    pub const PAGE_ADDRESS: u8 = 0xB0;
    /// Column address, high nibble
    pub const COLUMN_HIGH: u8 = 0x10;
}

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// Pulse the LCD reset line and wait for the controller
    pub fn lcd_hardware_reset(&mut self) {
        self.gpio_mut().set_output(Pin::St7565Res);
        self.delay_ms(1);
        self.gpio_mut().clear_output(Pin::St7565Res);
        self.delay_ms(LCD_RESET_ASSERT_MS);
        self.gpio_mut().set_output(Pin::St7565Res);
        self.delay_ms(LCD_RESET_RECOVERY_MS);
    }

    /// Select the LCD controller
    pub fn lcd(&mut self) -> LcdBus<'_, G, D> {
        self.gpio_mut().clear_output(Pin::St7565Cs);
        LcdBus { board: self }
    }
}

/// LCD transport with chip select asserted
pub struct LcdBus<'b, G: Gpio, D> {
    board: &'b mut Board<G, D>,
}

impl<G: Gpio, D: DelayNs> LcdBus<'_, G, D> {
    /// Shift one byte out MSB-first
    pub fn write_byte(&mut self, value: u8) {
        self.board.gpio_mut().clear_output(Pin::St7565Sclk);
        for bit in (0..8).rev() {
            self.board
                .gpio_mut()
                .write(Pin::St7565Sda, value & (1 << bit) != 0);
            self.board.delay_mut().delay_ns(LCD_CLOCK_DELAY_NS);
            self.board.gpio_mut().set_output(Pin::St7565Sclk);
            self.board.delay_mut().delay_ns(LCD_CLOCK_DELAY_NS);
            self.board.gpio_mut().clear_output(Pin::St7565Sclk);
        }
    }

    /// Shift a run of bytes
    pub fn write_all(&mut self, bytes: &[u8]) {
        for &b in bytes {
            self.write_byte(b);
        }
    }

    /// Address a page and a raw controller column (already biased)
    pub fn select_column_and_line(&mut self, column: u8, line: u8) {
        self.command_mode();
        self.write_byte(cmd::PAGE_ADDRESS + line);
        self.write_byte(cmd::COLUMN_HIGH | ((column >> 4) & 0x0F));
        self.write_byte(column & 0x0F);
    }

    /// A0 low
    pub fn command_mode(&mut self) {
        self.board.gpio_mut().clear_output(Pin::St7565A0);
    }

    /// A0 high
    pub fn data_mode(&mut self) {
        self.board.gpio_mut().set_output(Pin::St7565A0);
    }

    /// Controller power-up sequence; the panel RAM is left undefined
    pub fn configure(&mut self) {
        self.command_mode();
        self.write_byte(cmd::RESET);
        self.board.delay_ms(120);
        self.write_all(&[
            cmd::BIAS_1_9,
            cmd::COM_NORMAL,
            cmd::SEG_REVERSE,
            cmd::DISPLAY_NORMAL,
            cmd::ALL_POINTS_OFF,
            cmd::REGULATION_RATIO,
            cmd::SET_CONTRAST,
            cmd::CONTRAST_LEVEL,
            cmd::POWER_BOOSTER,
        ]);
        self.board.delay_ms(1);
        self.write_byte(cmd::POWER_REGULATOR);
        self.board.delay_ms(1);
        self.write_all(&[cmd::POWER_ALL; 4]);
        self.board.delay_ms(40);
        self.write_all(&[cmd::START_LINE_0, cmd::DISPLAY_ON]);
    }
}

impl<G: Gpio, D> Drop for LcdBus<'_, G, D> {
    fn drop(&mut self) {
        self.board.gpio_mut().set_output(Pin::St7565Cs);
    }
}
