//! Peripheral Drivers
//!
//! Bit-banged buses and the devices behind them. Drivers that use the
//! shared keypad lines hand out scoped claims on [`crate::hal::board::Board`].

pub mod backlight;
pub mod battery;
pub mod bk4819;
pub mod display;
pub mod eeprom;
pub mod i2c;
pub mod keyboard;
pub mod st7565;
pub mod voice;
