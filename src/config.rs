//! System configuration and hardware constants
//!
//! This module defines compile-time constants for the transceiver hardware.
//! Bus timings, EEPROM geometry and audio pacing are centralized here.

/// System clock frequency (PY32F071 HSI @ 24MHz)
#[cfg(not(feature = "board-v1"))]
pub const SYSTEM_CLOCK_HZ: u32 = 24_000_000;

/// System clock frequency (DP32G030 @ 48MHz)
#[cfg(feature = "board-v1")]
pub const SYSTEM_CLOCK_HZ: u32 = 48_000_000;

/// Period of the tick interrupt that drives all countdowns
pub const TICK_PERIOD_MS: u32 = 10;

/// Half-period of the bit-banged I2C clock in microseconds
pub const I2C_BIT_DELAY_US: u32 = 1;

/// Iterations spent sampling SDA for an acknowledge
pub const I2C_ACK_POLL_LIMIT: u16 = 255;

/// 24xx EEPROM address byte for writes (7-bit address 0x50)
pub const EEPROM_I2C_ADDR_WRITE: u8 = 0xA0;

/// 24xx EEPROM address byte for reads
pub const EEPROM_I2C_ADDR_READ: u8 = 0xA1;

/// EEPROM capacity in bytes
pub const EEPROM_SIZE: usize = 0x2000;

/// Page-write granularity used by every persisted record
pub const EEPROM_BLOCK_SIZE: usize = 8;

/// Time the EEPROM needs to commit a page write
pub const EEPROM_WRITE_DELAY_MS: u32 = 8;

/// Row-drive settling time while scanning the keypad
pub const KEYBOARD_SETTLE_US: u32 = 1;

/// Identical consecutive scans before a key press is reported
pub const KEY_DEBOUNCE_TICKS: u16 = 2;

/// Panel width in columns
pub const LCD_WIDTH: usize = 128;

/// Pages in the main frame buffer (the status line is a separate page)
pub const FRAME_PAGES: usize = 7;

/// Column bias between the controller RAM and the visible area
pub const LCD_COLUMN_OFFSET: u8 = 4;

/// LCD reset: low time
pub const LCD_RESET_ASSERT_MS: u32 = 20;

/// LCD reset: time before the controller accepts commands
pub const LCD_RESET_RECOVERY_MS: u32 = 120;

/// Busy-wait between LCD data and clock edges (sub-microsecond)
pub const LCD_CLOCK_DELAY_NS: u32 = 100;

/// Voice chip: strobe pulse that opens a transfer
pub const VOICE_START_PULSE_MS: u32 = 20;

/// Voice chip: data setup before the per-bit strobe
pub const VOICE_BIT_SETUP_US: u32 = 1000;

/// Voice chip: strobe high time per bit
pub const VOICE_BIT_STROBE_US: u32 = 1200;

/// Voice chip: gap after each bit
pub const VOICE_BIT_GAP_US: u32 = 200;

/// Maximum queued voice clips
pub const VOICE_QUEUE_CAPACITY: usize = 8;

/// Extra ticks appended to the final clip of a sequence
pub const VOICE_TAIL_TICKS: u16 = 3;

/// VOX hold-off after a beep, in ticks
pub const VOX_RESUME_AFTER_BEEP: u16 = 80;

/// VOX hold-off while a voice prompt plays, in ticks
pub const VOX_RESUME_DURING_VOICE: u16 = 2000;

/// Clip id offset for the Chinese prompt set
pub const VOICE_ID_CHINESE_BASE: u8 = 0x10;

/// Clip id offset for the English prompt set
pub const VOICE_ID_ENGLISH_BASE: u8 = 0x60;

/// Highest backlight setting
pub const BACKLIGHT_MAX: u8 = 5;

/// Transceiver register offset applied to the crystal trim
pub const XTAL_TRIM_REGISTER_BIAS: u16 = 22_656;
