//! K5 Firmware Library
//!
//! Peripheral layer for the UV-K5 family of handheld transceivers: the
//! bit-banged buses, the devices behind them and the persisted settings.
//! Two hardware revisions are supported; the `board-v1` feature selects the
//! DP32G030 board, the PY32F071 board is the default.
//!
//! # Architecture
//!
//! The firmware is organized in layers:
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                      DEVICE CONTEXT                          │
//! │        boot  │  main loop step  │  beeps and prompts         │
//! ├─────────────────────────────────────────────────────────────┤
//! │                 SETTINGS  /  AUDIO                           │
//! │  Config record  │  Calibration  │  Reset  │  Voice queue     │
//! ├─────────────────────────────────────────────────────────────┤
//! │                       DRIVERS                                │
//! │  I2C  │  EEPROM  │  ST7565  │  Keypad  │  Voice  │  BK4819   │
//! ├─────────────────────────────────────────────────────────────┤
//! │                         HAL                                  │
//! │  Pin maps (v1/v2)  │  GPIO  │  Shared lines  │  Tick  │  ADC │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Principles
//!
//! - **Shared lines are a capability**: bus drivers borrow the board and
//!   return the keypad lines to idle when dropped
//! - **Type-driven design**: closed pin and key enums, channel and frequency
//!   newtypes
//! - **No unsafe in application code**: register access is isolated in
//!   `hal::port`
//! - **Host testable**: everything above the port registers runs against a
//!   simulated board
//! - **Explicit error handling**: bus and storage failures return `Result`

#![cfg_attr(feature = "embedded", no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Hardware Abstraction Layer
///
/// Pin maps, GPIO primitives, shared-line claims and the tick counters.
pub mod hal;

/// Peripheral Drivers
///
/// Bit-banged I2C, EEPROM, LCD, keypad, voice chip and transceiver access.
pub mod drivers;

/// Persisted Settings
///
/// EEPROM layout, configuration record, calibration and factory reset.
pub mod settings;

/// Audio Output
///
/// Beeps and voice prompt sequencing.
pub mod audio;

/// Radio chip seams and status
pub mod radio;

/// Top-level device context
pub mod device;

/// Shared types used across modules
pub mod types;

/// System configuration and constants
pub mod config;

/// Prelude module for common imports
#[cfg(feature = "embedded")]
pub mod prelude {
    //! Convenient re-exports for common types and traits.

    pub use crate::config::*;
    pub use crate::types::*;

    // Common traits
    pub use crate::drivers::eeprom::Storage;
    pub use crate::hal::gpio::Gpio;
    pub use crate::radio::{FmReceiver, Transceiver};
    pub use embedded_hal::delay::DelayNs;

    // Board
    pub use crate::hal::board::Board;
    pub use crate::hal::delay::CycleDelay;
    pub use crate::hal::gpio::PortGpio;
    pub use crate::hal::pins::ActiveBoard;

    // Error handling
    pub use core::result::Result;

    // Logging
    pub use defmt::{debug, error, info, trace, warn};
}
