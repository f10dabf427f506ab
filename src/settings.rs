//! Persisted settings
//!
//! Byte layout, decoding with per-field defaults, factory calibration,
//! channel records and factory reset.

pub mod calibration;
pub mod channel;
pub mod config;
pub mod dtmf;
pub mod layout;
pub mod reset;

pub use calibration::{load_calibration, BatteryCalibration, Calibration};
pub use config::Settings;
pub use reset::factory_reset;
