//! Factory calibration
//!
//! Read once at boot after the configuration record, since the VOX and mic
//! entries are indexed by configured levels.

use super::config::Settings;
use super::layout;
use crate::config::XTAL_TRIM_REGISTER_BIAS;
use crate::drivers::eeprom::{Storage, StorageResult};
use crate::radio::{Transceiver, REG_XTAL_TRIM};
use crate::types::Band;

/// Battery curve: five level thresholds and the 7.6 V reference at `[3]`
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BatteryCalibration([u16; 6]);

impl BatteryCalibration {
    /// Wrap raw calibration words
    #[must_use]
    pub const fn new(points: [u16; 6]) -> Self {
        Self(points)
    }

    /// Raw calibration words
    #[must_use]
    pub const fn points(&self) -> &[u16; 6] {
        &self.0
    }

    fn from_stored(raw: [u16; 6]) -> Self {
        let mut points = raw;
        if points[0] >= 5000 {
            points[0] = 1900;
            points[1] = 2000;
        }
        points[5] = 2300;
        Self(points)
    }
}

impl Default for BatteryCalibration {
    fn default() -> Self {
        Self([1900, 2000, 2100, 2200, 2250, 2300])
    }
}

/// Every calibration value the peripheral layer consumes
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct Calibration {
    /// Four RSSI thresholds per band
    pub rssi: [[u16; 4]; Band::COUNT],
    /// Battery curve
    pub battery: BatteryCalibration,
    /// VOX on threshold for the configured level
    pub vox1_threshold: u16,
    /// VOX off threshold for the configured level
    pub vox0_threshold: u16,
    /// Mic gain for the configured sensitivity, 0..32
    pub mic_sensitivity_tuning: u8,
    /// Crystal trim, -1000..1000
    pub crystal_trim: i16,
    /// 9-bit tuning word
    pub tuning_word_a: u16,
    /// 9-bit tuning word
    pub tuning_word_b: u16,
    /// Receive volume gain, 0..64
    pub volume_gain: u8,
    /// DAC gain, 0..16
    pub dac_gain: u8,
}

fn read_words<const N: usize>(storage: &mut impl Storage, address: u16) -> StorageResult<[u16; N]> {
    let mut words = [0u16; N];
    for (i, word) in (0u16..).zip(words.iter_mut()) {
        *word = storage.read_u16(address + 2 * i)?;
    }
    Ok(words)
}

/// Load calibration and apply the crystal trim to the transceiver.
///
/// Out-of-range entries fall back to safe values the same way the
/// configuration record does.
///
/// # Errors
///
/// Storage failures are propagated before the transceiver is touched.
pub fn load_calibration(
    storage: &mut impl Storage,
    settings: &Settings,
    transceiver: &mut impl Transceiver,
) -> StorageResult<Calibration> {
    let mut cal = Calibration::default();

    let high: [u16; 4] = read_words(storage, layout::RSSI_HIGH_BANDS)?;
    let low: [u16; 4] = read_words(storage, layout::RSSI_LOW_BANDS)?;
    for (band, rssi) in cal.rssi.iter_mut().enumerate() {
        *rssi = if band >= 3 { high } else { low };
    }

    cal.battery = BatteryCalibration::from_stored(read_words(storage, layout::BATTERY_CALIBRATION)?);

    let level = u16::from(settings.vox_level);
    cal.vox1_threshold = storage.read_u16(layout::VOX1_THRESHOLDS + 2 * level)?;
    cal.vox0_threshold = storage.read_u16(layout::VOX0_THRESHOLDS + 2 * level)?;

    let mic = storage.read_u8(layout::MIC_SENSITIVITY_TUNING + u16::from(settings.mic_sensitivity))?;
    cal.mic_sensitivity_tuning = if mic < 32 { mic } else { 15 };

    let mut misc = [0u8; 8];
    storage.read(layout::MISC_CALIBRATION, &mut misc)?;
    let trim = i16::from_le_bytes([misc[0], misc[1]]);
    cal.crystal_trim = if trim < 1000 { trim } else { 0 };
    cal.tuning_word_a = u16::from_le_bytes([misc[2], misc[3]]) & 0x01FF;
    cal.tuning_word_b = u16::from_le_bytes([misc[4], misc[5]]) & 0x01FF;
    cal.volume_gain = if misc[6] < 64 { misc[6] } else { 58 };
    cal.dac_gain = if misc[7] < 16 { misc[7] } else { 8 };

    transceiver.write_register(
        REG_XTAL_TRIM,
        XTAL_TRIM_REGISTER_BIAS.wrapping_add_signed(cal.crystal_trim),
    );

    Ok(cal)
}
