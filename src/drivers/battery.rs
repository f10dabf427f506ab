//! Battery gauge
//!
//! Voltage is scaled against calibration point 3, which the factory sets to
//! the reading at 7.60 V. Levels compare the raw reading against the first
//! five points.

use crate::hal::adc::{AdcChannel, AdcError, AdcReader};
use crate::settings::calibration::BatteryCalibration;

/// Readings averaged per measurement
const SAMPLES: u32 = 4;

/// Voltage in 10 mV units at calibration point 3
const REFERENCE_10MV: u32 = 760;

/// One battery measurement
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct BatteryStatus {
    /// Averaged raw reading
    pub raw: u16,
    /// Voltage in 10 mV units
    pub voltage: u16,
    /// Bar count, 0..=5
    pub level: u8,
}

#[cfg(feature = "embedded")]
impl defmt::Format for BatteryStatus {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Battery({}0 mV, level {})", self.voltage, self.level);
    }
}

/// Convert a raw reading to 10 mV units; zero if uncalibrated
#[must_use]
pub fn voltage_from_raw(raw: u16, cal: &BatteryCalibration) -> u16 {
    let reference = u32::from(cal.points()[3]);
    if reference == 0 {
        return 0;
    }
    u16::try_from(u32::from(raw) * REFERENCE_10MV / reference).unwrap_or(u16::MAX)
}

/// Bars to show for a raw reading
#[must_use]
pub fn level_for_raw(raw: u16, cal: &BatteryCalibration) -> u8 {
    let points = cal.points();
    (0..5u8)
        .rev()
        .find(|&i| raw > points[usize::from(i)])
        .map_or(0, |i| i + 1)
}

/// Sample the battery divider and classify the result
///
/// # Errors
///
/// [`AdcError::Timeout`] from the converter.
pub fn measure(
    adc: &mut impl AdcReader,
    cal: &BatteryCalibration,
) -> Result<BatteryStatus, AdcError> {
    let mut sum = 0u32;
    for _ in 0..SAMPLES {
        sum += u32::from(adc.read(AdcChannel::BatteryVoltage)?.raw());
    }
    let raw = u16::try_from(sum / SAMPLES).unwrap_or(u16::MAX);
    Ok(BatteryStatus {
        raw,
        voltage: voltage_from_raw(raw, cal),
        level: level_for_raw(raw, cal),
    })
}
