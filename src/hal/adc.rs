//! ADC Driver
//!
//! Battery voltage and current sensing. Conversions are started on demand
//! and the end-of-conversion flag is polled with a bounded wait.

use core::fmt;

use super::poll::Timeout;

/// ADC failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcError {
    /// End of conversion never signalled
    Timeout,
}

impl From<Timeout> for AdcError {
    fn from(_: Timeout) -> Self {
        Self::Timeout
    }
}

impl fmt::Display for AdcError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timeout => write!(f, "ADC conversion timed out"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AdcError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Timeout => defmt::write!(f, "AdcTimeout"),
        }
    }
}

/// Sensed quantities
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AdcChannel {
    /// Divided battery voltage
    BatteryVoltage,
    /// Charge current sense
    BatteryCurrent,
}

impl AdcChannel {
    /// Converter input number
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::BatteryVoltage => 4,
            Self::BatteryCurrent => 9,
        }
    }
}

/// Raw 12-bit ADC reading
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct AdcReading {
    raw: u16,
}

impl AdcReading {
    /// Create a reading from a raw value
    #[must_use]
    pub const fn from_raw(raw: u16) -> Self {
        Self { raw: raw & 0x0FFF }
    }

    /// Get the raw 12-bit value
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.raw
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for AdcReading {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "ADC({})", self.raw);
    }
}

/// Single-shot conversions
pub trait AdcReader {
    /// Convert one channel
    ///
    /// # Errors
    ///
    /// [`AdcError::Timeout`] when the converter does not finish.
    fn read(&mut self, channel: AdcChannel) -> Result<AdcReading, AdcError>;
}

#[cfg(all(feature = "embedded", not(feature = "board-v1")))]
pub use self::target::Adc;

#[cfg(all(feature = "embedded", not(feature = "board-v1")))]
mod target {
    use super::{AdcChannel, AdcError, AdcReader, AdcReading};
    use crate::hal::poll::poll_bounded;
    use crate::hal::port::adc;

    /// Polls of the end-of-conversion flag before giving up
    const EOC_POLL_LIMIT: u16 = 1000;

    /// On-chip converter (PY32F071)
    pub struct Adc {
        _private: (),
    }

    impl Adc {
        /// Enable the converter. Its clock must already be running.
        #[must_use]
        pub fn new() -> Self {
            adc::enable();
            Self { _private: () }
        }
    }

    impl AdcReader for Adc {
        fn read(&mut self, channel: AdcChannel) -> Result<AdcReading, AdcError> {
            adc::start(channel.index());
            poll_bounded(EOC_POLL_LIMIT, adc::is_done)?;
            Ok(AdcReading::from_raw(adc::data()))
        }
    }
}
