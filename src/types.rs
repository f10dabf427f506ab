//! Shared types used across the K5 firmware
//!
//! This module defines domain-specific types that enforce invariants
//! at compile time and provide type safety throughout the codebase.

use core::fmt;

/// Frequency in units of 10 Hz, the resolution used by the persisted
/// channel records and the transceiver chip.
///
/// Any value is representable; use [`Band::from_frequency`] to classify it.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Frequency(u32);

impl Frequency {
    /// Create from 10 Hz units (the on-EEPROM representation)
    #[must_use]
    pub const fn from_10hz(units: u32) -> Self {
        Self(units)
    }

    /// Create from kHz
    #[must_use]
    pub const fn from_khz(khz: u32) -> Self {
        Self(khz * 100)
    }

    /// Get the frequency in 10 Hz units
    #[must_use]
    pub const fn as_10hz(self) -> u32 {
        self.0
    }

    /// Get the frequency in Hz
    #[must_use]
    pub const fn as_hz(self) -> u32 {
        self.0.saturating_mul(10)
    }

    /// Get the frequency in kHz (truncated)
    #[must_use]
    pub const fn as_khz(self) -> u32 {
        self.0 / 100
    }

    /// Little-endian encoding used in channel records
    #[must_use]
    pub const fn to_le_bytes(self) -> [u8; 4] {
        self.0.to_le_bytes()
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({}.{:05} MHz)", self.0 / 100_000, self.0 % 100_000)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Frequency {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "{}0 Hz", self.0);
    }
}

/// Transceiver frequency band
///
/// The discriminant is the 3-bit band tag stored in channel attributes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Band {
    /// 50 - 76 MHz
    Mhz50 = 0,
    /// 108 - 136 MHz
    Mhz108 = 1,
    /// 136 - 174 MHz
    Mhz136 = 2,
    /// 174 - 350 MHz
    Mhz174 = 3,
    /// 350 - 400 MHz
    Mhz350 = 4,
    /// 400 - 470 MHz
    Mhz400 = 5,
    /// 470 - 600 MHz
    Mhz470 = 6,
}

impl Band {
    /// Every band, lowest first
    pub const ALL: [Self; 7] = [
        Self::Mhz50,
        Self::Mhz108,
        Self::Mhz136,
        Self::Mhz174,
        Self::Mhz350,
        Self::Mhz400,
        Self::Mhz470,
    ];

    /// Number of bands
    pub const COUNT: usize = 7;

    /// Get the band for a given frequency.
    ///
    /// Searches from the top band down; anything below the 108 MHz band
    /// falls into the 50 MHz band, including the gap between 76 and 108 MHz.
    #[must_use]
    pub const fn from_frequency(freq: Frequency) -> Self {
        let mut i = Self::COUNT - 1;
        while i >= 1 {
            if freq.as_10hz() >= Self::ALL[i].lower_limit().as_10hz() {
                return Self::ALL[i];
            }
            i -= 1;
        }
        Self::Mhz50
    }

    /// Get the band from its stored 3-bit tag
    #[must_use]
    pub const fn from_tag(tag: u8) -> Option<Self> {
        if (tag as usize) < Self::COUNT {
            Some(Self::ALL[tag as usize])
        } else {
            None
        }
    }

    /// Get the band start frequency
    #[must_use]
    pub const fn lower_limit(self) -> Frequency {
        Frequency::from_10hz(match self {
            Self::Mhz50 => 5_000_000,
            Self::Mhz108 => 10_800_000,
            Self::Mhz136 => 13_600_000,
            Self::Mhz174 => 17_400_000,
            Self::Mhz350 => 35_000_000,
            Self::Mhz400 => 40_000_000,
            Self::Mhz470 => 47_000_000,
        })
    }

    /// Get the band end frequency (inclusive)
    #[must_use]
    pub const fn upper_limit(self) -> Frequency {
        Frequency::from_10hz(match self {
            Self::Mhz50 => 7_600_000,
            Self::Mhz108 => 13_599_990,
            Self::Mhz136 => 17_399_990,
            Self::Mhz174 => 34_999_990,
            Self::Mhz350 => 39_999_990,
            Self::Mhz400 => 46_999_990,
            Self::Mhz470 => 60_000_000,
        })
    }

    /// Get the band tag
    #[must_use]
    pub const fn tag(self) -> u8 {
        self as u8
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Band {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "BAND{}", self.tag() + 1);
    }
}

/// Channel number as stored in the screen/MR/frequency channel settings.
///
/// `0..=199` are memory channels, `200..=206` the per-band frequency (VFO)
/// channels and `207..=216` the NOAA weather channels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Channel(u8);

impl Channel {
    /// First memory channel
    pub const MR_FIRST: Self = Self(0);
    /// Last memory channel
    pub const MR_LAST: Self = Self(199);
    /// First frequency (VFO) channel
    pub const FREQ_FIRST: Self = Self(200);
    /// Last frequency (VFO) channel
    pub const FREQ_LAST: Self = Self(206);
    /// First NOAA channel
    pub const NOAA_FIRST: Self = Self(207);
    /// Last NOAA channel
    pub const NOAA_LAST: Self = Self(216);

    /// Number of memory channels
    pub const MR_COUNT: usize = 200;

    /// Wrap a raw channel number
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// The frequency channel of a band
    #[must_use]
    pub const fn for_band(band: Band) -> Self {
        Self(Self::FREQ_FIRST.0 + band.tag())
    }

    /// Raw channel number
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Memory channel?
    #[must_use]
    pub const fn is_mr(self) -> bool {
        self.0 <= Self::MR_LAST.0
    }

    /// Frequency (VFO) channel?
    #[must_use]
    pub const fn is_freq(self) -> bool {
        self.0 >= Self::FREQ_FIRST.0 && self.0 <= Self::FREQ_LAST.0
    }

    /// NOAA channel?
    #[must_use]
    pub const fn is_noaa(self) -> bool {
        self.0 >= Self::NOAA_FIRST.0 && self.0 <= Self::NOAA_LAST.0
    }

    /// Any valid channel
    #[must_use]
    pub const fn is_valid(self) -> bool {
        self.0 <= Self::NOAA_LAST.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for Channel {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "CH{}", self.0);
    }
}

/// What the radio is currently doing, as tracked by the external
/// radio-control collaborator. Audio playback consults it to decide
/// whether a beep may sound and how to restore AF routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RadioFunction {
    /// Idle, listening for nothing in particular
    #[default]
    Foreground,
    /// Transmitting
    Transmit,
    /// Squelch opened manually
    Monitor,
    /// Carrier detected, squelch about to open
    Incoming,
    /// Receiving
    Receive,
    /// Battery-save duty cycling
    PowerSave,
}

impl RadioFunction {
    /// Receive or monitor: the speaker is busy with received audio
    #[must_use]
    pub const fn is_listening(self) -> bool {
        matches!(self, Self::Receive | Self::Monitor)
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for RadioFunction {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Foreground => defmt::write!(f, "FOREGROUND"),
            Self::Transmit => defmt::write!(f, "TX"),
            Self::Monitor => defmt::write!(f, "MONITOR"),
            Self::Incoming => defmt::write!(f, "INCOMING"),
            Self::Receive => defmt::write!(f, "RX"),
            Self::PowerSave => defmt::write!(f, "POWER_SAVE"),
        }
    }
}
