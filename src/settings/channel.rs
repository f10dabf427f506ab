//! Memory channel records
//!
//! A memory channel is a 16-byte record at `index * 16`, an attribute byte
//! at `0x0D60 + index` and a 16-byte name slot. The attribute byte carries
//! the scan-list membership in its top bits and the band tag in the low
//! three bits; `0xFF` marks an empty channel.

use super::layout;
use crate::drivers::eeprom::{Block, Storage, StorageResult};
use crate::types::{Band, Channel, Frequency};

/// Attribute flags and band of one memory channel
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelAttributes(u8);

impl ChannelAttributes {
    /// Empty slot
    pub const EMPTY: Self = Self(0xFF);

    const SCAN_LIST_1: u8 = 0x80;
    const SCAN_LIST_2: u8 = 0x40;
    const BAND_MASK: u8 = 0x07;

    /// In both scan lists, on `band`
    #[must_use]
    pub const fn new(band: Band) -> Self {
        Self(Self::SCAN_LIST_1 | Self::SCAN_LIST_2 | band.tag())
    }

    /// Wrap a stored byte
    #[must_use]
    pub const fn from_raw(raw: u8) -> Self {
        Self(raw)
    }

    /// Stored byte
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }

    /// Band, or `None` for an empty slot
    #[must_use]
    pub const fn band(self) -> Option<Band> {
        Band::from_tag(self.0 & Self::BAND_MASK)
    }

    /// Member of scan list 1
    #[must_use]
    pub const fn in_scan_list_1(self) -> bool {
        self.0 & Self::SCAN_LIST_1 != 0
    }

    /// Member of scan list 2
    #[must_use]
    pub const fn in_scan_list_2(self) -> bool {
        self.0 & Self::SCAN_LIST_2 != 0
    }
}

/// The persisted part of a memory channel the reset path writes
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChannelRecord {
    /// Receive frequency
    pub frequency: Frequency,
    /// Transmit offset
    pub offset: Frequency,
    /// Output power and bandwidth flags
    pub flags: u8,
    /// Tuning step index
    pub step: u8,
}

impl ChannelRecord {
    /// Simplex channel with default power, bandwidth and a 12.5 kHz step
    #[must_use]
    pub const fn simplex(frequency: Frequency) -> Self {
        Self {
            frequency,
            offset: Frequency::from_10hz(0),
            flags: 0x08,
            step: 5,
        }
    }

    /// Both 8-byte halves as stored
    #[must_use]
    pub fn encode(&self) -> [Block; 2] {
        let mut first = [0u8; 8];
        first[..4].copy_from_slice(&self.frequency.to_le_bytes());
        first[4..].copy_from_slice(&self.offset.to_le_bytes());
        [first, [0, 0, 0, 0, self.flags, 0, self.step, 0]]
    }
}

/// Persist a memory channel: record, attribute byte and a blank name.
///
/// `channel` must be a memory channel; anything else is ignored.
///
/// # Errors
///
/// Storage failures.
pub fn save_mr_channel(
    storage: &mut impl Storage,
    channel: Channel,
    record: &ChannelRecord,
) -> StorageResult<()> {
    if !channel.is_mr() {
        return Ok(());
    }
    let index = channel.raw();

    let base = layout::channel_record(index);
    let [first, second] = record.encode();
    storage.write_block(base, &first)?;
    storage.write_block(base + 8, &second)?;

    let attributes = ChannelAttributes::new(Band::from_frequency(record.frequency));
    let address = layout::CHANNEL_ATTRIBUTES + u16::from(index);
    let aligned = address & !7;
    let mut block = [0u8; 8];
    storage.read(aligned, &mut block)?;
    block[usize::from(address - aligned)] = attributes.raw();
    storage.write_block(aligned, &block)?;

    let name = layout::channel_name(index);
    storage.write_block(name, &[0xFF; 8])?;
    storage.write_block(name + 8, &[0xFF; 8])?;
    Ok(())
}
