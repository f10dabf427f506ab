//! Factory reset

use super::channel::{save_mr_channel, ChannelRecord};
use super::layout;
use crate::config::EEPROM_BLOCK_SIZE;
use crate::drivers::eeprom::{Storage, StorageResult};
use crate::types::{Channel, Frequency};

/// Channels recreated by a full reset
pub const DEFAULT_CHANNEL_FREQUENCIES: [Frequency; 5] = [
    Frequency::from_10hz(14_502_500),
    Frequency::from_10hz(14_552_500),
    Frequency::from_10hz(43_477_500),
    Frequency::from_10hz(43_502_500),
    Frequency::from_10hz(43_697_500),
];

/// Whether a reset overwrites the block at `address`
#[must_use]
pub fn is_erased_by_reset(address: u16, erase_all: bool) -> bool {
    let inside = |ranges: &[core::ops::Range<u16>]| ranges.iter().any(|r| r.contains(&address));
    layout::RESET_AREA.contains(&address)
        && !inside(&layout::RESET_ALWAYS_KEPT)
        && (erase_all || !inside(&layout::RESET_KEPT_UNLESS_ALL))
}

/// Erase user settings back to factory state.
///
/// Identity data (DTMF codes, AES key, contacts, welcome strings, voice
/// language) always survives. A partial reset also keeps channel memory,
/// scan lists and FM presets; a full reset erases those and recreates the
/// default memory channels.
///
/// # Errors
///
/// Storage failures abort the reset part way.
pub fn factory_reset(storage: &mut impl Storage, erase_all: bool) -> StorageResult<()> {
    #[cfg(feature = "embedded")]
    defmt::info!("factory reset (erase_all={})", erase_all);

    let erased = [0xFFu8; EEPROM_BLOCK_SIZE];
    for address in layout::RESET_AREA.step_by(EEPROM_BLOCK_SIZE) {
        if is_erased_by_reset(address, erase_all) {
            storage.write_block(address, &erased)?;
        }
    }

    if erase_all {
        for (index, &frequency) in (0u8..).zip(DEFAULT_CHANNEL_FREQUENCIES.iter()) {
            save_mr_channel(storage, Channel::new(index), &ChannelRecord::simplex(frequency))?;
        }
    }
    Ok(())
}
