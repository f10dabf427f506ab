//! EEPROM map
//!
//! Byte offsets of every persisted block. Ranges are half-open.

use core::ops::Range;

/// 16-byte memory channel records, one per MR channel
pub const CHANNEL_RECORDS: u16 = 0x0000;
/// Size of one channel record
pub const CHANNEL_RECORD_SIZE: u16 = 16;
/// Per-band frequency (VFO) channel records
pub const VFO_RECORDS: u16 = 0x0C80;
/// One attribute byte per MR channel
pub const CHANNEL_ATTRIBUTES: u16 = 0x0D60;
/// FM broadcast presets, 20 little-endian words
pub const FM_CHANNELS: u16 = 0x0E40;
/// Number of FM presets
pub const FM_CHANNEL_COUNT: usize = 20;
/// Call channel, squelch, timeout, NOAA scan, lock, VOX, mic
pub const BASIC: u16 = 0x0E70;
/// Display mode, cross band, battery save, dual watch, backlight, tail, VFO
pub const DISPLAY: u16 = 0x0E78;
/// Screen/MR/frequency/NOAA channel per VFO
pub const CHANNEL_SELECTION: u16 = 0x0E80;
/// FM receiver frequency, preset and mode
pub const FM_SETTINGS: u16 = 0x0E88;
/// Beep and side-key actions, scan resume, auto lock, power-on display
pub const KEYS: u16 = 0x0E90;
/// Power-on password
pub const PASSWORD: u16 = 0x0E98;
/// Voice prompt language
pub const VOICE_PROMPT: u16 = 0x0EA0;
/// Alarm, roger, repeater tail, TX VFO
pub const ALARM_ROGER: u16 = 0x0EA8;
/// Two 16-byte welcome strings
pub const WELCOME_STRINGS: u16 = 0x0EB0;
/// DTMF flags and timings
pub const DTMF_SETTINGS: u16 = 0x0ED0;
/// DTMF persist/interval timings and remote kill permit
pub const DTMF_TIMING: u16 = 0x0ED8;
/// ANI DTMF id, 8 bytes
pub const ANI_DTMF_ID: u16 = 0x0EE0;
/// Remote kill code, 8 bytes
pub const KILL_CODE: u16 = 0x0EE8;
/// Remote revive code, 8 bytes
pub const REVIVE_CODE: u16 = 0x0EF0;
/// PTT-press DTMF code, 16 bytes
pub const DTMF_UP_CODE: u16 = 0x0EF8;
/// PTT-release DTMF code, 16 bytes
pub const DTMF_DOWN_CODE: u16 = 0x0F08;
/// Scan list flags and priority channels
pub const SCAN_LIST: u16 = 0x0F18;
/// Custom AES key, four little-endian words
pub const CUSTOM_AES_KEY: u16 = 0x0F30;
/// Frequency lock, TX band enables, kill flag, scrambler
pub const F_LOCK: u16 = 0x0F40;
/// 16-byte channel names, one per MR channel
pub const CHANNEL_NAMES: u16 = 0x0F50;
/// DTMF contact list
pub const DTMF_CONTACTS: u16 = 0x1C00;

/// RSSI calibration for the upper four bands
pub const RSSI_HIGH_BANDS: u16 = 0x1EC0;
/// RSSI calibration for the lower three bands
pub const RSSI_LOW_BANDS: u16 = 0x1EC8;
/// Battery curve, six words
pub const BATTERY_CALIBRATION: u16 = 0x1F40;
/// VOX1 thresholds, one word per VOX level
pub const VOX1_THRESHOLDS: u16 = 0x1F50;
/// VOX0 thresholds, one word per VOX level
pub const VOX0_THRESHOLDS: u16 = 0x1F68;
/// Mic tuning byte per sensitivity step
pub const MIC_SENSITIVITY_TUNING: u16 = 0x1F80;
/// Crystal trim, two tuning words, volume and DAC gain
pub const MISC_CALIBRATION: u16 = 0x1F88;

/// Area a factory reset walks
pub const RESET_AREA: Range<u16> = 0x0C80..0x1E00;

/// Never erased by a factory reset
pub const RESET_ALWAYS_KEPT: [Range<u16>; 5] = [
    ANI_DTMF_ID..SCAN_LIST,
    CUSTOM_AES_KEY..CHANNEL_NAMES,
    DTMF_CONTACTS..0x1E00,
    WELCOME_STRINGS..DTMF_SETTINGS,
    VOICE_PROMPT..ALARM_ROGER,
];

/// Erased only by a full factory reset
pub const RESET_KEPT_UNLESS_ALL: [Range<u16>; 5] = [
    CHANNEL_ATTRIBUTES..0x0E28,
    SCAN_LIST..CUSTOM_AES_KEY,
    CHANNEL_NAMES..DTMF_CONTACTS,
    FM_CHANNELS..BASIC,
    FM_SETTINGS..KEYS,
];

/// Record address of an MR channel
#[must_use]
pub const fn channel_record(index: u8) -> u16 {
    CHANNEL_RECORDS + index as u16 * CHANNEL_RECORD_SIZE
}

/// Name slot address of an MR channel
#[must_use]
pub const fn channel_name(index: u8) -> u16 {
    CHANNEL_NAMES + index as u16 * CHANNEL_RECORD_SIZE
}
