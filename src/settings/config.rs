//! Configuration record
//!
//! [`Settings`] is decoded from the fixed EEPROM blocks at boot. Each field
//! is taken from storage when the raw value is in range and replaced by its
//! documented default otherwise, so the record always holds something valid.
//! Decoding is silent: a bad byte is not an error.

use super::dtmf::{self, DtmfString};
use super::layout;
use crate::drivers::eeprom::{Storage, StorageResult};
use crate::types::{Band, Channel};

macro_rules! stored_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $value:literal, )+
        }
        default = $default:ident;
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq)]
        #[repr(u8)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $value, )+
        }

        impl $name {
            /// Decode a stored byte
            #[must_use]
            pub const fn from_raw(raw: u8) -> Option<Self> {
                match raw {
                    $( $value => Some(Self::$variant), )+
                    _ => None,
                }
            }

            /// Stored byte
            #[must_use]
            pub const fn raw(self) -> u8 {
                self as u8
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }
    };
}

stored_enum! {
    /// What the main screen shows for a memory channel
    pub enum ChannelDisplayMode {
        /// Frequency
        Frequency = 0,
        /// Channel number
        ChannelNumber = 1,
        /// Channel name
        Name = 2,
    }
    default = Frequency;
}

stored_enum! {
    /// Receive on one VFO, transmit on the other
    pub enum CrossBand {
        /// Disabled
        Off = 0,
        /// Transmit on A
        ChannelA = 1,
        /// Transmit on B
        ChannelB = 2,
    }
    default = Off;
}

stored_enum! {
    /// Dual watch
    pub enum DualWatch {
        /// Disabled
        Off = 0,
        /// Watch with A in front
        ChannelA = 1,
        /// Watch with B in front
        ChannelB = 2,
    }
    default = ChannelA;
}

stored_enum! {
    /// When a scan resumes after stopping on a signal
    pub enum ScanResumeMode {
        /// After a fixed time
        TimeOperated = 0,
        /// When the carrier drops
        CarrierOperated = 1,
        /// Never
        SearchOperated = 2,
    }
    default = CarrierOperated;
}

stored_enum! {
    /// Boot screen
    pub enum PowerOnDisplayMode {
        /// All pixels on
        FullScreen = 0,
        /// Welcome strings
        Message = 1,
        /// Battery voltage
        Voltage = 2,
    }
    default = Voltage;
}

stored_enum! {
    /// Voice prompt language
    pub enum VoicePrompt {
        /// Prompts disabled
        Off = 0,
        /// Chinese clips
        Chinese = 1,
        /// English clips
        English = 2,
    }
    default = Chinese;
}

stored_enum! {
    /// Alarm key behaviour
    pub enum AlarmMode {
        /// Local siren only
        Site = 0,
        /// Transmit the alarm tone
        Tone = 1,
    }
    default = Tone;
}

stored_enum! {
    /// End-of-transmission signal
    pub enum RogerMode {
        /// None
        Off = 0,
        /// Roger beep
        Roger = 1,
        /// MDC data burst
        Mdc = 2,
    }
    default = Off;
}

stored_enum! {
    /// Transmit frequency lock region
    pub enum FLock {
        /// No lock
        Off = 0,
        /// FCC amateur bands
        Fcc = 1,
        /// CE amateur bands
        Ce = 2,
        /// GB amateur bands
        Gb = 3,
        /// 430 MHz only
        Lock430 = 4,
        /// 438 MHz only
        Lock438 = 5,
    }
    default = Off;
}

/// FM broadcast receiver state
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FmSettings {
    /// Tuned frequency in 100 kHz units
    pub selected_frequency: u16,
    /// Selected preset
    pub selected_channel: u8,
    /// Preset mode rather than free tuning
    pub is_mr_mode: bool,
    /// Presets in 100 kHz units
    pub channels: [u16; layout::FM_CHANNEL_COUNT],
}

impl FmSettings {
    /// Lowest tunable frequency
    pub const LOWER_LIMIT: u16 = 760;
    /// Highest tunable frequency
    pub const UPPER_LIMIT: u16 = 1080;
}

impl Default for FmSettings {
    fn default() -> Self {
        Self {
            selected_frequency: Self::LOWER_LIMIT,
            selected_channel: 0,
            is_mr_mode: false,
            channels: [0xFFFF; layout::FM_CHANNEL_COUNT],
        }
    }
}

/// DTMF signalling settings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DtmfSettings {
    /// Play the tones locally while sending
    pub side_tone: bool,
    /// Separator symbol
    pub separate_code: u8,
    /// Group call symbol
    pub group_call_code: u8,
    /// Response to a decoded call
    pub decode_response: u8,
    /// Seconds before decoded state resets
    pub auto_reset_time: u8,
    /// Carrier before the first tone, ms
    pub preload_time: u16,
    /// First tone length, ms
    pub first_code_persist_time: u16,
    /// `#` tone length, ms
    pub hash_code_persist_time: u16,
    /// Tone length, ms
    pub code_persist_time: u16,
    /// Gap between tones, ms
    pub code_interval_time: u16,
    /// Accept remote kill/revive
    pub permit_remote_kill: bool,
    /// Own identifier
    pub ani_id: DtmfString<8>,
    /// Remote kill code
    pub kill_code: DtmfString<8>,
    /// Remote revive code
    pub revive_code: DtmfString<8>,
    /// Sent on PTT press
    pub up_code: DtmfString<16>,
    /// Sent on PTT release
    pub down_code: DtmfString<16>,
}

impl Default for DtmfSettings {
    fn default() -> Self {
        Self {
            side_tone: true,
            separate_code: b'*',
            group_call_code: b'#',
            decode_response: 0,
            auto_reset_time: 5,
            preload_time: 300,
            first_code_persist_time: 100,
            hash_code_persist_time: 100,
            code_persist_time: 100,
            code_interval_time: 100,
            permit_remote_kill: true,
            ani_id: DtmfString::from_code(b"123"),
            kill_code: DtmfString::from_code(b"ABCD9"),
            revive_code: DtmfString::from_code(b"9DCBA"),
            up_code: DtmfString::from_code(b"12345"),
            down_code: DtmfString::from_code(b"54321"),
        }
    }
}

/// Scan lists
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct ScanListSettings {
    /// Which list scans by default
    pub default_list: bool,
    /// List 1 and 2 enabled
    pub enabled: [bool; 2],
    /// First priority channel per list
    pub priority_ch1: [u8; 2],
    /// Second priority channel per list
    pub priority_ch2: [u8; 2],
}

/// Configuration record
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Settings {
    /// One-touch call channel
    pub call_channel: Channel,
    /// Squelch level 0..=9
    pub squelch_level: u8,
    /// Transmit timeout step 0..=10
    pub tx_timeout_timer: u8,
    /// Scan NOAA channels in the background
    pub noaa_auto_scan: bool,
    /// Keypad locked
    pub key_lock: bool,
    /// VOX enabled
    pub vox_switch: bool,
    /// VOX level 0..=9
    pub vox_level: u8,
    /// Mic sensitivity step 0..=4
    pub mic_sensitivity: u8,
    /// Channel display mode
    pub channel_display_mode: ChannelDisplayMode,
    /// Cross band
    pub cross_band_rx_tx: CrossBand,
    /// Battery save ratio 0..=4
    pub battery_save: u8,
    /// Dual watch
    pub dual_watch: DualWatch,
    /// Backlight time 0..=5
    pub backlight: u8,
    /// Suppress the squelch tail
    pub tail_note_elimination: bool,
    /// Frequency mode allowed
    pub vfo_open: bool,
    /// Channel shown per VFO
    pub screen_channel: [Channel; 2],
    /// Last memory channel per VFO
    pub mr_channel: [Channel; 2],
    /// Last frequency channel per VFO
    pub freq_channel: [Channel; 2],
    /// Last NOAA channel per VFO
    pub noaa_channel: [Channel; 2],
    /// FM broadcast receiver
    pub fm: FmSettings,
    /// Key beeps
    pub beep_control: bool,
    /// Side key 1 short press action 0..=8
    pub key1_short_press_action: u8,
    /// Side key 1 long press action 0..=8
    pub key1_long_press_action: u8,
    /// Side key 2 short press action 0..=8
    pub key2_short_press_action: u8,
    /// Side key 2 long press action 0..=8
    pub key2_long_press_action: u8,
    /// Scan resume
    pub scan_resume_mode: ScanResumeMode,
    /// Lock the keypad after inactivity
    pub auto_keypad_lock: bool,
    /// Boot screen
    pub power_on_display_mode: PowerOnDisplayMode,
    /// Boot password
    pub power_on_password: u32,
    /// Voice prompt language
    pub voice_prompt: VoicePrompt,
    /// Alarm behaviour
    pub alarm_mode: AlarmMode,
    /// End-of-transmission signal
    pub roger: RogerMode,
    /// Repeater tail tone elimination 0..=10
    pub repeater_tail_tone_elimination: u8,
    /// Transmitting VFO 0..=1
    pub tx_vfo: u8,
    /// DTMF signalling
    pub dtmf: DtmfSettings,
    /// Scan lists
    pub scan_list: ScanListSettings,
    /// Transmit lock region
    pub f_lock: FLock,
    /// Transmit allowed on 350 MHz
    pub tx_350: bool,
    /// Radio remotely killed
    pub killed: bool,
    /// Transmit allowed on 200 MHz
    pub tx_200: bool,
    /// Transmit allowed on 500 MHz
    pub tx_500: bool,
    /// 350 MHz band enabled
    pub enable_350: bool,
    /// Scrambler enabled
    pub scramble_enable: bool,
    /// Attribute byte per MR channel
    pub mr_channel_attributes: [u8; Channel::MR_COUNT],
    /// Custom AES key words
    pub custom_aes_key: [u32; 4],
    /// Any AES word differs from the erased value
    pub has_custom_aes_key: bool,
}

/// Frequency channel the VFOs fall back to
const DEFAULT_FREQ_CHANNEL: Channel = Channel::for_band(Band::Mhz400);

impl Default for Settings {
    fn default() -> Self {
        Self {
            call_channel: Channel::MR_FIRST,
            squelch_level: 4,
            tx_timeout_timer: 2,
            noaa_auto_scan: true,
            key_lock: false,
            vox_switch: false,
            vox_level: 5,
            mic_sensitivity: 2,
            channel_display_mode: ChannelDisplayMode::default(),
            cross_band_rx_tx: CrossBand::default(),
            battery_save: 4,
            dual_watch: DualWatch::default(),
            backlight: 5,
            tail_note_elimination: true,
            vfo_open: true,
            screen_channel: [DEFAULT_FREQ_CHANNEL; 2],
            mr_channel: [Channel::MR_FIRST; 2],
            freq_channel: [DEFAULT_FREQ_CHANNEL; 2],
            noaa_channel: [Channel::NOAA_FIRST; 2],
            fm: FmSettings::default(),
            beep_control: true,
            key1_short_press_action: 3,
            key1_long_press_action: 8,
            key2_short_press_action: 1,
            key2_long_press_action: 6,
            scan_resume_mode: ScanResumeMode::default(),
            auto_keypad_lock: true,
            power_on_display_mode: PowerOnDisplayMode::default(),
            power_on_password: 0xFFFF_FFFF,
            voice_prompt: VoicePrompt::default(),
            alarm_mode: AlarmMode::default(),
            roger: RogerMode::default(),
            repeater_tail_tone_elimination: 0,
            tx_vfo: 0,
            dtmf: DtmfSettings::default(),
            scan_list: ScanListSettings::default(),
            f_lock: FLock::default(),
            tx_350: true,
            killed: false,
            tx_200: false,
            tx_500: false,
            enable_350: true,
            scramble_enable: true,
            mr_channel_attributes: [0xFF; Channel::MR_COUNT],
            custom_aes_key: [0xFFFF_FFFF; 4],
            has_custom_aes_key: false,
        }
    }
}

/// `raw` when below `limit`, else `default`
const fn below(raw: u8, limit: u8, default: u8) -> u8 {
    if raw < limit {
        raw
    } else {
        default
    }
}

/// Stored boolean: 0 or 1, anything else is `default`
const fn flag(raw: u8, default: bool) -> bool {
    if raw < 2 {
        raw != 0
    } else {
        default
    }
}

/// Timing byte in 10 ms units: `raw * 10` when at most 100, else `default`
fn tens_of_ms(raw: u8, default: u16) -> u16 {
    if raw < 101 {
        u16::from(raw) * 10
    } else {
        default
    }
}

fn channel_if(raw: u8, valid: impl Fn(Channel) -> bool, default: Channel) -> Channel {
    let ch = Channel::new(raw);
    if valid(ch) {
        ch
    } else {
        default
    }
}

fn read_block<const N: usize>(storage: &mut impl Storage, address: u16) -> StorageResult<[u8; N]> {
    let mut block = [0u8; N];
    storage.read(address, &mut block)?;
    Ok(block)
}

fn le_u32(b: &[u8]) -> u32 {
    u32::from_le_bytes([b[0], b[1], b[2], b[3]])
}

impl Settings {
    /// Decode the configuration record from storage.
    ///
    /// The result depends only on the stored bytes, so loading twice gives
    /// the same record.
    ///
    /// # Errors
    ///
    /// Storage failures are propagated; out-of-range values are not errors.
    pub fn load(storage: &mut impl Storage) -> StorageResult<Self> {
        let d = Self::default();
        let mut s = d.clone();

        let b: [u8; 8] = read_block(storage, layout::BASIC)?;
        s.call_channel = channel_if(b[0], Channel::is_mr, d.call_channel);
        s.squelch_level = below(b[1], 10, d.squelch_level);
        s.tx_timeout_timer = below(b[2], 11, d.tx_timeout_timer);
        s.noaa_auto_scan = flag(b[3], d.noaa_auto_scan);
        s.key_lock = flag(b[4], d.key_lock);
        s.vox_switch = flag(b[5], d.vox_switch);
        s.vox_level = below(b[6], 10, d.vox_level);
        s.mic_sensitivity = below(b[7], 5, d.mic_sensitivity);

        let b: [u8; 8] = read_block(storage, layout::DISPLAY)?;
        s.channel_display_mode = ChannelDisplayMode::from_raw(b[1]).unwrap_or_default();
        s.cross_band_rx_tx = CrossBand::from_raw(b[2]).unwrap_or_default();
        s.battery_save = below(b[3], 5, d.battery_save);
        s.dual_watch = DualWatch::from_raw(b[4]).unwrap_or_default();
        s.backlight = below(b[5], crate::config::BACKLIGHT_MAX + 1, d.backlight);
        s.tail_note_elimination = flag(b[6], d.tail_note_elimination);
        s.vfo_open = flag(b[7], d.vfo_open);

        let b: [u8; 8] = read_block(storage, layout::CHANNEL_SELECTION)?;
        for vfo in 0..2 {
            let base = vfo * 3;
            s.screen_channel[vfo] = channel_if(b[base], Channel::is_valid, DEFAULT_FREQ_CHANNEL);
            s.mr_channel[vfo] = channel_if(b[base + 1], Channel::is_mr, Channel::MR_FIRST);
            s.freq_channel[vfo] = channel_if(b[base + 2], Channel::is_freq, DEFAULT_FREQ_CHANNEL);
            s.noaa_channel[vfo] = channel_if(b[6 + vfo], Channel::is_noaa, Channel::NOAA_FIRST);
        }

        let b: [u8; 8] = read_block(storage, layout::FM_SETTINGS)?;
        let freq = u16::from_le_bytes([b[0], b[1]]);
        let fm_band = FmSettings::LOWER_LIMIT..=FmSettings::UPPER_LIMIT;
        s.fm.selected_frequency = if fm_band.contains(&freq) {
            freq
        } else {
            FmSettings::LOWER_LIMIT
        };
        s.fm.selected_channel = b[2];
        s.fm.is_mr_mode = flag(b[3], d.fm.is_mr_mode);

        let b: [u8; layout::FM_CHANNEL_COUNT * 2] = read_block(storage, layout::FM_CHANNELS)?;
        for (slot, word) in s.fm.channels.iter_mut().zip(b.chunks_exact(2)) {
            *slot = u16::from_le_bytes([word[0], word[1]]);
        }

        let b: [u8; 8] = read_block(storage, layout::KEYS)?;
        s.beep_control = flag(b[0], d.beep_control);
        s.key1_short_press_action = below(b[1], 9, d.key1_short_press_action);
        s.key1_long_press_action = below(b[2], 9, d.key1_long_press_action);
        s.key2_short_press_action = below(b[3], 9, d.key2_short_press_action);
        s.key2_long_press_action = below(b[4], 9, d.key2_long_press_action);
        s.scan_resume_mode = ScanResumeMode::from_raw(b[5]).unwrap_or_default();
        s.auto_keypad_lock = flag(b[6], d.auto_keypad_lock);
        s.power_on_display_mode = PowerOnDisplayMode::from_raw(b[7]).unwrap_or_default();

        let b: [u8; 8] = read_block(storage, layout::PASSWORD)?;
        s.power_on_password = le_u32(&b);

        let b: [u8; 8] = read_block(storage, layout::VOICE_PROMPT)?;
        s.voice_prompt = VoicePrompt::from_raw(b[0]).unwrap_or_default();

        let b: [u8; 8] = read_block(storage, layout::ALARM_ROGER)?;
        s.alarm_mode = AlarmMode::from_raw(b[0]).unwrap_or_default();
        s.roger = RogerMode::from_raw(b[1]).unwrap_or_default();
        s.repeater_tail_tone_elimination = below(b[2], 11, d.repeater_tail_tone_elimination);
        s.tx_vfo = below(b[3], 2, d.tx_vfo);

        s.dtmf = Self::load_dtmf(storage, &d.dtmf)?;

        let b: [u8; 8] = read_block(storage, layout::SCAN_LIST)?;
        s.scan_list.default_list = flag(b[0], false);
        for list in 0..2 {
            let j = list * 3 + 1;
            s.scan_list.enabled[list] = flag(b[j], false);
            s.scan_list.priority_ch1[list] = b[j + 1];
            s.scan_list.priority_ch2[list] = b[j + 2];
        }

        let b: [u8; 8] = read_block(storage, layout::F_LOCK)?;
        s.f_lock = FLock::from_raw(b[0]).unwrap_or_default();
        s.tx_350 = flag(b[1], d.tx_350);
        s.killed = flag(b[2], d.killed);
        s.tx_200 = flag(b[3], d.tx_200);
        s.tx_500 = flag(b[4], d.tx_500);
        s.enable_350 = flag(b[5], d.enable_350);
        s.scramble_enable = flag(b[6], d.scramble_enable);

        if !s.vfo_open {
            s.screen_channel = s.mr_channel;
        }

        storage.read(layout::CHANNEL_ATTRIBUTES, &mut s.mr_channel_attributes)?;

        let b: [u8; 16] = read_block(storage, layout::CUSTOM_AES_KEY)?;
        for (word, bytes) in s.custom_aes_key.iter_mut().zip(b.chunks_exact(4)) {
            *word = le_u32(bytes);
        }
        s.has_custom_aes_key = s.custom_aes_key.iter().any(|&w| w != 0xFFFF_FFFF);

        Ok(s)
    }

    fn load_dtmf(storage: &mut impl Storage, d: &DtmfSettings) -> StorageResult<DtmfSettings> {
        let mut t = *d;

        let mut b: [u8; 8] = read_block(storage, layout::DTMF_SETTINGS)?;
        t.side_tone = flag(b[0], d.side_tone);
        if dtmf::validate_codes(&mut b[1..2]) {
            t.separate_code = b[1];
        }
        if dtmf::validate_codes(&mut b[2..3]) {
            t.group_call_code = b[2];
        }
        t.decode_response = below(b[3], 4, d.decode_response);
        t.auto_reset_time = below(b[4], 61, d.auto_reset_time);
        t.preload_time = tens_of_ms(b[5], d.preload_time);
        t.first_code_persist_time = tens_of_ms(b[6], d.first_code_persist_time);
        t.hash_code_persist_time = tens_of_ms(b[7], d.hash_code_persist_time);

        let b: [u8; 8] = read_block(storage, layout::DTMF_TIMING)?;
        t.code_persist_time = tens_of_ms(b[0], d.code_persist_time);
        t.code_interval_time = tens_of_ms(b[1], d.code_interval_time);
        t.permit_remote_kill = flag(b[2], d.permit_remote_kill);

        t.ani_id = DtmfString::from_stored(read_block(storage, layout::ANI_DTMF_ID)?, d.ani_id);
        t.kill_code = DtmfString::from_stored(read_block(storage, layout::KILL_CODE)?, d.kill_code);
        t.revive_code = DtmfString::from_stored(read_block(storage, layout::REVIVE_CODE)?, d.revive_code);
        t.up_code = DtmfString::from_stored(read_block(storage, layout::DTMF_UP_CODE)?, d.up_code);
        t.down_code = DtmfString::from_stored(read_block(storage, layout::DTMF_DOWN_CODE)?, d.down_code);

        Ok(t)
    }
}
