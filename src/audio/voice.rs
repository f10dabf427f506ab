//! Voice clip ids and the playback queue

use heapless::Vec;

use crate::config::{VOICE_ID_CHINESE_BASE, VOICE_ID_ENGLISH_BASE, VOICE_QUEUE_CAPACITY};
use crate::settings::config::VoicePrompt;

/// Language-independent clip id
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct VoiceId(u8);

impl VoiceId {
    /// Placeholder for "nothing to say"
    pub const INVALID: Self = Self(0xFF);

    /// Wrap a raw clip id
    #[must_use]
    pub const fn new(raw: u8) -> Self {
        Self(raw)
    }

    /// Clip for a decimal digit; ids 0..=9 are the spoken digits
    #[must_use]
    pub const fn digit(d: u8) -> Self {
        Self(d % 10)
    }

    /// Raw clip id
    #[must_use]
    pub const fn raw(self) -> u8 {
        self.0
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for VoiceId {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "VoiceId({})", self.0);
    }
}

/// Clip lengths in ticks, indexed by [`VoiceId`]
const CLIP_TICKS_CHINESE: [u8; 58] = [
    0x32, 0x32, 0x32, 0x37, 0x37, 0x32, 0x32, 0x32, 0x32, 0x37, 0x37, 0x32, 0x64, 0x64, 0x64, 0x64,
    0x64, 0x69, 0x64, 0x69, 0x5A, 0x5F, 0x5F, 0x64, 0x64, 0x69, 0x64, 0x64, 0x69, 0x69, 0x69, 0x64,
    0x64, 0x6E, 0x69, 0x5F, 0x64, 0x64, 0x64, 0x69, 0x69, 0x69, 0x64, 0x69, 0x64, 0x64, 0x55, 0x5F,
    0x5A, 0x4B, 0x4B, 0x46, 0x46, 0x69, 0x64, 0x6E, 0x5A, 0x64,
];

/// Clip lengths in ticks, indexed by [`VoiceId`]
const CLIP_TICKS_ENGLISH: [u8; 76] = [
    0x50, 0x32, 0x2D, 0x2D, 0x2D, 0x37, 0x37, 0x37, 0x32, 0x32, 0x3C, 0x37, 0x46, 0x46, 0x4B, 0x82,
    0x82, 0x6E, 0x82, 0x46, 0x96, 0x64, 0x46, 0x6E, 0x78, 0x6E, 0x87, 0x64, 0x96, 0x96, 0x46, 0x9B,
    0x91, 0x82, 0x82, 0x73, 0x78, 0x64, 0x82, 0x6E, 0x78, 0x82, 0x87, 0x6E, 0x55, 0x78, 0x64, 0x69,
    0x9B, 0x5A, 0x50, 0x3C, 0x32, 0x55, 0x64, 0x64, 0x50, 0x46, 0x46, 0x46, 0x4B, 0x4B, 0x50, 0x50,
    0x55, 0x4B, 0x4B, 0x32, 0x32, 0x32, 0x32, 0x37, 0x41, 0x32, 0x3C, 0x37,
];

/// A clip resolved for one language
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Clip {
    /// Code sent to the voice chip
    pub code: u8,
    /// Playback time in ticks
    pub ticks: u16,
}

/// Resolve `id` in the prompt language; `None` when prompts are off or the
/// language has no such clip
#[must_use]
pub fn lookup_clip(language: VoicePrompt, id: VoiceId) -> Option<Clip> {
    let (table, base): (&[u8], u8) = match language {
        VoicePrompt::Off => return None,
        VoicePrompt::Chinese => (&CLIP_TICKS_CHINESE, VOICE_ID_CHINESE_BASE),
        VoicePrompt::English => (&CLIP_TICKS_ENGLISH, VOICE_ID_ENGLISH_BASE),
    };
    table.get(usize::from(id.raw())).map(|&ticks| Clip {
        code: id.raw() + base,
        ticks: u16::from(ticks),
    })
}

/// Pending clips and the playback cursor
#[derive(Clone, Debug, Default)]
pub struct VoiceQueue {
    ids: Vec<VoiceId, VOICE_QUEUE_CAPACITY>,
    read: usize,
}

impl VoiceQueue {
    /// Empty queue
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ids: Vec::new(),
            read: 0,
        }
    }

    /// Drop everything queued
    pub fn clear(&mut self) {
        self.ids.clear();
        self.read = 0;
    }

    /// Store `id` at `index`; index 0 starts a new sequence.
    ///
    /// The queue has no holes: an index past the current length, or past
    /// the capacity, drops the id.
    pub fn enqueue_voice_id(&mut self, index: usize, id: VoiceId) {
        if index >= VOICE_QUEUE_CAPACITY || index > self.ids.len() {
            return;
        }
        if index == 0 {
            self.clear();
        }
        if index < self.ids.len() {
            self.ids[index] = id;
        } else {
            let _ = self.ids.push(id);
        }
    }

    /// Queue the spoken digits of `value % 1000`, returning how many
    /// digits were produced.
    ///
    /// Hundreds are spoken when present, and then the tens digit always
    /// follows, so 307 reads "three zero seven" while 7 reads "seven".
    pub fn enqueue_digits(&mut self, index: usize, value: u16) -> u8 {
        if index == 0 {
            self.clear();
        }

        let mut count = 0;
        let mut rem = value % 1000;
        if rem >= 100 {
            self.push_digit(rem / 100);
            count += 1;
            rem %= 100;
            self.push_digit(rem / 10);
            count += 1;
            rem %= 10;
        } else if rem >= 10 {
            self.push_digit(rem / 10);
            count += 1;
            rem %= 10;
        }
        self.push_digit(rem);
        count + 1
    }

    fn push_digit(&mut self, digit: u16) {
        let _ = self.ids.push(VoiceId::new(u8::try_from(digit).unwrap_or(0)));
    }

    /// Queued ids, played or not
    #[must_use]
    pub fn ids(&self) -> &[VoiceId] {
        &self.ids
    }

    /// Number of queued ids
    #[must_use]
    pub fn len(&self) -> usize {
        self.ids.len()
    }

    /// Nothing queued
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Slot of the next clip to play
    #[must_use]
    pub const fn read_index(&self) -> usize {
        self.read
    }

    /// Every queued clip has been taken
    #[must_use]
    pub fn is_drained(&self) -> bool {
        self.read >= self.ids.len()
    }

    /// Continue playback from `index`
    pub fn seek(&mut self, index: usize) {
        self.read = index;
    }

    /// Take the next clip
    pub fn pop(&mut self) -> Option<VoiceId> {
        let id = self.ids.get(self.read).copied()?;
        self.read += 1;
        Some(id)
    }
}
