//! Tick-shared countdowns
//!
//! The 10 ms tick interrupt only decrements counters and raises flags; the
//! main loop arms and consumes them. Cortex-M0 has no atomic read-modify-write
//! so every access goes through a critical section.

use core::cell::Cell;

use critical_section::Mutex;

/// Ticks per backlight countdown step (500 ms)
const BACKLIGHT_STEP_TICKS: u8 = 50;

#[derive(Clone, Copy, Debug, Default)]
struct Counters {
    next_voice: u16,
    play_queued: bool,
    vox_resume: u16,
    backlight: u8,
    backlight_divider: u8,
    backlight_expired: bool,
    key_scan_due: bool,
    uptime: u32,
}

/// Countdowns shared between the tick interrupt and the main loop
pub struct TickCounters {
    inner: Mutex<Cell<Counters>>,
}

impl TickCounters {
    /// All counters idle
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: Mutex::new(Cell::new(Counters {
                next_voice: 0,
                play_queued: false,
                vox_resume: 0,
                backlight: 0,
                backlight_divider: 0,
                backlight_expired: false,
                key_scan_due: false,
                uptime: 0,
            })),
        }
    }

    fn update<R>(&self, f: impl FnOnce(&mut Counters) -> R) -> R {
        critical_section::with(|cs| {
            let cell = self.inner.borrow(cs);
            let mut c = cell.get();
            let r = f(&mut c);
            cell.set(c);
            r
        })
    }

    fn get(&self) -> Counters {
        critical_section::with(|cs| self.inner.borrow(cs).get())
    }

    /// Advance every countdown by one tick. Called from the tick interrupt.
    pub fn on_tick(&self) {
        self.update(|c| {
            c.uptime = c.uptime.wrapping_add(1);
            c.key_scan_due = true;

            if c.next_voice > 0 {
                c.next_voice -= 1;
                if c.next_voice == 0 {
                    c.play_queued = true;
                }
            }

            c.vox_resume = c.vox_resume.saturating_sub(1);

            c.backlight_divider += 1;
            if c.backlight_divider >= BACKLIGHT_STEP_TICKS {
                c.backlight_divider = 0;
                if c.backlight > 0 {
                    c.backlight -= 1;
                    if c.backlight == 0 {
                        c.backlight_expired = true;
                    }
                }
            }
        });
    }

    /// Schedule the next queued voice clip in `ticks`
    pub fn arm_next_voice(&self, ticks: u16) {
        self.update(|c| {
            c.next_voice = ticks;
            c.play_queued = false;
        });
    }

    /// Remaining ticks before the next queued clip
    #[must_use]
    pub fn next_voice_countdown(&self) -> u16 {
        self.get().next_voice
    }

    /// Consume the "play next queued clip" flag
    pub fn take_play_queued(&self) -> bool {
        self.update(|c| core::mem::take(&mut c.play_queued))
    }

    /// Hold off VOX for `ticks`
    pub fn set_vox_resume(&self, ticks: u16) {
        self.update(|c| c.vox_resume = ticks);
    }

    /// Remaining VOX hold-off
    #[must_use]
    pub fn vox_resume(&self) -> u16 {
        self.get().vox_resume
    }

    /// Keep the backlight on for `steps` half-second steps
    pub fn set_backlight(&self, steps: u8) {
        self.update(|c| {
            c.backlight = steps;
            c.backlight_expired = false;
        });
    }

    /// Remaining backlight steps
    #[must_use]
    pub fn backlight_countdown(&self) -> u8 {
        self.get().backlight
    }

    /// Consume the backlight timeout flag
    pub fn take_backlight_expired(&self) -> bool {
        self.update(|c| core::mem::take(&mut c.backlight_expired))
    }

    /// Consume the per-tick keypad scan request
    pub fn take_key_scan(&self) -> bool {
        self.update(|c| core::mem::take(&mut c.key_scan_due))
    }

    /// Ticks since power-on
    #[must_use]
    pub fn uptime_ticks(&self) -> u32 {
        self.get().uptime
    }
}

impl Default for TickCounters {
    fn default() -> Self {
        Self::new()
    }
}
