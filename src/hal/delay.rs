//! Busy-wait delays
//!
//! SysTick is reserved for the 10 ms tick, so delays count core cycles.

use embedded_hal::delay::DelayNs;

use crate::config::SYSTEM_CLOCK_HZ;

/// Cycle-counting delay at the fixed core clock
#[derive(Clone, Copy, Debug, Default)]
pub struct CycleDelay;

impl CycleDelay {
    const CYCLES_PER_US: u32 = SYSTEM_CLOCK_HZ / 1_000_000;
}

impl DelayNs for CycleDelay {
    fn delay_ns(&mut self, ns: u32) {
        let cycles = (ns / 1000).saturating_mul(Self::CYCLES_PER_US)
            + (ns % 1000) * Self::CYCLES_PER_US / 1000;
        cortex_m::asm::delay(cycles.max(1));
    }

    fn delay_us(&mut self, us: u32) {
        cortex_m::asm::delay(us.saturating_mul(Self::CYCLES_PER_US).max(1));
    }

    fn delay_ms(&mut self, ms: u32) {
        for _ in 0..ms {
            self.delay_us(1000);
        }
    }
}
