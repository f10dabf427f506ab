//! K5 Radio Main Application
//!
//! Entry point for the UV-K5 peripheral firmware. Clocks stay at their
//! reset configuration; SysTick drives the 10 ms tick and everything else
//! runs from a cooperative polling loop.

#![no_std]
#![no_main]

use cortex_m::peripheral::syst::SystClkSource;
use cortex_m_rt::{entry, exception};
use defmt::{info, warn};
use {defmt_rtt as _, panic_probe as _};

use k5_firmware::audio::{BeepKind, VoiceId};
use k5_firmware::device::Device;
use k5_firmware::drivers::bk4819::Bk4819;
use k5_firmware::hal::pins::PinMap;
use k5_firmware::hal::tick::TickCounters;
use k5_firmware::prelude::*;
use k5_firmware::radio::NoFmReceiver;

/// Countdowns shared with the SysTick handler
static TICKS: TickCounters = TickCounters::new();

#[entry]
fn main() -> ! {
    info!("K5 firmware v{} ({})", env!("CARGO_PKG_VERSION"), ActiveBoard::NAME);

    let Some(mut cp) = cortex_m::Peripherals::take() else {
        panic!("core peripherals already taken");
    };
    cp.SYST.set_clock_source(SystClkSource::Core);
    cp.SYST.set_reload(SYSTEM_CLOCK_HZ / 1000 * TICK_PERIOD_MS - 1);
    cp.SYST.clear_current();
    cp.SYST.enable_counter();
    cp.SYST.enable_interrupt();

    let board = Board::new(PortGpio::<ActiveBoard>::new(), CycleDelay);
    let transceiver = Bk4819::new(PortGpio::<ActiveBoard>::new(), CycleDelay);
    let mut device = Device::new(board, transceiver, NoFmReceiver, &TICKS);

    match device.boot() {
        Ok(()) => info!("boot complete"),
        Err(e) => warn!("boot with defaults: {}", e),
    }

    #[cfg(not(feature = "board-v1"))]
    {
        use k5_firmware::drivers::battery;
        use k5_firmware::hal::adc::Adc;

        let mut adc = Adc::new();
        match battery::measure(&mut adc, &device.calibration.battery) {
            Ok(status) => info!("{}", status),
            Err(e) => warn!("battery: {}", e),
        }
    }

    loop {
        if let Some(key) = device.step() {
            info!("key {}", key);
            device.board.backlight_on(device.settings.backlight, &TICKS);
            device.play_beep(BeepKind::Khz1_60msOptional);
            if let Some(digit) = key.digit() {
                device.voice.queue.enqueue_voice_id(0, VoiceId::digit(digit));
                device.play_voice(false);
            }
        }
        cortex_m::asm::wfi();
    }
}

#[exception]
fn SysTick() {
    TICKS.on_tick();
}
