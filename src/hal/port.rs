//! Port and converter register access
//!
//! The only module allowed to touch memory-mapped registers. Each board
//! revision gets a [`PortRegisters`] implementation on its mapping type.

#![allow(unsafe_code)]

use core::ptr::{read_volatile, write_volatile};

use super::pins::{BoardV1, BoardV2, Direction, PhysicalPin};

/// Raw port operations on a physical pin
pub trait PortRegisters {
    /// Configure direction
    fn set_direction(pin: PhysicalPin, direction: Direction);
    /// Drive high
    fn set(pin: PhysicalPin);
    /// Drive low
    fn clear(pin: PhysicalPin);
    /// Invert the output latch
    fn toggle(pin: PhysicalPin);
    /// Sample the input
    fn read(pin: PhysicalPin) -> bool;
}

#[inline]
fn reg_read(addr: u32) -> u32 {
    // SAFETY: callers pass addresses of word-aligned peripheral registers
    // that exist on the selected part.
    unsafe { read_volatile(addr as *const u32) }
}

#[inline]
fn reg_write(addr: u32, value: u32) {
    // SAFETY: see `reg_read`.
    unsafe { write_volatile(addr as *mut u32, value) }
}

#[inline]
fn reg_modify(addr: u32, f: impl FnOnce(u32) -> u32) {
    reg_write(addr, f(reg_read(addr)));
}

mod v1 {
    pub const GPIO_BASE: u32 = 0x4006_0000;
    pub const DATA: u32 = 0x00;
    pub const DIR: u32 = 0x04;
    pub const PORTCON_IE_BASE: u32 = 0x400B_0100;
    pub const PORT_STRIDE: u32 = 0x800;
}

impl BoardV1 {
    fn port(pin: PhysicalPin) -> u32 {
        v1::GPIO_BASE + u32::from(pin.port_offset())
    }

    fn input_enable(pin: PhysicalPin) -> u32 {
        v1::PORTCON_IE_BASE + 4 * (u32::from(pin.port_offset()) / v1::PORT_STRIDE)
    }
}

impl PortRegisters for BoardV1 {
    fn set_direction(pin: PhysicalPin, direction: Direction) {
        let mask = pin.mask();
        match direction {
            Direction::Input => {
                reg_modify(Self::input_enable(pin), |v| v | mask);
                reg_modify(Self::port(pin) + v1::DIR, |v| v & !mask);
            }
            Direction::Output => {
                reg_modify(Self::input_enable(pin), |v| v & !mask);
                reg_modify(Self::port(pin) + v1::DIR, |v| v | mask);
            }
        }
    }

    fn set(pin: PhysicalPin) {
        reg_modify(Self::port(pin) + v1::DATA, |v| v | pin.mask());
    }

    fn clear(pin: PhysicalPin) {
        reg_modify(Self::port(pin) + v1::DATA, |v| v & !pin.mask());
    }

    fn toggle(pin: PhysicalPin) {
        reg_modify(Self::port(pin) + v1::DATA, |v| v ^ pin.mask());
    }

    fn read(pin: PhysicalPin) -> bool {
        reg_read(Self::port(pin) + v1::DATA) & pin.mask() != 0
    }
}

mod v2 {
    pub const IOPORT_BASE: u32 = 0x5000_0000;
    pub const MODER: u32 = 0x00;
    pub const IDR: u32 = 0x10;
    pub const ODR: u32 = 0x14;
    pub const BSRR: u32 = 0x18;
    pub const BRR: u32 = 0x28;
}

impl BoardV2 {
    fn port(pin: PhysicalPin) -> u32 {
        v2::IOPORT_BASE + u32::from(pin.port_offset())
    }
}

impl PortRegisters for BoardV2 {
    fn set_direction(pin: PhysicalPin, direction: Direction) {
        let shift = u32::from(pin.bit()) * 2;
        let mode = match direction {
            Direction::Input => 0b00,
            Direction::Output => 0b01,
        };
        reg_modify(Self::port(pin) + v2::MODER, |v| {
            (v & !(0b11 << shift)) | (mode << shift)
        });
    }

    fn set(pin: PhysicalPin) {
        reg_write(Self::port(pin) + v2::BSRR, pin.mask());
    }

    fn clear(pin: PhysicalPin) {
        reg_write(Self::port(pin) + v2::BRR, pin.mask());
    }

    fn toggle(pin: PhysicalPin) {
        reg_modify(Self::port(pin) + v2::ODR, |v| v ^ pin.mask());
    }

    fn read(pin: PhysicalPin) -> bool {
        reg_read(Self::port(pin) + v2::IDR) & pin.mask() != 0
    }
}

/// Single-conversion access to the PY32F071 ADC
#[cfg(not(feature = "board-v1"))]
pub(crate) mod adc {
    use super::{reg_modify, reg_read, reg_write};

    const BASE: u32 = 0x4001_2400;
    const ISR: u32 = 0x00;
    const CR: u32 = 0x08;
    const CHSELR: u32 = 0x28;
    const DR: u32 = 0x40;

    const ISR_EOC: u32 = 1 << 2;
    const CR_ADEN: u32 = 1 << 0;
    const CR_ADSTART: u32 = 1 << 2;

    /// Enable the converter
    pub fn enable() {
        reg_modify(BASE + CR, |v| v | CR_ADEN);
    }

    /// Select one channel and start a conversion
    pub fn start(channel: u8) {
        reg_write(BASE + CHSELR, 1 << channel);
        reg_modify(BASE + CR, |v| v | CR_ADSTART);
    }

    /// End of conversion flag
    pub fn is_done() -> bool {
        reg_read(BASE + ISR) & ISR_EOC != 0
    }

    /// Result register; reading clears the end of conversion flag
    pub fn data() -> u16 {
        (reg_read(BASE + DR) & 0x0FFF) as u16
    }
}
