//! Bit-banged I2C
//!
//! Master-only, clocked by 1 µs busy waits on keypad lines 4 (SCL) and
//! 5 (SDA). The bus exists for the duration of an [`I2cBus`] claim.

use core::fmt;

use embedded_hal::delay::DelayNs;

use crate::config::{I2C_ACK_POLL_LIMIT, I2C_BIT_DELAY_US};
use crate::hal::board::{Board, SharedLines};
use crate::hal::gpio::Gpio;
use crate::hal::pins::{Direction, Pin};
use crate::hal::poll::poll_bounded;

/// I2C failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum I2cError {
    /// Slave did not pull SDA low in the acknowledge slot
    NoAck,
}

impl fmt::Display for I2cError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoAck => write!(f, "no acknowledge from I2C slave"),
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for I2cError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::NoAck => defmt::write!(f, "NoAck"),
        }
    }
}

/// I2C operation result
pub type I2cResult<T> = Result<T, I2cError>;

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// Claim lines 4/5 as an I2C bus
    pub fn i2c(&mut self) -> I2cBus<'_, G, D> {
        I2cBus {
            lines: self.claim_shared(),
        }
    }
}

/// Software I2C master on the shared keypad lines
pub struct I2cBus<'b, G: Gpio, D> {
    lines: SharedLines<'b, G, D>,
}

impl<G: Gpio, D: DelayNs> I2cBus<'_, G, D> {
    const SCL: Pin = Pin::I2C_SCL;
    const SDA: Pin = Pin::I2C_SDA;

    fn step(&mut self) {
        self.lines.delay_us(I2C_BIT_DELAY_US);
    }

    /// START: SDA falls while SCL is high
    pub fn start(&mut self) {
        self.lines.set(Self::SDA);
        self.step();
        self.lines.set(Self::SCL);
        self.step();
        self.lines.clear(Self::SDA);
        self.step();
        self.lines.clear(Self::SCL);
        self.step();
    }

    /// STOP: SDA rises while SCL is high
    pub fn stop(&mut self) {
        self.lines.clear(Self::SDA);
        self.step();
        self.lines.clear(Self::SCL);
        self.step();
        self.lines.set(Self::SCL);
        self.step();
        self.lines.set(Self::SDA);
        self.step();
    }

    /// Shift out one byte MSB-first and sample the acknowledge slot.
    ///
    /// The lines end in the same state whether or not the slave answered.
    ///
    /// # Errors
    ///
    /// [`I2cError::NoAck`] when SDA stays high for the whole poll window.
    pub fn write_byte(&mut self, byte: u8) -> I2cResult<()> {
        self.lines.clear(Self::SCL);
        self.step();

        for bit in (0..8).rev() {
            self.lines.write(Self::SDA, byte & (1 << bit) != 0);
            self.step();
            self.lines.set(Self::SCL);
            self.step();
            self.lines.clear(Self::SCL);
            self.step();
        }

        self.lines.set_direction(Self::SDA, Direction::Input);
        self.lines.set(Self::SDA);
        self.step();
        self.lines.set(Self::SCL);
        self.step();

        let lines = &mut self.lines;
        let ack = poll_bounded(I2C_ACK_POLL_LIMIT, || !lines.read(Self::SDA));

        self.lines.clear(Self::SCL);
        self.step();
        self.lines.set_direction(Self::SDA, Direction::Output);
        self.lines.set(Self::SDA);

        ack.map(|_| ()).map_err(|_| I2cError::NoAck)
    }

    /// Clock in one byte MSB-first, then answer ACK, or NACK when `last`
    pub fn read_byte(&mut self, last: bool) -> u8 {
        self.lines.set_direction(Self::SDA, Direction::Input);

        let mut data = 0u8;
        for _ in 0..8 {
            self.lines.clear(Self::SCL);
            self.step();
            self.lines.set(Self::SCL);
            self.step();
            data <<= 1;
            self.step();
            if self.lines.read(Self::SDA) {
                data |= 1;
            }
            self.lines.clear(Self::SCL);
            self.step();
        }

        self.lines.set_direction(Self::SDA, Direction::Output);
        self.lines.clear(Self::SCL);
        self.step();
        self.lines.write(Self::SDA, last);
        self.step();
        self.lines.set(Self::SCL);
        self.step();
        self.lines.clear(Self::SCL);
        self.step();

        data
    }

    /// Fill `buf`, acknowledging every byte but the last
    pub fn read_buffer(&mut self, buf: &mut [u8]) {
        let Some((last, head)) = buf.split_last_mut() else {
            return;
        };
        if head.is_empty() {
            *last = self.read_byte(true);
            return;
        }
        for byte in head {
            self.step();
            *byte = self.read_byte(false);
        }
        self.step();
        *last = self.read_byte(true);
    }

    /// Write every byte, stopping at the first one that is not acknowledged
    ///
    /// # Errors
    ///
    /// The first [`I2cError`]; no retry happens at this layer.
    pub fn write_buffer(&mut self, bytes: &[u8]) -> I2cResult<()> {
        for &b in bytes {
            self.write_byte(b)?;
        }
        Ok(())
    }
}
