//! 24xx EEPROM
//!
//! Every persisted record is read and written through [`Storage`]. On the
//! radio that is the serial EEPROM behind the bit-banged bus; tests and
//! offline tools use [`EepromImage`].

use core::fmt;

use embedded_hal::delay::DelayNs;

use super::i2c::I2cError;
use crate::config::{
    EEPROM_BLOCK_SIZE, EEPROM_I2C_ADDR_READ, EEPROM_I2C_ADDR_WRITE, EEPROM_SIZE,
    EEPROM_WRITE_DELAY_MS,
};
use crate::hal::board::Board;
use crate::hal::gpio::Gpio;

/// One page-write unit
pub type Block = [u8; EEPROM_BLOCK_SIZE];

/// Storage failure
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StorageError {
    /// Bus transfer failed
    Bus(I2cError),
    /// Access past the end of the device
    OutOfRange {
        /// First byte of the rejected access
        address: u16,
        /// Length of the rejected access
        len: usize,
    },
}

impl From<I2cError> for StorageError {
    fn from(e: I2cError) -> Self {
        Self::Bus(e)
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bus(e) => write!(f, "EEPROM bus error: {e}"),
            Self::OutOfRange { address, len } => {
                write!(f, "EEPROM access out of range: {len} bytes at 0x{address:04X}")
            }
        }
    }
}

#[cfg(feature = "embedded")]
impl defmt::Format for StorageError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Bus(e) => defmt::write!(f, "Bus({})", e),
            Self::OutOfRange { address, len } => {
                defmt::write!(f, "OutOfRange(0x{:04X}+{})", address, len);
            }
        }
    }
}

/// Storage operation result
pub type StorageResult<T> = Result<T, StorageError>;

/// Byte-addressed persistent storage
pub trait Storage {
    /// Read `buf.len()` bytes starting at `address`
    ///
    /// # Errors
    ///
    /// Bus failure or an access past the end of the device.
    fn read(&mut self, address: u16, buf: &mut [u8]) -> StorageResult<()>;

    /// Write one 8-byte block at `address`
    ///
    /// # Errors
    ///
    /// Bus failure or an access past the end of the device.
    fn write_block(&mut self, address: u16, block: &Block) -> StorageResult<()>;

    /// Read a little-endian `u16`
    ///
    /// # Errors
    ///
    /// See [`Storage::read`].
    fn read_u16(&mut self, address: u16) -> StorageResult<u16> {
        let mut b = [0u8; 2];
        self.read(address, &mut b)?;
        Ok(u16::from_le_bytes(b))
    }

    /// Read one byte
    ///
    /// # Errors
    ///
    /// See [`Storage::read`].
    fn read_u8(&mut self, address: u16) -> StorageResult<u8> {
        let mut b = [0u8; 1];
        self.read(address, &mut b)?;
        Ok(b[0])
    }
}

fn check_range(address: u16, len: usize) -> StorageResult<()> {
    if usize::from(address) + len > EEPROM_SIZE {
        Err(StorageError::OutOfRange { address, len })
    } else {
        Ok(())
    }
}

/// RAM copy of the whole device
#[derive(Clone)]
pub struct EepromImage {
    bytes: [u8; EEPROM_SIZE],
}

impl EepromImage {
    /// An erased device (every byte `0xFF`)
    #[must_use]
    pub const fn erased() -> Self {
        Self {
            bytes: [0xFF; EEPROM_SIZE],
        }
    }

    /// Wrap a full dump
    #[must_use]
    pub const fn from_bytes(bytes: [u8; EEPROM_SIZE]) -> Self {
        Self { bytes }
    }

    /// Raw contents
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; EEPROM_SIZE] {
        &self.bytes
    }

    /// Raw contents, mutably
    pub fn as_bytes_mut(&mut self) -> &mut [u8; EEPROM_SIZE] {
        &mut self.bytes
    }
}

impl Default for EepromImage {
    fn default() -> Self {
        Self::erased()
    }
}

impl Storage for EepromImage {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> StorageResult<()> {
        check_range(address, buf.len())?;
        let start = usize::from(address);
        buf.copy_from_slice(&self.bytes[start..start + buf.len()]);
        Ok(())
    }

    fn write_block(&mut self, address: u16, block: &Block) -> StorageResult<()> {
        check_range(address, block.len())?;
        let start = usize::from(address);
        self.bytes[start..start + block.len()].copy_from_slice(block);
        Ok(())
    }
}

impl<G: Gpio, D: DelayNs> Board<G, D> {
    /// The on-board EEPROM
    pub fn eeprom(&mut self) -> Eeprom<'_, G, D> {
        Eeprom { board: self }
    }
}

/// Serial EEPROM on the shared I2C lines
pub struct Eeprom<'b, G, D> {
    board: &'b mut Board<G, D>,
}

impl<G: Gpio, D: DelayNs> Eeprom<'_, G, D> {
    fn transfer_read(&mut self, address: u16, buf: &mut [u8]) -> StorageResult<()> {
        let [hi, lo] = address.to_be_bytes();
        let mut bus = self.board.i2c();

        bus.start();
        let addressed = bus
            .write_byte(EEPROM_I2C_ADDR_WRITE)
            .and_then(|()| bus.write_byte(hi))
            .and_then(|()| bus.write_byte(lo));
        if let Err(e) = addressed {
            bus.stop();
            return Err(e.into());
        }

        bus.start();
        if let Err(e) = bus.write_byte(EEPROM_I2C_ADDR_READ) {
            bus.stop();
            return Err(e.into());
        }
        bus.read_buffer(buf);
        bus.stop();
        Ok(())
    }

    fn transfer_write(&mut self, address: u16, block: &Block) -> StorageResult<()> {
        let [hi, lo] = address.to_be_bytes();
        let mut bus = self.board.i2c();

        bus.start();
        let result = bus
            .write_byte(EEPROM_I2C_ADDR_WRITE)
            .and_then(|()| bus.write_byte(hi))
            .and_then(|()| bus.write_byte(lo))
            .and_then(|()| bus.write_buffer(block));
        bus.stop();
        result.map_err(StorageError::from)
    }
}

impl<G: Gpio, D: DelayNs> Storage for Eeprom<'_, G, D> {
    fn read(&mut self, address: u16, buf: &mut [u8]) -> StorageResult<()> {
        check_range(address, buf.len())?;
        let result = self.transfer_read(address, buf);
        #[cfg(feature = "embedded")]
        if let Err(e) = result {
            defmt::warn!("EEPROM read at 0x{:04X} failed: {}", address, e);
        }
        result
    }

    /// Writes only when the block differs from what is stored, then waits
    /// for the page commit.
    fn write_block(&mut self, address: u16, block: &Block) -> StorageResult<()> {
        check_range(address, block.len())?;

        let mut current = [0u8; EEPROM_BLOCK_SIZE];
        self.read(address, &mut current)?;
        if current == *block {
            return Ok(());
        }

        let result = self.transfer_write(address, block);
        #[cfg(feature = "embedded")]
        if let Err(e) = result {
            defmt::warn!("EEPROM write at 0x{:04X} failed: {}", address, e);
        }
        result?;
        self.board.delay_ms(EEPROM_WRITE_DELAY_MS);
        Ok(())
    }
}
