//! EEPROM storage abstractions
//!
//! A flat, byte-addressable non-volatile address space. Unlike flash there is
//! no erase step: any byte can be rewritten in place, but every write costs
//! endurance, so callers do their own wear leveling on top of this trait.

/// Value of a byte that has never been written (or has been cleared)
pub const ERASED_BYTE: u8 = 0xFF;

/// Errors from EEPROM storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Access extends past the end of the device
    OutOfRange,
    /// Bus transaction failed (I2C NACK, arbitration loss, ...)
    Bus,
    /// Device did not finish its internal write cycle in time
    Timeout,
}

/// Byte-addressable EEPROM storage
///
/// Implementations must keep the erased pattern all-ones: a blank device
/// reads back [`ERASED_BYTE`] everywhere.
pub trait EepromStorage {
    /// Total number of addressable bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `addr`
    fn read(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `addr`
    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError>;

    /// Read a single byte
    fn read_byte(&mut self, addr: usize) -> Result<u8, StorageError> {
        let mut byte = [0u8; 1];
        self.read(addr, &mut byte)?;
        Ok(byte[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, addr: usize, value: u8) -> Result<(), StorageError> {
        self.write(addr, &[value])
    }

    /// Write only the bytes of `data` that differ from what is stored
    ///
    /// Saves endurance for rewrites of mostly-unchanged records.
    fn update(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
        for (offset, &value) in data.iter().enumerate() {
            if self.read_byte(addr + offset)? != value {
                self.write_byte(addr + offset, value)?;
            }
        }
        Ok(())
    }

    /// Check that `len` bytes starting at `addr` fit on the device
    fn check_range(&self, addr: usize, len: usize) -> Result<(), StorageError> {
        match addr.checked_add(len) {
            Some(end) if end <= self.capacity() => Ok(()),
            _ => Err(StorageError::OutOfRange),
        }
    }
}

impl<T: EepromStorage + ?Sized> EepromStorage for &mut T {
    fn capacity(&self) -> usize {
        (**self).capacity()
    }

    fn read(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        (**self).read(addr, buffer)
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
        (**self).write(addr, data)
    }
}
