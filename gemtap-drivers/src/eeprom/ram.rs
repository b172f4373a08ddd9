//! RAM-backed EEPROM
//!
//! Blank (all ones) on creation like a factory-fresh chip. Used for host
//! simulation and tests, and as a fallback when no EEPROM answers.

use gemtap_hal::{EepromStorage, StorageError, ERASED_BYTE};

/// In-memory EEPROM of `N` bytes
pub struct RamStorage<const N: usize> {
    bytes: [u8; N],
    /// Bytes written since creation
    writes: usize,
}

impl<const N: usize> Default for RamStorage<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> RamStorage<N> {
    pub const fn new() -> Self {
        Self {
            bytes: [ERASED_BYTE; N],
            writes: 0,
        }
    }

    /// Raw contents
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Number of bytes written so far (wear estimate)
    pub fn writes(&self) -> usize {
        self.writes
    }
}

impl<const N: usize> EepromStorage for RamStorage<N> {
    fn capacity(&self) -> usize {
        N
    }

    fn read(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check_range(addr, buffer.len())?;
        buffer.copy_from_slice(&self.bytes[addr..addr + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
        self.check_range(addr, data.len())?;
        self.bytes[addr..addr + data.len()].copy_from_slice(data);
        self.writes += data.len();
        Ok(())
    }
}
