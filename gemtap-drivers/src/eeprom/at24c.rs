//! AT24Cxx I2C EEPROM
//!
//! Two-byte memory addressing (AT24C32 and up). Writes are split at page
//! boundaries because the chip wraps within the current page, and each page
//! write is followed by acknowledge polling until the internal write cycle
//! finishes.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use gemtap_hal::{EepromStorage, StorageError};

/// Largest page size handled by the driver
pub const MAX_PAGE_SIZE: usize = 64;

/// Acknowledge polls before giving up on a write cycle
const MAX_WRITE_POLLS: u32 = 50;

/// Delay between acknowledge polls (us); 50 polls cover the 5 ms write cycle twice
const POLL_INTERVAL_US: u32 = 200;

/// Chip geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct At24cConfig {
    /// 7-bit I2C address
    pub address: u8,
    /// Size in bytes
    pub capacity: usize,
    /// Page write size in bytes
    pub page_size: usize,
}

impl At24cConfig {
    /// AT24C32 (4 KiB, 32-byte pages), as fitted to common DS1307 modules
    pub const AT24C32: Self = Self {
        address: 0x50,
        capacity: 4096,
        page_size: 32,
    };

    /// AT24C256 (32 KiB, 64-byte pages)
    pub const AT24C256: Self = Self {
        address: 0x50,
        capacity: 32 * 1024,
        page_size: 64,
    };
}

/// AT24Cxx driver
pub struct At24c<I, D> {
    i2c: I,
    delay: D,
    config: At24cConfig,
}

impl<I: I2c, D: DelayNs> At24c<I, D> {
    /// Create a driver; the page size is clamped to `1..=MAX_PAGE_SIZE`
    pub fn new(i2c: I, delay: D, mut config: At24cConfig) -> Self {
        config.page_size = config.page_size.clamp(1, MAX_PAGE_SIZE);
        Self { i2c, delay, config }
    }

    pub fn config(&self) -> &At24cConfig {
        &self.config
    }

    /// Release the bus and delay
    pub fn release(self) -> (I, D) {
        (self.i2c, self.delay)
    }

    /// Poll until the chip acknowledges again after a write
    fn wait_ready(&mut self, addr: usize) -> Result<(), StorageError> {
        // Setting the address pointer is harmless and gets NACKed while busy
        let pointer = address_bytes(addr);
        for _ in 0..MAX_WRITE_POLLS {
            if self.i2c.write(self.config.address, &pointer).is_ok() {
                return Ok(());
            }
            self.delay.delay_us(POLL_INTERVAL_US);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("EEPROM write cycle timed out at {=usize:#x}", addr);

        Err(StorageError::Timeout)
    }
}

impl<I: I2c, D: DelayNs> EepromStorage for At24c<I, D> {
    fn capacity(&self) -> usize {
        self.config.capacity
    }

    fn read(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check_range(addr, buffer.len())?;
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.config.address, &address_bytes(addr), buffer)
            .map_err(|_| StorageError::Bus)
    }

    fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
        self.check_range(addr, data.len())?;

        let page_size = self.config.page_size;
        let mut frame = [0u8; 2 + MAX_PAGE_SIZE];
        let mut offset = 0;

        while offset < data.len() {
            let at = addr + offset;
            let room = page_size - at % page_size;
            let len = room.min(data.len() - offset);

            frame[..2].copy_from_slice(&address_bytes(at));
            frame[2..2 + len].copy_from_slice(&data[offset..offset + len]);

            self.i2c
                .write(self.config.address, &frame[..2 + len])
                .map_err(|_| StorageError::Bus)?;
            self.wait_ready(at)?;

            offset += len;
        }
        Ok(())
    }
}

/// Big-endian memory address as sent on the wire
fn address_bytes(addr: usize) -> [u8; 2] {
    (addr as u16).to_be_bytes()
}
