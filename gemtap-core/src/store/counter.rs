//! Wear-leveled lifetime counter
//!
//! Every write goes to the slot after the current one, so writes are spread
//! evenly over the ring and the previous value survives as a fallback until
//! the ring comes around again. A half-written slot is detected by its
//! checksum, not prevented.

use gemtap_hal::{EepromStorage, StorageError, ERASED_BYTE};

use super::layout::{slot_addr, slot_count, BLANK_INDEX, SLOT_INDEX_ADDR, SLOTS_START, SLOT_SIZE};

/// Integrity byte for a stored count: XOR of its four bytes
///
/// This is a cheap check against torn writes and bit rot, nothing more. It
/// does not detect swapped bytes (XOR is order-independent) and two flipped
/// bits in the same position cancel out.
pub fn checksum(value: u32) -> u8 {
    value.to_le_bytes().iter().fold(0, |acc, b| acc ^ b)
}

/// Lifetime counter stored in a ring of EEPROM slots
///
/// A device too small to hold a single slot turns every operation into a
/// no-op that reads as zero.
pub struct CounterStore<S> {
    storage: S,
    slot_count: u16,
}

impl<S: EepromStorage> CounterStore<S> {
    /// Wrap a storage device
    pub fn new(storage: S) -> Self {
        let slot_count = slot_count(storage.capacity());
        Self {
            storage,
            slot_count,
        }
    }

    /// Number of slots in the ring
    pub fn slot_count(&self) -> u16 {
        self.slot_count
    }

    /// Access the underlying storage (shared with the settings record)
    pub fn storage_mut(&mut self) -> &mut S {
        &mut self.storage
    }

    /// Consume the store and return the underlying storage
    pub fn into_storage(self) -> S {
        self.storage
    }

    /// Repair a blank or out-of-range slot index
    ///
    /// Idempotent; slot data is never touched.
    pub fn begin(&mut self) -> Result<(), StorageError> {
        if self.slot_count == 0 {
            return Ok(());
        }

        let stored = self.read_index()?;
        if self.sanitize(stored) != stored {
            #[cfg(feature = "defmt")]
            defmt::info!("Counter index {=u16:#x} invalid, resetting to 0", stored);
            self.write_index(0)?;
        }
        Ok(())
    }

    /// Index of the slot holding the current value
    pub fn current_slot(&mut self) -> Result<u16, StorageError> {
        if self.slot_count == 0 {
            return Ok(0);
        }
        let stored = self.read_index()?;
        Ok(self.sanitize(stored))
    }

    /// Read the lifetime count
    ///
    /// A never-written slot reads as 0. A slot whose checksum does not match
    /// falls back to the previous slot if that one verifies, otherwise to 0.
    /// Only bus failures are errors.
    pub fn read(&mut self) -> Result<u32, StorageError> {
        if self.slot_count == 0 {
            return Ok(0);
        }

        let index = self.current_slot()?;
        let (value, stored_sum) = self.read_slot(index)?;

        if value == u32::MAX {
            // All value bytes erased: never written
            return Ok(0);
        }

        // An erased checksum byte means the value landed but the checksum
        // write did not; trust the value.
        if stored_sum == ERASED_BYTE || stored_sum == checksum(value) {
            return Ok(value);
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("Counter slot {} checksum mismatch", index);

        if index > 0 {
            let (previous, previous_sum) = self.read_slot(index - 1)?;
            if previous_sum == checksum(previous) {
                #[cfg(feature = "defmt")]
                defmt::warn!("Recovered counter {} from slot {}", previous, index - 1);
                return Ok(previous);
            }
        }

        #[cfg(feature = "defmt")]
        defmt::warn!("No verifiable counter backup, reading as 0");

        Ok(0)
    }

    /// Write a new lifetime count into the next slot of the ring
    pub fn write(&mut self, value: u32) -> Result<(), StorageError> {
        if self.slot_count == 0 {
            return Ok(());
        }

        let current = self.current_slot()?;
        let next = ((u32::from(current) + 1) % u32::from(self.slot_count)) as u16;

        let mut record = [0u8; SLOT_SIZE];
        record[..4].copy_from_slice(&value.to_le_bytes());
        record[4] = checksum(value);

        self.storage.write(slot_addr(next), &record)?;
        self.write_index(next)
    }

    /// Erase the whole slot ring and reset the index (factory reset)
    pub fn clear_all(&mut self) -> Result<(), StorageError> {
        if self.slot_count == 0 {
            return Ok(());
        }

        let end = slot_addr(self.slot_count);
        let erased = [ERASED_BYTE; 16];
        let mut addr = SLOTS_START;
        while addr < end {
            let len = (end - addr).min(erased.len());
            self.storage.update(addr, &erased[..len])?;
            addr += len;
        }

        #[cfg(feature = "defmt")]
        defmt::info!("Counter ring cleared ({} slots)", self.slot_count);

        self.write_index(0)
    }

    fn sanitize(&self, index: u16) -> u16 {
        if index == BLANK_INDEX || index >= self.slot_count {
            0
        } else {
            index
        }
    }

    fn read_index(&mut self) -> Result<u16, StorageError> {
        let mut bytes = [0u8; 2];
        self.storage.read(SLOT_INDEX_ADDR, &mut bytes)?;
        Ok(u16::from_le_bytes(bytes))
    }

    fn write_index(&mut self, index: u16) -> Result<(), StorageError> {
        self.storage.update(SLOT_INDEX_ADDR, &index.to_le_bytes())
    }

    fn read_slot(&mut self, index: u16) -> Result<(u32, u8), StorageError> {
        let mut record = [0u8; SLOT_SIZE];
        self.storage.read(slot_addr(index), &mut record)?;
        let value = u32::from_le_bytes([record[0], record[1], record[2], record[3]]);
        Ok((value, record[4]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Plain RAM-backed EEPROM, blank on creation
    struct MemStorage {
        bytes: Vec<u8>,
    }

    impl MemStorage {
        fn new(capacity: usize) -> Self {
            Self {
                bytes: vec![ERASED_BYTE; capacity],
            }
        }
    }

    impl EepromStorage for MemStorage {
        fn capacity(&self) -> usize {
            self.bytes.len()
        }

        fn read(&mut self, addr: usize, buffer: &mut [u8]) -> Result<(), StorageError> {
            self.check_range(addr, buffer.len())?;
            buffer.copy_from_slice(&self.bytes[addr..addr + buffer.len()]);
            Ok(())
        }

        fn write(&mut self, addr: usize, data: &[u8]) -> Result<(), StorageError> {
            self.check_range(addr, data.len())?;
            self.bytes[addr..addr + data.len()].copy_from_slice(data);
            Ok(())
        }
    }

    fn store(slots: usize) -> CounterStore<MemStorage> {
        let mut store = CounterStore::new(MemStorage::new(SLOTS_START + slots * SLOT_SIZE));
        store.begin().unwrap();
        store
    }

    #[test]
    fn test_checksum_is_xor_of_bytes() {
        assert_eq!(checksum(0), 0);
        assert_eq!(checksum(0x1234_5678), 0x12 ^ 0x34 ^ 0x56 ^ 0x78);
        // Byte order does not matter
        assert_eq!(checksum(0x1234_5678), checksum(0x7856_3412));
    }

    #[test]
    fn test_blank_storage_reads_zero() {
        let mut store = store(8);
        assert_eq!(store.current_slot().unwrap(), 0);
        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn test_begin_repairs_index_only() {
        let mut store = CounterStore::new(MemStorage::new(SLOTS_START + 4 * SLOT_SIZE));
        store.storage_mut().write(SLOT_INDEX_ADDR, &[9, 0]).unwrap();
        store.storage_mut().write(slot_addr(2), &[1, 2, 3, 4, 5]).unwrap();

        store.begin().unwrap();
        assert_eq!(store.read_index().unwrap(), 0);
        assert_eq!(store.read_slot(2).unwrap().1, 5);

        // Idempotent
        store.begin().unwrap();
        assert_eq!(store.read_index().unwrap(), 0);
    }

    #[test]
    fn test_write_then_read() {
        let mut store = store(8);
        store.write(42).unwrap();
        assert_eq!(store.read().unwrap(), 42);
    }

    #[test]
    fn test_writes_advance_through_ring() {
        let mut store = store(4);
        store.write(1).unwrap();
        assert_eq!(store.current_slot().unwrap(), 1);
        store.write(2).unwrap();
        assert_eq!(store.current_slot().unwrap(), 2);
        store.write(3).unwrap();
        store.write(4).unwrap();
        assert_eq!(store.current_slot().unwrap(), 0);
        assert_eq!(store.read().unwrap(), 4);
    }

    #[test]
    fn test_corrupt_checksum_falls_back_to_previous() {
        let mut store = store(8);
        store.write(100).unwrap();
        store.write(101).unwrap();
        let current = store.current_slot().unwrap();

        let sum_addr = slot_addr(current) + 4;
        let bad = checksum(101) ^ 0x01;
        store.storage_mut().write(sum_addr, &[bad]).unwrap();

        assert_eq!(store.read().unwrap(), 100);
    }

    #[test]
    fn test_corruption_without_backup_reads_zero() {
        let mut store = store(8);
        store.write(7).unwrap();
        // Slot 1 is current; slot 0 was never written
        let sum_addr = slot_addr(1) + 4;
        store.storage_mut().write(sum_addr, &[checksum(7) ^ 0x80]).unwrap();
        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn test_no_fallback_from_slot_zero() {
        let mut store = store(2);
        store.write(5).unwrap(); // slot 1
        store.write(6).unwrap(); // slot 0
        assert_eq!(store.current_slot().unwrap(), 0);
        store
            .storage_mut()
            .write(slot_addr(0) + 4, &[checksum(6) ^ 0x01])
            .unwrap();
        assert_eq!(store.read().unwrap(), 0);
    }

    #[test]
    fn test_erased_checksum_trusts_value() {
        let mut store = store(8);
        store.write(77).unwrap();
        let current = store.current_slot().unwrap();
        store
            .storage_mut()
            .write(slot_addr(current) + 4, &[ERASED_BYTE])
            .unwrap();
        assert_eq!(store.read().unwrap(), 77);
    }

    #[test]
    fn test_clear_all_reads_zero() {
        let mut store = store(8);
        for value in 1..=5 {
            store.write(value).unwrap();
        }
        store.clear_all().unwrap();
        assert_eq!(store.current_slot().unwrap(), 0);
        assert_eq!(store.read().unwrap(), 0);
        assert!(store.storage_mut().bytes[SLOTS_START..]
            .iter()
            .all(|&b| b == ERASED_BYTE));
    }

    #[test]
    fn test_clear_all_leaves_settings_region() {
        let mut store = store(4);
        store.storage_mut().write(10, &[0xAB]).unwrap();
        store.clear_all().unwrap();
        assert_eq!(store.storage_mut().bytes[10], 0xAB);
    }

    #[test]
    fn test_too_small_storage_is_noop() {
        let mut store = CounterStore::new(MemStorage::new(SLOTS_START + 4));
        assert_eq!(store.slot_count(), 0);
        store.begin().unwrap();
        store.write(99).unwrap();
        assert_eq!(store.read().unwrap(), 0);
        store.clear_all().unwrap();
        assert!(store.storage_mut().bytes.iter().all(|&b| b == ERASED_BYTE));
    }

    #[test]
    fn test_empty_storage_is_noop() {
        let mut store = CounterStore::new(MemStorage::new(0));
        store.begin().unwrap();
        store.write(1).unwrap();
        assert_eq!(store.read().unwrap(), 0);
    }

    proptest! {
        #[test]
        fn prop_last_write_wins_across_wraparound(
            slots in 1usize..6,
            values in proptest::collection::vec(0u32..u32::MAX, 1..40),
        ) {
            let mut store = store(slots);
            for &value in &values {
                store.write(value).unwrap();
            }
            prop_assert_eq!(store.read().unwrap(), *values.last().unwrap());
        }
    }
}
