//! EEPROM address map

/// Address of the 2-byte current slot index
pub const SLOT_INDEX_ADDR: usize = 0;

/// First byte of the settings region
pub const SETTINGS_START: usize = 2;

/// First byte of the counter slot ring; also the end of the settings region
pub const SLOTS_START: usize = 256;

/// Bytes per counter slot: 4 value bytes + 1 checksum byte
pub const SLOT_SIZE: usize = 5;

/// Slot index value of a blank device
pub const BLANK_INDEX: u16 = 0xFFFF;

/// Number of whole slots that fit on a device of `capacity` bytes
///
/// Capped below [`BLANK_INDEX`] so a valid index never looks blank.
pub fn slot_count(capacity: usize) -> u16 {
    let slots = capacity.saturating_sub(SLOTS_START) / SLOT_SIZE;
    slots.min(usize::from(BLANK_INDEX)) as u16
}

/// Address of slot `index`
pub fn slot_addr(index: u16) -> usize {
    SLOTS_START + usize::from(index) * SLOT_SIZE
}
