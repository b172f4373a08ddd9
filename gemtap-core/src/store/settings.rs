//! Settings record in the reserved EEPROM region
//!
//! Record format, starting at `SETTINGS_START`:
//!
//! ```text
//! [0]           version (0xFF = never written)
//! [1]           payload length
//! [2..2+len)    postcard-encoded `Settings`
//! [2+len]       XOR checksum of the payload
//! ```

use gemtap_hal::{EepromStorage, StorageError, ERASED_BYTE};

use super::layout::{SETTINGS_START, SLOTS_START};
use crate::config::Settings;

/// Current record version
pub const SETTINGS_VERSION: u8 = 1;

/// Header bytes before the payload
const HEADER_LEN: usize = 2;

/// Largest payload that fits in the settings region
pub const MAX_PAYLOAD_LEN: usize = SLOTS_START - SETTINGS_START - HEADER_LEN - 1;

/// Encoding buffer size; comfortably above the encoded `Settings`
const BUFFER_LEN: usize = 32;

/// Settings persistence errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsError {
    /// Region never written
    Blank,
    /// Record written by an incompatible firmware
    VersionMismatch(u8),
    /// Stored length does not fit the region
    BadLength(u8),
    /// Payload checksum mismatch
    Checksum,
    /// Payload could not be decoded
    Deserialize,
    /// Settings could not be encoded
    Serialize,
    /// Device too small to hold the settings region
    NoRoom,
    /// Storage access failed
    Storage(StorageError),
}

impl From<StorageError> for SettingsError {
    fn from(e: StorageError) -> Self {
        SettingsError::Storage(e)
    }
}

/// Loads and saves [`Settings`] in the reserved region
pub struct SettingsStore;

impl SettingsStore {
    /// Load the stored settings
    pub fn load<S: EepromStorage>(storage: &mut S) -> Result<Settings, SettingsError> {
        if storage.capacity() < SLOTS_START {
            return Err(SettingsError::NoRoom);
        }

        let mut header = [0u8; HEADER_LEN];
        storage.read(SETTINGS_START, &mut header)?;
        let [version, len] = header;

        if version == ERASED_BYTE {
            return Err(SettingsError::Blank);
        }
        if version != SETTINGS_VERSION {
            return Err(SettingsError::VersionMismatch(version));
        }
        let len_usize = usize::from(len);
        if len_usize == 0 || len_usize > BUFFER_LEN.min(MAX_PAYLOAD_LEN) {
            return Err(SettingsError::BadLength(len));
        }

        let mut buffer = [0u8; BUFFER_LEN + 1];
        let record = &mut buffer[..len_usize + 1];
        storage.read(SETTINGS_START + HEADER_LEN, record)?;
        let (payload, sum) = record.split_at(len_usize);

        if payload_checksum(payload) != sum[0] {
            return Err(SettingsError::Checksum);
        }

        let settings: Settings =
            postcard::from_bytes(payload).map_err(|_| SettingsError::Deserialize)?;
        Ok(settings.sanitized())
    }

    /// Load the stored settings, falling back to defaults on any problem
    pub fn load_or_default<S: EepromStorage>(storage: &mut S) -> Settings {
        match Self::load(storage) {
            Ok(settings) => settings,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                match _e {
                    SettingsError::Blank => defmt::info!("No stored settings, using defaults"),
                    other => defmt::warn!("Stored settings unusable ({}), using defaults", other),
                }
                Settings::default()
            }
        }
    }

    /// Save settings, rewriting only bytes that changed
    pub fn save<S: EepromStorage>(
        storage: &mut S,
        settings: &Settings,
    ) -> Result<(), SettingsError> {
        if storage.capacity() < SLOTS_START {
            return Err(SettingsError::NoRoom);
        }

        let mut buffer = [0u8; HEADER_LEN + BUFFER_LEN + 1];
        let len = {
            let payload =
                postcard::to_slice(settings, &mut buffer[HEADER_LEN..HEADER_LEN + BUFFER_LEN])
                    .map_err(|_| SettingsError::Serialize)?;
            payload.len()
        };
        buffer[0] = SETTINGS_VERSION;
        buffer[1] = len as u8;
        buffer[HEADER_LEN + len] = payload_checksum(&buffer[HEADER_LEN..HEADER_LEN + len]);

        storage.update(SETTINGS_START, &buffer[..HEADER_LEN + len + 1])?;
        Ok(())
    }

    /// Mark the region blank so the next load yields defaults
    pub fn clear<S: EepromStorage>(storage: &mut S) -> Result<(), SettingsError> {
        if storage.capacity() < SLOTS_START {
            return Err(SettingsError::NoRoom);
        }
        storage.update(SETTINGS_START, &[ERASED_BYTE])?;
        Ok(())
    }
}

fn payload_checksum(payload: &[u8]) -> u8 {
    payload.iter().fold(0, |acc, b| acc ^ b)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Mode;
    use crate::schedule::{SleepSchedule, TimeOfDay};

    struct MemStorage {
        bytes: Vec<u8>,
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

    fn blank() -> MemStorage {
        MemStorage {
            bytes: vec![ERASED_BYTE; 1024],
        }
    }

    fn custom_settings() -> Settings {
        Settings {
            schedule: SleepSchedule::new(
                TimeOfDay::new(6, 15).unwrap(),
                TimeOfDay::new(1, 30).unwrap(),
            ),
            tap_duration_ms: 250,
            mode: Mode::Test,
        }
    }

    #[test]
    fn test_blank_region() {
        let mut storage = blank();
        assert_eq!(SettingsStore::load(&mut storage), Err(SettingsError::Blank));
        assert_eq!(SettingsStore::load_or_default(&mut storage), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let mut storage = blank();
        SettingsStore::save(&mut storage, &custom_settings()).unwrap();
        assert_eq!(SettingsStore::load(&mut storage), Ok(custom_settings()));
        // Counter area untouched
        assert!(storage.bytes[SLOTS_START..].iter().all(|&b| b == ERASED_BYTE));
    }

    #[test]
    fn test_corrupt_payload_uses_defaults() {
        let mut storage = blank();
        SettingsStore::save(&mut storage, &custom_settings()).unwrap();
        storage.bytes[SETTINGS_START + HEADER_LEN] ^= 0x04;
        assert_eq!(SettingsStore::load(&mut storage), Err(SettingsError::Checksum));
        assert_eq!(SettingsStore::load_or_default(&mut storage), Settings::default());
    }

    #[test]
    fn test_version_and_length_checks() {
        let mut storage = blank();
        storage.bytes[SETTINGS_START] = 7;
        assert_eq!(
            SettingsStore::load(&mut storage),
            Err(SettingsError::VersionMismatch(7))
        );

        storage.bytes[SETTINGS_START] = SETTINGS_VERSION;
        storage.bytes[SETTINGS_START + 1] = 200;
        assert_eq!(
            SettingsStore::load(&mut storage),
            Err(SettingsError::BadLength(200))
        );
    }

    #[test]
    fn test_out_of_range_tap_duration_is_clamped() {
        let mut storage = blank();
        let mut settings = custom_settings();
        settings.tap_duration_ms = 5000;
        SettingsStore::save(&mut storage, &settings).unwrap();
        let loaded = SettingsStore::load(&mut storage).unwrap();
        assert_eq!(loaded.tap_duration_ms, 1000);
    }

    #[test]
    fn test_clear() {
        let mut storage = blank();
        SettingsStore::save(&mut storage, &custom_settings()).unwrap();
        SettingsStore::clear(&mut storage).unwrap();
        assert_eq!(SettingsStore::load(&mut storage), Err(SettingsError::Blank));
    }

    #[test]
    fn test_small_device() {
        let mut storage = MemStorage {
            bytes: vec![ERASED_BYTE; 64],
        };
        assert_eq!(SettingsStore::load(&mut storage), Err(SettingsError::NoRoom));
        assert_eq!(
            SettingsStore::save(&mut storage, &Settings::default()),
            Err(SettingsError::NoRoom)
        );
    }
}
