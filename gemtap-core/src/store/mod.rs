//! Persistent storage on the EEPROM
//!
//! Address space layout:
//!
//! ```text
//! [0..2)      u16 LE  index of the current counter slot (0xFFFF = blank)
//! [2..256)            settings record (see `settings`)
//! [256..end)          ring of counter slots, 5 bytes each:
//!                       [0..4) u32 LE lifetime count
//!                       [4]    XOR checksum of the four count bytes
//! ```

pub mod counter;
pub mod layout;
pub mod settings;

pub use counter::{checksum, CounterStore};
pub use settings::{SettingsError, SettingsStore};
