//! Menu engine
//!
//! Event in, action out: the engine consumes encoder rotation and press
//! edges, keeps the screen state, and emits at most one [`Action`] per tick
//! for the application to carry out. Rendering reads a [`View`] snapshot.
//!
//! Screens:
//!
//! ```text
//! Home ──press──► SettingsList ──(app opens editor)──► EditNumber / EditTime
//!  ▲                   │  ▲                                  │
//!  └──"Return to Home"─┘  └────────────"Back"────────────────┤
//!  ▲                                                         │
//!  └─────────────────────"Save" / "Home"─────────────────────┘
//! ```

pub mod action;
pub mod editor;
pub mod engine;
pub mod view;

pub use action::{Action, NumberKind, SettingsItem, TimeKind, SETTINGS_COUNT, SETTINGS_LABELS};
pub use editor::{EditorControl, NumberEditor, NumberMode, TimeEditor, TimeField, TimeMode};
pub use engine::{HomeData, Menu, Screen};
pub use view::{View, ViewContent};
