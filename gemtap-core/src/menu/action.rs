//! Menu actions and settings list items

use crate::config::{
    GEM_COUNT_MAX, GEM_COUNT_MIN, TAP_DURATION_MAX_MS, TAP_DURATION_MIN_MS, UNIT_GEMS, UNIT_MS,
};
use crate::schedule::TimeOfDay;

/// Value edited by the number editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumberKind {
    /// Solenoid hold time
    TapDuration,
    /// Lifetime gem counter
    GemCount,
}

impl NumberKind {
    /// Screen title
    pub const fn title(self) -> &'static str {
        match self {
            NumberKind::TapDuration => "Tap Duration",
            NumberKind::GemCount => "Gem Count",
        }
    }

    /// Unit label
    pub const fn unit(self) -> &'static str {
        match self {
            NumberKind::TapDuration => UNIT_MS,
            NumberKind::GemCount => UNIT_GEMS,
        }
    }

    /// Inclusive `(min, max)` range
    pub const fn limits(self) -> (u32, u32) {
        match self {
            NumberKind::TapDuration => (TAP_DURATION_MIN_MS as u32, TAP_DURATION_MAX_MS as u32),
            NumberKind::GemCount => (GEM_COUNT_MIN, GEM_COUNT_MAX),
        }
    }
}

/// Time edited by the time editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeKind {
    /// Start of the sleep window
    Sleep,
    /// End of the sleep window
    Wake,
}

impl TimeKind {
    /// Screen title
    pub const fn title(self) -> &'static str {
        match self {
            TimeKind::Sleep => "Sleep Time",
            TimeKind::Wake => "Wake Time",
        }
    }
}

/// Requests from the menu to the application
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Action {
    /// Menu returned to the home screen
    GoHome,
    /// Toggle the device on/off
    ToggleEnabled,
    /// Restart the countdown to the next cycle
    ResetNextTap,
    /// Open the tap duration editor with the current value
    OpenTapDurationEditor,
    /// Open the sleep time editor with the current value
    OpenSleepTimeEditor,
    /// Open the wake time editor with the current value
    OpenWakeTimeEditor,
    /// Open the gem count editor with the current lifetime count
    SetGemCount,
    /// Toggle between production and test cadence
    ToggleTestMode,
    /// Toggle tapping outside the wake window
    ToggleOverrideSleep,
    /// Number editor saved a value
    CommitNumber {
        /// Which value was edited
        kind: NumberKind,
        /// New value, within the kind's limits
        value: u32,
    },
    /// Time editor saved a time
    CommitTime {
        /// Which time was edited
        kind: TimeKind,
        /// New time
        time: TimeOfDay,
    },
}

/// Entries of the settings list, in display order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsItem {
    ReturnHome,
    ToggleOnOff,
    ResetNextTap,
    SetTapDuration,
    SetSleepTime,
    SetWakeTime,
    SetGemCount,
    ToggleTestMode,
    OverrideSleep,
}

/// Number of settings list entries
pub const SETTINGS_COUNT: usize = SettingsItem::ALL.len();

/// Settings list labels, indexed like [`SettingsItem::ALL`]
pub static SETTINGS_LABELS: [&str; SETTINGS_COUNT] = [
    "Return to Home",
    "Toggle On/Off",
    "Reset Next Tap",
    "Set Tap Duration",
    "Set Sleep Time",
    "Set Wake Time",
    "Set Gem Count",
    "Toggle Test Mode",
    "Override Sleep",
];

impl SettingsItem {
    /// All entries in display order
    pub const ALL: [SettingsItem; 9] = [
        SettingsItem::ReturnHome,
        SettingsItem::ToggleOnOff,
        SettingsItem::ResetNextTap,
        SettingsItem::SetTapDuration,
        SettingsItem::SetSleepTime,
        SettingsItem::SetWakeTime,
        SettingsItem::SetGemCount,
        SettingsItem::ToggleTestMode,
        SettingsItem::OverrideSleep,
    ];

    /// Entry at `index`, if any
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Display label
    pub fn label(self) -> &'static str {
        SETTINGS_LABELS[self as usize]
    }

    /// Action emitted when the entry is pressed
    pub const fn action(self) -> Action {
        match self {
            SettingsItem::ReturnHome => Action::GoHome,
            SettingsItem::ToggleOnOff => Action::ToggleEnabled,
            SettingsItem::ResetNextTap => Action::ResetNextTap,
            SettingsItem::SetTapDuration => Action::OpenTapDurationEditor,
            SettingsItem::SetSleepTime => Action::OpenSleepTimeEditor,
            SettingsItem::SetWakeTime => Action::OpenWakeTimeEditor,
            SettingsItem::SetGemCount => Action::SetGemCount,
            SettingsItem::ToggleTestMode => Action::ToggleTestMode,
            SettingsItem::OverrideSleep => Action::ToggleOverrideSleep,
        }
    }
}
