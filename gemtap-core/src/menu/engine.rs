//! Menu state machine

use super::action::{Action, NumberKind, SettingsItem, TimeKind, SETTINGS_COUNT, SETTINGS_LABELS};
use super::editor::{EditorOutcome, NumberEditor, TimeEditor};
use super::view::{View, ViewContent};
use crate::schedule::TimeOfDay;

/// Values shown on the home screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct HomeData {
    /// Lifetime gem count
    pub lifetime_gems: u32,
    /// Time until the next cycle (ms)
    pub ms_left: u32,
}

/// Current menu screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Screen {
    /// Lifetime count and device state
    Home,
    /// Scrolling list of settings entries
    SettingsList {
        /// Highlighted entry, always `< SETTINGS_COUNT`
        selected: u8,
    },
    /// Editing a numeric setting
    EditNumber {
        kind: NumberKind,
        editor: NumberEditor,
    },
    /// Editing a wake or sleep time
    EditTime {
        kind: TimeKind,
        editor: TimeEditor,
    },
}

/// Encoder-driven menu
///
/// The menu never touches settings itself. Pressing a settings entry emits
/// its [`Action`]; the application reacts, opening an editor where needed
/// with the current value. Editors report the saved value back through
/// [`Action::CommitNumber`] / [`Action::CommitTime`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Menu {
    screen: Screen,
    home: HomeData,
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

impl Menu {
    /// Menu on the home screen
    pub const fn new() -> Self {
        Self {
            screen: Screen::Home,
            home: HomeData {
                lifetime_gems: 0,
                ms_left: 0,
            },
        }
    }

    /// Return to the home screen, dropping any open editor
    pub fn reset(&mut self) {
        self.screen = Screen::Home;
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn home_data(&self) -> HomeData {
        self.home
    }

    /// Update the values shown on the home screen
    pub fn set_home_data(&mut self, lifetime_gems: u32, ms_left: u32) {
        self.home = HomeData {
            lifetime_gems,
            ms_left,
        };
    }

    /// Open the number editor for `kind`
    pub fn open_number_editor(
        &mut self,
        kind: NumberKind,
        initial: u32,
        min: u32,
        max: u32,
        unit: &'static str,
    ) {
        self.screen = Screen::EditNumber {
            kind,
            editor: NumberEditor::new(initial, min, max, unit),
        };
    }

    /// Open the tap duration editor with its standard limits
    pub fn open_tap_duration_editor(&mut self, initial_ms: u16) {
        let kind = NumberKind::TapDuration;
        let (min, max) = kind.limits();
        self.open_number_editor(kind, u32::from(initial_ms), min, max, kind.unit());
    }

    /// Open the gem count editor with its standard limits
    pub fn open_gem_count_editor(&mut self, initial: u32) {
        let kind = NumberKind::GemCount;
        let (min, max) = kind.limits();
        self.open_number_editor(kind, initial, min, max, kind.unit());
    }

    /// Open the time editor for `kind`
    pub fn open_time_editor(&mut self, kind: TimeKind, initial: TimeOfDay) {
        self.screen = Screen::EditTime {
            kind,
            editor: TimeEditor::new(initial),
        };
    }

    /// Feed one input tick
    ///
    /// `delta` is the signed detent count since the last tick, `pressed` a
    /// press edge. Zero rotation without a press changes nothing.
    pub fn update(&mut self, delta: i32, pressed: bool) -> Option<Action> {
        match &mut self.screen {
            Screen::Home => {
                if pressed {
                    self.screen = Screen::SettingsList { selected: 0 };
                }
                None
            }
            Screen::SettingsList { selected } => {
                let index = (i64::from(*selected) + i64::from(delta))
                    .rem_euclid(SETTINGS_COUNT as i64) as usize;
                *selected = index as u8;
                if !pressed {
                    return None;
                }

                let item = SettingsItem::from_index(index)?;
                if item == SettingsItem::ReturnHome {
                    self.screen = Screen::Home;
                }
                Some(item.action())
            }
            Screen::EditNumber { kind, editor } => {
                let kind = *kind;
                let outcome = editor.handle(delta, pressed);
                let value = editor.value();
                self.finish_editor(outcome, Action::CommitNumber { kind, value })
            }
            Screen::EditTime { kind, editor } => {
                let kind = *kind;
                let outcome = editor.handle(delta, pressed);
                let time = editor.time();
                self.finish_editor(outcome, Action::CommitTime { kind, time })
            }
        }
    }

    fn finish_editor(&mut self, outcome: EditorOutcome, commit: Action) -> Option<Action> {
        match outcome {
            EditorOutcome::Stay => None,
            EditorOutcome::Save => {
                self.screen = Screen::Home;
                Some(commit)
            }
            EditorOutcome::Back => {
                self.screen = Screen::SettingsList { selected: 0 };
                None
            }
            EditorOutcome::Home => {
                self.screen = Screen::Home;
                Some(Action::GoHome)
            }
        }
    }

    /// Snapshot of what the display should show
    pub fn view(&self) -> View {
        match self.screen {
            Screen::Home => View {
                title: "Home",
                content: ViewContent::Home {
                    lifetime_gems: self.home.lifetime_gems,
                    ms_left: self.home.ms_left,
                },
            },
            Screen::SettingsList { selected } => View {
                title: "Settings",
                content: ViewContent::List {
                    items: &SETTINGS_LABELS,
                    selected,
                },
            },
            Screen::EditNumber { kind, editor } => View {
                title: kind.title(),
                content: ViewContent::EditNumber {
                    value: editor.value(),
                    min: editor.min(),
                    max: editor.max(),
                    unit: editor.unit(),
                    selected: editor.selected(),
                    editing: editor.is_editing(),
                },
            },
            Screen::EditTime { kind, editor } => View {
                title: kind.title(),
                content: ViewContent::EditTime {
                    time: editor.time(),
                    selected: editor.selected(),
                    editing: editor.editing_field(),
                },
            },
        }
    }
}
