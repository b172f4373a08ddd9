//! Render-ready menu snapshot

use super::editor::{EditorControl, TimeField};
use crate::schedule::TimeOfDay;

/// What the display should show for the current screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct View {
    pub title: &'static str,
    pub content: ViewContent,
}

/// Screen-specific part of a [`View`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ViewContent {
    Home {
        lifetime_gems: u32,
        ms_left: u32,
    },
    List {
        items: &'static [&'static str],
        selected: u8,
    },
    EditNumber {
        value: u32,
        min: u32,
        max: u32,
        unit: &'static str,
        selected: EditorControl,
        editing: bool,
    },
    EditTime {
        time: TimeOfDay,
        selected: EditorControl,
        /// Field being edited, `None` while browsing controls
        editing: Option<TimeField>,
    },
}
