//! Number and time editors
//!
//! Both editors share the same control row: rotating moves between
//! `Value`, `Save`, `Back` and `Home` (wrapping), pressing activates the
//! selected control. Pressing `Value` enters editing mode, where rotation
//! changes the value instead of the selection.

use crate::schedule::TimeOfDay;

/// Controls of an editor screen, in selection order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditorControl {
    Value,
    Save,
    Back,
    Home,
}

impl EditorControl {
    /// All controls in selection order
    pub const ALL: [EditorControl; 4] = [
        EditorControl::Value,
        EditorControl::Save,
        EditorControl::Back,
        EditorControl::Home,
    ];

    /// Move the selection by `delta` detents, wrapping around
    pub fn rotate(self, delta: i32) -> Self {
        let len = Self::ALL.len() as i64;
        let index = (self as i64 + i64::from(delta)).rem_euclid(len);
        Self::ALL[index as usize]
    }
}

/// Result of feeding one input tick to an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditorOutcome {
    /// Stay on the editor
    Stay,
    /// Commit the value and go home
    Save,
    /// Discard and return to the settings list
    Back,
    /// Discard and go home
    Home,
}

/// Browsing step shared by both editors
///
/// Returns `None` when the press selected `Value`, meaning the caller
/// should enter editing mode.
fn browse(control: &mut EditorControl, delta: i32, pressed: bool) -> Option<EditorOutcome> {
    *control = control.rotate(delta);
    if !pressed {
        return Some(EditorOutcome::Stay);
    }
    match control {
        EditorControl::Value => None,
        EditorControl::Save => Some(EditorOutcome::Save),
        EditorControl::Back => Some(EditorOutcome::Back),
        EditorControl::Home => Some(EditorOutcome::Home),
    }
}

/// Number editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NumberMode {
    /// Rotation moves between controls
    Browsing(EditorControl),
    /// Rotation changes the value
    Editing,
}

/// Bounded integer editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct NumberEditor {
    value: u32,
    min: u32,
    max: u32,
    unit: &'static str,
    mode: NumberMode,
}

impl NumberEditor {
    /// Open an editor on `initial`, clamped into `min..=max`
    ///
    /// Swapped bounds are put back in order.
    pub fn new(initial: u32, min: u32, max: u32, unit: &'static str) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            value: initial.clamp(min, max),
            min,
            max,
            unit,
            mode: NumberMode::Browsing(EditorControl::Value),
        }
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn unit(&self) -> &'static str {
        self.unit
    }

    pub fn mode(&self) -> NumberMode {
        self.mode
    }

    /// Check if rotation currently changes the value
    pub fn is_editing(&self) -> bool {
        matches!(self.mode, NumberMode::Editing)
    }

    /// Highlighted control (`Value` while editing)
    pub fn selected(&self) -> EditorControl {
        match self.mode {
            NumberMode::Browsing(control) => control,
            NumberMode::Editing => EditorControl::Value,
        }
    }

    /// Apply one input tick
    pub fn handle(&mut self, delta: i32, pressed: bool) -> EditorOutcome {
        match self.mode {
            NumberMode::Browsing(mut control) => {
                let outcome = browse(&mut control, delta, pressed);
                self.mode = NumberMode::Browsing(control);
                outcome.unwrap_or_else(|| {
                    self.mode = NumberMode::Editing;
                    EditorOutcome::Stay
                })
            }
            NumberMode::Editing => {
                if delta != 0 {
                    self.adjust(delta);
                }
                if pressed {
                    self.mode = NumberMode::Browsing(EditorControl::Value);
                }
                EditorOutcome::Stay
            }
        }
    }

    fn adjust(&mut self, delta: i32) {
        let target = i64::from(self.value) + i64::from(delta);
        self.value = target.clamp(i64::from(self.min), i64::from(self.max)) as u32;
    }
}

/// Field of a time being edited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeField {
    Hour,
    Minute,
}

/// Time editor mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimeMode {
    /// Rotation moves between controls
    Browsing(EditorControl),
    /// Rotation changes the given field
    Editing(TimeField),
}

/// Hour/minute editor
///
/// Pressing `Value` edits the hour first; the next press moves to the
/// minute and the one after that leaves editing mode. Both fields wrap
/// within their range without carrying into each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimeEditor {
    time: TimeOfDay,
    mode: TimeMode,
}

impl TimeEditor {
    pub fn new(time: TimeOfDay) -> Self {
        Self {
            time,
            mode: TimeMode::Browsing(EditorControl::Value),
        }
    }

    pub fn time(&self) -> TimeOfDay {
        self.time
    }

    pub fn mode(&self) -> TimeMode {
        self.mode
    }

    /// Field being edited, if any
    pub fn editing_field(&self) -> Option<TimeField> {
        match self.mode {
            TimeMode::Editing(field) => Some(field),
            TimeMode::Browsing(_) => None,
        }
    }

    /// Highlighted control (`Value` while editing)
    pub fn selected(&self) -> EditorControl {
        match self.mode {
            TimeMode::Browsing(control) => control,
            TimeMode::Editing(_) => EditorControl::Value,
        }
    }

    /// Apply one input tick
    pub fn handle(&mut self, delta: i32, pressed: bool) -> EditorOutcome {
        match self.mode {
            TimeMode::Browsing(mut control) => {
                let outcome = browse(&mut control, delta, pressed);
                self.mode = TimeMode::Browsing(control);
                outcome.unwrap_or_else(|| {
                    self.mode = TimeMode::Editing(TimeField::Hour);
                    EditorOutcome::Stay
                })
            }
            TimeMode::Editing(field) => {
                if delta != 0 {
                    self.time = match field {
                        TimeField::Hour => self.time.wrapping_add_hours(delta),
                        TimeField::Minute => self.time.wrapping_add_minutes(delta),
                    };
                }
                if pressed {
                    self.mode = match field {
                        TimeField::Hour => TimeMode::Editing(TimeField::Minute),
                        TimeField::Minute => TimeMode::Browsing(EditorControl::Value),
                    };
                }
                EditorOutcome::Stay
            }
        }
    }
}
