//! Screen rendering
//!
//! Builds screens from the menu view, the device status and the active
//! overlay. The 128x64 OLED fits 6 rows of 21 characters in the 6x10 font.
//!
//! ```text
//! Home                    Settings list           Number editor
//! +---------------------+ +---------------------+ +---------------------+
//! |Lifetime Gems:       | |Settings             | |Tap Duration         |
//! |  12,345             | |> Return to Home     | |                     |
//! |                     | |  Toggle On/Off      | |> 25 ms              |
//! |Next tap in:         | |  Reset Next Tap     | |  Range 1-1000       |
//! |  10:42              | |  Set Tap Duration   | |                     |
//! |Tap 10ms  TEST       | |  Set Sleep Time     | | Save  Back  Home    |
//! +---------------------+ +---------------------+ +---------------------+
//! ```

use core::fmt::Write;

use gemtap_core::device::{DeviceStatus, Overlay, OverlayKind};
use gemtap_core::menu::{EditorControl, TimeField, View, ViewContent};
use gemtap_core::schedule::TimeOfDay;
use heapless::String;

use crate::format::{count_field, hh_mm, mm_ss, COUNT_FIELD_COLS};
use crate::screen::{Screen, LINE_LEN, SCREEN_ROWS};

/// List rows below the title
const VISIBLE_ITEMS: usize = SCREEN_ROWS - 1;

/// Row of the editor controls
const CONTROLS_ROW: usize = SCREEN_ROWS - 1;

/// Editor controls drawn on the controls row
const CONTROL_LABELS: [(EditorControl, &str); 3] = [
    (EditorControl::Save, "Save"),
    (EditorControl::Back, "Back"),
    (EditorControl::Home, "Home"),
];

type Line = String<LINE_LEN>;

/// Renderer state
pub struct Renderer {
    screen: Screen,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer {
    /// Create a new renderer
    pub fn new() -> Self {
        Self {
            screen: Screen::new(),
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Render the boot screen shown while storage and clock come up
    pub fn render_boot(&mut self) {
        self.screen.clear();
        self.screen.set_line(2, "Initializing...");
        self.screen.set_line(3, "Please wait");
    }

    /// Render one frame
    ///
    /// An active overlay replaces the menu screen. Returns `true` if the
    /// frame differs from the previous one.
    pub fn render(
        &mut self,
        view: &View,
        status: &DeviceStatus,
        overlay: Option<&Overlay>,
    ) -> bool {
        let mut next = Screen::new();

        match overlay {
            Some(overlay) => render_overlay(&mut next, overlay.kind()),
            None => match view.content {
                ViewContent::Home {
                    lifetime_gems,
                    ms_left,
                } => render_home(&mut next, status, lifetime_gems, ms_left),
                ViewContent::List { items, selected } => {
                    render_list(&mut next, view.title, items, usize::from(selected))
                }
                ViewContent::EditNumber {
                    value,
                    min,
                    max,
                    unit,
                    selected,
                    editing,
                } => render_number_editor(
                    &mut next, view.title, value, min, max, unit, selected, editing,
                ),
                ViewContent::EditTime {
                    time,
                    selected,
                    editing,
                } => render_time_editor(&mut next, view.title, time, selected, editing),
            },
        }

        if next == self.screen {
            return false;
        }
        self.screen = next;
        true
    }
}

fn render_home(screen: &mut Screen, status: &DeviceStatus, lifetime_gems: u32, ms_left: u32) {
    screen.set_line(0, "Lifetime Gems:");

    let mut count = Line::new();
    let _ = write!(count, "  {}", count_field(lifetime_gems, COUNT_FIELD_COLS));
    screen.set_line(1, &count);

    if !status.enabled {
        screen.set_line(3, "Device is off.");
    } else if status.tapping {
        screen.set_line(3, "Tapping...");
    } else if status.active {
        screen.set_line(3, "Next tap in:");
        let mut left = Line::new();
        let _ = write!(left, "  {}", mm_ss(ms_left));
        screen.set_line(4, &left);
    } else {
        screen.set_line(3, "Sleeping...");
        if status.clock_valid {
            let mut wake = Line::new();
            let _ = write!(wake, "Wake at: {}", hh_mm(status.wake_time));
            screen.set_line(4, &wake);
        } else {
            screen.set_line(4, "Clock not set");
        }
    }

    let mut flags = Line::new();
    let _ = write!(flags, "Tap {}ms", status.tap_duration_ms);
    if status.mode.is_test() {
        let _ = flags.push_str("  TEST");
    }
    if status.override_sleep {
        let _ = flags.push_str("  OVR");
    }
    screen.set_line(5, &flags);
}

fn render_list(screen: &mut Screen, title: &str, items: &[&str], selected: usize) {
    screen.set_line(0, title);

    // Scroll so the selection stays on the last visible row
    let first = (selected + 1).saturating_sub(VISIBLE_ITEMS);

    for (i, item) in items.iter().enumerate().skip(first).take(VISIBLE_ITEMS) {
        let row = i - first + 1;
        let mut line = Line::new();
        let _ = line.push_str(if i == selected { "> " } else { "  " });
        let _ = line.push_str(item);
        screen.set_line(row, &line);
        if i == selected {
            screen.highlight_line(row);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn render_number_editor(
    screen: &mut Screen,
    title: &str,
    value: u32,
    min: u32,
    max: u32,
    unit: &str,
    selected: EditorControl,
    editing: bool,
) {
    screen.set_line(0, title);

    let mut line = Line::new();
    let _ = line.push_str(value_marker(selected, editing));
    if editing {
        let _ = write!(line, "[{}] {}", value, unit);
    } else {
        let _ = write!(line, "{} {}", value, unit);
    }
    screen.set_line(2, &line);
    if selected == EditorControl::Value {
        screen.highlight_line(2);
    }

    let mut range = Line::new();
    let _ = write!(range, "  Range {}-{}", min, max);
    screen.set_line(3, &range);

    render_controls(screen, selected, editing);
}

fn render_time_editor(
    screen: &mut Screen,
    title: &str,
    time: TimeOfDay,
    selected: EditorControl,
    editing: Option<TimeField>,
) {
    screen.set_line(0, title);

    let mut line = Line::new();
    let _ = line.push_str(value_marker(selected, editing.is_some()));
    let _ = match editing {
        Some(TimeField::Hour) => write!(line, "[{:02}]:{:02}", time.hour(), time.minute()),
        Some(TimeField::Minute) => write!(line, "{:02}:[{:02}]", time.hour(), time.minute()),
        None => line.push_str(&hh_mm(time)).map_err(|_| core::fmt::Error),
    };
    screen.set_line(2, &line);
    if selected == EditorControl::Value {
        screen.highlight_line(2);
    }

    render_controls(screen, selected, editing.is_some());
}

/// Marker in front of the value line
fn value_marker(selected: EditorControl, editing: bool) -> &'static str {
    if selected == EditorControl::Value && !editing {
        "> "
    } else {
        "  "
    }
}

/// Draw the Save/Back/Home row, marking and highlighting the selection
fn render_controls(screen: &mut Screen, selected: EditorControl, editing: bool) {
    let mut line = Line::new();
    let mut highlight = None;

    for (control, label) in CONTROL_LABELS {
        let is_selected = !editing && control == selected;
        let _ = line.push(if is_selected { '>' } else { ' ' });
        let start = line.len();
        let _ = line.push_str(label);
        if is_selected {
            highlight = Some((start as u8, line.len() as u8));
        }
        let _ = line.push(' ');
    }

    screen.set_line(CONTROLS_ROW, &line);
    if let Some((start, end)) = highlight {
        screen.set_highlight(CONTROLS_ROW, start, end);
    }
}

fn render_overlay(screen: &mut Screen, kind: OverlayKind) {
    let on_off = |on: bool| if on { "On" } else { "Off" };
    let mut first = Line::new();
    let mut second = Line::new();

    match kind {
        OverlayKind::Power(true) => {
            let _ = first.push_str("Device is on.");
        }
        OverlayKind::Power(false) => {
            let _ = first.push_str("Device is off.");
        }
        OverlayKind::TestMode(on) => {
            let _ = write!(first, "Test Mode: {}", on_off(on));
        }
        OverlayKind::OverrideSleep(active) => {
            let _ = first.push_str("Override Clock:");
            let _ = second.push_str(if active { "Active" } else { "Inactive" });
        }
        OverlayKind::TapDuration(ms) => {
            let _ = first.push_str("Tap Duration:");
            let _ = write!(second, "{} ms", ms);
        }
    }

    screen.set_line(2, &first);
    screen.set_line(3, &second);
}
