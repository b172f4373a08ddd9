//! Device controller
//!
//! Ties the menu, the tap sequencer, the sleep window and the persistent
//! stores together. The firmware calls [`Device::poll`] once per loop tick
//! with fresh inputs and renders the result.

use gemtap_hal::{EepromStorage, StorageError};

use super::cadence::Cadence;
use super::input::{ButtonEvents, EncoderInput};
use super::overlay::{Overlay, OverlayKind, OverlaySlot};
use crate::config::{Mode, Settings, GEMS_PER_SAVE};
use crate::menu::{Action, Menu, NumberKind, TimeKind, View};
use crate::schedule::{is_awake, TimeOfDay, MINUTES_PER_DAY};
use crate::store::{CounterStore, SettingsError, SettingsStore};
use crate::tapper::Tapper;
use crate::traits::Actuator;

/// Snapshot of the device state for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DeviceStatus {
    /// Device switched on
    pub enabled: bool,
    /// Tapping allowed outside the wake window
    pub override_sleep: bool,
    /// Operating mode
    pub mode: Mode,
    /// Tap hold time (ms)
    pub tap_duration_ms: u16,
    /// Cycles may run right now
    pub active: bool,
    /// A cycle is in progress
    pub tapping: bool,
    /// Lifetime gem count, including unsaved gems
    pub lifetime_gems: u32,
    /// Time until the next cycle (ms)
    pub ms_left: u32,
    /// End of the sleep window
    pub wake_time: TimeOfDay,
    /// Last clock reading was valid
    pub clock_valid: bool,
}

/// The tapping device
pub struct Device<A, S> {
    settings: Settings,
    menu: Menu,
    tapper: Tapper<A>,
    counter: CounterStore<S>,
    cadence: Cadence,
    overlay: OverlaySlot,
    enabled: bool,
    override_sleep: bool,
    active: bool,
    clock_valid: bool,
    lifetime_gems: u32,
    /// Gems counted since the last counter write
    unsaved_gems: u32,
    ms_left: u32,
}

impl<A: Actuator, S: EepromStorage> Device<A, S> {
    /// Boot the device from persistent storage
    ///
    /// Storage failures are logged and fall back to a zero count and default
    /// settings; the device always comes up.
    pub fn new(stage_a: A, stage_b: A, storage: S, seed: u32, now_ms: u32) -> Self {
        let mut counter = CounterStore::new(storage);

        if let Err(_e) = counter.begin() {
            #[cfg(feature = "defmt")]
            defmt::warn!("Counter index repair failed: {}", _e);
        }

        let lifetime_gems = match counter.read() {
            Ok(value) => value,
            Err(_e) => {
                #[cfg(feature = "defmt")]
                defmt::warn!("Counter read failed: {}", _e);
                0
            }
        };

        let settings = SettingsStore::load_or_default(counter.storage_mut());
        let cadence = Cadence::new(seed, &settings.mode.params(), now_ms);

        #[cfg(feature = "defmt")]
        defmt::info!(
            "Device up: {} gems, mode {}, tap {}ms",
            lifetime_gems,
            settings.mode,
            settings.tap_duration_ms
        );

        let mut menu = Menu::new();
        menu.set_home_data(lifetime_gems, cadence.remaining(now_ms));

        Self {
            settings,
            menu,
            tapper: Tapper::new(stage_a, stage_b),
            counter,
            cadence,
            overlay: OverlaySlot::new(),
            enabled: true,
            override_sleep: false,
            active: false,
            clock_valid: false,
            lifetime_gems,
            unsaved_gems: 0,
            ms_left: cadence.remaining(now_ms),
        }
    }

    /// Run one loop tick
    ///
    /// `now_minutes` is the wall clock reading in minutes since midnight,
    /// `None` when the clock is unavailable. Returns the menu action applied
    /// this tick, if any.
    pub fn poll(
        &mut self,
        now_ms: u32,
        now_minutes: Option<u16>,
        encoder: EncoderInput,
        buttons: ButtonEvents,
    ) -> Option<Action> {
        self.overlay.expire(now_ms);
        self.handle_buttons(buttons, now_ms);

        let action = self.menu.update(encoder.delta, encoder.pressed);
        if let Some(action) = action {
            self.apply(action, now_ms);
        }

        self.clock_valid = matches!(now_minutes, Some(m) if m < MINUTES_PER_DAY);
        let awake = is_awake(&self.settings.schedule, now_minutes);
        let active = self.enabled && (self.override_sleep || awake);

        if active != self.active {
            #[cfg(feature = "defmt")]
            defmt::info!("Device {}", if active { "active" } else { "inactive" });
            self.active = active;
        }

        if !active && self.tapper.is_active() {
            self.tapper.stop();
        }

        if active && !self.tapper.is_active() && self.cadence.is_due(now_ms) {
            self.tapper.start_cycle(self.settings.cycle_spec(), now_ms);
        }

        if self.tapper.update(now_ms) {
            self.record_gem(now_ms);
        }

        self.ms_left = self.cadence.remaining(now_ms);
        self.menu.set_home_data(self.lifetime_gems, self.ms_left);

        action
    }

    /// Apply a menu action
    pub fn apply(&mut self, action: Action, now_ms: u32) {
        #[cfg(feature = "defmt")]
        defmt::debug!("Menu action: {}", action);

        match action {
            Action::GoHome => {}
            Action::ToggleEnabled => {
                self.toggle_enabled();
            }
            Action::ResetNextTap => self.restart_cadence(now_ms),
            Action::OpenTapDurationEditor => {
                self.menu
                    .open_tap_duration_editor(self.settings.tap_duration_ms);
            }
            Action::OpenSleepTimeEditor => {
                self.menu
                    .open_time_editor(TimeKind::Sleep, self.settings.schedule.sleep);
            }
            Action::OpenWakeTimeEditor => {
                self.menu
                    .open_time_editor(TimeKind::Wake, self.settings.schedule.wake);
            }
            Action::SetGemCount => self.menu.open_gem_count_editor(self.lifetime_gems),
            Action::ToggleTestMode => {
                self.toggle_test_mode(now_ms);
            }
            Action::ToggleOverrideSleep => {
                self.toggle_override();
            }
            Action::CommitNumber {
                kind: NumberKind::TapDuration,
                value,
            } => {
                self.settings.set_tap_duration(value);
                self.persist_settings();
            }
            Action::CommitNumber {
                kind: NumberKind::GemCount,
                value,
            } => self.set_lifetime_gems(value),
            Action::CommitTime { kind, time } => {
                match kind {
                    TimeKind::Sleep => self.settings.schedule.sleep = time,
                    TimeKind::Wake => self.settings.schedule.wake = time,
                }
                self.persist_settings();
            }
        }
    }

    /// Write any unsaved gems to the counter store
    pub fn flush(&mut self) -> Result<(), StorageError> {
        if self.unsaved_gems == 0 {
            return Ok(());
        }
        self.counter.write(self.lifetime_gems)?;
        self.unsaved_gems = 0;
        Ok(())
    }

    /// Erase the counter ring and the settings record
    ///
    /// The device keeps running with a zero count and default settings.
    pub fn factory_reset(&mut self, now_ms: u32) -> Result<(), SettingsError> {
        #[cfg(feature = "defmt")]
        defmt::warn!("Factory reset");

        self.tapper.stop();
        self.counter.clear_all()?;
        SettingsStore::clear(self.counter.storage_mut())?;

        self.settings = Settings::default();
        self.lifetime_gems = 0;
        self.unsaved_gems = 0;
        self.menu.reset();
        self.restart_cadence(now_ms);
        self.menu.set_home_data(0, self.ms_left);
        Ok(())
    }

    /// Render-ready status
    pub fn status(&self) -> DeviceStatus {
        DeviceStatus {
            enabled: self.enabled,
            override_sleep: self.override_sleep,
            mode: self.settings.mode,
            tap_duration_ms: self.settings.tap_duration_ms,
            active: self.active,
            tapping: self.tapper.is_active(),
            lifetime_gems: self.lifetime_gems,
            ms_left: self.ms_left,
            wake_time: self.settings.schedule.wake,
            clock_valid: self.clock_valid,
        }
    }

    /// Current menu view
    pub fn view(&self) -> View {
        self.menu.view()
    }

    /// Overlay owning the screen at `now_ms`, if any
    pub fn overlay(&self, now_ms: u32) -> Option<&Overlay> {
        self.overlay.active(now_ms)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    pub fn tapper(&self) -> &Tapper<A> {
        &self.tapper
    }

    pub fn lifetime_gems(&self) -> u32 {
        self.lifetime_gems
    }

    /// Gems not yet written to the counter store
    pub fn unsaved_gems(&self) -> u32 {
        self.unsaved_gems
    }

    /// Access the underlying storage
    pub fn storage_mut(&mut self) -> &mut S {
        self.counter.storage_mut()
    }

    fn handle_buttons(&mut self, buttons: ButtonEvents, now_ms: u32) {
        if buttons.on_off {
            let enabled = self.toggle_enabled();
            self.show(OverlayKind::Power(enabled), now_ms);
        }
        if buttons.test_mode {
            let test = self.toggle_test_mode(now_ms);
            self.show(OverlayKind::TestMode(test), now_ms);
        }
        if buttons.tap_up || buttons.tap_down {
            let steps = i32::from(buttons.tap_up) - i32::from(buttons.tap_down);
            if steps != 0 {
                self.settings.nudge_tap_duration(steps);
                self.persist_settings();
            }
            self.show(OverlayKind::TapDuration(self.settings.tap_duration_ms), now_ms);
        }
        if buttons.override_sleep {
            let active = self.toggle_override();
            self.show(OverlayKind::OverrideSleep(active), now_ms);
        }
    }

    fn show(&mut self, kind: OverlayKind, now_ms: u32) {
        self.overlay.show(Overlay::standard(kind, now_ms));
    }

    fn toggle_enabled(&mut self) -> bool {
        self.enabled = !self.enabled;
        if !self.enabled {
            self.tapper.stop();
        }
        #[cfg(feature = "defmt")]
        defmt::info!("Device {}", if self.enabled { "on" } else { "off" });
        self.enabled
    }

    fn toggle_test_mode(&mut self, now_ms: u32) -> bool {
        self.settings.mode = self.settings.mode.toggled();
        self.persist_settings();
        self.restart_cadence(now_ms);
        #[cfg(feature = "defmt")]
        defmt::info!("Mode: {}", self.settings.mode);
        self.settings.mode.is_test()
    }

    fn toggle_override(&mut self) -> bool {
        self.override_sleep = !self.override_sleep;
        #[cfg(feature = "defmt")]
        defmt::info!("Sleep override: {}", self.override_sleep);
        self.override_sleep
    }

    fn restart_cadence(&mut self, now_ms: u32) {
        self.cadence.reset(&self.settings.mode.params(), now_ms);
        self.ms_left = self.cadence.remaining(now_ms);
    }

    fn record_gem(&mut self, now_ms: u32) {
        self.lifetime_gems = self.lifetime_gems.saturating_add(1);
        self.unsaved_gems += 1;
        self.restart_cadence(now_ms);

        if self.unsaved_gems >= GEMS_PER_SAVE {
            if let Err(_e) = self.flush() {
                #[cfg(feature = "defmt")]
                defmt::warn!("Counter write failed: {}", _e);
            }
        }
    }

    fn set_lifetime_gems(&mut self, value: u32) {
        self.lifetime_gems = value;
        self.unsaved_gems = 0;
        if let Err(_e) = self.counter.write(value) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Counter write failed: {}", _e);
            // Retry on the next save
            self.unsaved_gems = 1;
        }
    }

    fn persist_settings(&mut self) {
        if let Err(_e) = SettingsStore::save(self.counter.storage_mut(), &self.settings) {
            #[cfg(feature = "defmt")]
            defmt::warn!("Settings save failed: {}", _e);
        }
    }
}
