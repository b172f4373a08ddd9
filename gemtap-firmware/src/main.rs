//! Gemtap - Tap Automation Firmware
//!
//! Drives two solenoid tappers on a jittered cadence while the wall clock
//! is inside the wake window. An RP2040 reads the panel buttons and the
//! rotary encoder, keeps time with a DS1307, persists the lifetime gem
//! count and the settings to the AT24C32 on the same module, and shows
//! the menu on an SSD1306 OLED.
//!
//! Everything runs in one cooperative loop: read inputs, advance the
//! device, render. No tasks are spawned.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_time::{Delay, Duration, Instant, Ticker};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use gemtap_core::device::Device;
use gemtap_core::traits::WallClock;
use gemtap_display::{DisplayBackend, Renderer};
use gemtap_drivers::{At24c, At24cConfig, Ds1307, SharedI2c};

use crate::board::{Board, Bus, BusHandle, CLOCK_POLL_MS, TICK_MS};
use crate::oled::Oled;

mod board;
mod oled;

// The I2C bus outlives every driver holding a handle to it
static I2C_BUS: StaticCell<RefCell<Bus>> = StaticCell::new();

/// Milliseconds since boot, wrapping after ~49 days
fn now_ms() -> u32 {
    Instant::now().as_millis() as u32
}

/// Jitter seed from boot timing and the wall clock
fn jitter_seed(clock: Option<u16>) -> u32 {
    let ticks = Instant::now().as_ticks();
    (ticks as u32) ^ ((ticks >> 32) as u32) ^ (u32::from(clock.unwrap_or(0)) << 16)
}

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Gemtap firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    let Board {
        stage_a,
        stage_b,
        mut panel,
        mut knob,
        i2c,
    } = Board::new(p, now_ms());
    info!("Peripherals initialized");

    let bus: &'static RefCell<Bus> = I2C_BUS.init(RefCell::new(i2c));

    // Display first so the boot screen covers storage and clock start-up
    let mut oled: Oled<BusHandle> = Oled::new(SharedI2c::new(bus));
    if let Err(e) = oled.init() {
        warn!("OLED init failed: {}", e);
    }
    let (cols, rows) = oled.dimensions();
    debug!("OLED text area {}x{}", cols, rows);

    let mut renderer = Renderer::new();
    renderer.render_boot();
    if let Err(e) = renderer.screen().draw_to(&mut oled) {
        warn!("Boot screen failed: {}", e);
    }

    let mut rtc = Ds1307::new(SharedI2c::new(bus));
    let mut clock = rtc.now_minutes();
    match clock {
        Some(minutes) => info!("RTC time {}:{}", minutes / 60, minutes % 60),
        None => warn!("RTC unavailable, tapping only with clock override"),
    }

    let eeprom = At24c::new(SharedI2c::new(bus), Delay, At24cConfig::AT24C32);
    let mut device = Device::new(stage_a, stage_b, eeprom, jitter_seed(clock), now_ms());

    if panel.factory_reset_held() {
        warn!("Factory reset requested");
        if let Err(e) = device.factory_reset(now_ms()) {
            error!("Factory reset failed: {}", e);
        }
    }
    info!("Lifetime gems: {}", device.lifetime_gems());

    let mut ticker = Ticker::every(Duration::from_millis(TICK_MS));
    let mut clock_read_ms = now_ms();

    loop {
        let now = now_ms();

        if now.wrapping_sub(clock_read_ms) >= CLOCK_POLL_MS {
            clock = rtc.now_minutes();
            clock_read_ms = now;
        }

        let buttons = panel.poll(now);
        let encoder = knob.poll(now);
        device.poll(now, clock, encoder, buttons);

        if renderer.render(&device.view(), &device.status(), device.overlay(now)) {
            if let Err(e) = renderer.screen().draw_to(&mut oled) {
                warn!("Display update failed: {}", e);
            }
        }

        ticker.next().await;
    }
}
