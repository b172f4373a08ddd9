//! Board wiring (Raspberry Pi Pico)
//!
//! | Function                 | GPIO |
//! |--------------------------|------|
//! | I2C0 SDA (RTC, EEPROM, OLED) | 4 |
//! | I2C0 SCL                 | 5    |
//! | Encoder A / B            | 6 / 7 |
//! | Encoder switch           | 8    |
//! | On/off button            | 10   |
//! | Test mode button         | 11   |
//! | Tap duration up / down   | 12 / 13 |
//! | Override clock button    | 14   |
//! | Stage A solenoid gate    | 26   |
//! | Stage B solenoid gate    | 22   |
//!
//! Buttons and encoder switch read low when pressed (internal pull-ups).
//! Solenoid gates drive logic-level MOSFETs, active high.

use embassy_rp::gpio::{Input, Level, Output, Pull};
use embassy_rp::i2c::{self, Blocking, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_rp::Peripherals;
use gemtap_drivers::{Encoder, HalInput, HalOutput, Panel, SharedI2c, Solenoid};

/// Main loop period (ms)
pub const TICK_MS: u64 = 5;

/// How often the RTC is read (ms)
pub const CLOCK_POLL_MS: u32 = 1000;

/// I2C bus clock
const I2C_FREQUENCY_HZ: u32 = 400_000;

pub type Bus = I2c<'static, I2C0, Blocking>;
pub type BusHandle = SharedI2c<'static, Bus>;
pub type Gate = Solenoid<HalOutput<Output<'static>>>;
pub type PanelInput = HalInput<Input<'static>>;
pub type Knob = Encoder<PanelInput, PanelInput, PanelInput>;

/// Board peripherals, configured
pub struct Board {
    pub stage_a: Gate,
    pub stage_b: Gate,
    pub panel: Panel<PanelInput>,
    pub knob: Knob,
    pub i2c: Bus,
}

impl Board {
    pub fn new(p: Peripherals, now_ms: u32) -> Self {
        let stage_a = Solenoid::new_active_high(HalOutput::new(Output::new(p.PIN_26, Level::Low)));
        let stage_b = Solenoid::new_active_high(HalOutput::new(Output::new(p.PIN_22, Level::Low)));

        let panel = Panel::new(
            HalInput::new(Input::new(p.PIN_10, Pull::Up)),
            HalInput::new(Input::new(p.PIN_11, Pull::Up)),
            HalInput::new(Input::new(p.PIN_12, Pull::Up)),
            HalInput::new(Input::new(p.PIN_13, Pull::Up)),
            HalInput::new(Input::new(p.PIN_14, Pull::Up)),
            now_ms,
        );

        let knob = Encoder::new(
            HalInput::new(Input::new(p.PIN_6, Pull::Up)),
            HalInput::new(Input::new(p.PIN_7, Pull::Up)),
            HalInput::new(Input::new(p.PIN_8, Pull::Up)),
            now_ms,
        );

        let mut config = i2c::Config::default();
        config.frequency = I2C_FREQUENCY_HZ;
        let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, config);

        Self {
            stage_a,
            stage_b,
            panel,
            knob,
            i2c,
        }
    }
}
