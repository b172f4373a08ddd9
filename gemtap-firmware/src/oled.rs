//! SSD1306 OLED text backend

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoTextStyle, MonoTextStyleBuilder};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::*;
use embedded_graphics::text::{Baseline, Text};
use gemtap_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};
use ssd1306::mode::BufferedGraphicsMode;
use ssd1306::prelude::*;
use ssd1306::I2CDisplayInterface;
use ssd1306::Ssd1306;

const CHAR_WIDTH: i32 = 6;
const LINE_HEIGHT: i32 = 10;

/// 6 rows of 10 px leave 4 px; split them above and below
const TOP_MARGIN: i32 = 2;

type Display<I2C> =
    Ssd1306<I2CInterface<I2C>, DisplaySize128x64, BufferedGraphicsMode<DisplaySize128x64>>;

/// 128x64 SSD1306 on I2C, driven as a 21x6 character display
pub struct Oled<I2C> {
    display: Display<I2C>,
    ready: bool,
}

impl<I2C: embedded_hal::i2c::I2c> Oled<I2C> {
    pub fn new(i2c: I2C) -> Self {
        let interface = I2CDisplayInterface::new(i2c);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();
        Self {
            display,
            ready: false,
        }
    }

    /// Send the controller init sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        self.display
            .init()
            .map_err(|_| DisplayError::Communication)?;
        self.ready = true;
        Ok(())
    }
}

fn style(inverted: bool) -> MonoTextStyle<'static, BinaryColor> {
    let builder = MonoTextStyleBuilder::new().font(&FONT_6X10);
    if inverted {
        builder
            .text_color(BinaryColor::Off)
            .background_color(BinaryColor::On)
            .build()
    } else {
        builder.text_color(BinaryColor::On).build()
    }
}

impl<I2C: embedded_hal::i2c::I2c> DisplayBackend for Oled<I2C> {
    fn clear(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        self.display.clear_buffer();
        Ok(())
    }

    fn draw_text(
        &mut self,
        row: u8,
        col: u8,
        text: &str,
        inverted: bool,
    ) -> Result<(), DisplayError> {
        if usize::from(row) >= SCREEN_ROWS || usize::from(col) >= SCREEN_COLS {
            return Err(DisplayError::InvalidCoordinates);
        }
        let origin = Point::new(
            i32::from(col) * CHAR_WIDTH,
            TOP_MARGIN + i32::from(row) * LINE_HEIGHT,
        );
        Text::with_baseline(text, origin, style(inverted), Baseline::Top)
            .draw(&mut self.display)
            .map_err(|_| DisplayError::Communication)?;
        Ok(())
    }

    fn flush(&mut self) -> Result<(), DisplayError> {
        if !self.ready {
            return Err(DisplayError::NotInitialized);
        }
        self.display
            .flush()
            .map_err(|_| DisplayError::Communication)
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
