//! DS1307 real-time clock
//!
//! Battery-backed RTC on I2C. Only the time of day is used: registers
//! 0x00..=0x02 hold seconds, minutes and hours in BCD.

use embedded_hal::i2c::I2c;
use gemtap_core::schedule::TimeOfDay;
use gemtap_core::traits::WallClock;

/// Fixed 7-bit I2C address
pub const DS1307_ADDR: u8 = 0x68;

/// DS1307 registers
mod reg {
    pub const SECONDS: u8 = 0x00;
}

/// Seconds register: clock halt flag
const CH_BIT: u8 = 0x80;
/// Hours register: 12-hour mode flag
const MODE_12H_BIT: u8 = 0x40;
/// Hours register: PM flag in 12-hour mode
const PM_BIT: u8 = 0x20;

/// DS1307 driver
pub struct Ds1307<I> {
    i2c: I,
}

impl<I: I2c> Ds1307<I> {
    pub fn new(i2c: I) -> Self {
        Self { i2c }
    }

    /// Release the bus
    pub fn release(self) -> I {
        self.i2c
    }

    /// Read the time of day
    ///
    /// `None` on a bus error, while the oscillator is halted (fresh or
    /// battery-less chip), or when the registers do not hold a valid time.
    pub fn read_time(&mut self) -> Option<TimeOfDay> {
        let mut regs = [0u8; 3];
        if self.i2c.write_read(DS1307_ADDR, &[reg::SECONDS], &mut regs).is_err() {
            #[cfg(feature = "defmt")]
            defmt::trace!("DS1307 read failed");
            return None;
        }

        let [seconds, minutes, hours] = regs;
        if seconds & CH_BIT != 0 {
            return None;
        }

        let minute = bcd_to_bin(minutes & 0x7F)?;
        let hour = if hours & MODE_12H_BIT != 0 {
            let hour12 = bcd_to_bin(hours & 0x1F)?;
            if !(1..=12).contains(&hour12) {
                return None;
            }
            let pm = hours & PM_BIT != 0;
            (hour12 % 12) + if pm { 12 } else { 0 }
        } else {
            bcd_to_bin(hours & 0x3F)?
        };

        TimeOfDay::new(hour, minute)
    }

    /// Set the time of day in 24-hour mode and start the oscillator
    ///
    /// Seconds are reset to zero.
    pub fn set_time(&mut self, time: TimeOfDay) -> Result<(), I::Error> {
        let frame = [
            reg::SECONDS,
            0, // seconds 0, CH cleared
            bin_to_bcd(time.minute()),
            bin_to_bcd(time.hour()),
        ];
        self.i2c.write(DS1307_ADDR, &frame)
    }
}

impl<I: I2c> WallClock for Ds1307<I> {
    fn now(&mut self) -> Option<TimeOfDay> {
        self.read_time()
    }
}

/// Decode a packed BCD byte, rejecting digits above 9
fn bcd_to_bin(value: u8) -> Option<u8> {
    let (tens, ones) = (value >> 4, value & 0x0F);
    if tens > 9 || ones > 9 {
        return None;
    }
    Some(tens * 10 + ones)
}

fn bin_to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}
