//! Text formatting helpers

use core::fmt::Write;

use gemtap_core::schedule::TimeOfDay;
use heapless::String;

/// Width of the lifetime counter field on the home screen
pub const COUNT_FIELD_COLS: usize = 16;

/// Text shown when a count does not fit its field
pub const TOO_LARGE: &str = "ERR: too large";

/// Format a number with comma thousands separators ("1,234,567")
pub fn with_commas(value: u32) -> String<16> {
    let mut digits: String<10> = String::new();
    let _ = write!(digits, "{}", value);

    let mut out = String::new();
    let len = digits.len();
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            let _ = out.push(',');
        }
        let _ = out.push(ch);
    }
    out
}

/// Comma-grouped count, or [`TOO_LARGE`] when wider than `cols`
pub fn count_field(value: u32, cols: usize) -> String<16> {
    let text = with_commas(value);
    if text.len() > cols {
        let mut err = String::new();
        let _ = err.push_str(TOO_LARGE);
        err
    } else {
        text
    }
}

/// Format a duration as "MM:SS" (minutes keep growing past 99)
pub fn mm_ss(ms: u32) -> String<8> {
    let secs = ms / 1000;
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", secs / 60, secs % 60);
    out
}

/// Format a time of day as "HH:MM"
pub fn hh_mm(time: TimeOfDay) -> String<5> {
    let mut out = String::new();
    let _ = write!(out, "{:02}:{:02}", time.hour(), time.minute());
    out
}
