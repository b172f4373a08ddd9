//! Screen buffer types
//!
//! Provides a character-based screen buffer for text-mode displays.

use heapless::String;

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows (64 px / 10 px font)
pub const SCREEN_ROWS: usize = 6;

/// Number of character columns (128 px / 6 px font)
pub const SCREEN_COLS: usize = 21;

/// Maximum characters per line
pub const LINE_LEN: usize = SCREEN_COLS;

/// Screen buffer for text-mode displays
///
/// Compared by value, so a renderer can tell whether a freshly built frame
/// differs from the one on the display.
#[derive(Clone, PartialEq, Eq)]
pub struct Screen {
    lines: [String<LINE_LEN>; SCREEN_ROWS],
    /// Highlight per row (start_col, end_col exclusive)
    highlights: [Option<(u8, u8)>; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a new empty screen
    pub fn new() -> Self {
        Self {
            lines: core::array::from_fn(|_| String::new()),
            highlights: [None; SCREEN_ROWS],
        }
    }

    /// Clear the entire screen
    pub fn clear(&mut self) {
        for line in &mut self.lines {
            line.clear();
        }
        self.highlights = [None; SCREEN_ROWS];
    }

    /// Set the content of a row, truncated to the line length
    pub fn set_line(&mut self, row: usize, text: &str) {
        if let Some(line) = self.lines.get_mut(row) {
            line.clear();
            for ch in text.chars().take(LINE_LEN) {
                let _ = line.push(ch);
            }
        }
    }

    /// Get the content of a row
    pub fn get_line(&self, row: usize) -> Option<&str> {
        self.lines.get(row).map(|s| s.as_str())
    }

    /// Highlight columns `start_col..end_col` of a row
    pub fn set_highlight(&mut self, row: usize, start_col: u8, end_col: u8) {
        if row < SCREEN_ROWS && start_col < end_col {
            self.highlights[row] = Some((start_col, end_col.min(SCREEN_COLS as u8)));
        }
    }

    /// Highlight the whole text of a row
    pub fn highlight_line(&mut self, row: usize) {
        let len = self.get_line(row).map_or(0, |line| line.len());
        self.set_highlight(row, 0, len.max(1) as u8);
    }

    /// Get highlight region for a row
    pub fn get_highlight(&self, row: usize) -> Option<(u8, u8)> {
        self.highlights.get(row).copied().flatten()
    }

    /// Get all lines as an iterator
    pub fn lines(&self) -> impl Iterator<Item = &str> {
        self.lines.iter().map(|s| s.as_str())
    }

    /// Draw the whole screen to a backend and flush it
    pub fn draw_to<B: DisplayBackend>(&self, backend: &mut B) -> Result<(), DisplayError> {
        backend.clear()?;

        for (row, line) in self.lines.iter().enumerate() {
            let row_u8 = row as u8;
            let text = line.as_str();
            match self.highlights[row] {
                None => {
                    if !text.is_empty() {
                        backend.draw_text(row_u8, 0, text, false)?;
                    }
                }
                Some((start, end)) => {
                    // Pad so the highlight covers its full width
                    let mut padded: String<LINE_LEN> = String::new();
                    let _ = padded.push_str(text);
                    while padded.len() < usize::from(end) {
                        if padded.push(' ').is_err() {
                            break;
                        }
                    }
                    let (start, end) = (usize::from(start), usize::from(end).min(padded.len()));
                    let start = start.min(end);

                    if start > 0 {
                        backend.draw_text(row_u8, 0, &padded[..start], false)?;
                    }
                    backend.draw_text(row_u8, start as u8, &padded[start..end], true)?;
                    if end < padded.len() {
                        backend.draw_text(row_u8, end as u8, &padded[end..], false)?;
                    }
                }
            }
        }

        backend.flush()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for (i, line) in self.lines.iter().enumerate() {
            if i > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", line.as_str());
        }
        defmt::write!(f, "]");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type Call = (u8, u8, std::string::String, bool);

    fn call(row: u8, col: u8, text: &str, inverted: bool) -> Call {
        (row, col, text.to_string(), inverted)
    }

    /// Records draw calls
    #[derive(Default)]
    struct MockBackend {
        calls: Vec<Call>,
        cleared: bool,
        flushed: bool,
    }

    impl DisplayBackend for MockBackend {
        fn clear(&mut self) -> Result<(), DisplayError> {
            self.cleared = true;
            Ok(())
        }

        fn draw_text(
            &mut self,
            row: u8,
            col: u8,
            text: &str,
            inverted: bool,
        ) -> Result<(), DisplayError> {
            self.calls.push(call(row, col, text, inverted));
            Ok(())
        }

        fn flush(&mut self) -> Result<(), DisplayError> {
            self.flushed = true;
            Ok(())
        }

        fn dimensions(&self) -> (u8, u8) {
            (SCREEN_COLS as u8, SCREEN_ROWS as u8)
        }
    }

    #[test]
    fn test_set_line_truncates() {
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        assert_eq!(screen.get_line(0), Some("Hello"));
        screen.set_line(1, "0123456789012345678901234");
        assert_eq!(screen.get_line(1).unwrap().len(), SCREEN_COLS);
        screen.set_line(SCREEN_ROWS, "ignored");
        assert_eq!(screen.get_line(SCREEN_ROWS), None);
    }

    #[test]
    fn test_clear() {
        let mut screen = Screen::new();
        screen.set_line(0, "Hello");
        screen.highlight_line(0);
        screen.clear();
        assert_eq!(screen.get_line(0), Some(""));
        assert_eq!(screen.get_highlight(0), None);
        assert!(screen == Screen::new());
    }

    #[test]
    fn test_draw_plain_lines() {
        let mut screen = Screen::new();
        screen.set_line(0, "Title");
        screen.set_line(2, "Body");
        let mut backend = MockBackend::default();
        screen.draw_to(&mut backend).unwrap();

        assert!(backend.cleared && backend.flushed);
        assert_eq!(
            backend.calls,
            vec![call(0, 0, "Title", false), call(2, 0, "Body", false)]
        );
    }

    #[test]
    fn test_draw_highlight_segments() {
        let mut screen = Screen::new();
        screen.set_line(1, "> Save");
        screen.set_highlight(1, 2, 8);
        let mut backend = MockBackend::default();
        screen.draw_to(&mut backend).unwrap();

        assert_eq!(
            backend.calls,
            vec![call(1, 0, "> ", false), call(1, 2, "Save  ", true)]
        );
    }
}
