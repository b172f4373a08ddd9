//! Display backend trait
//!
//! Defines the interface for different display types.

/// Display backend errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display backend trait
///
/// Provides a hardware-agnostic interface for rendering text. Coordinates
/// are in character cells.
pub trait DisplayBackend {
    /// Clear the frame
    fn clear(&mut self) -> Result<(), DisplayError>;

    /// Draw text at the specified row and column
    ///
    /// `inverted` draws dark text on a lit background (selection highlight).
    fn draw_text(&mut self, row: u8, col: u8, text: &str, inverted: bool)
        -> Result<(), DisplayError>;

    /// Send the frame to the hardware
    fn flush(&mut self) -> Result<(), DisplayError>;

    /// Display size as (columns, rows) in character units
    fn dimensions(&self) -> (u8, u8);
}
