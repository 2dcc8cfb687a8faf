//! Display abstraction for the cyclometer readout.
//!
//! This module defines the [`TextDisplay`] trait. The control loop formats
//! every line itself and only hands finished text and a row index to the
//! display.

/// Row-addressed text display.
///
/// Rows are 8 pixel pages on a 128x64 SSD1306, so valid rows are `0..8`.
/// Showing text on a row replaces whatever was on that row before.
///
/// # Example
///
/// ```ignore
/// use rs_cyclometer::traits::TextDisplay;
///
/// struct MyDisplay { /* ... */ }
///
/// impl TextDisplay for MyDisplay {
///     type Error = ();
///
///     fn init(&mut self) -> Result<(), ()> { Ok(()) }
///     fn clear_all(&mut self) -> Result<(), ()> { Ok(()) }
///     fn show(&mut self, row: u8, text: &str, inverted: bool) -> Result<(), ()> {
///         // Blank the row, draw the glyphs...
///         Ok(())
///     }
/// }
/// ```
pub trait TextDisplay {
    /// Error type for display operations.
    type Error: core::fmt::Debug;

    /// Initializes the display hardware.
    ///
    /// Called once at startup, before the first line is drawn.
    fn init(&mut self) -> Result<(), Self::Error>;

    /// Blanks every row.
    fn clear_all(&mut self) -> Result<(), Self::Error>;

    /// Renders `text` on `row`, replacing the row's previous contents.
    ///
    /// `inverted` draws dark text on a lit background.
    fn show(&mut self, row: u8, text: &str, inverted: bool) -> Result<(), Self::Error>;
}
