//! SSD1306 OLED text display for ESP32.
//!
//! The 128x64 panel is split into eight 8-pixel pages; each page is one
//! text row drawn with the 5x8 font (25 characters per row).
//! Only the I2C interface and the 128x64 panel are supported.
//!
//! # Wiring
//!
//! - SDA → GPIO6
//! - SCL → GPIO7
//! - VCC → 3.3V
//! - GND → GND

use crate::traits::TextDisplay;
use embedded_graphics::{
    mono_font::{ascii::FONT_5X8, MonoTextStyle},
    pixelcolor::BinaryColor,
    prelude::*,
    primitives::{PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};
use esp_idf_hal::i2c::I2cDriver;
use ssd1306::{mode::BufferedGraphicsMode, prelude::*, I2CDisplayInterface, Ssd1306};

/// SSD1306 display type alias for cleaner code.
type DisplayDriver<'d> = Ssd1306<
    I2CInterface<I2cDriver<'d>>,
    DisplaySize128x64,
    BufferedGraphicsMode<DisplaySize128x64>,
>;

/// Pixel height of one text row.
const ROW_HEIGHT: u32 = 8;

/// Number of text rows on the panel.
const ROWS: u8 = 8;

/// SSD1306 OLED for ESP32.
///
/// # Display Layout
///
/// ```text
/// ┌────────────────────────────┐
/// │                            │  row 0
/// │                            │  row 1
/// │ Distance: 69.1             │  row 2
/// │ Km/h: 19.9                 │  row 3
/// │ Max speed: 23.4            │  row 4
/// │                            │  rows 5-7
/// └────────────────────────────┘
/// ```
pub struct Esp32Display<'d> {
    display: DisplayDriver<'d>,
}

impl<'d> Esp32Display<'d> {
    /// Creates a new display instance.
    ///
    /// Call [`TextDisplay::init`] before drawing.
    pub fn new(i2c: I2cDriver<'d>) -> Self {
        let interface = I2CDisplayInterface::new_custom_address(i2c, super::pins::OLED_I2C_ADDR);
        let display = Ssd1306::new(interface, DisplaySize128x64, DisplayRotation::Rotate0)
            .into_buffered_graphics_mode();

        Self { display }
    }
}

impl TextDisplay for Esp32Display<'_> {
    type Error = DisplayError;

    fn init(&mut self) -> Result<(), Self::Error> {
        self.display.init()?;
        self.display.set_brightness(Brightness::BRIGHTEST)?;
        self.clear_all()
    }

    fn clear_all(&mut self) -> Result<(), Self::Error> {
        self.display.clear(BinaryColor::Off)?;
        self.display.flush()?;
        Ok(())
    }

    fn show(&mut self, row: u8, text: &str, inverted: bool) -> Result<(), Self::Error> {
        if row >= ROWS {
            return Err(DisplayError);
        }

        let (background, foreground) = if inverted {
            (BinaryColor::On, BinaryColor::Off)
        } else {
            (BinaryColor::Off, BinaryColor::On)
        };

        let top = i32::from(row) * ROW_HEIGHT as i32;
        let width = self.display.bounding_box().size.width;

        // Blank the whole row so shorter text leaves no stale glyphs
        Rectangle::new(Point::new(0, top), Size::new(width, ROW_HEIGHT))
            .into_styled(PrimitiveStyle::with_fill(background))
            .draw(&mut self.display)?;

        let style = MonoTextStyle::new(&FONT_5X8, foreground);
        Text::with_baseline(text, Point::new(0, top), style, Baseline::Top)
            .draw(&mut self.display)?;

        self.display.flush()?;
        Ok(())
    }
}

/// Display error type.
#[derive(Debug)]
pub struct DisplayError;

impl From<display_interface::DisplayError> for DisplayError {
    fn from(_: display_interface::DisplayError) -> Self {
        DisplayError
    }
}
