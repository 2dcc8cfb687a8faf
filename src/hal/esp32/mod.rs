//! ESP32-C3 hardware abstraction layer for the cyclometer.
//!
//! # Hardware Configuration
//!
//! - **MCU**: ESP32-C3 (RISC-V 160MHz, 4MB Flash)
//! - **Wheel sensor**: CH912 hall switch, open drain, pulled low by the magnet
//! - **Reset button**: momentary switch to ground
//! - **Display**: SSD1306 128x64 OLED (I2C)
//! - **Storage**: default NVS partition, one namespace for both counters
//!
//! # Pin Assignments
//!
//! See the [`pins`] module for GPIO assignments.

mod clock;
mod input;
mod storage;

pub use clock::Esp32Clock;
pub use input::Esp32Input;
pub use storage::Esp32Store;

#[cfg(feature = "display")]
mod display;
#[cfg(feature = "display")]
pub use display::{DisplayError, Esp32Display};

/// Pin assignments for the ESP32-C3 board.
pub mod pins {
    // =========================================================================
    // Inputs
    // =========================================================================

    /// Hall sensor output (internal pull-up, low while the magnet passes)
    pub const SENSOR: i32 = 9;

    /// Reset button (internal pull-up, active low)
    pub const BUTTON: i32 = 8;

    // =========================================================================
    // I2C Display (SSD1306)
    // =========================================================================

    /// I2C data line
    pub const I2C_SDA: i32 = 6;

    /// I2C clock line
    pub const I2C_SCL: i32 = 7;

    /// Default I2C address for SSD1306 OLED
    pub const OLED_I2C_ADDR: u8 = 0x3C;
}
