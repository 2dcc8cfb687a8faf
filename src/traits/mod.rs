//! Trait definitions for the collaborators the control loop drives.
//!
//! This module defines the abstractions that allow rs-cyclometer to:
//! - Run on ESP32 hardware or entirely on the desktop with mocks
//! - Swap the persistent store without touching the control logic
//! - Render to any row-addressed text display
//!
//! # Submodules
//!
//! - `hardware`: Digital level inputs and the millisecond clock
//! - `display`: Row-based text rendering
//! - `storage`: Named 32-bit counter persistence
//!
//! # Key Traits
//!
//! - [`LevelInput`]: Wheel sensor and reset button sampling
//! - [`Clock`]: Monotonic time source for tick timestamps
//! - [`TextDisplay`]: Fixed-row text output (SSD1306 pages on hardware)
//! - [`CounterStore`]: Durable `i32` counters (NVS on hardware)

pub mod display;
pub mod hardware;
pub mod storage;

pub use display::*;
pub use hardware::*;
pub use storage::*;
