//! Hardware abstraction traits for digital inputs and timekeeping.
//!
//! The control loop samples every input synchronously once per tick. There
//! is no interrupt path: edges are derived from consecutive samples.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`LevelInput`] | Wheel sensor or push button level |
//! | [`Clock`] | Millisecond tick source |
//!
//! # Implementation
//!
//! For testing and desktop development, use the mock implementations
//! from [`crate::hal::mock`]. For ESP32 hardware, use the
//! implementations from `hal::esp32` (requires `esp32` feature).
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::traits::LevelInput;
//! use rs_cyclometer::hal::MockInput;
//!
//! let mut sensor = MockInput::high();
//! assert!(sensor.read_level());
//!
//! sensor.set_level(false);
//! assert!(!sensor.read_level());
//! ```

/// A digital input sampled once per tick.
///
/// `true` means the pin reads high. Whether high means "active" is up to the
/// consumer: the wheel sensor pulls low as the magnet passes, and the reset
/// button is wired active low.
pub trait LevelInput {
    /// Returns the current pin level.
    fn read_level(&mut self) -> bool;
}

/// Time source for tick timestamps.
///
/// Provides monotonic time in milliseconds. On ESP32 this wraps the
/// high-resolution timer; in tests use [`MockClock`](crate::hal::MockClock).
///
/// # Example
///
/// ```rust
/// use rs_cyclometer::traits::Clock;
/// use rs_cyclometer::hal::MockClock;
///
/// let mut clock = MockClock::new();
/// assert_eq!(clock.now_ms(), 0);
///
/// clock.advance(10);
/// assert_eq!(clock.now_ms(), 10);
/// ```
pub trait Clock {
    /// Returns current time in milliseconds since an arbitrary epoch.
    ///
    /// Must never decrease.
    fn now_ms(&self) -> u64;
}
