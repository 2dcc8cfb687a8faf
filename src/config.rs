//! Configuration for the cyclometer core and firmware.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Defaults match the shipped
//! firmware: a 0.22 m wheel, 10 ms polling, a checkpoint every 10th
//! rotation.
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::config::{Config, TimingConfig, WheelConfig};
//!
//! // Use defaults
//! let config = Config::default();
//! assert_eq!(config.timing.poll_interval_ms, 10);
//!
//! // Or customize
//! let config = Config::default()
//!     .with_wheel(WheelConfig::default().with_diameter_m(0.7))
//!     .with_timing(TimingConfig::default().with_long_idle_ms(30_000));
//! ```

use heapless::String as HString;

/// Maximum length for short config strings (NVS namespaces are limited to 15 bytes)
pub const MAX_SHORT_STRING: usize = 16;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Create a ShortString from a &str, truncating on a char boundary if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    for c in s.chars() {
        if hs.push(c).is_err() {
            break;
        }
    }
    hs
}

// ============================================================================
// Main Config
// ============================================================================

/// Complete application configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Config {
    /// Wheel geometry
    pub wheel: WheelConfig,
    /// Loop cadence and idle/reset thresholds
    pub timing: TimingConfig,
    /// Persistence policy
    pub storage: StorageConfig,
    /// Display layout
    pub display: DisplayConfig,
    /// Input wiring
    pub input: InputConfig,
}

impl Config {
    /// Set wheel configuration
    pub fn with_wheel(mut self, wheel: WheelConfig) -> Self {
        self.wheel = wheel;
        self
    }

    /// Set timing configuration
    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Set storage configuration
    pub fn with_storage(mut self, storage: StorageConfig) -> Self {
        self.storage = storage;
        self
    }

    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set input configuration
    pub fn with_input(mut self, input: InputConfig) -> Self {
        self.input = input;
        self
    }
}

// ============================================================================
// Wheel Config
// ============================================================================

/// Wheel geometry
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WheelConfig {
    /// Wheel diameter in meters
    pub diameter_m: f32,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self { diameter_m: 0.22 }
    }
}

impl WheelConfig {
    /// Set the wheel diameter in meters
    pub fn with_diameter_m(mut self, diameter_m: f32) -> Self {
        self.diameter_m = diameter_m;
        self
    }
}

// ============================================================================
// Timing Config
// ============================================================================

/// Loop cadence and thresholds, all in wall-clock milliseconds
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TimingConfig {
    /// Pause at the end of every tick
    pub poll_interval_ms: u32,
    /// Extra pause after a detected rotation
    pub rotation_holdoff_ms: u32,
    /// Rotations slower than this (inclusive) report zero speed
    pub sane_window_ms: u32,
    /// Idle time after which the speed line shows zero
    pub short_idle_ms: u32,
    /// Idle time after which the whole display is cleared
    pub long_idle_ms: u32,
    /// Pause after a reset; the button is ignored for this long
    pub reset_cooldown_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            poll_interval_ms: 10,
            rotation_holdoff_ms: 100,
            sane_window_ms: 4000,
            short_idle_ms: 4000,
            long_idle_ms: 15_000,
            reset_cooldown_ms: 3000,
        }
    }
}

impl TimingConfig {
    /// Set the polling interval
    pub fn with_poll_interval_ms(mut self, ms: u32) -> Self {
        self.poll_interval_ms = ms;
        self
    }

    /// Set the post-rotation hold-off
    pub fn with_rotation_holdoff_ms(mut self, ms: u32) -> Self {
        self.rotation_holdoff_ms = ms;
        self
    }

    /// Set the sane elapsed-time window
    pub fn with_sane_window_ms(mut self, ms: u32) -> Self {
        self.sane_window_ms = ms;
        self
    }

    /// Set the short idle threshold
    pub fn with_short_idle_ms(mut self, ms: u32) -> Self {
        self.short_idle_ms = ms;
        self
    }

    /// Set the long idle threshold
    pub fn with_long_idle_ms(mut self, ms: u32) -> Self {
        self.long_idle_ms = ms;
        self
    }

    /// Set the reset cooldown
    pub fn with_reset_cooldown_ms(mut self, ms: u32) -> Self {
        self.reset_cooldown_ms = ms;
        self
    }
}

// ============================================================================
// Storage Config
// ============================================================================

/// Persistence policy
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StorageConfig {
    /// NVS namespace holding the counters
    pub namespace: ShortString,
    /// Persist the rotation count every Nth rotation (never 0)
    pub checkpoint_every: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            namespace: short_string("storage"),
            checkpoint_every: 10,
        }
    }
}

impl StorageConfig {
    /// Set the NVS namespace
    pub fn with_namespace(mut self, namespace: &str) -> Self {
        self.namespace = short_string(namespace);
        self
    }

    /// Set the checkpoint cadence (clamped to at least 1)
    pub fn with_checkpoint_every(mut self, every: u32) -> Self {
        self.checkpoint_every = every.max(1);
        self
    }

    /// Whether `count` lands on a checkpoint
    pub fn is_checkpoint(&self, count: u32) -> bool {
        count % self.checkpoint_every.max(1) == 0
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Which display rows carry which readout
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Row for the distance line
    pub distance_row: u8,
    /// Row for the live speed line
    pub speed_row: u8,
    /// Row for the record speed line
    pub peak_row: u8,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            distance_row: 2,
            speed_row: 3,
            peak_row: 4,
        }
    }
}

impl DisplayConfig {
    /// Set all three rows at once
    pub fn with_rows(mut self, distance: u8, speed: u8, peak: u8) -> Self {
        self.distance_row = distance;
        self.speed_row = speed;
        self.peak_row = peak;
        self
    }
}

// ============================================================================
// Input Config
// ============================================================================

/// Input wiring
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputConfig {
    /// Reset button reads low while pressed
    pub button_active_low: bool,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            button_active_low: true,
        }
    }
}

impl InputConfig {
    /// Set button polarity
    pub fn with_button_active_low(mut self, active_low: bool) -> Self {
        self.button_active_low = active_low;
        self
    }
}
