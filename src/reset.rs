//! Reset button handling.
//!
//! A press clears the odometer only when there is something to clear, and
//! then holds off further presses for a cooldown so a held button cannot
//! re-trigger. The cooldown is measured in wall-clock time, not ticks.
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::reset::ResetController;
//! use rs_cyclometer::odometer::OdometerRecord;
//!
//! // Active-low button, 3 s cooldown
//! let mut reset = ResetController::new(3000, true);
//! let record = OdometerRecord::new(7, 1500);
//!
//! assert!(!reset.should_reset(true, &record, 0)); // released
//! assert!(reset.should_reset(false, &record, 0)); // pressed
//!
//! reset.arm(0);
//! assert!(!reset.should_reset(false, &record, 2999));
//! assert!(reset.should_reset(false, &record, 3000));
//! ```

use crate::odometer::OdometerRecord;

/// Debounced reset decision.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ResetController {
    cooldown_ms: u32,
    active_low: bool,
    cooldown_until: Option<u64>,
}

impl ResetController {
    /// Creates a controller for a button wired `active_low` (or high).
    pub const fn new(cooldown_ms: u32, active_low: bool) -> Self {
        Self {
            cooldown_ms,
            active_low,
            cooldown_until: None,
        }
    }

    /// Whether the raw pin `level` means "pressed".
    #[inline]
    pub fn is_asserted(&self, level: bool) -> bool {
        level != self.active_low
    }

    /// Whether this tick should reset the odometer.
    ///
    /// Requires a pressed button, a non-zero record, and no running cooldown.
    pub fn should_reset(&self, button_level: bool, record: &OdometerRecord, now_ms: u64) -> bool {
        self.is_asserted(button_level) && !record.is_zero() && !self.is_cooling(now_ms)
    }

    /// Starts the cooldown window at `now_ms`.
    pub fn arm(&mut self, now_ms: u64) {
        self.cooldown_until = Some(now_ms.saturating_add(self.cooldown_ms as u64));
    }

    /// Whether presses are still being ignored at `now_ms`.
    pub fn is_cooling(&self, now_ms: u64) -> bool {
        self.cooldown_until.is_some_and(|until| now_ms < until)
    }

    /// The configured cooldown.
    pub fn cooldown_ms(&self) -> u32 {
        self.cooldown_ms
    }
}
