//! Falling-edge detection on the wheel sensor.
//!
//! The hall sensor output idles high and is pulled low while the magnet
//! passes, so one high-to-low transition is one completed wheel rotation.
//! Only consecutive samples are compared; there is no filtering window.
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::rotation::RotationTracker;
//!
//! // Seed from the level read before the first tick
//! let mut tracker = RotationTracker::seeded(true);
//!
//! assert!(!tracker.observe(true));  // steady high
//! assert!(tracker.observe(false));  // high -> low: rotation
//! assert!(!tracker.observe(false)); // steady low
//! assert!(!tracker.observe(true));  // low -> high: nothing
//! ```

/// Returns `true` for a high-to-low transition.
#[inline]
pub const fn is_falling_edge(prev: bool, curr: bool) -> bool {
    prev && !curr
}

/// Remembers the previous tick's sensor level.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationTracker {
    prev: bool,
}

impl RotationTracker {
    /// Creates a tracker seeded with an initial read of the sensor.
    ///
    /// Seeding with the real level keeps the very first tick from firing
    /// when the sensor already sits low at boot.
    pub const fn seeded(initial_level: bool) -> Self {
        Self {
            prev: initial_level,
        }
    }

    /// Evaluates this tick's level and records it as the previous one.
    ///
    /// Returns `true` when a rotation completed.
    pub fn observe(&mut self, curr: bool) -> bool {
        let fired = is_falling_edge(self.prev, curr);
        self.prev = curr;
        fired
    }

    /// The level recorded on the last tick.
    #[inline]
    pub fn previous_level(&self) -> bool {
        self.prev
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_truth_table() {
        assert!(is_falling_edge(true, false));
        assert!(!is_falling_edge(false, true));
        assert!(!is_falling_edge(true, true));
        assert!(!is_falling_edge(false, false));
    }

    #[test]
    fn seeded_low_does_not_fire_on_first_tick() {
        let mut tracker = RotationTracker::seeded(false);
        assert!(!tracker.observe(false));
    }

    #[test]
    fn seeded_high_fires_on_first_low() {
        let mut tracker = RotationTracker::seeded(true);
        assert!(tracker.observe(false));
    }

    #[test]
    fn one_event_per_maximal_falling_transition() {
        let samples = [
            true, true, false, false, false, true, false, true, true, false, true,
        ];
        let mut tracker = RotationTracker::seeded(true);
        let fired = samples.iter().filter(|&&s| tracker.observe(s)).count();
        // Falls at indices 2, 6, 9
        assert_eq!(fired, 3);
    }

    #[test]
    fn observe_records_previous_level() {
        let mut tracker = RotationTracker::seeded(true);
        tracker.observe(false);
        assert!(!tracker.previous_level());
        tracker.observe(true);
        assert!(tracker.previous_level());
    }
}
