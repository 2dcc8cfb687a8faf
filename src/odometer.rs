//! Lifetime rotation count and all-time peak speed.
//!
//! [`OdometerRecord`] is the in-memory, authoritative copy of the two
//! persisted counters. It reports what changed on each rotation so the
//! caller can decide whether a store write is warranted; it never touches
//! the store itself (see [`crate::persist`]).
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::odometer::OdometerRecord;
//!
//! let mut record = OdometerRecord::default();
//!
//! let outcome = record.on_rotation(1990);
//! assert_eq!(outcome.count, 1);
//! assert_eq!(outcome.new_peak, Some(1990));
//!
//! // A tie is not a new record
//! let outcome = record.on_rotation(1990);
//! assert_eq!(outcome.count, 2);
//! assert_eq!(outcome.new_peak, None);
//! ```

/// Rotation count and peak speed.
///
/// Both fields only grow, except through [`reset`](Self::reset).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OdometerRecord {
    /// Wheel rotations since the last reset
    pub rotation_count: u32,
    /// Highest speed seen since the last reset, in centi-km/h
    pub peak_speed_centi_kmh: u32,
}

/// What a single rotation changed.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RotationOutcome {
    /// Rotation count after this rotation
    pub count: u32,
    /// The new peak, if this rotation set one
    pub new_peak: Option<u32>,
}

impl OdometerRecord {
    /// Creates a record from stored values.
    pub const fn new(rotation_count: u32, peak_speed_centi_kmh: u32) -> Self {
        Self {
            rotation_count,
            peak_speed_centi_kmh,
        }
    }

    /// Counts one rotation at `int_speed` centi-km/h.
    ///
    /// The count always advances. The peak only moves on a strictly greater
    /// speed.
    pub fn on_rotation(&mut self, int_speed: u32) -> RotationOutcome {
        self.rotation_count = self.rotation_count.saturating_add(1);

        let new_peak = if int_speed > self.peak_speed_centi_kmh {
            self.peak_speed_centi_kmh = int_speed;
            Some(int_speed)
        } else {
            None
        };

        RotationOutcome {
            count: self.rotation_count,
            new_peak,
        }
    }

    /// Zeroes both counters, returning the new `(count, peak)`.
    pub fn reset(&mut self) -> (u32, u32) {
        *self = Self::default();
        (self.rotation_count, self.peak_speed_centi_kmh)
    }

    /// Returns true if both counters are zero.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.rotation_count == 0 && self.peak_speed_centi_kmh == 0
    }

    /// Distance covered, in meters, for a wheel of `diameter_m`.
    pub fn distance_m(&self, diameter_m: f32) -> f32 {
        self.rotation_count as f32 * diameter_m * core::f32::consts::PI
    }

    /// Peak speed in km/h.
    pub fn peak_kmh(&self) -> f32 {
        self.peak_speed_centi_kmh as f32 / 100.0
    }
}
