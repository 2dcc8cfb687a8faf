//! Speed estimation from the time between two rotations.
//!
//! Speed is computed in floating point, but everything that is compared or
//! persisted uses integer centi-km/h (km/h × 100) so stored records never
//! drift.
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::speed::SpeedEstimator;
//!
//! let estimator = SpeedEstimator::new(0.22, 4000);
//!
//! // First rotation ever: nothing to measure against
//! assert!(estimator.sample(None, 500).is_none());
//!
//! // 500 ms per rotation on a 0.22 m wheel
//! let sample = estimator.sample(Some(0), 500).unwrap();
//! assert_eq!(sample.elapsed_ms, 500);
//! assert!((sample.speed_kmh - 19.9).abs() < 0.05);
//!
//! // A 4 s gap is treated as stopped
//! assert!(estimator.sample(Some(1000), 5000).is_none());
//! ```

/// Folds circumference, minutes and kilometers into one factor applied to
/// `rpm * diameter_m`. Calibrated against the wheel sensor, not re-derived.
pub const SPEED_FACTOR: f32 = 0.75398;

/// Speed derived from one inter-rotation interval.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpeedSample {
    /// Milliseconds since the previous rotation
    pub elapsed_ms: i32,
    /// Instantaneous speed in km/h
    pub speed_kmh: f32,
}

impl SpeedSample {
    /// Wheel revolutions per minute for this interval.
    pub fn rpm(&self) -> f32 {
        rpm(self.elapsed_ms)
    }

    /// Speed as rounded centi-km/h, the comparable and persisted form.
    pub fn centi_kmh(&self) -> u32 {
        let centi = round_half_up(self.speed_kmh * 100.0);
        if centi <= 0.0 {
            0
        } else if centi >= u32::MAX as f32 {
            u32::MAX
        } else {
            centi as u32
        }
    }
}

/// Converts inter-rotation time to speed, rejecting implausible intervals.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpeedEstimator {
    diameter_m: f32,
    sane_window_ms: u32,
}

impl SpeedEstimator {
    /// Creates an estimator for a wheel of `diameter_m` meters.
    ///
    /// Intervals of `sane_window_ms` or longer yield no sample.
    pub const fn new(diameter_m: f32, sane_window_ms: u32) -> Self {
        Self {
            diameter_m,
            sane_window_ms,
        }
    }

    /// Estimates speed for a rotation at `now_ms`.
    ///
    /// `previous_rotation_ms` is `None` until the first rotation has been
    /// seen. Returns `None` whenever speed should be shown as zero.
    pub fn sample(&self, previous_rotation_ms: Option<u64>, now_ms: u64) -> Option<SpeedSample> {
        let prev = previous_rotation_ms?;
        let elapsed = i32::try_from(now_ms.saturating_sub(prev)).ok()?;
        self.from_elapsed(elapsed)
    }

    /// Estimates speed for an explicit interval.
    ///
    /// The window comparison is strict: exactly `sane_window_ms` is too slow.
    pub fn from_elapsed(&self, elapsed_ms: i32) -> Option<SpeedSample> {
        if elapsed_ms <= 0 {
            return None;
        }
        // Negative case handled above, so the cast is lossless
        if elapsed_ms as u32 >= self.sane_window_ms {
            return None;
        }
        Some(SpeedSample {
            elapsed_ms,
            speed_kmh: rpm(elapsed_ms) * self.diameter_m * SPEED_FACTOR,
        })
    }

    /// The configured sane window.
    pub fn sane_window_ms(&self) -> u32 {
        self.sane_window_ms
    }
}

fn rpm(elapsed_ms: i32) -> f32 {
    (1000.0 / elapsed_ms as f32) * 60.0
}

// `f32::round` lives in std; this keeps the core usable without it.
fn round_half_up(x: f32) -> f32 {
    let shifted = x + 0.5;
    let truncated = shifted as i64 as f32;
    if truncated > shifted {
        truncated - 1.0
    } else {
        truncated
    }
}
