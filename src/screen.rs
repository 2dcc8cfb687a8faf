//! Text lines for the three readout rows.
//!
//! All numbers are formatted here, with one decimal, into fixed-capacity
//! `heapless` strings so nothing allocates on the device.
//!
//! ```text
//! row 2  Distance: 69.1
//! row 3  Km/h: 19.9
//! row 4  Max speed: 19.9
//! ```

use core::fmt::Write;

/// Capacity of one formatted line.
pub const LINE_CAPACITY: usize = 24;

/// One display line.
pub type Line = heapless::String<LINE_CAPACITY>;

/// Speed line shown while stopped or coasting.
pub const ZERO_SPEED: &str = "Km/h: 0.0";

/// `Distance: <meters>`
pub fn distance_line(meters: f32) -> Line {
    labeled("Distance: ", meters)
}

/// `Km/h: <speed>`
pub fn speed_line(kmh: f32) -> Line {
    labeled("Km/h: ", kmh)
}

/// `Max speed: <speed>`
pub fn peak_line(kmh: f32) -> Line {
    labeled("Max speed: ", kmh)
}

fn labeled(label: &str, value: f32) -> Line {
    let mut line = Line::new();
    // Values wider than the line are truncated rather than dropped
    if write!(line, "{}{:.1}", label, value).is_err() {
        log::warn!("display line overflow: {}", label);
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_decimal() {
        assert_eq!(distance_line(69.115).as_str(), "Distance: 69.1");
        assert_eq!(speed_line(19.905).as_str(), "Km/h: 19.9");
        assert_eq!(peak_line(14.22).as_str(), "Max speed: 14.2");
    }

    #[test]
    fn zeros() {
        assert_eq!(distance_line(0.0).as_str(), "Distance: 0.0");
        assert_eq!(speed_line(0.0).as_str(), ZERO_SPEED);
        assert_eq!(peak_line(0.0).as_str(), "Max speed: 0.0");
    }

    #[test]
    fn long_distance_fits() {
        // ~1.5 million km on a 0.22 m wheel at u32::MAX rotations
        let line = distance_line(2_967_000_000.0);
        assert!(line.starts_with("Distance: 29670"));
    }
}
