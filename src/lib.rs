//! # rs-cyclometer
//!
//! The control core of a bicycle speed/distance computer. One pulse per
//! wheel rotation becomes a live speed readout, a cumulative distance and a
//! persisted all-time speed record, with a button to reset it all.
//!
//! ## Features
//!
//! - **Poll-based edge detection**: One falling edge on the wheel sensor is one rotation
//! - **Speed from timing**: km/h from the interval between rotations, zero when implausibly slow
//! - **Stale-signal decay**: Speed drops to zero after a short idle, display clears after a long one
//! - **Wear-aware persistence**: Rotation count checkpointed every Nth rotation, records written at once
//! - **Explicit retry**: Failed writes stay dirty and go out with the next write trigger
//!
//! ## Architecture
//!
//! The crate is structured to allow testing on desktop without hardware:
//!
//! - `traits` - Store, display, input and clock abstractions
//! - `rotation` - Falling-edge tracker
//! - `speed` - Speed estimation
//! - `odometer` - Rotation count and peak speed
//! - `persist` - Write-back policy with per-counter dirty flags
//! - `reset` - Reset button gate and cooldown
//! - `control` - Tick decision function and the loop that runs it
//! - `hal` - Concrete implementations (mock for testing, esp32 for hardware)
//!
//! ## Example
//!
//! ```rust
//! use rs_cyclometer::{Config, ControlLoop, TickState, hal::{MockDisplay, MockStore}};
//!
//! let mut cyclo = ControlLoop::new(MockStore::new(), MockDisplay::new(), Config::default(), true, 0);
//!
//! // Two rotations 500 ms apart (button released = high)
//! cyclo.tick(1000, false, true);
//! cyclo.tick(1250, true, true);
//! let report = cyclo.tick(1500, false, true);
//!
//! assert_eq!(report.state, TickState::RotationDetected);
//! assert_eq!(cyclo.display().row(3), Some("Km/h: 19.9"));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![warn(missing_docs)]

extern crate alloc;

/// Shared configuration for the core and the firmware.
pub mod config;
/// The polling control loop and its decision function.
pub mod control;
/// Hardware abstraction layer with mock implementations for testing.
pub mod hal;
/// Rotation count and peak speed record.
pub mod odometer;
/// Counter write-back policy.
pub mod persist;
/// Reset button handling.
pub mod reset;
/// Falling-edge detection on the wheel sensor.
pub mod rotation;
/// Formatted display lines.
pub mod screen;
/// Speed estimation from rotation timing.
pub mod speed;
/// Core traits for the store, display, inputs and clock.
pub mod traits;

// Re-exports for convenience
pub use config::{Config, DisplayConfig, InputConfig, StorageConfig, TimingConfig, WheelConfig};
pub use control::{decide, ControlLoop, TickInputs, TickReport, TickState};
pub use odometer::{OdometerRecord, RotationOutcome};
pub use persist::{CounterKey, CounterSync, FlushReport};
pub use reset::ResetController;
pub use rotation::{is_falling_edge, RotationTracker};
pub use speed::{SpeedEstimator, SpeedSample};
pub use traits::{Clock, CounterStore, LevelInput, TextDisplay};
