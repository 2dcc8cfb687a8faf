//! The polling control loop that ties everything together.
//!
//! This module provides [`ControlLoop`], the single owner of the odometer,
//! the store and the display. Each call to [`ControlLoop::tick`] makes one
//! decision and carries out its side effects before returning.
//!
//! # Tick States
//!
//! States are mutually exclusive and evaluated in priority order by the
//! pure function [`decide`]:
//!
//! | Priority | State | Condition | Action |
//! |----------|-------|-----------|--------|
//! | 1 | [`Reset`](TickState::Reset) | button asserted, record non-zero, not cooling | zero, persist, redraw, cooldown |
//! | 2 | [`RotationDetected`](TickState::RotationDetected) | falling edge | count, speed, redraw, write-back |
//! | 3 | [`LongIdle`](TickState::LongIdle) | idle > long threshold | clear display |
//! | 4 | [`ShortIdle`](TickState::ShortIdle) | idle > short threshold | speed line to zero |
//! | 5 | [`Steady`](TickState::Steady) | otherwise | nothing |
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::{Config, ControlLoop, TickState};
//! use rs_cyclometer::hal::{MockDisplay, MockStore};
//!
//! let mut cyclo = ControlLoop::new(MockStore::new(), MockDisplay::new(), Config::default(), true, 0);
//!
//! // Button released (high), sensor falls: one rotation
//! let report = cyclo.tick(10, false, true);
//! assert_eq!(report.state, TickState::RotationDetected);
//! assert_eq!(cyclo.record().rotation_count, 1);
//!
//! // The firmware sleeps for the returned pause before the next tick
//! assert_eq!(report.pause_ms, 110);
//! ```

use crate::config::{Config, TimingConfig};
use crate::odometer::OdometerRecord;
use crate::persist::{CounterKey, CounterSync};
use crate::reset::ResetController;
use crate::rotation::RotationTracker;
use crate::screen;
use crate::speed::{SpeedEstimator, SpeedSample};
use crate::traits::{Clock, CounterStore, LevelInput, TextDisplay};

/// The decision made for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum TickState {
    /// Counters cleared by the reset button.
    Reset,
    /// A wheel rotation completed this tick.
    RotationDetected,
    /// No rotation for longer than the long idle threshold.
    LongIdle,
    /// No rotation for longer than the short idle threshold.
    ShortIdle,
    /// Nothing to do.
    Steady,
}

/// Everything [`decide`] looks at.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TickInputs {
    /// Reset button qualifies this tick
    pub reset_requested: bool,
    /// Falling edge on the wheel sensor this tick
    pub rotation: bool,
    /// Milliseconds since the last rotation (or since start)
    pub idle_ms: u64,
}

/// Picks the state for one tick.
///
/// ```
/// use rs_cyclometer::config::TimingConfig;
/// use rs_cyclometer::control::{decide, TickInputs, TickState};
///
/// let timing = TimingConfig::default();
/// let idle = |idle_ms| TickInputs { reset_requested: false, rotation: false, idle_ms };
///
/// assert_eq!(decide(&idle(4000), &timing), TickState::Steady);
/// assert_eq!(decide(&idle(4001), &timing), TickState::ShortIdle);
/// assert_eq!(decide(&idle(15_001), &timing), TickState::LongIdle);
/// ```
pub fn decide(inputs: &TickInputs, timing: &TimingConfig) -> TickState {
    if inputs.reset_requested {
        TickState::Reset
    } else if inputs.rotation {
        TickState::RotationDetected
    } else if inputs.idle_ms > timing.long_idle_ms as u64 {
        TickState::LongIdle
    } else if inputs.idle_ms > timing.short_idle_ms as u64 {
        TickState::ShortIdle
    } else {
        TickState::Steady
    }
}

/// What a tick did.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TickReport {
    /// The state that fired
    pub state: TickState,
    /// How long to sleep before the next tick
    pub pause_ms: u32,
    /// Speed computed this tick, for rotations inside the sane window
    pub speed: Option<SpeedSample>,
}

/// What the screen currently shows, to skip redundant idle redraws.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Screen {
    Live,
    SpeedZeroed,
    Blank,
}

/// Main cyclometer controller.
///
/// # Type Parameters
///
/// - `S`: The persistent counter store ([`CounterStore`] trait)
/// - `D`: The text display ([`TextDisplay`] trait)
///
/// # Thread Safety
///
/// Not shared. One thread owns the loop and sleeps between ticks; no other
/// code can observe state mid-tick.
pub struct ControlLoop<S: CounterStore, D: TextDisplay> {
    config: Config,
    sync: CounterSync<S>,
    display: D,
    record: OdometerRecord,
    tracker: RotationTracker,
    estimator: SpeedEstimator,
    reset: ResetController,
    last_rotation_ms: Option<u64>,
    idle_anchor_ms: u64,
    screen: Screen,
}

impl<S: CounterStore, D: TextDisplay> ControlLoop<S, D> {
    /// Creates the loop, loads stored counters and draws the startup screen.
    ///
    /// `initial_sensor_level` seeds edge detection so the first tick cannot
    /// fire spuriously. Idle time is measured from `now_ms` until the first
    /// rotation.
    pub fn new(
        store: S,
        display: D,
        config: Config,
        initial_sensor_level: bool,
        now_ms: u64,
    ) -> Self {
        let mut sync = CounterSync::new(store);
        let record = sync.load();
        log::info!(
            "initial rotations: {}, initial record: {}",
            record.rotation_count,
            record.peak_speed_centi_kmh
        );

        let mut this = Self {
            estimator: SpeedEstimator::new(config.wheel.diameter_m, config.timing.sane_window_ms),
            reset: ResetController::new(
                config.timing.reset_cooldown_ms,
                config.input.button_active_low,
            ),
            config,
            sync,
            display,
            record,
            tracker: RotationTracker::seeded(initial_sensor_level),
            last_rotation_ms: None,
            idle_anchor_ms: now_ms,
            screen: Screen::Live,
        };

        if let Err(e) = this.display.init() {
            log::warn!("display init failed: {:?}", e);
        }
        this.redraw(None);
        this
    }

    /// Samples the clock and both inputs, then runs one tick.
    pub fn poll<C, I, B>(&mut self, clock: &C, sensor: &mut I, button: &mut B) -> TickReport
    where
        C: Clock,
        I: LevelInput,
        B: LevelInput,
    {
        let sensor_level = sensor.read_level();
        let button_level = button.read_level();
        self.tick(clock.now_ms(), sensor_level, button_level)
    }

    /// Runs one tick with already-sampled inputs.
    ///
    /// The sensor level is recorded for the next tick whichever state fires.
    pub fn tick(&mut self, now_ms: u64, sensor_level: bool, button_level: bool) -> TickReport {
        let rotation = self.tracker.observe(sensor_level);
        let inputs = TickInputs {
            reset_requested: self.reset.should_reset(button_level, &self.record, now_ms),
            rotation,
            idle_ms: now_ms.saturating_sub(self.idle_anchor_ms),
        };

        let state = decide(&inputs, &self.config.timing);
        let timing = self.config.timing.clone();
        let mut report = TickReport {
            state,
            pause_ms: timing.poll_interval_ms,
            speed: None,
        };

        match state {
            TickState::Reset => {
                report.pause_ms = timing.reset_cooldown_ms.saturating_add(timing.poll_interval_ms);
                log::info!("reset button pressed, clearing counters");
                self.reset_counters(now_ms);
            }
            TickState::RotationDetected => {
                report.pause_ms = timing
                    .rotation_holdoff_ms
                    .saturating_add(timing.poll_interval_ms);
                report.speed = self.on_rotation(now_ms);
            }
            TickState::LongIdle => {
                if self.screen != Screen::Blank && self.display_result(|d| d.clear_all()) {
                    self.screen = Screen::Blank;
                }
            }
            TickState::ShortIdle => {
                let row = self.config.display.speed_row;
                if self.screen == Screen::Live
                    && self.display_result(|d| d.show(row, screen::ZERO_SPEED, false))
                {
                    self.screen = Screen::SpeedZeroed;
                }
            }
            TickState::Steady => {}
        }

        report
    }

    /// Clears both counters, persists them and redraws the zero screen.
    ///
    /// Always writes both keys, even when the record is already zero, and
    /// starts the button cooldown.
    pub fn reset_counters(&mut self, now_ms: u64) {
        self.record.reset();
        for key in CounterKey::ALL {
            self.sync.mark(key);
        }
        self.sync.flush(&self.record);

        self.display_result(|d| d.clear_all());
        self.redraw(None);
        self.reset.arm(now_ms);
    }

    fn on_rotation(&mut self, now_ms: u64) -> Option<SpeedSample> {
        let sample = self.estimator.sample(self.last_rotation_ms, now_ms);
        let int_speed = sample.map_or(0, |s| s.centi_kmh());
        let outcome = self.record.on_rotation(int_speed);
        log::info!("new rotation: {}", outcome.count);

        self.last_rotation_ms = Some(now_ms);
        self.idle_anchor_ms = now_ms;
        self.redraw(sample.as_ref());

        let mut triggered = false;
        if self.config.storage.is_checkpoint(outcome.count) {
            self.sync.mark(CounterKey::Rotations);
            triggered = true;
        }
        if let Some(peak) = outcome.new_peak {
            log::info!("new record: {}", peak);
            self.sync.mark(CounterKey::Record);
            triggered = true;
        }
        if triggered {
            self.sync.flush(&self.record);
        }

        sample
    }

    fn redraw(&mut self, sample: Option<&SpeedSample>) {
        let rows = self.config.display.clone();
        let distance = screen::distance_line(self.record.distance_m(self.config.wheel.diameter_m));
        let speed = screen::speed_line(sample.map_or(0.0, |s| s.speed_kmh));
        let peak = screen::peak_line(self.record.peak_kmh());

        self.display_result(|d| d.show(rows.distance_row, &distance, false));
        self.display_result(|d| d.show(rows.speed_row, &speed, false));
        self.display_result(|d| d.show(rows.peak_row, &peak, false));
        self.screen = Screen::Live;
    }

    /// Runs a display operation, logging a failure. Returns true on success.
    fn display_result<F>(&mut self, op: F) -> bool
    where
        F: FnOnce(&mut D) -> Result<(), D::Error>,
    {
        match op(&mut self.display) {
            Ok(()) => true,
            Err(e) => {
                log::warn!("display update failed: {:?}", e);
                false
            }
        }
    }

    /// The in-memory counters.
    pub fn record(&self) -> &OdometerRecord {
        &self.record
    }

    /// The configuration in use.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// The persistent store.
    pub fn store(&self) -> &S {
        self.sync.store()
    }

    /// Mutable access to the persistent store.
    pub fn store_mut(&mut self) -> &mut S {
        self.sync.store_mut()
    }

    /// The display.
    pub fn display(&self) -> &D {
        &self.display
    }

    /// Mutable access to the display.
    pub fn display_mut(&mut self) -> &mut D {
        &mut self.display
    }

    /// Returns true if a counter write failed and awaits the next trigger.
    pub fn pending_writes(&self) -> bool {
        self.sync.has_pending()
    }

    /// Whether `key` still awaits a successful write.
    pub fn is_pending(&self, key: CounterKey) -> bool {
        self.sync.is_dirty(key)
    }

    /// Tick of the most recent rotation, if any.
    pub fn last_rotation_ms(&self) -> Option<u64> {
        self.last_rotation_ms
    }

    /// Consumes the loop, returning the store and display.
    pub fn into_parts(self) -> (S, D) {
        (self.sync.into_store(), self.display)
    }
}
