//! Edge case tests for rotation counting, speed bounds and degraded hardware

use rs_cyclometer::{
    hal::{MockDisplay, MockStore},
    Config, ControlLoop, CounterKey, InputConfig, TickState, WheelConfig,
};

const RELEASED: bool = true;

type Cyclo = ControlLoop<MockStore, MockDisplay>;

fn cyclo() -> Cyclo {
    ControlLoop::new(MockStore::new(), MockDisplay::new(), Config::default(), true, 0)
}

// ============================================================================
// Edge Counting
// ============================================================================

#[test]
fn count_matches_falling_edges_in_arbitrary_sequence() {
    let mut cyclo = cyclo();
    let mut prev = true;
    let mut expected = 0u32;
    let mut max_centi = 0u32;

    // Small LCG so the sequence is deterministic
    let mut seed: u32 = 0x1234_5678;
    for t in 1..2000u64 {
        seed = seed.wrapping_mul(1_103_515_245).wrapping_add(12_345);
        let level = (seed >> 16) & 1 == 1;
        if prev && !level {
            expected += 1;
        }
        prev = level;

        let report = cyclo.tick(t * 37, level, RELEASED);
        if let Some(speed) = report.speed {
            max_centi = max_centi.max(speed.centi_kmh());
        }
    }

    assert_eq!(cyclo.record().rotation_count, expected);
    assert_eq!(cyclo.record().peak_speed_centi_kmh, max_centi);
}

#[test]
fn held_low_sensor_counts_once() {
    let mut cyclo = cyclo();
    for t in 1..100u64 {
        cyclo.tick(t * 10, false, RELEASED);
    }
    assert_eq!(cyclo.record().rotation_count, 1);
}

#[test]
fn sensor_low_at_startup_is_not_a_rotation() {
    let mut cyclo =
        ControlLoop::new(MockStore::new(), MockDisplay::new(), Config::default(), false, 0);
    assert_eq!(cyclo.tick(10, false, RELEASED).state, TickState::Steady);
    assert_eq!(cyclo.record().rotation_count, 0);

    cyclo.tick(20, true, RELEASED);
    assert_eq!(cyclo.tick(30, false, RELEASED).state, TickState::RotationDetected);
}

#[test]
fn bounce_still_counts() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1010, true, RELEASED);
    cyclo.tick(1020, false, RELEASED);
    assert_eq!(cyclo.record().rotation_count, 2);
}

// ============================================================================
// Speed Window
// ============================================================================

#[test]
fn interval_at_sane_window_gives_no_speed() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1005, true, RELEASED);

    let report = cyclo.tick(5000, false, RELEASED);
    assert_eq!(report.state, TickState::RotationDetected);
    assert!(report.speed.is_none());
    assert_eq!(cyclo.record().peak_speed_centi_kmh, 0);
    assert_eq!(cyclo.display().row(3), Some("Km/h: 0.0"));
}

#[test]
fn interval_just_inside_window_gives_speed() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1005, true, RELEASED);

    let report = cyclo.tick(4999, false, RELEASED);
    assert!(report.speed.is_some());
    assert!(cyclo.record().peak_speed_centi_kmh > 0);
}

#[test]
fn slow_rotation_after_fast_one_shows_zero_not_stale_speed() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1005, true, RELEASED);
    cyclo.tick(1500, false, RELEASED);
    cyclo.tick(1505, true, RELEASED);
    assert_eq!(cyclo.display().row(3), Some("Km/h: 19.9"));

    // Next rotation is outside the window
    cyclo.tick(6000, false, RELEASED);
    assert_eq!(cyclo.display().row(3), Some("Km/h: 0.0"));
    assert_eq!(cyclo.display().row(4), Some("Max speed: 19.9"));
}

// ============================================================================
// Idle Handling
// ============================================================================

#[test]
fn idle_measured_from_start_before_first_rotation() {
    let mut cyclo = cyclo();
    assert_eq!(cyclo.tick(4000, true, RELEASED).state, TickState::Steady);
    assert_eq!(cyclo.tick(4010, true, RELEASED).state, TickState::ShortIdle);
    assert_eq!(cyclo.tick(15_010, true, RELEASED).state, TickState::LongIdle);
}

#[test]
fn idle_redraws_only_once() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1005, true, RELEASED);

    cyclo.tick(6000, true, RELEASED);
    let shows = cyclo.display().show_count;
    for t in (6010..10_000).step_by(10) {
        assert_eq!(cyclo.tick(t, true, RELEASED).state, TickState::ShortIdle);
    }
    assert_eq!(cyclo.display().show_count, shows);

    cyclo.tick(20_000, true, RELEASED);
    let clears = cyclo.display().clear_count;
    for t in (20_010..21_000).step_by(10) {
        cyclo.tick(t, true, RELEASED);
    }
    assert_eq!(cyclo.display().clear_count, clears);
}

#[test]
fn idle_redraw_retried_after_display_error() {
    let mut cyclo = cyclo();
    cyclo.tick(1000, false, RELEASED);
    cyclo.tick(1005, true, RELEASED);

    cyclo.display_mut().fail = true;
    assert_eq!(cyclo.tick(17_000, true, RELEASED).state, TickState::LongIdle);
    assert!(!cyclo.display().is_blank());

    cyclo.display_mut().fail = false;
    cyclo.tick(17_010, true, RELEASED);
    assert!(cyclo.display().is_blank());
    assert_eq!(cyclo.display().clear_count, 1);
}

// ============================================================================
// Wheel Geometry
// ============================================================================

#[test]
fn configured_diameter_drives_distance() {
    let config = Config::default().with_wheel(WheelConfig::default().with_diameter_m(0.7));
    let mut cyclo = ControlLoop::new(MockStore::new(), MockDisplay::new(), config, true, 0);

    for i in 0..10u64 {
        cyclo.tick(i * 1000, false, RELEASED);
        cyclo.tick(i * 1000 + 5, true, RELEASED);
    }
    // 10 * 0.7 * pi = 21.99 m
    assert_eq!(cyclo.display().row(2), Some("Distance: 22.0"));
    assert!((cyclo.record().distance_m(0.7) - 21.991).abs() < 0.01);
}

// ============================================================================
// Button Polarity
// ============================================================================

#[test]
fn active_high_button() {
    let config = Config {
        input: InputConfig {
            button_active_low: false,
        },
        ..Config::default()
    };
    let store = MockStore::new().with_value("rotations", 5);
    let mut cyclo = ControlLoop::new(store, MockDisplay::new(), config, true, 0);

    // Low is released for an active-high button
    assert_eq!(cyclo.tick(10, true, false).state, TickState::Steady);
    assert_eq!(cyclo.tick(20, true, true).state, TickState::Reset);
    assert!(cyclo.record().is_zero());
}

// ============================================================================
// Degraded Hardware
// ============================================================================

#[test]
fn store_read_failure_starts_from_zero() {
    let mut store = MockStore::new()
        .with_value("rotations", 99)
        .with_value("record", 2000);
    store.fail_reads = true;

    let cyclo = ControlLoop::new(store, MockDisplay::new(), Config::default(), true, 0);
    assert!(cyclo.record().is_zero());
    assert!(!cyclo.pending_writes());
    assert_eq!(cyclo.display().row(2), Some("Distance: 0.0"));
}

#[test]
fn negative_stored_values_load_as_zero() {
    let store = MockStore::new()
        .with_value("rotations", -4)
        .with_value("record", -1);
    let cyclo = ControlLoop::new(store, MockDisplay::new(), Config::default(), true, 0);
    assert!(cyclo.record().is_zero());
}

#[test]
fn failing_display_does_not_stop_counting() {
    let mut display = MockDisplay::new();
    display.fail = true;
    let mut cyclo = ControlLoop::new(MockStore::new(), display, Config::default(), true, 0);

    for i in 0..10u64 {
        cyclo.tick(i * 500, false, RELEASED);
        cyclo.tick(i * 500 + 5, true, RELEASED);
    }
    assert_eq!(cyclo.record().rotation_count, 10);
    assert_eq!(cyclo.store().get("rotations"), Some(10));
    assert!(!cyclo.display().initialized);
}

#[test]
fn failed_reset_write_stays_pending() {
    let mut store = MockStore::new().with_value("record", 1500);
    store.fail_writes = true;
    let mut cyclo = ControlLoop::new(store, MockDisplay::new(), Config::default(), true, 0);

    cyclo.reset_counters(0);
    assert!(cyclo.record().is_zero());
    assert!(cyclo.is_pending(CounterKey::Rotations));
    assert!(cyclo.is_pending(CounterKey::Record));
    assert_eq!(cyclo.store().get("record"), Some(1500));
}
