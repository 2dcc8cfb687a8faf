//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for every collaborator trait, so the
//! whole control loop can be driven on the desktop.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockStore`] | [`CounterStore`] | In-memory counters, write log, injectable failures |
//! | [`MockDisplay`] | [`TextDisplay`] | Tracks the text on every row |
//! | [`MockClock`] | [`Clock`] | Controllable time source |
//! | [`MockInput`] | [`LevelInput`] | Settable pin level |
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::{Config, ControlLoop};
//! use rs_cyclometer::hal::{MockClock, MockDisplay, MockInput, MockStore};
//!
//! let mut clock = MockClock::new();
//! let mut sensor = MockInput::high();
//! let mut button = MockInput::high(); // active low: released
//!
//! let mut cyclo = ControlLoop::new(MockStore::new(), MockDisplay::new(), Config::default(), true, 0);
//!
//! clock.advance(10);
//! sensor.set_level(false);
//! cyclo.poll(&clock, &mut sensor, &mut button);
//!
//! assert_eq!(cyclo.record().rotation_count, 1);
//! assert_eq!(cyclo.display().row(2), Some("Distance: 0.7"));
//! ```
//!
//! [`CounterStore`]: crate::traits::CounterStore
//! [`TextDisplay`]: crate::traits::TextDisplay
//! [`Clock`]: crate::traits::Clock
//! [`LevelInput`]: crate::traits::LevelInput

extern crate alloc;
use alloc::collections::BTreeMap;
use alloc::string::String;
use alloc::vec::Vec;

use crate::traits::{Clock, CounterStore, LevelInput, TextDisplay};

// ============================================================================
// Storage Mock
// ============================================================================

/// Errors reported by [`MockStore`] when failures are switched on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MockStoreError {
    /// `fail_reads` was set
    Read,
    /// `fail_writes` was set
    Write,
}

/// In-memory counter store.
///
/// Records every successful write in order, so tests can assert on write
/// frequency as well as final values.
///
/// # Example
///
/// ```rust
/// use rs_cyclometer::hal::{MockStore, MockStoreError};
/// use rs_cyclometer::traits::CounterStore;
///
/// let mut store = MockStore::new().with_value("record", 1500);
/// assert_eq!(store.read("record"), Ok(Some(1500)));
///
/// store.fail_writes = true;
/// assert_eq!(store.write("record", 0), Err(MockStoreError::Write));
/// assert_eq!(store.get("record"), Some(1500));
/// ```
#[derive(Debug, Default)]
pub struct MockStore {
    values: BTreeMap<String, i32>,
    /// Successful writes, oldest first.
    pub writes: Vec<(String, i32)>,
    /// Make every `read` fail.
    pub fail_reads: bool,
    /// Make every `write` fail.
    pub fail_writes: bool,
}

impl MockStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates `key` without recording a write.
    pub fn with_value(mut self, key: &str, value: i32) -> Self {
        self.values.insert(key.into(), value);
        self
    }

    /// Current committed value of `key`.
    pub fn get(&self, key: &str) -> Option<i32> {
        self.values.get(key).copied()
    }

    /// Number of successful writes to `key`.
    pub fn writes_to(&self, key: &str) -> usize {
        self.writes.iter().filter(|(k, _)| k == key).count()
    }
}

impl CounterStore for MockStore {
    type Error = MockStoreError;

    fn read(&mut self, key: &str) -> Result<Option<i32>, MockStoreError> {
        if self.fail_reads {
            return Err(MockStoreError::Read);
        }
        Ok(self.get(key))
    }

    fn write(&mut self, key: &str, value: i32) -> Result<(), MockStoreError> {
        if self.fail_writes {
            return Err(MockStoreError::Write);
        }
        self.values.insert(key.into(), value);
        self.writes.push((key.into(), value));
        Ok(())
    }
}

// ============================================================================
// Display Mock
// ============================================================================

/// Number of text rows on a 128x64 panel with 8 pixel pages.
pub const MOCK_ROWS: usize = 8;

/// Mock display for testing.
///
/// Keeps the text currently on each row.
///
/// # Example
///
/// ```rust
/// use rs_cyclometer::hal::MockDisplay;
/// use rs_cyclometer::traits::TextDisplay;
///
/// let mut display = MockDisplay::new();
/// display.init().unwrap();
/// display.show(3, "Km/h: 0.0", false).unwrap();
/// assert_eq!(display.row(3), Some("Km/h: 0.0"));
///
/// display.clear_all().unwrap();
/// assert!(display.is_blank());
/// ```
#[derive(Debug, Default)]
pub struct MockDisplay {
    rows: [Option<(String, bool)>; MOCK_ROWS],
    /// Whether init() was called.
    pub initialized: bool,
    /// Number of times show() succeeded.
    pub show_count: usize,
    /// Number of times clear_all() succeeded.
    pub clear_count: usize,
    /// Make every call fail.
    pub fail: bool,
}

impl MockDisplay {
    /// Creates a new mock display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text on `row`, if any.
    pub fn row(&self, row: u8) -> Option<&str> {
        self.rows
            .get(row as usize)
            .and_then(|r| r.as_ref())
            .map(|(text, _)| text.as_str())
    }

    /// Whether `row` was drawn inverted.
    pub fn is_inverted(&self, row: u8) -> bool {
        self.rows
            .get(row as usize)
            .and_then(|r| r.as_ref())
            .is_some_and(|(_, inverted)| *inverted)
    }

    /// Returns true if no row has text.
    pub fn is_blank(&self) -> bool {
        self.rows.iter().all(Option::is_none)
    }
}

impl TextDisplay for MockDisplay {
    type Error = ();

    fn init(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.initialized = true;
        Ok(())
    }

    fn clear_all(&mut self) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        self.rows = Default::default();
        self.clear_count += 1;
        Ok(())
    }

    fn show(&mut self, row: u8, text: &str, inverted: bool) -> Result<(), ()> {
        if self.fail {
            return Err(());
        }
        let slot = self.rows.get_mut(row as usize).ok_or(())?;
        *slot = Some((text.into(), inverted));
        self.show_count += 1;
        Ok(())
    }
}

// ============================================================================
// Clock and Input Mocks
// ============================================================================

/// Mock clock for testing.
///
/// # Example
///
/// ```rust
/// use rs_cyclometer::hal::MockClock;
/// use rs_cyclometer::traits::Clock;
///
/// let mut clock = MockClock::new();
/// clock.set(1000);
/// clock.advance(500);
/// assert_eq!(clock.now_ms(), 1500);
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    current_ms: u64,
}

impl MockClock {
    /// Creates a new mock clock starting at 0ms.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the current time in milliseconds.
    pub fn set(&mut self, ms: u64) {
        self.current_ms = ms;
    }

    /// Advances the clock by the given duration.
    pub fn advance(&mut self, ms: u64) {
        self.current_ms += ms;
    }
}

impl Clock for MockClock {
    fn now_ms(&self) -> u64 {
        self.current_ms
    }
}

/// Mock digital input with a settable level.
#[derive(Debug, Default)]
pub struct MockInput {
    level: bool,
    /// Number of times the level was sampled.
    pub reads: usize,
}

impl MockInput {
    /// An input that reads high.
    pub fn high() -> Self {
        Self {
            level: true,
            reads: 0,
        }
    }

    /// An input that reads low.
    pub fn low() -> Self {
        Self::default()
    }

    /// Sets the level returned by subsequent reads.
    pub fn set_level(&mut self, level: bool) {
        self.level = level;
    }
}

impl LevelInput for MockInput {
    fn read_level(&mut self) -> bool {
        self.reads += 1;
        self.level
    }
}

// ============================================================================
// Tests
// ============================================================================
