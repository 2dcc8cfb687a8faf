//! Write-back of the odometer counters to the persistent store.
//!
//! Flash wears out, so counters are not written every tick. Instead each
//! counter carries a dirty flag:
//!
//! - A write trigger (periodic checkpoint, new peak, reset) marks a key dirty
//! - [`CounterSync::flush`] writes every dirty key and clears the ones that
//!   committed
//! - A failed key stays dirty and is retried by the next trigger of any kind
//!
//! There is no retry loop and no backoff; store failures are rare and the
//! next natural event re-attempts the write.
//!
//! # Example
//!
//! ```rust
//! use rs_cyclometer::persist::{CounterKey, CounterSync};
//! use rs_cyclometer::odometer::OdometerRecord;
//! use rs_cyclometer::hal::MockStore;
//!
//! let mut sync = CounterSync::new(MockStore::new());
//! let record = OdometerRecord::new(10, 1990);
//!
//! sync.mark(CounterKey::Rotations);
//! let report = sync.flush(&record);
//! assert_eq!(report.written, 1);
//! assert_eq!(sync.store().get("rotations"), Some(10));
//! assert_eq!(sync.store().get("record"), None);
//! ```

use crate::odometer::OdometerRecord;
use crate::traits::CounterStore;

/// A persisted counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CounterKey {
    /// Lifetime rotation count
    Rotations,
    /// Peak speed in centi-km/h
    Record,
}

impl CounterKey {
    /// Both keys, in write order.
    pub const ALL: [CounterKey; 2] = [CounterKey::Rotations, CounterKey::Record];

    /// Store key name.
    ///
    /// ```
    /// use rs_cyclometer::persist::CounterKey;
    ///
    /// assert_eq!(CounterKey::Rotations.as_str(), "rotations");
    /// assert_eq!(CounterKey::Record.as_str(), "record");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CounterKey::Rotations => "rotations",
            CounterKey::Record => "record",
        }
    }

    fn value_of(&self, record: &OdometerRecord) -> u32 {
        match self {
            CounterKey::Rotations => record.rotation_count,
            CounterKey::Record => record.peak_speed_centi_kmh,
        }
    }

    const fn index(&self) -> usize {
        match self {
            CounterKey::Rotations => 0,
            CounterKey::Record => 1,
        }
    }
}

/// Result of one [`CounterSync::flush`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FlushReport {
    /// Keys committed by this flush
    pub written: u8,
    /// Keys that failed and remain dirty
    pub failed: u8,
}

impl FlushReport {
    /// Returns true if nothing was attempted.
    pub fn is_noop(&self) -> bool {
        self.written == 0 && self.failed == 0
    }
}

/// Owns the store and tracks which counters still need writing.
pub struct CounterSync<S: CounterStore> {
    store: S,
    dirty: [bool; 2],
}

impl<S: CounterStore> CounterSync<S> {
    /// Wraps a store with nothing pending.
    pub fn new(store: S) -> Self {
        Self {
            store,
            dirty: [false; 2],
        }
    }

    /// Loads both counters, defaulting missing or unreadable keys to 0.
    ///
    /// Negative stored values are treated as 0.
    pub fn load(&mut self) -> OdometerRecord {
        let rotations = self.store.read_or_default(CounterKey::Rotations.as_str());
        let record = self.store.read_or_default(CounterKey::Record.as_str());
        OdometerRecord::new(
            u32::try_from(rotations).unwrap_or(0),
            u32::try_from(record).unwrap_or(0),
        )
    }

    /// Marks `key` as needing a write.
    pub fn mark(&mut self, key: CounterKey) {
        self.dirty[key.index()] = true;
    }

    /// Returns true if `key` has not been committed since it was last marked.
    pub fn is_dirty(&self, key: CounterKey) -> bool {
        self.dirty[key.index()]
    }

    /// Returns true if any key is waiting for a write.
    pub fn has_pending(&self) -> bool {
        self.dirty.iter().any(|d| *d)
    }

    /// Writes every dirty key with its current value from `record`.
    ///
    /// Failures are logged and leave the key dirty.
    pub fn flush(&mut self, record: &OdometerRecord) -> FlushReport {
        let mut report = FlushReport::default();

        for key in CounterKey::ALL {
            if !self.is_dirty(key) {
                continue;
            }
            let value = i32::try_from(key.value_of(record)).unwrap_or(i32::MAX);
            match self.store.write(key.as_str(), value) {
                Ok(()) => {
                    log::info!("updated {} to {}", key.as_str(), value);
                    self.dirty[key.index()] = false;
                    report.written += 1;
                }
                Err(e) => {
                    log::error!("failed to write {}: {:?}", key.as_str(), e);
                    report.failed += 1;
                }
            }
        }

        report
    }

    /// Shared access to the store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Mutable access to the store.
    pub fn store_mut(&mut self) -> &mut S {
        &mut self.store
    }

    /// Consumes the sync, returning the store.
    pub fn into_store(self) -> S {
        self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockStore;

    #[test]
    fn load_defaults_to_zero() {
        let mut sync = CounterSync::new(MockStore::new());
        assert_eq!(sync.load(), OdometerRecord::default());
    }

    #[test]
    fn load_reads_both_keys() {
        let store = MockStore::new()
            .with_value("rotations", 123)
            .with_value("record", 2500);
        let mut sync = CounterSync::new(store);
        assert_eq!(sync.load(), OdometerRecord::new(123, 2500));
    }

    #[test]
    fn load_clamps_negative_to_zero() {
        let store = MockStore::new().with_value("rotations", -4);
        let mut sync = CounterSync::new(store);
        assert_eq!(sync.load().rotation_count, 0);
    }

    #[test]
    fn load_survives_read_errors() {
        let mut store = MockStore::new().with_value("record", 900);
        store.fail_reads = true;
        let mut sync = CounterSync::new(store);
        assert_eq!(sync.load(), OdometerRecord::default());
    }

    #[test]
    fn flush_without_marks_is_noop() {
        let mut sync = CounterSync::new(MockStore::new());
        let report = sync.flush(&OdometerRecord::new(3, 3));
        assert!(report.is_noop());
        assert!(sync.store().writes.is_empty());
    }

    #[test]
    fn flush_clears_dirty_on_success() {
        let mut sync = CounterSync::new(MockStore::new());
        sync.mark(CounterKey::Rotations);
        sync.mark(CounterKey::Record);
        assert!(sync.has_pending());

        let report = sync.flush(&OdometerRecord::new(20, 1800));
        assert_eq!(report, FlushReport { written: 2, failed: 0 });
        assert!(!sync.has_pending());
        assert_eq!(sync.store().get("rotations"), Some(20));
        assert_eq!(sync.store().get("record"), Some(1800));
    }

    #[test]
    fn failed_key_stays_dirty_and_retries_with_latest_value() {
        let mut sync = CounterSync::new(MockStore::new());
        sync.mark(CounterKey::Rotations);

        sync.store_mut().fail_writes = true;
        let report = sync.flush(&OdometerRecord::new(10, 0));
        assert_eq!(report, FlushReport { written: 0, failed: 1 });
        assert!(sync.is_dirty(CounterKey::Rotations));
        assert_eq!(sync.store().get("rotations"), None);

        // Next trigger (a new peak) flushes both
        sync.store_mut().fail_writes = false;
        sync.mark(CounterKey::Record);
        let report = sync.flush(&OdometerRecord::new(13, 2000));
        assert_eq!(report.written, 2);
        assert_eq!(sync.store().get("rotations"), Some(13));
        assert_eq!(sync.store().get("record"), Some(2000));
        assert!(!sync.has_pending());
    }

    #[test]
    fn values_above_i32_saturate() {
        let mut sync = CounterSync::new(MockStore::new());
        sync.mark(CounterKey::Rotations);
        sync.flush(&OdometerRecord::new(u32::MAX, 0));
        assert_eq!(sync.store().get("rotations"), Some(i32::MAX));
    }
}
