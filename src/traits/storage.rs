//! Persistent counter storage abstraction.
//!
//! The only durable state of the cyclometer is two named 32-bit counters.
//! [`CounterStore`] covers exactly that: read a key, write a key. On ESP32
//! it is backed by an NVS namespace; in tests by
//! [`MockStore`](crate::hal::MockStore).

/// Durable storage of named `i32` counters.
///
/// # Implementation Notes
///
/// - `read` returns `Ok(None)` for a key that was never written
/// - `write` must not return `Ok` until the value is committed
/// - First-open initialization of the backing store is the implementor's job
///
/// # Example
///
/// ```rust
/// use rs_cyclometer::traits::CounterStore;
/// use rs_cyclometer::hal::MockStore;
///
/// let mut store = MockStore::new();
/// assert_eq!(store.read("rotations"), Ok(None));
/// assert_eq!(store.read_or_default("rotations"), 0);
///
/// store.write("rotations", 42).unwrap();
/// assert_eq!(store.read_or_default("rotations"), 42);
/// ```
pub trait CounterStore {
    /// Error type for storage operations.
    type Error: core::fmt::Debug;

    /// Reads `key`, returning `Ok(None)` when it has never been written.
    fn read(&mut self, key: &str) -> Result<Option<i32>, Self::Error>;

    /// Writes and commits `value` under `key`.
    fn write(&mut self, key: &str, value: i32) -> Result<(), Self::Error>;

    /// Reads `key`, falling back to 0.
    ///
    /// A missing key is the normal first-boot case and is only a warning.
    /// Any other read failure is logged as an error; counters still start
    /// from zero rather than blocking startup.
    fn read_or_default(&mut self, key: &str) -> i32 {
        match self.read(key) {
            Ok(Some(value)) => {
                log::info!("read {} = {}", key, value);
                value
            }
            Ok(None) => {
                log::warn!("{} is not initialized yet, using 0", key);
                0
            }
            Err(e) => {
                log::error!("error reading {}: {:?}, using 0", key, e);
                0
            }
        }
    }
}
