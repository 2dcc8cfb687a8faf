//! NVS-backed counter store.
//!
//! Counters live as `i32` entries in one NVS namespace of the default
//! partition. `EspNvs::set_i32` commits before returning, so a successful
//! write is durable.

use crate::traits::CounterStore;
use esp_idf_svc::nvs::{EspDefaultNvsPartition, EspNvs, NvsDefault};
use esp_idf_svc::sys::EspError;

/// Counter store on the default NVS partition.
///
/// # Example
///
/// ```ignore
/// use esp_idf_svc::nvs::EspDefaultNvsPartition;
/// use rs_cyclometer::hal::esp32::Esp32Store;
/// use rs_cyclometer::traits::CounterStore;
///
/// // take() runs nvs_flash_init, erasing and retrying a truncated partition
/// let partition = EspDefaultNvsPartition::take()?;
/// let mut store = Esp32Store::open(partition, "storage")?;
///
/// let rotations = store.read_or_default("rotations");
/// ```
pub struct Esp32Store {
    nvs: EspNvs<NvsDefault>,
}

impl Esp32Store {
    /// Opens `namespace` read-write, creating it on first use.
    ///
    /// # Errors
    ///
    /// Fails if the namespace cannot be opened. The caller treats this as
    /// fatal: without the store, starting counters are unknown.
    pub fn open(partition: EspDefaultNvsPartition, namespace: &str) -> Result<Self, EspError> {
        let nvs = EspNvs::new(partition, namespace, true)?;
        log::info!("NVS namespace '{}' opened", namespace);
        Ok(Self { nvs })
    }
}

impl CounterStore for Esp32Store {
    type Error = EspError;

    fn read(&mut self, key: &str) -> Result<Option<i32>, EspError> {
        self.nvs.get_i32(key)
    }

    fn write(&mut self, key: &str, value: i32) -> Result<(), EspError> {
        self.nvs.set_i32(key, value)
    }
}
