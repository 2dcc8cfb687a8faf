//! Tick source backed by the ESP-IDF high resolution timer.

use crate::traits::Clock;

/// Milliseconds since boot.
///
/// `esp_timer_get_time()` counts microseconds in 64 bits, so tick values
/// never wrap during the lifetime of the device.
///
/// ```ignore
/// use rs_cyclometer::hal::esp32::Esp32Clock;
/// use rs_cyclometer::traits::Clock;
///
/// let clock = Esp32Clock;
/// let boot_ms = clock.now_ms();
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct Esp32Clock;

impl Clock for Esp32Clock {
    #[inline]
    fn now_ms(&self) -> u64 {
        // Plain read of the free-running timer
        let micros = unsafe { esp_idf_hal::sys::esp_timer_get_time() };
        u64::try_from(micros / 1000).unwrap_or(0)
    }
}
