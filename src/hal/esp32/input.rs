//! GPIO level inputs for the wheel sensor and the reset button.
//!
//! Both inputs are plain polled pins with the internal pull-up enabled and
//! interrupts left disabled; the control loop samples them once per tick.
//!
//! # Wiring
//!
//! - Hall sensor OUT → GPIO9 (open drain, pulls low at the magnet)
//! - Button → GPIO8 to GND

use crate::traits::LevelInput;
use esp_idf_hal::gpio::{Input, InputPin, OutputPin, PinDriver, Pull};
use esp_idf_hal::peripheral::Peripheral;

/// A pulled-up GPIO input.
///
/// # Example
///
/// ```ignore
/// use rs_cyclometer::hal::esp32::Esp32Input;
/// use rs_cyclometer::traits::LevelInput;
///
/// let peripherals = Peripherals::take()?;
/// let mut sensor = Esp32Input::pulled_up(peripherals.pins.gpio9)?;
/// let mut button = Esp32Input::pulled_up(peripherals.pins.gpio8)?;
///
/// let magnet_present = !sensor.read_level();
/// let pressed = !button.read_level();
/// ```
pub struct Esp32Input<'d, P>
where
    P: InputPin + OutputPin,
{
    pin: PinDriver<'d, P, Input>,
}

impl<'d, P> Esp32Input<'d, P>
where
    P: InputPin + OutputPin,
{
    /// Configures `pin` as an input with the internal pull-up.
    ///
    /// # Errors
    ///
    /// Returns an error if GPIO configuration fails.
    pub fn pulled_up(
        pin: impl Peripheral<P = P> + 'd,
    ) -> Result<Self, esp_idf_hal::sys::EspError> {
        let mut pin = PinDriver::input(pin)?;
        pin.set_pull(Pull::Up)?;
        Ok(Self { pin })
    }
}

impl<P> LevelInput for Esp32Input<'_, P>
where
    P: InputPin + OutputPin,
{
    #[inline]
    fn read_level(&mut self) -> bool {
        self.pin.is_high()
    }
}
