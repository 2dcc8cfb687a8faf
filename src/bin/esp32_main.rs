//! ESP32-C3 bicycle computer firmware.
//!
//! This is the main entry point for the physical device. It runs a 100Hz
//! polling loop that:
//! - Samples the wheel sensor and the reset button
//! - Counts rotations and computes speed from the time between them
//! - Renders distance, speed and record speed to the OLED
//! - Persists the counters to NVS on checkpoints, new records and resets
//!
//! # Build
//!
//! ```bash
//! cargo build --release --features esp32 --bin esp32_main
//! espflash flash --monitor target/riscv32imc-esp-espidf/release/esp32_main
//! ```

use anyhow::Context;
use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
use esp_idf_hal::peripherals::Peripherals;
use esp_idf_hal::prelude::*;
use esp_idf_svc::nvs::EspDefaultNvsPartition;
use rs_cyclometer::hal::esp32::{pins, Esp32Clock, Esp32Display, Esp32Input, Esp32Store};
use rs_cyclometer::traits::{Clock, LevelInput};
use rs_cyclometer::{Config, ControlLoop, TickState};
use std::thread;
use std::time::Duration;

fn main() -> anyhow::Result<()> {
    // Initialize ESP-IDF
    esp_idf_hal::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();

    println!();
    println!("================================");
    println!("  rs-cyclometer");
    println!("================================");
    println!();

    let config = Config::default();
    let peripherals = Peripherals::take()?;

    // =========================================================================
    // Persistent store (fatal on failure)
    // =========================================================================
    let partition = EspDefaultNvsPartition::take().context("NVS partition init failed")?;
    let store = Esp32Store::open(partition, config.storage.namespace.as_str())
        .context("NVS namespace open failed")?;
    println!("[OK] NVS opened ({})", config.storage.namespace);

    // =========================================================================
    // Inputs (sensor GPIO9, button GPIO8)
    // =========================================================================
    let mut sensor = Esp32Input::pulled_up(peripherals.pins.gpio9)?;
    let mut button = Esp32Input::pulled_up(peripherals.pins.gpio8)?;
    println!(
        "[OK] Sensor on GPIO{}, button on GPIO{}",
        pins::SENSOR,
        pins::BUTTON
    );
    log::info!("waiting for wheel sensor signal");

    // =========================================================================
    // Display (SSD1306 on GPIO6/7)
    // =========================================================================
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &I2cConfig::new().baudrate(400.kHz().into()),
    )?;
    let display = Esp32Display::new(i2c);
    println!(
        "[OK] Display on GPIO{}/{} I2C (0x{:02X})",
        pins::I2C_SDA,
        pins::I2C_SCL,
        pins::OLED_I2C_ADDR
    );

    // =========================================================================
    // Control loop
    // =========================================================================
    let clock = Esp32Clock;
    let initial_level = sensor.read_level();
    let mut cyclo = ControlLoop::new(store, display, config, initial_level, clock.now_ms());

    println!();
    println!("Starting control loop (100Hz)...");
    println!();

    loop {
        let report = cyclo.poll(&clock, &mut sensor, &mut button);

        if report.state == TickState::RotationDetected {
            if let Some(speed) = report.speed {
                log::debug!(
                    "rpm: {:.1}, speed: {:.1} km/h",
                    speed.rpm(),
                    speed.speed_kmh
                );
            }
        }

        // Sleep until next tick (longer after a rotation or a reset)
        thread::sleep(Duration::from_millis(u64::from(report.pause_ms)));
    }
}
