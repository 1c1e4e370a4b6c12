//! Twintimer Firmware
//!
//! Two-relay home timer for RP2040-based boards.
//!
//! Hardware:
//! - Three active-low push buttons (left, central, right)
//! - Auxiliary power rail and two relay drive lines
//! - I2C0 on GPIO4 (SDA) / GPIO5 (SCL), shared by:
//!   - HD44780 16x2 LCD behind a PCF8574 backpack
//!   - DS3231 real-time clock
//!   - AT24C32 EEPROM holding the settings record
//!
//! Button and relay pins, bus addresses and timing come from `board.toml`.

#![no_std]
#![no_main]

use core::cell::RefCell;

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::I2C0;
use embassy_time::Delay;
use embedded_hal_bus::i2c::RefCellDevice;
use static_cell::StaticCell;
use twintimer_core::app::{Controller, Peripherals};
use twintimer_display::{LcdRenderer, Screen};
use {defmt_rtt as _, panic_probe as _};

#[macro_use]
mod board;
mod devices;
mod pins;
mod tasks;

use devices::{At24c32, Ds3231, Lcd};
use pins::{BoardPins, ButtonPin, DrivePin};

/// Blocking I2C0 master
pub type Bus = I2c<'static, I2C0, i2c::Blocking>;

/// One device's handle on the shared bus
pub type BusDevice = RefCellDevice<'static, Bus>;

/// Character LCD
pub type Display = Lcd<BusDevice, Delay>;

/// Controller wired to the board
pub type App = Controller<
    LcdRenderer<Screen>,
    ButtonPin,
    DrivePin,
    Ds3231<BusDevice>,
    At24c32<BusDevice, Delay>,
>;

// Bus shared by the LCD, RTC and EEPROM (must live forever for the device handles)
static I2C_BUS: StaticCell<RefCell<Bus>> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(spawner: Spawner) {
    info!("Twintimer firmware starting...");

    // Initialize RP2040 peripherals
    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let pins: BoardPins = take_board_pins!(p);

    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = board::I2C_FREQUENCY_HZ;
    let bus = I2C_BUS.init(RefCell::new(I2c::new_blocking(
        p.I2C0, p.PIN_5, p.PIN_4, i2c_config,
    )));
    info!("I2C0 up at {} Hz", board::I2C_FREQUENCY_HZ);

    let mut lcd = Lcd::new(RefCellDevice::new(bus), Delay, board::LCD_ADDRESS);
    match lcd.init() {
        Ok(()) => info!("LCD initialized at 0x{:02x}", board::LCD_ADDRESS),
        Err(e) => warn!("LCD init failed: {} (will retry)", e),
    }

    let peripherals = Peripherals {
        left: ButtonPin::new(pins.left),
        central: ButtonPin::new(pins.central),
        right: ButtonPin::new(pins.right),
        power: DrivePin::new(pins.power),
        living_room: DrivePin::new(pins.living_room),
        room: DrivePin::new(pins.room),
        clock: Ds3231::new(RefCellDevice::new(bus), board::RTC_ADDRESS),
        eeprom: At24c32::new(RefCellDevice::new(bus), Delay, board::EEPROM_ADDRESS),
    };

    let controller = match Controller::new(LcdRenderer::new(Screen::new()), peripherals, &board::TIMING) {
        Ok(controller) => controller,
        Err(e) => {
            error!("Screen layout rejected: {}", e);
            halt();
        }
    };
    info!("Controller created");

    unwrap!(spawner.spawn(tasks::tick_task()));
    unwrap!(spawner.spawn(tasks::controller_task(controller, lcd)));

    info!("All tasks spawned, firmware running");
}

/// Park the core after an unrecoverable startup error
fn halt() -> ! {
    loop {
        cortex_m::asm::wfi();
    }
}
