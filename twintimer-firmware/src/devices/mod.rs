//! I2C devices on the shared bus
//!
//! - [`lcd::Lcd`]: HD44780 16x2 character LCD behind a PCF8574 backpack
//! - [`ds3231::Ds3231`]: battery-backed real-time clock
//! - [`at24c32::At24c32`]: settings EEPROM on the same module as the RTC

pub mod at24c32;
pub mod ds3231;
pub mod lcd;

pub use at24c32::At24c32;
pub use ds3231::Ds3231;
pub use lcd::Lcd;
