//! DS3231 real-time clock driver
//!
//! Only the timekeeping registers are used. The clock always runs in
//! 24-hour mode; a 12-hour setting left over from another controller is
//! converted on read.

use embedded_hal::i2c::I2c;
use twintimer_hal::{ClockError, DateTime, WallClock};

/// DS3231 registers
mod reg {
    pub const SECONDS: u8 = 0x00;
    pub const DAY: u8 = 0x03;
}

/// Hour register: 12-hour mode select
const HOUR_12H: u8 = 0x40;
/// Hour register: PM flag in 12-hour mode
const HOUR_PM: u8 = 0x20;

/// DS3231 on the shared I2C bus
pub struct Ds3231<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C> Ds3231<I2C>
where
    I2C: I2c,
{
    /// Create a new driver
    pub fn new(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    fn read_registers(&mut self, start: u8, buffer: &mut [u8]) -> Result<(), ClockError> {
        self.i2c
            .write_read(self.address, &[start], buffer)
            .map_err(|_| ClockError::Bus)
    }

    fn write_registers(&mut self, data: &[u8]) -> Result<(), ClockError> {
        self.i2c
            .write(self.address, data)
            .map_err(|_| ClockError::Bus)
    }
}

impl<I2C> WallClock for Ds3231<I2C>
where
    I2C: I2c,
{
    fn now(&mut self) -> Result<DateTime, ClockError> {
        let mut regs = [0u8; 4];
        self.read_registers(reg::SECONDS, &mut regs)?;

        let second = from_bcd(regs[0] & 0x7F)?;
        let minute = from_bcd(regs[1] & 0x7F)?;
        let hour = decode_hour(regs[2])?;
        let day_of_week = regs[3] & 0x07;

        if second > 59 || minute > 59 || hour > 23 || !(1..=7).contains(&day_of_week) {
            return Err(ClockError::InvalidData);
        }

        Ok(DateTime {
            hour,
            minute,
            second,
            day_of_week,
        })
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError> {
        if hour > 23 || minute > 59 || second > 59 {
            return Err(ClockError::InvalidData);
        }
        self.write_registers(&[
            reg::SECONDS,
            to_bcd(second),
            to_bcd(minute),
            to_bcd(hour),
        ])
    }

    fn set_day_of_week(&mut self, day: u8) -> Result<(), ClockError> {
        if !(1..=7).contains(&day) {
            return Err(ClockError::InvalidData);
        }
        self.write_registers(&[reg::DAY, day])
    }
}

/// Decode a packed BCD byte
fn from_bcd(value: u8) -> Result<u8, ClockError> {
    let (tens, units) = (value >> 4, value & 0x0F);
    if tens > 9 || units > 9 {
        return Err(ClockError::InvalidData);
    }
    Ok(tens * 10 + units)
}

/// Encode a value below 100 as packed BCD
fn to_bcd(value: u8) -> u8 {
    ((value / 10) << 4) | (value % 10)
}

fn decode_hour(raw: u8) -> Result<u8, ClockError> {
    if raw & HOUR_12H == 0 {
        return from_bcd(raw & 0x3F);
    }

    let hour = from_bcd(raw & 0x1F)?;
    if !(1..=12).contains(&hour) {
        return Err(ClockError::InvalidData);
    }
    let pm = raw & HOUR_PM != 0;
    Ok(match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, false) => h,
        (h, true) => h + 12,
    })
}
