//! HD44780 character LCD driver
//!
//! Drives a 16x2 HD44780 through a PCF8574 I2C port expander in 4-bit
//! mode. Expander bits: P0 = RS, P2 = EN, P3 = backlight, P4-P7 = D4-D7.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use twintimer_display::{DisplayBackend, DisplayError, SCREEN_COLS, SCREEN_ROWS};

/// HD44780 commands
#[allow(dead_code)]
mod cmd {
    pub const CLEAR_DISPLAY: u8 = 0x01;
    pub const RETURN_HOME: u8 = 0x02;
    pub const ENTRY_MODE_SET: u8 = 0x04;
    pub const ENTRY_LEFT: u8 = 0x02;
    pub const DISPLAY_CONTROL: u8 = 0x08;
    pub const DISPLAY_ON: u8 = 0x04;
    pub const FUNCTION_SET: u8 = 0x20;
    pub const TWO_LINE: u8 = 0x08;
    pub const SET_DDRAM_ADDR: u8 = 0x80;
}

/// PCF8574 bit driving RS (data register select)
const RS: u8 = 0x01;
/// PCF8574 bit driving EN (enable strobe)
const ENABLE: u8 = 0x04;
/// PCF8574 bit switching the backlight
const BACKLIGHT: u8 = 0x08;

/// DDRAM address of the first cell of each row
const ROW_OFFSETS: [u8; SCREEN_ROWS] = [0x00, 0x40];

/// HD44780 LCD behind a PCF8574 backpack
pub struct Lcd<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
    initialized: bool,
}

impl<I2C, D> Lcd<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver; call [`Lcd::init`] before drawing
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
            initialized: false,
        }
    }

    /// Run the 4-bit initialization sequence
    pub fn init(&mut self) -> Result<(), DisplayError> {
        // Power-on settle time
        self.delay.delay_ms(50);

        // Interface may be in 8-bit mode or mid-nibble: force 8-bit three
        // times, then switch to 4-bit
        self.write_nibble(0x30, false)?;
        self.delay.delay_ms(5);
        self.write_nibble(0x30, false)?;
        self.delay.delay_us(150);
        self.write_nibble(0x30, false)?;
        self.write_nibble(0x20, false)?;

        self.command(cmd::FUNCTION_SET | cmd::TWO_LINE)?;
        self.command(cmd::DISPLAY_CONTROL | cmd::DISPLAY_ON)?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(2);
        self.command(cmd::ENTRY_MODE_SET | cmd::ENTRY_LEFT)?;

        self.initialized = true;
        Ok(())
    }

    /// Check if [`Lcd::init`] has completed
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn command(&mut self, command: u8) -> Result<(), DisplayError> {
        self.send(command, false)
    }

    fn send(&mut self, byte: u8, data: bool) -> Result<(), DisplayError> {
        self.write_nibble(byte & 0xF0, data)?;
        self.write_nibble(byte << 4, data)
    }

    /// Clock the upper four bits of `nibble` into the controller
    fn write_nibble(&mut self, nibble: u8, data: bool) -> Result<(), DisplayError> {
        let mut bits = (nibble & 0xF0) | BACKLIGHT;
        if data {
            bits |= RS;
        }

        self.i2c
            .write(self.address, &[bits | ENABLE])
            .map_err(|_| DisplayError::Communication)?;
        self.delay.delay_us(1);
        self.i2c
            .write(self.address, &[bits])
            .map_err(|_| DisplayError::Communication)?;
        self.delay.delay_us(50);
        Ok(())
    }

    fn ensure_initialized(&self) -> Result<(), DisplayError> {
        if self.initialized {
            Ok(())
        } else {
            Err(DisplayError::NotInitialized)
        }
    }
}

impl<I2C, D> DisplayBackend for Lcd<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn clear(&mut self) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.command(cmd::CLEAR_DISPLAY)?;
        self.delay.delay_ms(2);
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.ensure_initialized()?;
        self.check_cell(row, col)?;

        self.command(cmd::SET_DDRAM_ADDR | (ROW_OFFSETS[usize::from(row)] + col))?;
        for byte in text.bytes().take(SCREEN_COLS - usize::from(col)) {
            let byte = if byte.is_ascii() { byte } else { b'?' };
            self.send(byte, true)?;
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}
