//! AT24C32 serial EEPROM driver
//!
//! 16-bit word addressing. Writes are split on page boundaries and each
//! page write is followed by the internal write cycle delay.

use embedded_hal::delay::DelayNs;
use embedded_hal::i2c::I2c;
use twintimer_hal::{Eeprom, StorageError};

use crate::board;

/// Largest page supported by the write buffer
const MAX_PAGE: usize = 64;

/// AT24C32 (or compatible) on the shared I2C bus
pub struct At24c32<I2C, D> {
    i2c: I2C,
    delay: D,
    address: u8,
}

impl<I2C, D> At24c32<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    /// Create a new driver
    pub fn new(i2c: I2C, delay: D, address: u8) -> Self {
        Self {
            i2c,
            delay,
            address,
        }
    }

    fn write_page(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        let mut frame = [0u8; MAX_PAGE + 2];
        frame[..2].copy_from_slice(&offset.to_be_bytes());
        frame[2..2 + data.len()].copy_from_slice(data);

        self.i2c
            .write(self.address, &frame[..2 + data.len()])
            .map_err(|_| StorageError::Bus)?;
        self.delay.delay_ms(board::EEPROM_WRITE_CYCLE_MS);
        Ok(())
    }
}

impl<I2C, D> Eeprom for At24c32<I2C, D>
where
    I2C: I2c,
    D: DelayNs,
{
    fn capacity(&self) -> usize {
        board::EEPROM_SIZE
    }

    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError> {
        self.check_range(offset, buffer.len())?;
        if buffer.is_empty() {
            return Ok(());
        }
        self.i2c
            .write_read(self.address, &offset.to_be_bytes(), buffer)
            .map_err(|_| StorageError::Bus)
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        self.check_range(offset, data.len())?;

        let page_size = board::EEPROM_PAGE_SIZE.min(MAX_PAGE);
        let mut address = usize::from(offset);
        let mut remaining = data;

        while !remaining.is_empty() {
            let room = page_size - address % page_size;
            let (chunk, rest) = remaining.split_at(room.min(remaining.len()));
            // Range was checked above, so the address fits in u16
            self.write_page(address as u16, chunk)?;
            address += chunk.len();
            remaining = rest;
        }
        Ok(())
    }
}
