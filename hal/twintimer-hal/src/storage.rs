//! Persistent storage abstractions
//!
//! The settings record lives in a small byte-addressable EEPROM. Unlike
//! flash there is no erase step and no wear levelling layer: bytes are
//! read and written in place.

/// Errors from persistent storage operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StorageError {
    /// Bus transaction failed
    Bus,
    /// Access extends past the end of the device
    OutOfRange,
}

/// Byte-addressable persistent storage
///
/// Implementations must make a completed `write` visible to every later
/// `read`, including after a power cycle.
pub trait Eeprom {
    /// Total size of the device in bytes
    fn capacity(&self) -> usize;

    /// Read `buffer.len()` bytes starting at `offset`
    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError>;

    /// Write `data` starting at `offset`
    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError>;

    /// Read a single byte
    fn read_byte(&mut self, offset: u16) -> Result<u8, StorageError> {
        let mut byte = [0u8; 1];
        self.read(offset, &mut byte)?;
        Ok(byte[0])
    }

    /// Write a single byte
    fn write_byte(&mut self, offset: u16, value: u8) -> Result<(), StorageError> {
        self.write(offset, &[value])
    }

    /// Check that `len` bytes starting at `offset` fit on the device
    fn check_range(&self, offset: u16, len: usize) -> Result<(), StorageError> {
        if usize::from(offset) + len > self.capacity() {
            Err(StorageError::OutOfRange)
        } else {
            Ok(())
        }
    }
}
