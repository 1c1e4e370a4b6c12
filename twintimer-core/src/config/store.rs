//! Settings persistence
//!
//! The record is stored as `[len][postcard payload]` at
//! [`SETTINGS_OFFSET`]. A single marker byte at [`INIT_MARKER_ADDR`] tells a
//! formatted device apart from a blank or foreign one.

use twintimer_hal::Eeprom;

use super::Settings;
use crate::Error;

/// Offset of the length-prefixed settings record
pub const SETTINGS_OFFSET: u16 = 0;

/// Address of the initialisation marker byte
pub const INIT_MARKER_ADDR: u16 = 1023;

/// Value of the marker on a formatted device
pub const INIT_MARKER: u8 = 50;

/// Maximum serialized settings size
pub const MAX_SETTINGS_SIZE: usize = 64;

/// Bytes zeroed per write while formatting
const FORMAT_CHUNK: usize = 32;

/// Settings record on top of an EEPROM
pub struct SettingsStore<E> {
    eeprom: E,
}

impl<E: Eeprom> SettingsStore<E> {
    pub fn new(eeprom: E) -> Self {
        Self { eeprom }
    }

    /// Check the initialisation marker
    pub fn is_initialized(&mut self) -> Result<bool, Error> {
        Ok(self.eeprom.read_byte(INIT_MARKER_ADDR)? == INIT_MARKER)
    }

    /// Load the stored record
    ///
    /// Returns [`Error::StorageUninitialized`] when the marker is missing
    /// and [`Error::Encoding`] when the record does not decode.
    pub fn load(&mut self) -> Result<Settings, Error> {
        if !self.is_initialized()? {
            return Err(Error::StorageUninitialized);
        }

        let len = usize::from(self.eeprom.read_byte(SETTINGS_OFFSET)?);
        if len == 0 || len > MAX_SETTINGS_SIZE {
            return Err(Error::Encoding);
        }

        let mut buffer = [0u8; MAX_SETTINGS_SIZE];
        self.eeprom.read(SETTINGS_OFFSET + 1, &mut buffer[..len])?;

        postcard::from_bytes(&buffer[..len]).map_err(|_| Error::Encoding)
    }

    /// Write the record
    pub fn save(&mut self, settings: &Settings) -> Result<(), Error> {
        let mut buffer = [0u8; MAX_SETTINGS_SIZE + 1];
        let len = postcard::to_slice(settings, &mut buffer[1..])
            .map_err(|_| Error::Encoding)?
            .len();
        buffer[0] = len as u8;

        let record = &buffer[..=len];
        self.eeprom.check_range(SETTINGS_OFFSET, record.len())?;
        self.eeprom.write(SETTINGS_OFFSET, record)?;
        Ok(())
    }

    /// Clear the device and store `defaults` with a fresh marker
    pub fn format(&mut self, defaults: &Settings) -> Result<(), Error> {
        self.eeprom.check_range(0, usize::from(INIT_MARKER_ADDR) + 1)?;

        let zeros = [0u8; FORMAT_CHUNK];
        let mut offset: u16 = 0;
        while offset < INIT_MARKER_ADDR {
            let len = FORMAT_CHUNK.min(usize::from(INIT_MARKER_ADDR - offset));
            self.eeprom.write(offset, &zeros[..len])?;
            offset += len as u16;
        }

        self.save(defaults)?;
        self.eeprom.write_byte(INIT_MARKER_ADDR, INIT_MARKER)?;
        Ok(())
    }

    /// Load the record, formatting the device first if needed
    ///
    /// Returns the settings and whether a reset to defaults happened.
    pub fn load_or_format(&mut self) -> Result<(Settings, bool), Error> {
        match self.load() {
            Ok(settings) => Ok((settings, false)),
            Err(e) if e.requires_storage_reset() => {
                let defaults = Settings::default();
                self.format(&defaults)?;
                Ok((defaults, true))
            }
            Err(e) => Err(e),
        }
    }

    pub fn eeprom(&self) -> &E {
        &self.eeprom
    }

    pub fn eeprom_mut(&mut self) -> &mut E {
        &mut self.eeprom
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleWindow;
    use proptest::prelude::*;
    use twintimer_hal::StorageError;

    struct RamEeprom {
        bytes: [u8; 1024],
        writes: usize,
        fail: bool,
    }

    impl RamEeprom {
        fn new(fill: u8) -> Self {
            Self {
                bytes: [fill; 1024],
                writes: 0,
                fail: false,
            }
        }
    }

    impl Eeprom for RamEeprom {
        fn capacity(&self) -> usize {
            self.bytes.len()
        }

        fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Bus);
            }
            self.check_range(offset, buffer.len())?;
            let start = usize::from(offset);
            buffer.copy_from_slice(&self.bytes[start..start + buffer.len()]);
            Ok(())
        }

        fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
            if self.fail {
                return Err(StorageError::Bus);
            }
            self.check_range(offset, data.len())?;
            let start = usize::from(offset);
            self.bytes[start..start + data.len()].copy_from_slice(data);
            self.writes += 1;
            Ok(())
        }
    }

    fn sample_settings() -> Settings {
        let mut settings = Settings::default();
        settings.hours = 21;
        settings.minutes = 7;
        settings.day_of_week = 4;
        settings.living_room.applied = 1;
        settings.living_room.requested = 1;
        settings.room.requested = 1;
        settings.weekday = ScheduleWindow::new(22, 0, 6, 30);
        settings.weekend = ScheduleWindow::new(8, 15, 23, 45);
        settings.manual_mode = true;
        settings
    }

    #[test]
    fn test_blank_device_is_uninitialized() {
        let mut store = SettingsStore::new(RamEeprom::new(0xFF));
        assert_eq!(store.is_initialized(), Ok(false));
        assert_eq!(store.load(), Err(Error::StorageUninitialized));
    }

    #[test]
    fn test_format_writes_defaults_and_marker() {
        let mut store = SettingsStore::new(RamEeprom::new(0xAB));
        let (settings, reset) = store.load_or_format().unwrap();
        assert!(reset);
        assert_eq!(settings, Settings::default());
        assert_eq!(store.eeprom().bytes[INIT_MARKER_ADDR as usize], INIT_MARKER);
        // Junk past the record is cleared
        assert_eq!(store.eeprom().bytes[500], 0);
        assert_eq!(store.load(), Ok(Settings::default()));
    }

    #[test]
    fn test_save_then_load() {
        let mut store = SettingsStore::new(RamEeprom::new(0));
        store.format(&Settings::default()).unwrap();

        let settings = sample_settings();
        store.save(&settings).unwrap();
        assert_eq!(store.load(), Ok(settings));

        let (loaded, reset) = store.load_or_format().unwrap();
        assert!(!reset);
        assert_eq!(loaded, sample_settings());
    }

    #[test]
    fn test_corrupted_record_is_reset() {
        let mut store = SettingsStore::new(RamEeprom::new(0));
        store.format(&Settings::default()).unwrap();
        store.eeprom_mut().bytes[0] = 0;
        assert_eq!(store.load(), Err(Error::Encoding));

        let (settings, reset) = store.load_or_format().unwrap();
        assert!(reset);
        assert_eq!(settings, Settings::default());
    }

    #[test]
    fn test_bus_errors_propagate() {
        let mut store = SettingsStore::new(RamEeprom::new(0));
        store.eeprom_mut().fail = true;
        assert_eq!(store.load(), Err(Error::Storage(StorageError::Bus)));
        assert_eq!(
            store.load_or_format(),
            Err(Error::Storage(StorageError::Bus))
        );
    }

    #[test]
    fn test_format_rejects_small_device() {
        struct Tiny;
        impl Eeprom for Tiny {
            fn capacity(&self) -> usize {
                256
            }
            fn read(&mut self, _: u16, _: &mut [u8]) -> Result<(), StorageError> {
                Ok(())
            }
            fn write(&mut self, _: u16, _: &[u8]) -> Result<(), StorageError> {
                Ok(())
            }
        }

        let mut store = SettingsStore::new(Tiny);
        assert_eq!(
            store.format(&Settings::default()),
            Err(Error::Storage(StorageError::OutOfRange))
        );
    }

    proptest! {
        #[test]
        fn prop_settings_survive_reload(
            hours in 0u8..24,
            minutes in 0u8..60,
            day in 0u8..7,
            applied in 0u8..2,
            requested in 0u8..2,
            window in (0u8..24, 0u8..60, 0u8..24, 0u8..60),
            manual in any::<bool>(),
        ) {
            let mut settings = Settings::default();
            settings.hours = hours;
            settings.minutes = minutes;
            settings.day_of_week = day;
            settings.room.applied = applied;
            settings.room.requested = requested;
            settings.weekend = ScheduleWindow::new(window.0, window.1, window.2, window.3);
            settings.manual_mode = manual;

            let mut store = SettingsStore::new(RamEeprom::new(0));
            store.format(&Settings::default()).unwrap();
            store.save(&settings).unwrap();
            prop_assert_eq!(store.load(), Ok(settings));
        }
    }
}
