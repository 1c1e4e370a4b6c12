//! Error type shared by the core crate
//!
//! All variants carry only fixed-size data; nothing here allocates.

use twintimer_hal::{ClockError, StorageError};

/// Errors raised by core operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A fixed-capacity collection is full; the collection is unchanged
    OutOfMemory,
    /// Screen cycling found no selectable screen
    NoSelectableScreen,
    /// Focus cycling found no focusable field on the active screen
    NoFocusableField,
    /// The storage initialisation marker is missing
    StorageUninitialized,
    /// Persistent storage I/O failed
    Storage(StorageError),
    /// Real-time clock I/O failed
    Clock(ClockError),
    /// Stored settings record could not be encoded or decoded
    Encoding,
}

impl Error {
    /// Check if this error means the menu layout itself is broken
    ///
    /// These can only be fixed by changing how screens are built; retrying
    /// the tick cannot clear them.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Error::NoSelectableScreen | Error::NoFocusableField)
    }

    /// Check if the stored settings must be replaced by defaults
    pub fn requires_storage_reset(&self) -> bool {
        matches!(self, Error::StorageUninitialized | Error::Encoding)
    }
}

impl From<StorageError> for Error {
    fn from(e: StorageError) -> Self {
        Error::Storage(e)
    }
}

impl From<ClockError> for Error {
    fn from(e: ClockError) -> Self {
        Error::Clock(e)
    }
}
