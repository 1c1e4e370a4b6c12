//! Configuration types
//!
//! - [`Settings`]: the single persisted record, stored in EEPROM as
//!   postcard-serialized binary data
//! - [`Timing`]: every time threshold used by buttons, menu and relays

pub mod settings;
pub mod store;
pub mod timing;

pub use settings::*;
pub use store::*;
pub use timing::*;
