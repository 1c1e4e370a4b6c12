//! Twintimer Hardware Abstraction Layer
//!
//! This crate defines the narrow hardware interfaces the controller core
//! depends on. Board support (the firmware crate) implements them on top of
//! the chip HAL; host tests implement them with mocks.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Application (twintimer-core)           │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  twintimer-hal (this crate - traits)    │
//! └─────────────────────────────────────────┘
//!                     │
//!         ┌───────────┴───────────┐
//!         ▼                       ▼
//! ┌───────────────┐       ┌───────────────┐
//! │  twintimer-   │       │  test mocks   │
//! │   firmware    │       │  (host only)  │
//! └───────────────┘       └───────────────┘
//! ```
//!
//! # Traits
//!
//! - [`gpio::OutputPin`], [`gpio::InputPin`] - Digital I/O
//! - [`clock::WallClock`] - Battery-backed real-time clock
//! - [`storage::Eeprom`] - Byte-addressable persistent storage
//!
//! Monotonic time is not a trait: every time-dependent operation takes the
//! current [`clock::Millis`] value as an argument.

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod gpio;
pub mod storage;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_ms, ClockError, DateTime, Millis, WallClock};
pub use gpio::{InputPin, OutputPin};
pub use storage::{Eeprom, StorageError};
