//! Character display support for twintimer
//!
//! This crate provides:
//! - `DisplayBackend` trait for character displays (HD44780 LCDs and the like)
//! - `Screen`, an in-memory character grid that tracks which rows changed
//! - `LcdRenderer`, the production implementation of the core
//!   `MenuRenderer` capability
//!
//! # Architecture
//!
//! ```text
//!  MenuSystem ──MenuRenderer──▶ LcdRenderer<Screen> ──flush_to──▶ LCD backend
//! ```
//!
//! The controller redraws its active screen on every tick. Rendering into
//! a `Screen` first means only rows that actually changed go out over the
//! slow display bus.

#![no_std]
#![deny(unsafe_code)]

pub mod backend;
pub mod renderer;
pub mod screen;

// Re-export key types
pub use backend::{DisplayBackend, DisplayError};
pub use renderer::LcdRenderer;
pub use screen::{Screen, SCREEN_COLS, SCREEN_ROWS};
