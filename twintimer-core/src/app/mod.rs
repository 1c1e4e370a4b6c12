//! Application layer: screens, tick loop and reported events

pub mod controller;
pub mod events;
pub mod screens;

pub use controller::{Controller, Peripherals};
pub use events::{Event, TickEvents, MAX_TICK_EVENTS};
pub use screens::{MAIN_SCREEN, MANUAL_SCREEN, TIMERS_SCREEN};
