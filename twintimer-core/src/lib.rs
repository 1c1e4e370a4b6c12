//! Board-agnostic core logic for the twin relay timer
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Debounced push buttons (click / repeating hold)
//! - Menu model, renderer capability and the navigation/focus engine
//! - Daily on/off schedule evaluation
//! - Relay actuation sequencing behind an auxiliary power rail
//! - Persisted settings record and timing configuration
//! - The controller tying everything into one cooperative tick

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod app;
pub mod config;
pub mod error;
pub mod input;
pub mod menu;
pub mod relay;
pub mod schedule;

pub use error::Error;
