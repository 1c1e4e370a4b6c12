//! Push-button input

pub mod button;

pub use button::{Button, ButtonState};
