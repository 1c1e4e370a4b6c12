//! Board configuration
//!
//! Constants generated by `build.rs` from `board.toml`, plus the
//! `take_board_pins!` macro that moves the configured GPIOs out of the
//! embassy peripherals.

include!(concat!(env!("OUT_DIR"), "/board.rs"));
