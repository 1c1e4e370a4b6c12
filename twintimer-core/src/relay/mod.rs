//! Relays and their actuation sequence

pub mod sequencer;

pub use sequencer::{ActuationSequencer, Phase, Relay, RelayBank, RelaySet};
