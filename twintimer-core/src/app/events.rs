//! Things that happened during one controller tick
//!
//! The controller does not log. It reports events and the firmware decides
//! what to print.

use heapless::Vec;

use crate::config::SettingsField;
use crate::relay::{Relay, RelaySet};

/// Maximum events reported by one tick
pub const MAX_TICK_EVENTS: usize = 16;

/// Events reported by a tick
pub type TickEvents = Vec<Event, MAX_TICK_EVENTS>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    // Storage events
    /// Storage held no valid record; defaults were written
    SettingsReset,
    /// Settings were written to storage
    SettingsSaved,
    /// Settings were re-read from storage after an edit timeout
    SettingsReloaded,

    // UI events
    /// Edit mode entered
    EditingStarted,
    /// Edit mode left by the user
    EditingFinished,
    /// Edit mode abandoned after inactivity
    EditingTimedOut,
    /// Edit focus moved to another field
    FocusMoved,
    /// A field value was stepped
    ValueChanged(SettingsField),
    /// Another screen is shown
    ScreenChanged(usize),
    /// Manual mode switched on (true) or off (false)
    ManualModeChanged(bool),

    // Relay events
    /// A relay toggle was queued
    ToggleRequested(Relay),
    /// An actuation cycle completed
    RelaysSwitched(RelaySet),

    // Clock events
    /// On-screen clock fields were updated from the RTC
    ClockSynced,
}

impl Event {
    /// Check if this event follows a button press
    pub fn is_user_event(&self) -> bool {
        matches!(
            self,
            Event::EditingStarted
                | Event::EditingFinished
                | Event::FocusMoved
                | Event::ValueChanged(_)
                | Event::ScreenChanged(_)
                | Event::ManualModeChanged(_)
        )
    }

    /// Check if this event concerns the relays
    pub fn is_relay_event(&self) -> bool {
        matches!(self, Event::ToggleRequested(_) | Event::RelaysSwitched(_))
    }
}
