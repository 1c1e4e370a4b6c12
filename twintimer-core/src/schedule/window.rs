//! Schedule windows and toggle decisions
//!
//! Times are compared as minutes since midnight. A window whose on time
//! is later than its off time runs overnight; equal on and off times
//! disable the window.

use core::cmp::Ordering;

use serde::{Deserialize, Serialize};
use twintimer_hal::DateTime;

use crate::config::Settings;

/// Weekday or weekend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DayClass {
    Weekday,
    Weekend,
}

impl DayClass {
    /// Classify a wall-clock weekday (1 = Monday .. 7 = Sunday)
    pub fn from_day_of_week(day: u8) -> Self {
        match day {
            6 | 7 => DayClass::Weekend,
            _ => DayClass::Weekday,
        }
    }
}

/// Daily on/off times
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScheduleWindow {
    pub on_hour: u8,
    pub on_minute: u8,
    pub off_hour: u8,
    pub off_minute: u8,
}

impl ScheduleWindow {
    pub const fn new(on_hour: u8, on_minute: u8, off_hour: u8, off_minute: u8) -> Self {
        Self {
            on_hour,
            on_minute,
            off_hour,
            off_minute,
        }
    }

    pub fn on_minute_of_day(&self) -> u16 {
        u16::from(self.on_hour) * 60 + u16::from(self.on_minute)
    }

    pub fn off_minute_of_day(&self) -> u16 {
        u16::from(self.off_hour) * 60 + u16::from(self.off_minute)
    }

    /// Check if the window is empty (on == off)
    pub fn is_disabled(&self) -> bool {
        self.on_minute_of_day() == self.off_minute_of_day()
    }

    /// Check if a relay in state `relay_on` must be toggled at `current`
    pub fn should_toggle(&self, current: u16, relay_on: bool) -> bool {
        should_toggle(
            current,
            self.on_minute_of_day(),
            self.off_minute_of_day(),
            relay_on,
        )
    }
}

/// Check `start <= current < end`
pub fn is_in_interval(current: u16, start: u16, end: u16) -> bool {
    current >= start && current < end
}

/// Decide whether a relay must change state
///
/// The relay should be on between `on` (inclusive) and `off` (exclusive),
/// across midnight when `on > off`. A toggle is due when its state
/// disagrees with that. `on == off` never toggles.
pub fn should_toggle(current: u16, on: u16, off: u16, relay_on: bool) -> bool {
    let target_on = match on.cmp(&off) {
        Ordering::Less => is_in_interval(current, on, off),
        Ordering::Greater => !is_in_interval(current, off, on),
        Ordering::Equal => return false,
    };
    target_on != relay_on
}

/// Check if the living-room relay is due for a scheduled toggle
///
/// Uses the weekend window on Saturday and Sunday and the weekday window
/// otherwise, against the applied (not requested) relay state.
pub fn living_room_due(settings: &Settings, time: &DateTime) -> bool {
    settings
        .window(DayClass::from_day_of_week(time.day_of_week))
        .should_toggle(time.minute_of_day(), settings.living_room.is_on())
}
