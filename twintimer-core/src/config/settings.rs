//! The persisted settings record
//!
//! One fixed record holds the clock fields shown on screen, both relay
//! states, both schedule windows and the manual-mode flag. Menu fields
//! refer to its slots through [`SettingsField`] instead of holding
//! references into it.

use serde::{Deserialize, Serialize};
use twintimer_hal::DateTime;

use crate::menu::FieldKind;
use crate::relay::Relay;
use crate::schedule::{DayClass, ScheduleWindow};

/// Requested and applied logical state of one relay
///
/// `requested` is what the user picked on screen; `applied` is the state
/// confirmed by the last completed actuation cycle. Both are 0 (off) or
/// 1 (on) so they can be edited by a binary-state field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct RelayState {
    /// State selected in the UI
    pub requested: u8,
    /// State the relay was last switched to
    pub applied: u8,
}

impl RelayState {
    /// Check if the relay was last switched on
    pub fn is_on(&self) -> bool {
        self.applied != 0
    }

    /// Check if the UI asks for a different state than the one applied
    pub fn needs_toggle(&self) -> bool {
        self.requested != self.applied
    }

    /// Record a completed toggle and mirror it into the requested state
    pub fn flip(&mut self) {
        self.applied = u8::from(self.applied == 0);
        self.requested = self.applied;
    }
}

/// Settings record
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Settings {
    /// Displayed hour (0-23)
    pub hours: u8,
    /// Displayed minute (0-59)
    pub minutes: u8,
    /// Displayed weekday, 0 = Monday .. 6 = Sunday
    pub day_of_week: u8,
    /// Schedule-driven relay
    pub living_room: RelayState,
    /// Manually driven relay
    pub room: RelayState,
    /// Window used Monday to Friday
    pub weekday: ScheduleWindow,
    /// Window used Saturday and Sunday
    pub weekend: ScheduleWindow,
    /// Manual mode: relays follow the requested states, schedule ignored
    pub manual_mode: bool,
}

impl Settings {
    /// Current value of a field
    pub fn value(&self, field: SettingsField) -> u8 {
        match field {
            SettingsField::Hours => self.hours,
            SettingsField::Minutes => self.minutes,
            SettingsField::DayOfWeek => self.day_of_week,
            SettingsField::LivingRoomState => self.living_room.requested,
            SettingsField::RoomState => self.room.requested,
            SettingsField::WeekdayOnHour => self.weekday.on_hour,
            SettingsField::WeekdayOnMinute => self.weekday.on_minute,
            SettingsField::WeekdayOffHour => self.weekday.off_hour,
            SettingsField::WeekdayOffMinute => self.weekday.off_minute,
            SettingsField::WeekendOnHour => self.weekend.on_hour,
            SettingsField::WeekendOnMinute => self.weekend.on_minute,
            SettingsField::WeekendOffHour => self.weekend.off_hour,
            SettingsField::WeekendOffMinute => self.weekend.off_minute,
        }
    }

    /// Mutable slot backing a field
    pub fn slot_mut(&mut self, field: SettingsField) -> &mut u8 {
        match field {
            SettingsField::Hours => &mut self.hours,
            SettingsField::Minutes => &mut self.minutes,
            SettingsField::DayOfWeek => &mut self.day_of_week,
            SettingsField::LivingRoomState => &mut self.living_room.requested,
            SettingsField::RoomState => &mut self.room.requested,
            SettingsField::WeekdayOnHour => &mut self.weekday.on_hour,
            SettingsField::WeekdayOnMinute => &mut self.weekday.on_minute,
            SettingsField::WeekdayOffHour => &mut self.weekday.off_hour,
            SettingsField::WeekdayOffMinute => &mut self.weekday.off_minute,
            SettingsField::WeekendOnHour => &mut self.weekend.on_hour,
            SettingsField::WeekendOnMinute => &mut self.weekend.on_minute,
            SettingsField::WeekendOffHour => &mut self.weekend.off_hour,
            SettingsField::WeekendOffMinute => &mut self.weekend.off_minute,
        }
    }

    /// State of one relay
    pub fn relay(&self, relay: Relay) -> &RelayState {
        match relay {
            Relay::LivingRoom => &self.living_room,
            Relay::Room => &self.room,
        }
    }

    /// Mutable state of one relay
    pub fn relay_mut(&mut self, relay: Relay) -> &mut RelayState {
        match relay {
            Relay::LivingRoom => &mut self.living_room,
            Relay::Room => &mut self.room,
        }
    }

    /// Schedule window for a day class
    pub fn window(&self, day: DayClass) -> &ScheduleWindow {
        match day {
            DayClass::Weekday => &self.weekday,
            DayClass::Weekend => &self.weekend,
        }
    }

    /// Copy time of day and weekday from the wall clock
    ///
    /// The clock numbers days 1-7, the record 0-6.
    pub fn sync_from_clock(&mut self, time: &DateTime) {
        self.hours = time.hour;
        self.minutes = time.minute;
        self.day_of_week = time.day_of_week.saturating_sub(1).min(6);
    }
}

/// Identifies one editable slot of [`Settings`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SettingsField {
    Hours,
    Minutes,
    DayOfWeek,
    LivingRoomState,
    RoomState,
    WeekdayOnHour,
    WeekdayOnMinute,
    WeekdayOffHour,
    WeekdayOffMinute,
    WeekendOnHour,
    WeekendOnMinute,
    WeekendOffHour,
    WeekendOffMinute,
}

impl SettingsField {
    /// Every field, in record order
    pub const ALL: [SettingsField; 13] = [
        SettingsField::Hours,
        SettingsField::Minutes,
        SettingsField::DayOfWeek,
        SettingsField::LivingRoomState,
        SettingsField::RoomState,
        SettingsField::WeekdayOnHour,
        SettingsField::WeekdayOnMinute,
        SettingsField::WeekdayOffHour,
        SettingsField::WeekdayOffMinute,
        SettingsField::WeekendOnHour,
        SettingsField::WeekendOnMinute,
        SettingsField::WeekendOffHour,
        SettingsField::WeekendOffMinute,
    ];

    /// Format/update behaviour of the field
    pub fn kind(self) -> FieldKind {
        match self {
            SettingsField::Hours
            | SettingsField::WeekdayOnHour
            | SettingsField::WeekdayOffHour
            | SettingsField::WeekendOnHour
            | SettingsField::WeekendOffHour => FieldKind::Hours,
            SettingsField::Minutes
            | SettingsField::WeekdayOnMinute
            | SettingsField::WeekdayOffMinute
            | SettingsField::WeekendOnMinute
            | SettingsField::WeekendOffMinute => FieldKind::Minutes,
            SettingsField::DayOfWeek => FieldKind::DayOfWeek,
            SettingsField::LivingRoomState | SettingsField::RoomState => FieldKind::BinaryState,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slots_match_values() {
        let mut settings = Settings::default();
        for (i, field) in SettingsField::ALL.iter().enumerate() {
            *settings.slot_mut(*field) = i as u8;
        }
        for (i, field) in SettingsField::ALL.iter().enumerate() {
            assert_eq!(settings.value(*field), i as u8);
        }
        assert_eq!(settings.weekend.off_minute, 12);
        assert_eq!(settings.room.requested, 4);
    }

    #[test]
    fn test_relay_flip_mirrors_requested() {
        let mut state = RelayState {
            requested: 1,
            applied: 0,
        };
        assert!(state.needs_toggle());
        assert!(!state.is_on());

        state.flip();
        assert!(state.is_on());
        assert_eq!(state.requested, 1);
        assert!(!state.needs_toggle());

        state.flip();
        assert!(!state.is_on());
        assert_eq!(state.requested, 0);
    }

    #[test]
    fn test_sync_from_clock() {
        let mut settings = Settings::default();
        settings.sync_from_clock(&DateTime {
            hour: 13,
            minute: 45,
            second: 12,
            day_of_week: 7,
        });
        assert_eq!(settings.hours, 13);
        assert_eq!(settings.minutes, 45);
        assert_eq!(settings.day_of_week, 6);

        // A clock that has never been set reads day 0
        settings.sync_from_clock(&DateTime::default());
        assert_eq!(settings.day_of_week, 0);
    }

    #[test]
    fn test_window_selection() {
        let mut settings = Settings::default();
        settings.weekday.on_hour = 7;
        settings.weekend.on_hour = 9;
        assert_eq!(settings.window(DayClass::Weekday).on_hour, 7);
        assert_eq!(settings.window(DayClass::Weekend).on_hour, 9);
    }

    #[test]
    fn test_field_kinds() {
        assert_eq!(SettingsField::Hours.kind(), FieldKind::Hours);
        assert_eq!(SettingsField::WeekendOffMinute.kind(), FieldKind::Minutes);
        assert_eq!(SettingsField::DayOfWeek.kind(), FieldKind::DayOfWeek);
        assert_eq!(SettingsField::RoomState.kind(), FieldKind::BinaryState);
    }
}
