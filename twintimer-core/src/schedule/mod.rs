//! Daily on/off schedule for the living-room relay

pub mod window;

pub use window::{is_in_interval, living_room_due, should_toggle, DayClass, ScheduleWindow};
