//! Time sources
//!
//! Two clocks exist on the board:
//!
//! - a free-running millisecond counter that wraps at `u32::MAX`, used for
//!   debouncing, blinking and relay sequencing
//! - a battery-backed wall clock (RTC) holding time of day and weekday

/// Monotonic milliseconds since boot, wrapping
pub type Millis = u32;

/// Milliseconds elapsed between `since` and `now`
///
/// Rollover-tolerant: uses wrapping subtraction, so a counter that wrapped
/// between the two samples still yields the true distance.
#[inline]
pub fn elapsed_ms(now: Millis, since: Millis) -> Millis {
    now.wrapping_sub(since)
}

/// Wall-clock reading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DateTime {
    /// Hour of day (0-23)
    pub hour: u8,
    /// Minute (0-59)
    pub minute: u8,
    /// Second (0-59)
    pub second: u8,
    /// Day of week, 1 = Monday .. 7 = Sunday
    pub day_of_week: u8,
}

impl DateTime {
    /// Minutes since midnight
    pub fn minute_of_day(&self) -> u16 {
        u16::from(self.hour) * 60 + u16::from(self.minute)
    }
}

/// Errors from the real-time clock
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ClockError {
    /// Bus transaction failed
    Bus,
    /// Clock returned out-of-range register contents
    InvalidData,
}

/// Battery-backed real-time clock
pub trait WallClock {
    /// Read the current time of day and weekday
    fn now(&mut self) -> Result<DateTime, ClockError>;

    /// Set the time of day
    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError>;

    /// Set the day of week (1 = Monday .. 7 = Sunday)
    fn set_day_of_week(&mut self, day: u8) -> Result<(), ClockError>;
}
