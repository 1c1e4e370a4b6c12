//! Timing configuration
//!
//! All thresholds are in milliseconds and compared with strict `>` against
//! wrapping elapsed time.

/// Minimum gap between two accepted presses (debounce)
pub const SHORT_PRESS_MS: u32 = 50;

/// Press duration after which a hold fires
pub const LONG_PRESS_MS: u32 = 2000;

/// Interval between repeated hold events while still pressed
pub const HOLD_REPEAT_MS: u32 = 1000;

/// Blink half-period of the focused field in edit mode
pub const BLINK_INTERVAL_MS: u32 = 500;

/// Edit mode is abandoned after this much inactivity
pub const EDIT_TIMEOUT_MS: u32 = 5000;

/// Delay before the auxiliary power rail is switched on
pub const RAIL_ON_MS: u32 = 500;

/// Time at which the auxiliary power rail is switched off again
pub const RAIL_OFF_MS: u32 = 10_500;

/// Time at which relay lines are released and the toggle is committed
pub const SWITCH_COMPLETE_MS: u32 = 11_000;

/// Push button timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonTiming {
    /// Debounce gap between presses
    pub short_press_ms: u32,
    /// Hold threshold
    pub long_press_ms: u32,
    /// Hold repeat interval
    pub hold_repeat_ms: u32,
}

impl Default for ButtonTiming {
    fn default() -> Self {
        Self {
            short_press_ms: SHORT_PRESS_MS,
            long_press_ms: LONG_PRESS_MS,
            hold_repeat_ms: HOLD_REPEAT_MS,
        }
    }
}

/// Relay actuation cycle timing
///
/// Offsets are measured from the first service after a toggle request and
/// must be strictly increasing: `rail_on_ms < rail_off_ms < complete_ms`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ActuationTiming {
    /// Auxiliary rail goes high after this offset
    pub rail_on_ms: u32,
    /// Auxiliary rail goes low after this offset
    pub rail_off_ms: u32,
    /// Relay lines drop and the toggle commits after this offset
    pub complete_ms: u32,
}

impl Default for ActuationTiming {
    fn default() -> Self {
        Self {
            rail_on_ms: RAIL_ON_MS,
            rail_off_ms: RAIL_OFF_MS,
            complete_ms: SWITCH_COMPLETE_MS,
        }
    }
}

impl ActuationTiming {
    /// Check the offsets are in cycle order
    pub fn is_ordered(&self) -> bool {
        self.rail_on_ms < self.rail_off_ms && self.rail_off_ms < self.complete_ms
    }
}

/// Complete timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Timing {
    /// Push buttons
    pub button: ButtonTiming,
    /// Focused field blink half-period
    pub blink_interval_ms: u32,
    /// Edit mode inactivity timeout
    pub edit_timeout_ms: u32,
    /// Relay actuation cycle
    pub actuation: ActuationTiming,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            button: ButtonTiming::default(),
            blink_interval_ms: BLINK_INTERVAL_MS,
            edit_timeout_ms: EDIT_TIMEOUT_MS,
            actuation: ActuationTiming::default(),
        }
    }
}
