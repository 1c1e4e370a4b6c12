//! Field kinds: value ranges, wraparound updates and text formatting

use core::fmt::Write;

use heapless::String;

/// Formatted field text
pub type FieldText = String<8>;

/// Short day names, Monday first
pub const DAY_NAMES: [&str; 7] = ["Mon", "Tues", "Wed", "Thurs", "Fri", "Sat", "Sun"];

/// Text shown for a value outside the field range
pub const INVALID_TEXT: &str = "err";

/// Direction of a value change
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Direction {
    Increment,
    Decrement,
}

/// Closed set of field behaviours
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FieldKind {
    /// 0-23, two digits
    Hours,
    /// 0-59, two digits
    Minutes,
    /// 0-6, short day name
    DayOfWeek,
    /// 0-1, `off` / `on`
    BinaryState,
}

impl FieldKind {
    /// Largest valid value; the smallest is always 0
    pub const fn max(self) -> u8 {
        match self {
            FieldKind::Hours => 23,
            FieldKind::Minutes => 59,
            FieldKind::DayOfWeek => 6,
            FieldKind::BinaryState => 1,
        }
    }

    pub const fn contains(self, value: u8) -> bool {
        value <= self.max()
    }

    /// Step `value` one unit, wrapping at both ends
    ///
    /// Out-of-range input is pulled back into range: incrementing gives
    /// 0, decrementing gives the maximum.
    pub fn apply(self, value: u8, direction: Direction) -> u8 {
        let max = self.max();
        match direction {
            Direction::Increment if value >= max => 0,
            Direction::Increment => value + 1,
            Direction::Decrement if value == 0 || value > max => max,
            Direction::Decrement => value - 1,
        }
    }

    /// Render `value` as display text
    pub fn format(self, value: u8) -> FieldText {
        let mut text = FieldText::new();
        if !self.contains(value) {
            let _ = text.push_str(INVALID_TEXT);
            return text;
        }

        match self {
            FieldKind::Hours | FieldKind::Minutes => {
                let _ = write!(text, "{:02}", value);
            }
            FieldKind::DayOfWeek => {
                let _ = text.push_str(DAY_NAMES[usize::from(value)]);
            }
            FieldKind::BinaryState => {
                let _ = text.push_str(if value == 0 { "off" } else { "on" });
            }
        }
        text
    }
}

/// Static text drawn in front of a field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Label {
    Room,
    Delimiter,
    LivingRoom,
    Weekday,
    Weekend,
}

impl Label {
    pub const fn text(self) -> &'static str {
        match self {
            Label::Room => "Room:",
            Label::Delimiter => ":",
            Label::LivingRoom => "Zal:",
            Label::Weekday => "Wekd:",
            Label::Weekend => "Wknd:",
        }
    }

    /// Columns taken by the label
    pub const fn width(self) -> u8 {
        self.text().len() as u8
    }
}
