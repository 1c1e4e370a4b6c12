//! Screen layout of the 16x2 character display
//!
//! ```text
//!   main      timers              manual (hold left/right)
//!  ┌────────────────┐ ┌────────────────┐ ┌────────────────┐
//!  │00:00      Mon  │ │Wekd:07:00 22:30│ │Zal:off         │
//!  │Zal:off Room:on │ │Wknd:09:00 23:30│ │Room:on         │
//!  └────────────────┘ └────────────────┘ └────────────────┘
//! ```

use crate::config::SettingsField;
use crate::menu::{Label, Menu, MenuItem, MenuRenderer, MenuSystem};
use crate::Error;

/// Clock and relay states
pub const MAIN_SCREEN: usize = 0;
/// Weekday and weekend schedule windows
pub const TIMERS_SCREEN: usize = 1;
/// Relay state editors, only reachable by toggling manual mode
pub const MANUAL_SCREEN: usize = 2;

/// Build the clock and relay-state screen
pub fn main_screen() -> Result<Menu, Error> {
    let mut menu = Menu::new();
    menu.add_item(MenuItem::new(SettingsField::Hours, 0, 0, 2))?;
    menu.add_item(MenuItem::new(SettingsField::Minutes, 2, 0, 2).with_label(Label::Delimiter))?;
    menu.add_item(MenuItem::new(SettingsField::DayOfWeek, 11, 0, 5))?;
    menu.add_item(
        MenuItem::new(SettingsField::LivingRoomState, 0, 1, 3)
            .with_label(Label::LivingRoom)
            .unfocusable(),
    )?;
    menu.add_item(
        MenuItem::new(SettingsField::RoomState, 8, 1, 3)
            .with_label(Label::Room)
            .unfocusable(),
    )?;
    Ok(menu)
}

/// Build the schedule window screen
pub fn timers_screen() -> Result<Menu, Error> {
    let rows = [
        (
            0,
            Label::Weekday,
            [
                SettingsField::WeekdayOnHour,
                SettingsField::WeekdayOnMinute,
                SettingsField::WeekdayOffHour,
                SettingsField::WeekdayOffMinute,
            ],
        ),
        (
            1,
            Label::Weekend,
            [
                SettingsField::WeekendOnHour,
                SettingsField::WeekendOnMinute,
                SettingsField::WeekendOffHour,
                SettingsField::WeekendOffMinute,
            ],
        ),
    ];

    let mut menu = Menu::new();
    for (row, label, [on_hour, on_minute, off_hour, off_minute]) in rows {
        menu.add_item(MenuItem::new(on_hour, 0, row, 2).with_label(label))?;
        menu.add_item(MenuItem::new(on_minute, 7, row, 2).with_label(Label::Delimiter))?;
        menu.add_item(MenuItem::new(off_hour, 11, row, 2))?;
        menu.add_item(MenuItem::new(off_minute, 13, row, 2).with_label(Label::Delimiter))?;
    }
    Ok(menu)
}

/// Build the manual-mode screen
pub fn manual_screen() -> Result<Menu, Error> {
    let mut menu = Menu::modal();
    menu.add_item(MenuItem::new(SettingsField::LivingRoomState, 0, 0, 3).with_label(Label::LivingRoom))?;
    menu.add_item(MenuItem::new(SettingsField::RoomState, 0, 1, 3).with_label(Label::Room))?;
    Ok(menu)
}

/// Register all screens in index order
pub fn install<R: MenuRenderer>(menu: &mut MenuSystem<R>) -> Result<(), Error> {
    menu.add_menu(main_screen()?)?;
    menu.add_menu(timers_screen()?)?;
    menu.add_menu(manual_screen()?)?;
    Ok(())
}
