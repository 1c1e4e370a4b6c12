//! Application controller
//!
//! Owns the settings record and every peripheral and runs the main loop
//! one cooperative tick at a time. Within a tick the order is fixed:
//!
//! 1. service the relay actuation cycle
//! 2. central hold: enter or leave edit mode
//! 3. left/right hold outside edit mode: toggle manual mode
//! 4. one of
//!    - editing: focus, value changes, blink, inactivity timeout
//!    - browsing (automatic): screen cycling, clock sync, schedule
//!    - browsing (manual): queue toggles for edited relay states

use twintimer_hal::{DateTime, Eeprom, InputPin, Millis, OutputPin, WallClock};

use super::events::{Event, TickEvents};
use super::screens::{self, MAIN_SCREEN, MANUAL_SCREEN};
use crate::config::{Settings, SettingsField, SettingsStore, Timing};
use crate::input::Button;
use crate::menu::{Direction, MenuRenderer, MenuSystem};
use crate::relay::{ActuationSequencer, Relay, RelayBank};
use crate::schedule::window::living_room_due;
use crate::Error;

/// Hardware handed to the controller
pub struct Peripherals<B, P, C, E> {
    /// Left button (decrement / previous screen)
    pub left: B,
    /// Central button (edit mode / next field)
    pub central: B,
    /// Right button (increment / next screen)
    pub right: B,
    /// Auxiliary power rail
    pub power: P,
    pub living_room: P,
    pub room: P,
    pub clock: C,
    pub eeprom: E,
}

pub struct Controller<R, B, P, C, E> {
    settings: Settings,
    menu: MenuSystem<R>,
    left: Button<B>,
    central: Button<B>,
    right: Button<B>,
    sequencer: ActuationSequencer,
    relays: RelayBank<P>,
    clock: C,
    store: SettingsStore<E>,
}

impl<R, B, P, C, E> Controller<R, B, P, C, E>
where
    R: MenuRenderer,
    B: InputPin,
    P: OutputPin,
    C: WallClock,
    E: Eeprom,
{
    /// Build the screens and take ownership of the hardware
    ///
    /// Relay lines are driven low here. Settings stay at defaults until
    /// [`Controller::boot`] runs.
    pub fn new(renderer: R, board: Peripherals<B, P, C, E>, timing: &Timing) -> Result<Self, Error> {
        let mut menu = MenuSystem::new(renderer, timing);
        screens::install(&mut menu)?;

        Ok(Self {
            settings: Settings::default(),
            menu,
            left: Button::new(board.left, timing.button),
            central: Button::new(board.central, timing.button),
            right: Button::new(board.right, timing.button),
            sequencer: ActuationSequencer::new(timing.actuation),
            relays: RelayBank::new(board.power, board.living_room, board.room),
            clock: board.clock,
            store: SettingsStore::new(board.eeprom),
        })
    }

    /// Load settings (formatting blank storage) and pick the first screen
    pub fn boot(&mut self) -> Result<TickEvents, Error> {
        let mut events = TickEvents::new();

        if self.initialize_settings()? {
            record(&mut events, Event::SettingsReset);
        }
        if self.settings.manual_mode {
            self.menu.set_screen(MANUAL_SCREEN as isize);
            record(&mut events, Event::ScreenChanged(MANUAL_SCREEN));
        }

        Ok(events)
    }

    /// Run one pass of the main loop
    pub fn tick(&mut self, now: Millis) -> Result<TickEvents, Error> {
        let mut events = TickEvents::new();

        if let Some(switched) = self
            .sequencer
            .service(now, &mut self.settings, &mut self.relays)
        {
            for relay in switched.iter() {
                self.menu.update_field(relay.state_field(), &self.settings);
            }
            record(&mut events, Event::RelaysSwitched(switched));
            self.persist()?;
            record(&mut events, Event::SettingsSaved);
        }

        if self.central.is_held(now) {
            if self.menu.toggle_editing_mode(now)? {
                record(&mut events, Event::EditingStarted);
            } else {
                record(&mut events, Event::EditingFinished);
                self.save_settings()?;
                record(&mut events, Event::SettingsSaved);
            }
        }

        if !self.menu.is_editing() && (self.left.is_held(now) || self.right.is_held(now)) {
            self.toggle_manual_mode(&mut events)?;
        }

        if self.menu.is_editing() {
            self.tick_editing(now, &mut events)?;
        } else if !self.settings.manual_mode {
            self.tick_automatic(now, &mut events)?;
        } else {
            self.tick_manual(now, &mut events);
        }

        Ok(events)
    }

    fn tick_editing(&mut self, now: Millis, events: &mut TickEvents) -> Result<(), Error> {
        if self.central.is_clicked(now) {
            self.menu.next_focus_item(&self.settings, now)?;
            record(events, Event::FocusMoved);
        } else if self.left.is_clicked(now) || self.left.is_held(now) {
            self.change_value(Direction::Decrement, now, events);
        } else if self.right.is_clicked(now) || self.right.is_held(now) {
            self.change_value(Direction::Increment, now, events);
        } else {
            self.menu.blink(&self.settings, now);
        }

        if self.menu.edit_timed_out(now) {
            self.menu.reset_editing_mode();
            record(events, Event::EditingTimedOut);
            let reset = self.initialize_settings()?;
            record(
                events,
                if reset {
                    Event::SettingsReset
                } else {
                    Event::SettingsReloaded
                },
            );
        }

        Ok(())
    }

    fn tick_automatic(&mut self, now: Millis, events: &mut TickEvents) -> Result<(), Error> {
        if self.left.is_clicked(now) {
            self.menu.prev_screen()?;
            record(events, Event::ScreenChanged(self.menu.active_menu_index()));
        }
        if self.right.is_clicked(now) {
            self.menu.next_screen()?;
            record(events, Event::ScreenChanged(self.menu.active_menu_index()));
        }

        let time = self.clock.now()?;
        if self.sync_clock_fields(&time) {
            record(events, Event::ClockSynced);
        }

        if living_room_due(&self.settings, &time) && self.sequencer.request(Relay::LivingRoom) {
            record(events, Event::ToggleRequested(Relay::LivingRoom));
        }

        self.menu.display(&self.settings);
        Ok(())
    }

    fn tick_manual(&mut self, now: Millis, events: &mut TickEvents) {
        // Clicks do nothing while browsing in manual mode; drop them so
        // they cannot leak into the next edit session
        self.left.is_clicked(now);
        self.right.is_clicked(now);

        for relay in Relay::ALL {
            if self.settings.relay(relay).needs_toggle() && self.sequencer.request(relay) {
                record(events, Event::ToggleRequested(relay));
            }
        }

        self.menu.display(&self.settings);
    }

    fn change_value(&mut self, direction: Direction, now: Millis, events: &mut TickEvents) {
        if let Some(field) = self
            .menu
            .change_active_focus_item_value(direction, &mut self.settings, now)
        {
            record(events, Event::ValueChanged(field));
        }
    }

    fn toggle_manual_mode(&mut self, events: &mut TickEvents) -> Result<(), Error> {
        self.settings.manual_mode = !self.settings.manual_mode;
        let screen = if self.settings.manual_mode {
            MANUAL_SCREEN
        } else {
            MAIN_SCREEN
        };
        self.menu.set_screen(screen as isize);

        record(events, Event::ManualModeChanged(self.settings.manual_mode));
        record(events, Event::ScreenChanged(screen));

        self.persist()?;
        record(events, Event::SettingsSaved);
        Ok(())
    }

    /// Follow the RTC at the top of each minute
    ///
    /// Minutes follow whenever they differ; hours and weekday only at the
    /// top of the hour. Returns whether anything changed.
    fn sync_clock_fields(&mut self, time: &DateTime) -> bool {
        if time.second != 0 {
            return false;
        }

        let mut synced = false;
        if self.settings.minutes != time.minute {
            self.settings.minutes = time.minute;
            self.menu.update_field(SettingsField::Minutes, &self.settings);
            synced = true;
        }
        if time.minute == 0 && self.settings.hours != time.hour {
            self.settings.hours = time.hour;
            self.settings.day_of_week = time.day_of_week.saturating_sub(1).min(6);
            self.menu.update_field(SettingsField::Hours, &self.settings);
            self.menu.update_field(SettingsField::DayOfWeek, &self.settings);
            synced = true;
        }
        synced
    }

    /// Load the stored record, or write defaults and reset the RTC on a
    /// blank device, then take time and weekday from the RTC
    ///
    /// Returns whether defaults were written.
    fn initialize_settings(&mut self) -> Result<bool, Error> {
        let (settings, reset) = self.store.load_or_format()?;
        if reset {
            self.clock.set_day_of_week(1)?;
            self.clock.set_time(0, 0, 0)?;
        }
        self.settings = settings;

        let time = self.clock.now()?;
        self.settings.sync_from_clock(&time);
        Ok(reset)
    }

    /// Write the record and push the edited time and weekday to the RTC
    fn save_settings(&mut self) -> Result<(), Error> {
        self.persist()?;
        self.clock
            .set_time(self.settings.hours, self.settings.minutes, 0)?;
        self.clock
            .set_day_of_week(self.settings.day_of_week.min(6) + 1)?;
        Ok(())
    }

    /// Write the record only
    fn persist(&mut self) -> Result<(), Error> {
        self.store.save(&self.settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn menu(&self) -> &MenuSystem<R> {
        &self.menu
    }

    pub fn renderer(&self) -> &R {
        self.menu.renderer()
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        self.menu.renderer_mut()
    }

    pub fn relays(&self) -> &RelayBank<P> {
        &self.relays
    }

    pub fn sequencer(&self) -> &ActuationSequencer {
        &self.sequencer
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn store(&self) -> &SettingsStore<E> {
        &self.store
    }
}

/// Report an event, dropped if the list is full
fn record(events: &mut TickEvents, event: Event) {
    let _ = events.push(event);
}
