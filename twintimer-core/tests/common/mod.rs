//! Host-side stand-ins for the board peripherals

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use twintimer_core::app::{Controller, Event, Peripherals};
use twintimer_core::config::{Settings, SettingsStore, Timing};
use twintimer_core::menu::{MenuItem, MenuRenderer};
use twintimer_hal::{ClockError, DateTime, Eeprom, InputPin, Millis, OutputPin, StorageError, WallClock};

pub const COLUMNS: usize = 16;
pub const ROWS: usize = 2;

/// Button line; released (high) until pressed
#[derive(Clone)]
pub struct Line(Rc<Cell<bool>>);

impl Line {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn press(&self) {
        self.0.set(false);
    }

    pub fn release(&self) {
        self.0.set(true);
    }
}

impl InputPin for Line {
    fn is_high(&self) -> bool {
        self.0.get()
    }
}

/// Output line whose level the test can observe
#[derive(Clone, Default)]
pub struct Output(Rc<Cell<bool>>);

impl Output {
    pub fn is_high(&self) -> bool {
        self.0.get()
    }
}

impl OutputPin for Output {
    fn set_high(&mut self) {
        self.0.set(true);
    }

    fn set_low(&mut self) {
        self.0.set(false);
    }

    fn is_set_high(&self) -> bool {
        self.0.get()
    }
}

/// 1 KiB EEPROM in RAM, shared between clones
#[derive(Clone)]
pub struct RamEeprom {
    bytes: Rc<RefCell<Vec<u8>>>,
    failing: Rc<Cell<bool>>,
}

impl RamEeprom {
    pub fn blank() -> Self {
        Self {
            bytes: Rc::new(RefCell::new(vec![0xFF; 1024])),
            failing: Rc::new(Cell::new(false)),
        }
    }

    /// Device already holding `settings`
    pub fn with_settings(settings: &Settings) -> Self {
        let eeprom = Self::blank();
        SettingsStore::new(eeprom.clone())
            .format(settings)
            .expect("format RAM EEPROM");
        eeprom
    }

    /// Settings currently stored on the device
    pub fn stored(&self) -> Settings {
        SettingsStore::new(self.clone())
            .load()
            .expect("load RAM EEPROM")
    }

    pub fn byte(&self, offset: usize) -> u8 {
        self.bytes.borrow()[offset]
    }

    pub fn poke(&self, offset: usize, value: u8) {
        self.bytes.borrow_mut()[offset] = value;
    }

    pub fn fail(&self, failing: bool) {
        self.failing.set(failing);
    }
}

impl Eeprom for RamEeprom {
    fn capacity(&self) -> usize {
        self.bytes.borrow().len()
    }

    fn read(&mut self, offset: u16, buffer: &mut [u8]) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Bus);
        }
        self.check_range(offset, buffer.len())?;
        let start = usize::from(offset);
        buffer.copy_from_slice(&self.bytes.borrow()[start..start + buffer.len()]);
        Ok(())
    }

    fn write(&mut self, offset: u16, data: &[u8]) -> Result<(), StorageError> {
        if self.failing.get() {
            return Err(StorageError::Bus);
        }
        self.check_range(offset, data.len())?;
        let start = usize::from(offset);
        self.bytes.borrow_mut()[start..start + data.len()].copy_from_slice(data);
        Ok(())
    }
}

/// Wall clock that only moves when the test sets it
#[derive(Default)]
pub struct FakeRtc {
    pub time: DateTime,
    /// Number of `set_time` calls
    pub time_writes: usize,
}

impl FakeRtc {
    pub fn at(hour: u8, minute: u8, second: u8, day_of_week: u8) -> Self {
        Self {
            time: DateTime {
                hour,
                minute,
                second,
                day_of_week,
            },
            time_writes: 0,
        }
    }
}

impl WallClock for FakeRtc {
    fn now(&mut self) -> Result<DateTime, ClockError> {
        Ok(self.time)
    }

    fn set_time(&mut self, hour: u8, minute: u8, second: u8) -> Result<(), ClockError> {
        self.time.hour = hour;
        self.time.minute = minute;
        self.time.second = second;
        self.time_writes += 1;
        Ok(())
    }

    fn set_day_of_week(&mut self, day: u8) -> Result<(), ClockError> {
        self.time.day_of_week = day;
        Ok(())
    }
}

/// 16x2 character grid
pub struct GridRenderer {
    cells: [[u8; COLUMNS]; ROWS],
    pub clears: usize,
}

impl GridRenderer {
    pub fn new() -> Self {
        Self {
            cells: [[b' '; COLUMNS]; ROWS],
            clears: 0,
        }
    }

    pub fn row(&self, row: usize) -> String {
        String::from_utf8_lossy(&self.cells[row]).into_owned()
    }

    fn put(&mut self, col: u8, row: u8, text: &str) {
        let row = usize::from(row);
        for (i, byte) in text.bytes().enumerate() {
            let col = usize::from(col) + i;
            if row < ROWS && col < COLUMNS {
                self.cells[row][col] = byte;
            }
        }
    }
}

impl MenuRenderer for GridRenderer {
    fn render_menu_item(&mut self, item: &MenuItem, settings: &Settings) {
        if let Some(label) = item.label {
            self.put(item.x, item.y, label.text());
        }
        self.put(item.value_column(), item.y, item.text(settings).as_str());
    }

    fn clear_screen_area(&mut self, item: &MenuItem) {
        let blank = " ".repeat(usize::from(item.width));
        self.put(item.value_column(), item.y, &blank);
    }

    fn clear_screen(&mut self) {
        self.cells = [[b' '; COLUMNS]; ROWS];
        self.clears += 1;
    }
}

pub type TestController = Controller<GridRenderer, Line, Output, FakeRtc, RamEeprom>;

/// Handles kept by the test after the controller took the peripherals
pub struct Rig {
    pub left: Line,
    pub central: Line,
    pub right: Line,
    pub power: Output,
    pub living_room: Output,
    pub room: Output,
    pub eeprom: RamEeprom,
    pub events: Vec<Event>,
}

impl Rig {
    /// Tick once and keep the reported events
    pub fn tick(&mut self, controller: &mut TestController, now: Millis) {
        let events = controller.tick(now).expect("tick");
        self.events.extend(events.iter().copied());
    }

    /// Short press: down at `at`, up 100 ms later
    pub fn click(&mut self, controller: &mut TestController, line: &Line, at: Millis) {
        line.press();
        self.tick(controller, at);
        line.release();
        self.tick(controller, at + 100);
    }

    /// Long press firing exactly one hold, released 100 ms after it fired
    pub fn hold(&mut self, controller: &mut TestController, line: &Line, at: Millis) {
        line.press();
        self.tick(controller, at);
        self.tick(controller, at + 2001);
        line.release();
        self.tick(controller, at + 2101);
    }

    pub fn saw(&self, event: Event) -> bool {
        self.events.contains(&event)
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

/// Controller over fresh mock peripherals, not yet booted
pub fn controller(eeprom: RamEeprom, rtc: FakeRtc) -> (TestController, Rig) {
    let rig = Rig {
        left: Line::new(),
        central: Line::new(),
        right: Line::new(),
        power: Output::default(),
        living_room: Output::default(),
        room: Output::default(),
        eeprom: eeprom.clone(),
        events: Vec::new(),
    };

    let board = Peripherals {
        left: rig.left.clone(),
        central: rig.central.clone(),
        right: rig.right.clone(),
        power: rig.power.clone(),
        living_room: rig.living_room.clone(),
        room: rig.room.clone(),
        clock: rtc,
        eeprom,
    };

    let controller =
        Controller::new(GridRenderer::new(), board, &Timing::default()).expect("build controller");
    (controller, rig)
}

/// Controller that has already run `boot`
pub fn booted(eeprom: RamEeprom, rtc: FakeRtc) -> (TestController, Rig) {
    let (mut controller, mut rig) = controller(eeprom, rtc);
    let events = controller.boot().expect("boot");
    rig.events.extend(events.iter().copied());
    (controller, rig)
}
