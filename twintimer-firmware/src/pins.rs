//! GPIO adapters
//!
//! Wrap embassy-rp pins in the twintimer HAL traits.

use embassy_rp::gpio::{AnyPin, Input, Level, Output, Pull};
use embassy_rp::Peri;
use twintimer_hal::{InputPin, OutputPin};

/// GPIOs named in board.toml, filled by `take_board_pins!`
pub struct BoardPins {
    pub left: Peri<'static, AnyPin>,
    pub central: Peri<'static, AnyPin>,
    pub right: Peri<'static, AnyPin>,
    pub power: Peri<'static, AnyPin>,
    pub living_room: Peri<'static, AnyPin>,
    pub room: Peri<'static, AnyPin>,
}

/// Active-low push button with internal pull-up
pub struct ButtonPin(Input<'static>);

impl ButtonPin {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Input::new(pin, Pull::Up))
    }
}

impl InputPin for ButtonPin {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Push-pull output, starting low
pub struct DrivePin(Output<'static>);

impl DrivePin {
    pub fn new(pin: Peri<'static, AnyPin>) -> Self {
        Self(Output::new(pin, Level::Low))
    }
}

impl OutputPin for DrivePin {
    fn set_high(&mut self) {
        self.0.set_high();
    }

    fn set_low(&mut self) {
        self.0.set_low();
    }

    fn is_set_high(&self) -> bool {
        self.0.is_set_high()
    }
}
