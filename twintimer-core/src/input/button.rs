//! Debounced push button
//!
//! Buttons are sampled by polling. Every query samples the line first and
//! then hands out at most one latched event, so a click or hold is seen by
//! exactly one caller.
//!
//! ```text
//!   press ──▶ click candidate ──release──▶ click latched
//!                  │
//!                  └─ held > long ──▶ hold latched ──every > repeat──▶ hold latched
//!                                         │
//!                                         └─release──▶ released (no click)
//! ```

use twintimer_hal::{elapsed_ms, InputPin, Millis};

use crate::config::ButtonTiming;

/// Sampling state of one button, independent of the input line
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonState {
    timing: ButtonTiming,
    previous: bool,
    press_ms: Option<Millis>,
    hold_ms: Option<Millis>,
    clicking: bool,
    holding: bool,
    click_latched: bool,
    hold_latched: bool,
}

impl ButtonState {
    pub const fn new(timing: ButtonTiming) -> Self {
        Self {
            timing,
            previous: false,
            press_ms: None,
            hold_ms: None,
            clicking: false,
            holding: false,
            click_latched: false,
            hold_latched: false,
        }
    }

    /// Feed one sample of the (already inverted) line level
    pub fn sample(&mut self, pressed: bool, now: Millis) {
        // Press edge, ignoring bounces shortly after the previous press
        if pressed && !self.previous && !self.clicking {
            let settled = self
                .press_ms
                .map_or(true, |t| elapsed_ms(now, t) > self.timing.short_press_ms);
            if settled {
                self.previous = true;
                self.press_ms = Some(now);
                self.clicking = true;
            }
        }

        if !pressed && self.previous {
            if self.clicking {
                self.click_latched = true;
                self.clicking = false;
                self.previous = false;
            }
            if self.holding {
                self.holding = false;
                self.hold_ms = None;
                self.previous = false;
            }
        }

        if pressed && self.previous {
            let held_long = self
                .press_ms
                .map_or(false, |t| elapsed_ms(now, t) > self.timing.long_press_ms);
            let repeat_due = self
                .hold_ms
                .map_or(true, |t| elapsed_ms(now, t) > self.timing.hold_repeat_ms);
            if held_long && repeat_due {
                self.holding = true;
                self.hold_latched = true;
                self.hold_ms = Some(now);
                self.clicking = false;
                self.click_latched = false;
            }
        }
    }

    /// Return and clear the click latch
    pub fn take_click(&mut self) -> bool {
        core::mem::take(&mut self.click_latched)
    }

    /// Return and clear the hold latch
    pub fn take_hold(&mut self) -> bool {
        core::mem::take(&mut self.hold_latched)
    }

    /// Check if a press is currently being tracked
    pub fn is_pressed(&self) -> bool {
        self.previous
    }

    /// Check if the current press has turned into a hold
    pub fn is_holding(&self) -> bool {
        self.holding
    }
}

/// Active-low push button on an input line
pub struct Button<P> {
    pin: P,
    state: ButtonState,
}

impl<P: InputPin> Button<P> {
    pub fn new(pin: P, timing: ButtonTiming) -> Self {
        Self {
            pin,
            state: ButtonState::new(timing),
        }
    }

    /// Sample the line and report a completed click
    pub fn is_clicked(&mut self, now: Millis) -> bool {
        self.poll(now);
        self.state.take_click()
    }

    /// Sample the line and report a hold (repeats while held)
    pub fn is_held(&mut self, now: Millis) -> bool {
        self.poll(now);
        self.state.take_hold()
    }

    pub fn state(&self) -> &ButtonState {
        &self.state
    }

    fn poll(&mut self, now: Millis) {
        let pressed = self.pin.is_low();
        self.state.sample(pressed, now);
    }
}
