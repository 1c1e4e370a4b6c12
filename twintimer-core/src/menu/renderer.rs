//! Renderer capability
//!
//! The navigation engine never draws by itself. Every visible change is a
//! call on this trait; the display crate implements it for a character
//! LCD and the tests implement it with a call recorder.
//!
//! Rendering has no error channel. Implementations that can fail keep
//! the failure to themselves.

use super::model::{Menu, MenuItem};
use crate::config::Settings;

pub trait MenuRenderer {
    /// Draw one item (label and value)
    fn render_menu_item(&mut self, item: &MenuItem, settings: &Settings);

    /// Blank the value area of one item
    fn clear_screen_area(&mut self, item: &MenuItem);

    /// Blank the whole screen
    fn clear_screen(&mut self);

    /// Draw every item of a screen in order
    fn render_menu(&mut self, menu: &Menu, settings: &Settings) {
        for item in menu.items() {
            self.render_menu_item(item, settings);
        }
    }

    /// Redraw one item after its value changed
    fn update_menu_item(&mut self, item: &MenuItem, settings: &Settings) {
        self.clear_screen_area(item);
        self.render_menu_item(item, settings);
    }

    /// Show or hide the focused item for the blink effect
    fn blink_menu_item(&mut self, item: &MenuItem, settings: &Settings, visible: bool) {
        if visible {
            self.update_menu_item(item, settings);
        } else {
            self.clear_screen_area(item);
        }
    }
}
