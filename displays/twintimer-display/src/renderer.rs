//! Menu renderer for character displays
//!
//! Items are drawn as `<label><value>` starting at the item position, the
//! value at `MenuItem::value_column`. Clearing an item blanks only its
//! value so the label stays visible while the value blinks.

use heapless::String;
use twintimer_core::config::Settings;
use twintimer_core::menu::{MenuItem, MenuRenderer};

use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::SCREEN_COLS;

/// `MenuRenderer` over any `DisplayBackend`
///
/// The renderer capability cannot report failures, so the first backend
/// error since the last [`LcdRenderer::take_error`] is kept here.
pub struct LcdRenderer<B> {
    backend: B,
    error: Option<DisplayError>,
}

impl<B: DisplayBackend> LcdRenderer<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            error: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Return and clear the stored backend error
    pub fn take_error(&mut self) -> Option<DisplayError> {
        self.error.take()
    }

    fn check(&mut self, result: Result<(), DisplayError>) {
        if let Err(e) = result {
            self.error.get_or_insert(e);
        }
    }
}

impl<B: DisplayBackend> MenuRenderer for LcdRenderer<B> {
    fn render_menu_item(&mut self, item: &MenuItem, settings: &Settings) {
        if let Some(label) = item.label {
            let result = self.backend.draw_text(item.y, item.x, label.text());
            self.check(result);
        }
        let text = item.text(settings);
        let result = self
            .backend
            .draw_text(item.y, item.value_column(), text.as_str());
        self.check(result);
    }

    fn clear_screen_area(&mut self, item: &MenuItem) {
        let mut blank: String<SCREEN_COLS> = String::new();
        for _ in 0..usize::from(item.width).min(SCREEN_COLS) {
            let _ = blank.push(' ');
        }
        let result = self
            .backend
            .draw_text(item.y, item.value_column(), blank.as_str());
        self.check(result);
    }

    fn clear_screen(&mut self) {
        let result = self.backend.clear();
        self.check(result);
    }
}
