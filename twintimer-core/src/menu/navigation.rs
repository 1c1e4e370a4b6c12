//! Navigation and focus engine
//!
//! [`MenuSystem`] owns every screen, the renderer and the edit-mode state:
//!
//! ```text
//!            toggle_editing_mode          next_focus_item / change value / blink
//!  Browsing ─────────────────────▶ Editing ◀──────────────────────────────┐
//!     ▲                              │  └──────────────────────────────────┘
//!     └──── toggle / timeout ────────┘
//! ```
//!
//! Cycling over screens and fields is a bounded search: a layout with no
//! selectable screen or no focusable field is reported as an error
//! instead of spinning.

use heapless::Vec;
use twintimer_hal::{elapsed_ms, Millis};

use super::field::Direction;
use super::model::{Menu, MenuItem};
use super::renderer::MenuRenderer;
use crate::config::{Settings, SettingsField, Timing};
use crate::Error;

/// Maximum number of screens
pub const MAX_MENUS: usize = 4;

/// Edit-mode state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum EditMode {
    /// Screens are shown, buttons switch screens
    Browsing,
    /// One field has focus and blinks, buttons change its value
    Editing,
}

pub struct MenuSystem<R> {
    renderer: R,
    menus: Vec<Menu, MAX_MENUS>,
    active_menu: usize,
    active_item: usize,
    mode: EditMode,
    blink_visible: bool,
    last_blink_ms: Option<Millis>,
    last_interaction_ms: Millis,
    blink_interval_ms: u32,
    edit_timeout_ms: u32,
}

impl<R: MenuRenderer> MenuSystem<R> {
    pub fn new(renderer: R, timing: &Timing) -> Self {
        Self {
            renderer,
            menus: Vec::new(),
            active_menu: 0,
            active_item: 0,
            mode: EditMode::Browsing,
            blink_visible: false,
            last_blink_ms: None,
            last_interaction_ms: 0,
            blink_interval_ms: timing.blink_interval_ms,
            edit_timeout_ms: timing.edit_timeout_ms,
        }
    }

    /// Register a screen and return its index
    pub fn add_menu(&mut self, menu: Menu) -> Result<usize, Error> {
        self.menus.push(menu).map_err(|_| Error::OutOfMemory)?;
        Ok(self.menus.len() - 1)
    }

    pub fn menu(&self, index: usize) -> Option<&Menu> {
        self.menus.get(index)
    }

    pub fn menu_count(&self) -> usize {
        self.menus.len()
    }

    pub fn active_menu_index(&self) -> usize {
        self.active_menu
    }

    pub fn active_menu(&self) -> Option<&Menu> {
        self.menus.get(self.active_menu)
    }

    pub fn active_item_index(&self) -> usize {
        self.active_item
    }

    /// Item holding edit focus, if editing
    pub fn focused_item(&self) -> Option<&MenuItem> {
        if self.is_editing() {
            self.active_menu()?.item(self.active_item)
        } else {
            None
        }
    }

    /// Draw the active screen
    pub fn display(&mut self, settings: &Settings) {
        if let Some(menu) = self.menus.get(self.active_menu) {
            self.renderer.render_menu(menu, settings);
        }
    }

    /// Move to the next selectable screen
    pub fn next_screen(&mut self) -> Result<(), Error> {
        let count = self.menus.len();
        let target = (1..=count)
            .map(|step| (self.active_menu + step) % count)
            .find(|&i| self.menus[i].is_selectable())
            .ok_or(Error::NoSelectableScreen)?;
        self.show(target);
        Ok(())
    }

    /// Move to the previous selectable screen
    pub fn prev_screen(&mut self) -> Result<(), Error> {
        let count = self.menus.len();
        let target = (1..=count)
            .map(|step| (self.active_menu + count - step % count) % count)
            .find(|&i| self.menus[i].is_selectable())
            .ok_or(Error::NoSelectableScreen)?;
        self.show(target);
        Ok(())
    }

    /// Jump to a screen by index, selectable or not
    ///
    /// Indices past the last screen wrap to the first, negative ones to the
    /// last.
    pub fn set_screen(&mut self, index: isize) {
        let count = self.menus.len();
        if count == 0 {
            return;
        }
        let last = count - 1;
        let target = if index < 0 {
            last
        } else if index as usize > last {
            0
        } else {
            index as usize
        };
        self.show(target);
    }

    pub fn is_editing(&self) -> bool {
        self.mode == EditMode::Editing
    }

    pub fn mode(&self) -> EditMode {
        self.mode
    }

    /// Enter or leave edit mode
    ///
    /// Entering puts focus on the first focusable field of the active
    /// screen. Returns whether edit mode is now active.
    pub fn toggle_editing_mode(&mut self, now: Millis) -> Result<bool, Error> {
        if self.is_editing() {
            self.reset_editing_mode();
            return Ok(false);
        }

        let first = self
            .active_menu()
            .and_then(Menu::first_focusable)
            .ok_or(Error::NoFocusableField)?;
        self.mode = EditMode::Editing;
        self.active_item = first;
        self.reset_blink();
        self.touch(now);
        Ok(true)
    }

    /// Leave edit mode and clear the screen
    pub fn reset_editing_mode(&mut self) {
        self.mode = EditMode::Browsing;
        self.active_item = 0;
        self.last_interaction_ms = 0;
        self.reset_blink();
        self.renderer.clear_screen();
    }

    /// Stamp user activity
    pub fn touch(&mut self, now: Millis) {
        self.last_interaction_ms = now;
    }

    pub fn last_interaction_ms(&self) -> Millis {
        self.last_interaction_ms
    }

    /// Check if edit mode has been idle for longer than the timeout
    pub fn edit_timed_out(&self, now: Millis) -> bool {
        self.is_editing() && elapsed_ms(now, self.last_interaction_ms) > self.edit_timeout_ms
    }

    /// Move focus to the next focusable field
    ///
    /// The field losing focus is redrawn so it is not left blanked by the
    /// blink effect.
    pub fn next_focus_item(&mut self, settings: &Settings, now: Millis) -> Result<(), Error> {
        if !self.is_editing() {
            return Ok(());
        }
        self.reset_blink();
        self.touch(now);

        let menu = self
            .menus
            .get(self.active_menu)
            .ok_or(Error::NoFocusableField)?;
        if let Some(item) = menu.item(self.active_item) {
            self.renderer.render_menu_item(item, settings);
        }

        let count = menu.len();
        let target = (1..=count)
            .map(|step| (self.active_item + step) % count)
            .find(|&i| menu.items()[i].focusable)
            .ok_or(Error::NoFocusableField)?;
        self.active_item = target;
        Ok(())
    }

    /// Step the focused field's value and return which field changed
    pub fn change_active_focus_item_value(
        &mut self,
        direction: Direction,
        settings: &mut Settings,
        now: Millis,
    ) -> Option<SettingsField> {
        if !self.is_editing() {
            return None;
        }
        self.reset_blink();
        self.touch(now);

        let item = self.active_menu()?.item(self.active_item)?;
        let field = item.field;
        let slot = settings.slot_mut(field);
        *slot = field.kind().apply(*slot, direction);
        Some(field)
    }

    /// Flip the focused field between shown and hidden when due
    pub fn blink(&mut self, settings: &Settings, now: Millis) {
        if !self.is_editing() {
            return;
        }
        let due = self
            .last_blink_ms
            .map_or(true, |t| elapsed_ms(now, t) > self.blink_interval_ms);
        if !due {
            return;
        }

        self.blink_visible = !self.blink_visible;
        self.last_blink_ms = Some(now);
        if let Some(item) = self
            .menus
            .get(self.active_menu)
            .and_then(|menu| menu.item(self.active_item))
        {
            self.renderer
                .blink_menu_item(item, settings, self.blink_visible);
        }
    }

    pub fn is_blink_visible(&self) -> bool {
        self.blink_visible
    }

    /// Redraw every item of the active screen bound to `field`
    pub fn update_field(&mut self, field: SettingsField, settings: &Settings) {
        if let Some(menu) = self.menus.get(self.active_menu) {
            for item in menu.items().iter().filter(|item| item.field == field) {
                self.renderer.update_menu_item(item, settings);
            }
        }
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn renderer_mut(&mut self) -> &mut R {
        &mut self.renderer
    }

    fn show(&mut self, index: usize) {
        self.active_menu = index;
        self.active_item = 0;
        self.renderer.clear_screen();
    }

    fn reset_blink(&mut self) {
        self.blink_visible = false;
        self.last_blink_ms = None;
    }
}
