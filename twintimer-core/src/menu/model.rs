//! Menu model: screens made of fields bound to settings slots
//!
//! Pure data. Items never hold the value they show; they name a
//! [`SettingsField`] and read it from the record at render time.

use heapless::Vec;

use super::field::{FieldKind, FieldText, Label};
use crate::config::{Settings, SettingsField};
use crate::Error;

/// Maximum items on one screen
pub const MAX_ITEMS: usize = 8;

/// One field on a screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MenuItem {
    /// Settings slot shown and edited by this item
    pub field: SettingsField,
    /// Column of the first character (label included)
    pub x: u8,
    /// Row
    pub y: u8,
    /// Columns reserved for the value
    pub width: u8,
    /// Optional static text in front of the value
    pub label: Option<Label>,
    /// Whether edit focus may land here
    pub focusable: bool,
}

impl MenuItem {
    pub const fn new(field: SettingsField, x: u8, y: u8, width: u8) -> Self {
        Self {
            field,
            x,
            y,
            width,
            label: None,
            focusable: true,
        }
    }

    pub const fn with_label(mut self, label: Label) -> Self {
        self.label = Some(label);
        self
    }

    /// Display-only item, skipped by focus cycling
    pub const fn unfocusable(mut self) -> Self {
        self.focusable = false;
        self
    }

    pub fn kind(&self) -> FieldKind {
        self.field.kind()
    }

    /// Column where the value starts
    pub fn value_column(&self) -> u8 {
        match self.label {
            Some(label) => self.x + label.width(),
            None => self.x,
        }
    }

    /// Formatted value, cut to the item width
    pub fn text(&self, settings: &Settings) -> FieldText {
        let mut text = self.kind().format(settings.value(self.field));
        text.truncate(usize::from(self.width));
        text
    }
}

/// Ordered, bounded set of items forming one screen
#[derive(Debug, Clone)]
pub struct Menu {
    items: Vec<MenuItem, MAX_ITEMS>,
    selectable: bool,
}

impl Menu {
    /// Screen reachable by next/prev screen cycling
    pub const fn new() -> Self {
        Self {
            items: Vec::new(),
            selectable: true,
        }
    }

    /// Screen reachable only by index
    pub const fn modal() -> Self {
        Self {
            items: Vec::new(),
            selectable: false,
        }
    }

    /// Append an item
    ///
    /// Fails with [`Error::OutOfMemory`] when the screen is full.
    pub fn add_item(&mut self, item: MenuItem) -> Result<(), Error> {
        self.items.push(item).map_err(|_| Error::OutOfMemory)
    }

    pub fn item(&self, index: usize) -> Option<&MenuItem> {
        self.items.get(index)
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_selectable(&self) -> bool {
        self.selectable
    }

    /// Index of the first focusable item
    pub fn first_focusable(&self) -> Option<usize> {
        self.items.iter().position(|item| item.focusable)
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}
