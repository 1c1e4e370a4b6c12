//! Screen buffer
//!
//! Character grid mirroring the LCD, with per-row dirty tracking.

use crate::backend::{DisplayBackend, DisplayError};

/// Number of character rows on the LCD
pub const SCREEN_ROWS: usize = 2;

/// Number of character columns on the LCD
pub const SCREEN_COLS: usize = 16;

const BLANK: u8 = b' ';

/// In-memory character display
#[derive(Clone)]
pub struct Screen {
    /// Current content, space padded
    cells: [[u8; SCREEN_COLS]; SCREEN_ROWS],
    /// Rows changed since the last flush
    dirty: [bool; SCREEN_ROWS],
}

impl Default for Screen {
    fn default() -> Self {
        Self::new()
    }
}

impl Screen {
    /// Create a blank screen; every row starts dirty
    pub fn new() -> Self {
        Self {
            cells: [[BLANK; SCREEN_COLS]; SCREEN_ROWS],
            dirty: [true; SCREEN_ROWS],
        }
    }

    /// Get the content of a row
    pub fn line(&self, row: usize) -> Option<&str> {
        self.cells
            .get(row)
            .and_then(|cells| core::str::from_utf8(cells).ok())
    }

    /// Check if any row needs sending
    pub fn is_dirty(&self) -> bool {
        self.dirty.iter().any(|&d| d)
    }

    /// Mark every row for resending, e.g. after the LCD was reset
    pub fn mark_dirty(&mut self) {
        self.dirty = [true; SCREEN_ROWS];
    }

    /// Send changed rows to a real display
    ///
    /// A row stays dirty if sending it failed.
    pub fn flush_to<B: DisplayBackend>(&mut self, backend: &mut B) -> Result<(), DisplayError> {
        for row in 0..SCREEN_ROWS {
            if !self.dirty[row] {
                continue;
            }
            let text = core::str::from_utf8(&self.cells[row]).map_err(|_| DisplayError::Communication)?;
            backend.draw_text(row as u8, 0, text)?;
            self.dirty[row] = false;
        }
        Ok(())
    }
}

impl DisplayBackend for Screen {
    fn clear(&mut self) -> Result<(), DisplayError> {
        for (row, cells) in self.cells.iter_mut().enumerate() {
            if cells.iter().any(|&c| c != BLANK) {
                *cells = [BLANK; SCREEN_COLS];
                self.dirty[row] = true;
            }
        }
        Ok(())
    }

    fn draw_text(&mut self, row: u8, col: u8, text: &str) -> Result<(), DisplayError> {
        self.check_cell(row, col)?;
        let row = usize::from(row);
        let start = usize::from(col);

        for (cell, byte) in self.cells[row][start..].iter_mut().zip(text.bytes()) {
            // Non-ASCII has no glyph on the LCD
            let byte = if byte.is_ascii() { byte } else { b'?' };
            if *cell != byte {
                *cell = byte;
                self.dirty[row] = true;
            }
        }
        Ok(())
    }

    fn dimensions(&self) -> (u8, u8) {
        (SCREEN_COLS as u8, SCREEN_ROWS as u8)
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Screen {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Screen[");
        for row in 0..SCREEN_ROWS {
            if row > 0 {
                defmt::write!(f, ", ");
            }
            defmt::write!(f, "{}", self.line(row).unwrap_or(""));
        }
        defmt::write!(f, "]");
    }
}
