//! Cursor state
//!
//! The cursor tracks the position of the next glyph and the pending-wrap
//! state armed by writing into the last column.

use serde::{Deserialize, Serialize};

use crate::term::Console;

/// A cell position (0-indexed)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub col: usize,
    pub row: usize,
}

impl Position {
    /// Where the console's cursor is now
    pub fn of<C: Console + ?Sized>(console: &C) -> Self {
        Self {
            col: console.cursor_col(),
            row: console.cursor_row(),
        }
    }
}

/// Cursor position and wrap state of the in-memory screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cursor {
    pub col: usize,
    pub row: usize,
    /// Last column written; the next glyph wraps to a new line first
    pub pending_wrap: bool,
}

impl Cursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to an absolute position, clamping to a `cols` x `rows` grid
    pub fn move_to(&mut self, col: usize, row: usize, cols: usize, rows: usize) {
        self.col = col.min(cols.saturating_sub(1));
        self.row = row.min(rows.saturating_sub(1));
        self.pending_wrap = false;
    }

    pub fn carriage_return(&mut self) {
        self.col = 0;
        self.pending_wrap = false;
    }

    pub fn position(&self) -> Position {
        Position {
            col: self.col,
            row: self.row,
        }
    }
}
