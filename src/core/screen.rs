//! Screen model implementation
//!
//! The screen is an in-memory character grid that implements the terminal
//! primitives. It stands in for the hardware text screen in tests and in the
//! headless runner, and it keeps enough bookkeeping (overflow and bell
//! counters) to check what a renderer did to it.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color, Style};
use super::cursor::Cursor;
use crate::term::Console;

/// The main screen structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Screen {
    /// Number of columns
    cols: usize,
    /// Number of rows
    rows: usize,
    /// Grid content (row-major)
    grid: Vec<Vec<Cell>>,
    /// Cursor state
    cursor: Cursor,
    /// Current foreground color
    fg: Color,
    /// Current background color
    bg: Color,
    /// Reverse video for subsequent glyphs
    reverse: bool,
    /// Number of bells rung
    bells: usize,
    /// Number of primitives that addressed outside the grid
    overflows: usize,
}

impl Screen {
    /// Create a new screen with the given dimensions
    pub fn new(cols: usize, rows: usize) -> Self {
        let cols = cols.max(1);
        let rows = rows.max(1);
        Self {
            cols,
            rows,
            grid: vec![vec![Cell::default(); cols]; rows],
            cursor: Cursor::new(),
            fg: Color::Default,
            bg: Color::Default,
            reverse: false,
            bells: 0,
            overflows: 0,
        }
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Get the cursor
    pub fn cursor(&self) -> &Cursor {
        &self.cursor
    }

    /// Get a cell at position
    pub fn get_cell(&self, col: usize, row: usize) -> Option<&Cell> {
        self.grid.get(row).and_then(|line| line.get(col))
    }

    /// Text of a row with trailing blanks removed
    pub fn line_text(&self, row: usize) -> String {
        self.grid
            .get(row)
            .map(|line| {
                let text: String = line.iter().map(Cell::as_char).collect();
                text.trim_end().to_string()
            })
            .unwrap_or_default()
    }

    /// All rows as text, one line per row
    pub fn text(&self) -> String {
        (0..self.rows)
            .map(|row| self.line_text(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Number of bells rung since creation
    pub fn bell_count(&self) -> usize {
        self.bells
    }

    /// Number of draw primitives that addressed a column or row outside the
    /// grid, including glyph writes that had to wrap
    pub fn overflow_count(&self) -> usize {
        self.overflows
    }

    /// Line feed - move down one row, scrolling at the bottom
    pub fn linefeed(&mut self) {
        if self.cursor.row + 1 >= self.rows {
            self.scroll_up(1);
        } else {
            self.cursor.row += 1;
        }
        self.cursor.pending_wrap = false;
    }

    /// Scroll the grid up by n lines, blanking the bottom
    pub fn scroll_up(&mut self, n: usize) {
        let n = n.min(self.rows);
        self.grid.drain(0..n);
        self.grid
            .extend((0..n).map(|_| vec![Cell::default(); self.cols]));
    }

    fn print_glyph(&mut self, glyph: u8) {
        if self.cursor.pending_wrap {
            self.overflows += 1;
            self.cursor.carriage_return();
            self.linefeed();
        }

        let cell = Cell::with_style(
            glyph,
            self.fg,
            self.bg,
            Style {
                inverse: self.reverse,
            },
        );
        self.grid[self.cursor.row][self.cursor.col] = cell;

        if self.cursor.col + 1 >= self.cols {
            self.cursor.pending_wrap = true;
        } else {
            self.cursor.col += 1;
        }
    }
}

impl Console for Screen {
    fn move_to(&mut self, col: usize, row: usize) {
        if col >= self.cols || row >= self.rows {
            self.overflows += 1;
        }
        self.cursor.move_to(col, row, self.cols, self.rows);
    }

    fn cursor_col(&self) -> usize {
        self.cursor.col
    }

    fn cursor_row(&self) -> usize {
        self.cursor.row
    }

    fn put_char(&mut self, glyph: u8) {
        match glyph {
            b'\n' => {
                self.cursor.carriage_return();
                self.linefeed();
            }
            b'\r' => self.cursor.carriage_return(),
            _ => self.print_glyph(glyph),
        }
    }

    fn set_foreground(&mut self, color: Color) {
        self.fg = color;
    }

    fn set_background(&mut self, color: Color) {
        self.bg = color;
    }

    fn set_reverse(&mut self, on: bool) {
        self.reverse = on;
    }

    fn screen_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn clear_screen(&mut self) {
        for line in &mut self.grid {
            line.iter_mut().for_each(Cell::clear);
        }
        self.cursor = Cursor::new();
    }

    fn beep(&mut self) {
        self.bells += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_new() {
        let screen = Screen::new(40, 25);
        assert_eq!(screen.screen_size(), (40, 25));
        assert_eq!(screen.cursor_col(), 0);
        assert_eq!(screen.cursor_row(), 0);
        assert_eq!(screen.rows(), 25);
        // One line per row, blank rows included
        assert_eq!(screen.text().split('\n').count(), 25);
    }

    #[test]
    fn test_put_char_and_colors() {
        let mut screen = Screen::new(40, 25);
        screen.set_foreground(Color::RED);
        screen.put_char(b'#');
        screen.set_foreground(Color::WHITE);
        screen.set_reverse(true);
        screen.put_char(b'x');

        let first = screen.get_cell(0, 0).unwrap();
        assert_eq!(first.as_char(), '#');
        assert_eq!(first.fg, Color::RED);
        assert!(!first.style.inverse);

        let second = screen.get_cell(1, 0).unwrap();
        assert_eq!(second.fg, Color::WHITE);
        assert!(second.style.inverse);
        assert_eq!(screen.cursor_col(), 2);
    }

    #[test]
    fn test_newline_and_scroll() {
        let mut screen = Screen::new(10, 3);
        screen.print("one\ntwo\nthree\nfour");
        assert_eq!(screen.line_text(0), "two");
        assert_eq!(screen.line_text(1), "three");
        assert_eq!(screen.line_text(2), "four");
        assert_eq!(screen.cursor_row(), 2);
    }

    #[test]
    fn test_last_column_pending_wrap() {
        let mut screen = Screen::new(4, 3);
        screen.print("abcd");
        assert_eq!(screen.cursor_col(), 3);
        assert!(screen.cursor().pending_wrap);
        assert_eq!(screen.overflow_count(), 0);

        screen.put_char(b'e');
        assert_eq!(screen.line_text(1), "e");
        assert_eq!(screen.overflow_count(), 1);
    }

    #[test]
    fn test_move_out_of_bounds_is_counted() {
        let mut screen = Screen::new(10, 5);
        screen.move_to(9, 4);
        assert_eq!(screen.overflow_count(), 0);
        screen.move_to(10, 4);
        assert_eq!(screen.overflow_count(), 1);
        assert_eq!(screen.cursor_col(), 9);
    }

    #[test]
    fn test_clear_screen_and_beep() {
        let mut screen = Screen::new(10, 5);
        screen.print("hello");
        screen.beep();
        screen.clear_screen();
        assert_eq!(screen.line_text(0), "");
        assert_eq!(screen.cursor_col(), 0);
        assert_eq!(screen.bell_count(), 1);
    }
}
