//! Terminal Primitives
//!
//! The only contract the renderer and the commands have with the display is
//! the small set of direct cursor-addressing primitives offered by 8-bit
//! console libraries: move, query position, write one glyph, pick colours,
//! query the screen size, clear, beep. There is no save/restore cursor and no
//! scroll region, and none of the primitives can fail.
//!
//! Implementations:
//! - [`crate::core::Screen`]: in-memory grid for tests and headless runs
//! - [`AnsiConsole`]: any `Write` sink understanding ANSI cursor addressing
//!
//! POSIX host support (raw mode, window size, stdin keys) lives in [`posix`].

mod ansi;
#[cfg(unix)]
pub mod posix;

pub use ansi::AnsiConsole;

use crate::core::Color;

/// Direct cursor-addressing terminal primitives
pub trait Console {
    /// Move the cursor to an absolute position (0-indexed)
    fn move_to(&mut self, col: usize, row: usize);

    /// Current cursor column
    fn cursor_col(&self) -> usize;

    /// Current cursor row
    fn cursor_row(&self) -> usize;

    /// Write one glyph at the cursor and advance it. `\n` starts a new line.
    fn put_char(&mut self, glyph: u8);

    /// Set the foreground color for subsequent glyphs
    fn set_foreground(&mut self, color: Color);

    /// Set the background color for subsequent glyphs
    fn set_background(&mut self, color: Color);

    /// Enable or disable reverse video for subsequent glyphs
    fn set_reverse(&mut self, on: bool);

    /// Screen size as `(cols, rows)`
    fn screen_size(&self) -> (usize, usize);

    /// Clear the screen and home the cursor
    fn clear_screen(&mut self);

    /// Audible or visible bell
    fn beep(&mut self);

    /// Push buffered output to the device
    fn flush(&mut self) {}

    /// Write every byte of `text` with [`Console::put_char`]
    fn print(&mut self, text: &str) {
        for glyph in text.bytes() {
            self.put_char(glyph);
        }
    }
}
