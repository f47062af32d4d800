//! ANSI console backend
//!
//! Drives a hosted terminal through a minimal subset of ANSI sequences: CUP
//! for cursor addressing, SGR for colours and reverse video, ED for clearing.
//! The cursor is tracked in software so position queries never need a round
//! trip to the terminal.

use std::io::Write;

use crate::core::Color;

use super::Console;

/// Console writing ANSI sequences into any `Write` sink
#[derive(Debug)]
pub struct AnsiConsole<W: Write> {
    out: W,
    /// Pending output, written on flush
    buf: Vec<u8>,
    cols: usize,
    rows: usize,
    col: usize,
    row: usize,
    pending_wrap: bool,
}

impl<W: Write> AnsiConsole<W> {
    /// Create a console of the given size; the cursor starts at the home position
    pub fn new(out: W, cols: usize, rows: usize) -> Self {
        Self {
            out,
            buf: Vec::with_capacity(256),
            cols: cols.max(1),
            rows: rows.max(1),
            col: 0,
            row: 0,
            pending_wrap: false,
        }
    }

    /// Get a reference to the underlying writer
    pub fn get_ref(&self) -> &W {
        &self.out
    }

    /// Flush and return the underlying writer
    pub fn into_inner(mut self) -> W {
        Console::flush(&mut self);
        self.out
    }

    fn emit(&mut self, bytes: &[u8]) {
        self.buf.extend_from_slice(bytes);
    }

    fn sgr(&mut self, code: u8) {
        let seq = format!("\x1b[{}m", code);
        self.emit(seq.as_bytes());
    }

    fn linefeed(&mut self) {
        self.emit(b"\r\n");
        self.col = 0;
        self.row = (self.row + 1).min(self.rows - 1);
        self.pending_wrap = false;
    }
}

/// SGR parameter for a color: `base` is 30 for foreground, 40 for background
fn sgr_color(color: Color, base: u8) -> u8 {
    match color.to_ansi() {
        None => base + 9,
        Some(n) if n < 8 => base + n,
        Some(n) => base + 60 + (n - 8),
    }
}

impl<W: Write> Console for AnsiConsole<W> {
    fn move_to(&mut self, col: usize, row: usize) {
        self.col = col.min(self.cols - 1);
        self.row = row.min(self.rows - 1);
        self.pending_wrap = false;
        let seq = format!("\x1b[{};{}H", self.row + 1, self.col + 1);
        self.emit(seq.as_bytes());
    }

    fn cursor_col(&self) -> usize {
        self.col
    }

    fn cursor_row(&self) -> usize {
        self.row
    }

    fn put_char(&mut self, glyph: u8) {
        match glyph {
            b'\n' => self.linefeed(),
            b'\r' => {
                self.emit(b"\r");
                self.col = 0;
                self.pending_wrap = false;
            }
            _ => {
                if self.pending_wrap {
                    self.linefeed();
                }
                let byte = if (0x20..0x7f).contains(&glyph) { glyph } else { b'?' };
                self.emit(&[byte]);
                if self.col + 1 >= self.cols {
                    self.pending_wrap = true;
                } else {
                    self.col += 1;
                }
            }
        }
    }

    fn set_foreground(&mut self, color: Color) {
        self.sgr(sgr_color(color, 30));
    }

    fn set_background(&mut self, color: Color) {
        self.sgr(sgr_color(color, 40));
    }

    fn set_reverse(&mut self, on: bool) {
        self.sgr(if on { 7 } else { 27 });
    }

    fn screen_size(&self) -> (usize, usize) {
        (self.cols, self.rows)
    }

    fn clear_screen(&mut self) {
        self.emit(b"\x1b[2J\x1b[H");
        self.col = 0;
        self.row = 0;
        self.pending_wrap = false;
    }

    fn beep(&mut self) {
        self.emit(b"\x07");
    }

    fn flush(&mut self) {
        if self.buf.is_empty() {
            return;
        }
        let result = self
            .out
            .write_all(&self.buf)
            .and_then(|()| self.out.flush());
        if let Err(e) = result {
            tracing::warn!("Console write failed: {}", e);
        }
        self.buf.clear();
    }
}
