//! Edited line state
//!
//! [`LineState`] is the single line being edited: prompt, buffer, cursor
//! position and the horizontal scroll offset that keeps the cursor visible on
//! a narrow screen. The renderer only ever reads it.

use crate::input::KeyEvent;

bitflags::bitflags! {
    /// Optional line editor features
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct LineFlags: u8 {
        const HINTS = 1 << 0;
        const COMPLETION = 1 << 1;
    }
}

/// State of the line being edited
#[derive(Debug, Clone)]
pub struct LineState {
    prompt: String,
    /// Buffer content, printable ASCII only
    buf: String,
    /// Cursor position in the buffer
    pos: usize,
    /// First buffer position shown on screen
    offset: usize,
    cols: usize,
    rows: usize,
    /// Columns the line may use on its row; less than `cols` while the
    /// status overlay covers the right side
    width: usize,
    /// Last key event handled
    pub key: KeyEvent,
    pub flags: LineFlags,
}

impl LineState {
    /// Start an empty line on a `cols` x `rows` screen
    pub fn new(prompt: impl Into<String>, cols: usize, rows: usize, flags: LineFlags) -> Self {
        Self {
            prompt: prompt.into(),
            buf: String::new(),
            pos: 0,
            offset: 0,
            cols,
            rows,
            width: cols,
            key: KeyEvent::Control(0),
            flags,
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Prompt length in columns
    pub fn plen(&self) -> usize {
        self.prompt.len()
    }

    /// Full buffer content
    pub fn text(&self) -> &str {
        &self.buf
    }

    /// Buffer content from the first visible position
    pub fn visible(&self) -> &str {
        &self.buf[self.offset..]
    }

    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Cursor position in the buffer
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// First visible buffer position
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Cursor column relative to the end of the prompt
    pub fn xpos(&self) -> usize {
        self.pos - self.offset
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Columns the line may use on its row
    pub fn width(&self) -> usize {
        self.width
    }

    /// Narrow or widen the usable row and scroll the cursor back into view
    pub fn set_width(&mut self, width: usize) {
        self.width = width.min(self.cols);
        self.scroll_to_cursor();
    }

    /// Columns available to the buffer after the prompt
    fn window(&self) -> usize {
        self.width.saturating_sub(self.plen()).max(1)
    }

    /// Adjust the scroll offset so the cursor stays on screen
    pub fn scroll_to_cursor(&mut self) {
        let window = self.window();
        if self.pos < self.offset {
            self.offset = self.pos;
        } else if self.pos - self.offset >= window {
            self.offset = self.pos + 1 - window;
        }
    }

    /// Replace the buffer and put the cursor at its end
    pub fn set_text(&mut self, text: &str) {
        self.buf.clear();
        self.buf
            .extend(text.chars().filter(|c| c.is_ascii_graphic() || *c == ' '));
        self.pos = self.buf.len();
        self.offset = 0;
        self.scroll_to_cursor();
    }

    /// Insert a glyph at the cursor. Non-printable bytes are ignored.
    pub fn insert(&mut self, glyph: u8) -> bool {
        if !(glyph.is_ascii_graphic() || glyph == b' ') {
            return false;
        }
        self.buf.insert(self.pos, glyph as char);
        self.pos += 1;
        self.scroll_to_cursor();
        true
    }

    /// Delete the glyph left of the cursor
    pub fn backspace(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.buf.remove(self.pos);
        self.scroll_to_cursor();
        true
    }

    /// Delete the glyph under the cursor
    pub fn delete(&mut self) -> bool {
        if self.pos >= self.buf.len() {
            return false;
        }
        self.buf.remove(self.pos);
        true
    }

    pub fn move_left(&mut self) -> bool {
        if self.pos == 0 {
            return false;
        }
        self.pos -= 1;
        self.scroll_to_cursor();
        true
    }

    pub fn move_right(&mut self) -> bool {
        if self.pos >= self.buf.len() {
            return false;
        }
        self.pos += 1;
        self.scroll_to_cursor();
        true
    }

    pub fn move_home(&mut self) {
        self.pos = 0;
        self.scroll_to_cursor();
    }

    pub fn move_end(&mut self) {
        self.pos = self.buf.len();
        self.scroll_to_cursor();
    }

    /// Delete from the cursor to the end of the line
    pub fn kill_to_end(&mut self) {
        self.buf.truncate(self.pos);
    }

    /// Delete the whole line
    pub fn kill_line(&mut self) {
        self.buf.clear();
        self.pos = 0;
        self.offset = 0;
    }

    /// Delete the word left of the cursor, with the spaces following it
    pub fn kill_word(&mut self) {
        let head = &self.buf[..self.pos];
        let start = head
            .trim_end_matches(' ')
            .rfind(' ')
            .map_or(0, |space| space + 1);
        self.buf.replace_range(start..self.pos, "");
        self.pos = start;
        self.scroll_to_cursor();
    }

    /// Exchange the glyph under the cursor with the one before it
    pub fn swap(&mut self) -> bool {
        if self.pos == 0 || self.pos >= self.buf.len() {
            return false;
        }
        let left = self.buf.as_bytes()[self.pos - 1] as char;
        let right = self.buf.as_bytes()[self.pos] as char;
        let mut pair = String::with_capacity(2);
        pair.push(right);
        pair.push(left);
        self.buf.replace_range(self.pos - 1..=self.pos, &pair);
        if self.pos + 1 < self.buf.len() {
            self.pos += 1;
        }
        self.scroll_to_cursor();
        true
    }
}
