//! Status overlay
//!
//! A 7x8 diagnostic panel in the top-right corner showing the last key code,
//! the cursor position, the effective cursor column, the current row and the
//! screen size. The console has no save/restore cursor primitive, so the
//! overlay records the caller's position itself.

use crate::app::Palette;
use crate::core::{Color, Position};
use crate::editor::LineState;
use crate::term::Console;

/// Panel width in columns
pub const OVERLAY_WIDTH: usize = 7;
/// Panel height in rows
pub const OVERLAY_HEIGHT: usize = 8;

/// Largest value a three-digit field can show
const FIELD_MAX: usize = 999;

/// Top-right diagnostic panel
#[derive(Debug, Clone)]
pub struct StatusOverlay {
    visible: bool,
    /// Caller cursor captured by the last `show`
    saved: Option<Position>,
    highlight: Color,
    text: Color,
    background: Color,
    /// Highlight with a real background colour instead of reverse video
    background_color: bool,
}

impl StatusOverlay {
    pub fn new(palette: &Palette, background_color: bool, visible: bool) -> Self {
        Self {
            visible,
            saved: None,
            highlight: palette.overlay,
            text: palette.overlay_text,
            background: palette.background,
            background_color,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Flip visibility and return the new state
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        tracing::debug!(visible = self.visible, "Status overlay toggled");
        self.visible
    }

    /// Cursor position captured by the last [`StatusOverlay::show`]
    pub fn saved_cursor(&self) -> Option<Position> {
        self.saved
    }

    /// Columns left to a line drawn on `row` of a `cols`-wide screen
    pub fn right_edge(&self, cols: usize, row: usize) -> usize {
        if self.visible && row < OVERLAY_HEIGHT {
            cols.saturating_sub(OVERLAY_WIDTH)
        } else {
            cols
        }
    }

    /// Draw the panel, leaving the cursor where it was
    pub fn show<C: Console + ?Sized>(&mut self, console: &mut C, state: &LineState) {
        let saved = Position::of(console);
        self.saved = Some(saved);

        let fields = [
            ('k', usize::from(state.key.code())),
            ('p', state.pos()),
            ('x', state.xpos() + state.plen()),
            ('y', saved.row),
            ('w', state.cols()),
            ('h', state.rows()),
        ];

        if self.background_color {
            console.set_background(self.highlight);
            console.set_foreground(self.text);
        } else {
            console.set_foreground(self.highlight);
            console.set_reverse(true);
        }

        let blank = " ".repeat(OVERLAY_WIDTH);
        let rows = std::iter::once(blank.clone())
            .chain(
                fields
                    .iter()
                    .map(|(label, value)| format!(" {}:{:>3} ", label, (*value).min(FIELD_MAX))),
            )
            .chain(std::iter::once(blank));
        for (row, text) in rows.enumerate() {
            self.draw_row(console, state, row, &text);
        }

        if self.background_color {
            console.set_background(self.background);
        } else {
            console.set_reverse(false);
        }
        console.set_foreground(Color::Default);

        console.move_to(saved.col, saved.row);
    }

    /// Blank the panel footprint and return the cursor to where the last
    /// `show` found it
    ///
    /// Whatever was on screen under the panel is not restored.
    pub fn hide<C: Console + ?Sized>(&mut self, console: &mut C, state: &LineState) {
        let restore = self.saved.take().unwrap_or_else(|| Position::of(console));

        let blank = " ".repeat(OVERLAY_WIDTH);
        for row in 0..OVERLAY_HEIGHT {
            self.draw_row(console, state, row, &blank);
        }

        console.move_to(restore.col, restore.row);
    }

    /// Write one panel row, clipped to the declared screen
    fn draw_row<C: Console + ?Sized>(
        &self,
        console: &mut C,
        state: &LineState,
        row: usize,
        text: &str,
    ) {
        let (cols, rows) = (state.cols(), state.rows());
        if row >= rows || cols == 0 {
            return;
        }
        let left = cols.saturating_sub(OVERLAY_WIDTH);
        console.move_to(left, row);
        for glyph in text.bytes().take(cols - left) {
            console.put_char(glyph);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Screen;
    use crate::editor::LineFlags;
    use crate::input::KeyEvent;

    fn overlay(background_color: bool) -> StatusOverlay {
        StatusOverlay::new(&Palette::default(), background_color, true)
    }

    fn state(cols: usize, rows: usize) -> LineState {
        let mut state = LineState::new("$ ", cols, rows, LineFlags::empty());
        state.set_text("ls");
        state.key = KeyEvent::Char(b's');
        state
    }

    #[test]
    fn test_show_draws_fields() {
        let mut screen = Screen::new(40, 25);
        let state = state(40, 25);
        screen.move_to(4, 12);

        overlay(false).show(&mut screen, &state);

        assert_eq!(screen.line_text(0), "");
        assert_eq!(screen.line_text(1), format!("{} k:115", " ".repeat(33)));
        assert_eq!(&screen.line_text(2)[33..], " p:  2");
        assert_eq!(&screen.line_text(3)[33..], " x:  4");
        assert_eq!(&screen.line_text(4)[33..], " y: 12");
        assert_eq!(&screen.line_text(5)[33..], " w: 40");
        assert_eq!(&screen.line_text(6)[33..], " h: 25");
        assert_eq!(screen.cursor_col(), 4);
        assert_eq!(screen.cursor_row(), 12);
    }

    #[test]
    fn test_reverse_video_highlight() {
        let mut screen = Screen::new(40, 25);
        overlay(false).show(&mut screen, &state(40, 25));
        let cell = screen.get_cell(33, 0).unwrap();
        assert!(cell.style.inverse);
        assert_eq!(cell.fg, Color::YELLOW);
    }

    #[test]
    fn test_background_color_highlight() {
        let mut screen = Screen::new(32, 24);
        overlay(true).show(&mut screen, &state(32, 24));
        let cell = screen.get_cell(25, 3).unwrap();
        assert!(!cell.style.inverse);
        assert_eq!(cell.bg, Color::YELLOW);
        assert_eq!(cell.fg, Color::BLACK);
    }

    #[test]
    fn test_fields_clamp_to_three_digits() {
        let mut screen = Screen::new(40, 25);
        let state = LineState::new("$ ", 40, 1200, LineFlags::empty());
        overlay(false).show(&mut screen, &state);
        assert!(screen.line_text(6).ends_with(" h:999"));
        assert_eq!(screen.overflow_count(), 0);
    }

    #[test]
    fn test_hide_restores_cursor_captured_at_show() {
        let mut screen = Screen::new(40, 25);
        let state = state(40, 25);
        let mut overlay = overlay(false);

        screen.move_to(3, 20);
        overlay.show(&mut screen, &state);
        screen.move_to(10, 22);
        overlay.hide(&mut screen, &state);

        assert_eq!(screen.cursor_col(), 3);
        assert_eq!(screen.cursor_row(), 20);
        for row in 0..OVERLAY_HEIGHT {
            assert_eq!(screen.line_text(row), "");
        }
    }

    #[test]
    fn test_narrow_screen_is_clipped() {
        let mut screen = Screen::new(5, 4);
        let state = state(5, 4);
        let mut overlay = overlay(false);
        overlay.show(&mut screen, &state);
        overlay.hide(&mut screen, &state);
        assert_eq!(screen.overflow_count(), 0);
    }

    #[test]
    fn test_right_edge() {
        let mut overlay = overlay(false);
        assert_eq!(overlay.right_edge(40, 0), 33);
        assert_eq!(overlay.right_edge(40, 7), 33);
        assert_eq!(overlay.right_edge(40, 8), 40);
        assert_eq!(overlay.right_edge(5, 0), 0);
        overlay.toggle();
        assert_eq!(overlay.right_edge(40, 0), 40);
    }
}
