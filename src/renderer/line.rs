//! Single-line renderer
//!
//! Redraws the edited line (prompt, visible buffer, optional hint) on the
//! cursor's current row using nothing but absolute cursor moves and glyph
//! writes. Every draw is clipped to the declared screen width, minus the
//! status overlay's columns on the rows it covers.

use super::{HintProvider, RenderReport, StatusOverlay};
use crate::app::Palette;
use crate::core::Color;
use crate::editor::{LineFlags, LineState};
use crate::input::KeyEvent;
use crate::term::Console;

/// Redraws the line being edited
#[derive(Debug, Clone)]
pub struct LineRenderer {
    palette: Palette,
    /// Draw a cursor cell for displays without a hardware cursor
    software_cursor: bool,
}

impl LineRenderer {
    pub fn new(palette: Palette, software_cursor: bool) -> Self {
        Self {
            palette,
            software_cursor,
        }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    /// Redraw the line on the cursor's current row
    pub fn refresh<C: Console + ?Sized>(
        &self,
        console: &mut C,
        state: &LineState,
        overlay: &mut StatusOverlay,
        hints: &dyn HintProvider,
    ) -> RenderReport {
        let mut report = RenderReport::default();

        // The cursor may have been moved by command output since last time
        let row = console.cursor_row();
        let cols = state.cols();
        let right_edge = overlay.right_edge(cols, row);

        let prompt = state.prompt().as_bytes();
        let plen = prompt.len().min(right_edge);
        let max = right_edge - plen;

        let visible = state.visible().as_bytes();
        let shown = visible.len().min(max);
        report.buffer_clipped = visible.len() > max;

        console.move_to(0, row);

        console.set_foreground(self.palette.prompt);
        for &glyph in &prompt[..plen] {
            console.put_char(glyph);
        }

        console.set_foreground(self.palette.text);
        for &glyph in &visible[..shown] {
            console.put_char(glyph);
        }

        let mut x = plen + shown;

        if state.flags.contains(LineFlags::HINTS) {
            if let Some(hint) = hints.hint(state.text()) {
                let remaining = right_edge - x;
                if remaining > 1 {
                    // One blank column separates the hint from the buffer
                    let room = remaining - 1;
                    let len = hint.len().min(room);
                    report.hint_clipped = hint.len() > room;

                    console.put_char(b' ');
                    console.set_foreground(self.palette.hint);
                    for &glyph in &hint.as_bytes()[..len] {
                        console.put_char(glyph);
                    }
                    x += 1 + len;
                } else {
                    report.hint_clipped = !hint.is_empty();
                }
            }
        }

        // Erase to the right edge
        for _ in x..right_edge {
            console.put_char(b' ');
        }

        if overlay.is_visible() {
            overlay.show(console, state);
        }

        let cursor_col = (plen + state.xpos()).min(cols.saturating_sub(1));
        console.move_to(cursor_col, row);

        if self.software_cursor {
            if state.key != KeyEvent::Enter {
                console.set_background(self.palette.cursor);
                console.put_char(b' ');
                console.move_to(cursor_col, row);
            }
            console.set_background(self.palette.background);
        }

        console.set_foreground(Color::Default);

        tracing::trace!(
            row,
            cursor_col,
            buffer_clipped = report.buffer_clipped,
            hint_clipped = report.hint_clipped,
            "Line refreshed"
        );

        report
    }

    /// Blank the drawn cursor cell, leaving the cursor in place
    ///
    /// Used before the line is submitted or shortened so no stray cursor
    /// cell remains on screen.
    pub fn erase_software_cursor<C: Console + ?Sized>(&self, console: &mut C) {
        if !self.software_cursor {
            return;
        }
        let (col, row) = (console.cursor_col(), console.cursor_row());
        console.set_background(self.palette.background);
        console.put_char(b' ');
        console.move_to(col, row);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Screen;
    use crate::renderer::NoHints;
    use proptest::prelude::*;

    fn hint_for_cd(line: &str) -> Option<String> {
        (line == "cd").then(|| "<path>".to_string())
    }

    fn renderer() -> LineRenderer {
        LineRenderer::new(Palette::default(), false)
    }

    fn hidden_overlay() -> StatusOverlay {
        StatusOverlay::new(&Palette::default(), false, false)
    }

    fn line(prompt: &str, text: &str, cols: usize, rows: usize) -> LineState {
        let mut state = LineState::new(prompt, cols, rows, LineFlags::HINTS);
        state.set_text(text);
        state
    }

    #[test]
    fn test_draws_prompt_and_buffer() {
        let mut screen = Screen::new(40, 25);
        screen.move_to(0, 3);
        let state = line("$ ", "ls -v", 40, 25);

        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);

        assert_eq!(screen.line_text(3), "$ ls -v");
        assert_eq!(screen.get_cell(0, 3).unwrap().fg, Color::RED);
        assert_eq!(screen.get_cell(2, 3).unwrap().fg, Color::WHITE);
        assert_eq!(screen.cursor_col(), 7);
        assert_eq!(screen.cursor_row(), 3);
        assert_eq!(report, RenderReport::default());
    }

    #[test]
    fn test_row_is_queried_not_cached() {
        let mut screen = Screen::new(40, 25);
        let state = line("$ ", "pwd", 40, 25);
        let renderer = renderer();
        let mut overlay = hidden_overlay();

        renderer.refresh(&mut screen, &state, &mut overlay, &NoHints);
        screen.move_to(0, 9);
        renderer.refresh(&mut screen, &state, &mut overlay, &NoHints);

        assert_eq!(screen.line_text(9), "$ pwd");
        assert_eq!(screen.cursor_row(), 9);
    }

    #[test]
    fn test_erases_stale_text() {
        let mut screen = Screen::new(20, 5);
        screen.print("$ something long");
        screen.move_to(0, 0);
        let state = line("$ ", "ls", 20, 5);

        renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);
        assert_eq!(screen.line_text(0), "$ ls");
    }

    #[test]
    fn test_hint_in_muted_color() {
        let mut screen = Screen::new(40, 25);
        let state = line("$ ", "cd", 40, 25);

        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &hint_for_cd);

        assert_eq!(screen.line_text(0), "$ cd <path>");
        assert_eq!(screen.get_cell(5, 0).unwrap().fg, Color::BLUE);
        assert_eq!(screen.cursor_col(), 4);
        assert!(!report.hint_clipped);
    }

    #[test]
    fn test_hint_clipped_to_remaining_width() {
        let mut screen = Screen::new(8, 5);
        let state = line("$ ", "cd", 8, 5);

        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &hint_for_cd);

        assert_eq!(screen.line_text(0), "$ cd <pa");
        assert!(report.hint_clipped);
        assert_eq!(screen.overflow_count(), 0);
    }

    #[test]
    fn test_hint_needs_more_than_one_column() {
        let mut screen = Screen::new(5, 5);
        let state = line("$ ", "cd", 5, 5);

        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &hint_for_cd);

        assert_eq!(screen.line_text(0), "$ cd");
        assert!(report.hint_clipped);
    }

    #[test]
    fn test_hints_flag_off() {
        let mut screen = Screen::new(40, 25);
        let mut state = line("$ ", "cd", 40, 25);
        state.flags = LineFlags::empty();

        renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &hint_for_cd);
        assert_eq!(screen.line_text(0), "$ cd");
    }

    #[test]
    fn test_buffer_clipped_exact_fit_is_not_flagged() {
        let mut screen = Screen::new(10, 5);
        let mut state = line("> ", "", 10, 5);
        for glyph in b"12345678" {
            state.insert(*glyph);
        }
        state.move_home();

        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);
        assert!(!report.buffer_clipped);
        assert_eq!(screen.line_text(0), "> 12345678");

        state.move_end();
        state.insert(b'9');
        state.move_home();
        let report = renderer().refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);
        assert!(report.buffer_clipped);
        assert_eq!(screen.line_text(0), "> 12345678");
        assert_eq!(screen.overflow_count(), 0);
    }

    #[test]
    fn test_visible_overlay_narrows_top_rows() {
        let mut screen = Screen::new(20, 12);
        let state = line("$ ", "0123456789abcdef", 20, 12);
        let mut overlay = StatusOverlay::new(&Palette::default(), false, true);

        screen.move_to(0, 2);
        let report = renderer().refresh(&mut screen, &state, &mut overlay, &NoHints);
        assert!(report.buffer_clipped);
        assert_eq!(&screen.line_text(2)[..13], "$ 0123456789a");
        assert_eq!(screen.get_cell(13, 2).unwrap().as_char(), ' ');
        assert!(screen.get_cell(13, 2).unwrap().style.inverse);

        screen.move_to(0, 10);
        let report = renderer().refresh(&mut screen, &state, &mut overlay, &NoHints);
        assert!(!report.buffer_clipped);
        assert!(screen.line_text(10).starts_with("$ 0123456789abcdef"));
        assert_eq!(screen.overflow_count(), 0);
    }

    #[test]
    fn test_software_cursor() {
        let palette = Palette::default();
        let renderer = LineRenderer::new(palette.clone(), true);
        let mut screen = Screen::new(32, 24);
        let mut state = line("$ ", "ls", 32, 24);
        state.key = KeyEvent::Char(b's');

        renderer.refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);
        assert_eq!(screen.get_cell(4, 0).unwrap().bg, palette.cursor);
        assert_eq!(screen.cursor_col(), 4);

        renderer.erase_software_cursor(&mut screen);
        assert_eq!(screen.get_cell(4, 0).unwrap().bg, palette.background);
        assert_eq!(screen.cursor_col(), 4);
    }

    #[test]
    fn test_software_cursor_suppressed_after_enter() {
        let palette = Palette::default();
        let renderer = LineRenderer::new(palette.clone(), true);
        let mut screen = Screen::new(32, 24);
        let mut state = line("$ ", "ls", 32, 24);
        state.key = KeyEvent::Enter;

        renderer.refresh(&mut screen, &state, &mut hidden_overlay(), &NoHints);
        assert_ne!(screen.get_cell(4, 0).unwrap().bg, palette.cursor);
    }

    proptest! {
        #[test]
        fn prop_refresh_never_addresses_past_cols(
            cols in 1usize..48,
            row in 0usize..12,
            prompt_len in 0usize..12,
            text_len in 0usize..96,
            cursor_back in 0usize..96,
            overlay_visible in any::<bool>(),
            software_cursor in any::<bool>(),
        ) {
            let rows = 12;
            let mut screen = Screen::new(cols, rows);
            screen.move_to(cols - 1, row);

            let mut state = LineState::new("#".repeat(prompt_len), cols, rows, LineFlags::HINTS);
            state.set_text(&"x".repeat(text_len));
            for _ in 0..cursor_back {
                state.move_left();
            }

            let renderer = LineRenderer::new(Palette::default(), software_cursor);
            let mut overlay = StatusOverlay::new(&Palette::default(), false, overlay_visible);
            let hints = |_: &str| Some("<a rather long hint>".to_string());

            renderer.refresh(&mut screen, &state, &mut overlay, &hints);

            prop_assert_eq!(screen.overflow_count(), 0);
            prop_assert!(screen.cursor_col() < cols);
            prop_assert_eq!(screen.cursor_row(), row);
        }
    }
}
