//! Screen Cell
//!
//! Represents a single cell of the character grid: one glyph byte plus the
//! colours and attributes it was drawn with.

use serde::{Deserialize, Serialize};

/// A single cell in the character grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    /// The glyph in this cell. Zero means the cell was never written.
    pub glyph: u8,
    /// Foreground color
    pub fg: Color,
    /// Background color
    pub bg: Color,
    /// Text style attributes
    pub style: Style,
}

impl Default for Cell {
    fn default() -> Self {
        Self {
            glyph: 0,
            fg: Color::Default,
            bg: Color::Default,
            style: Style::default(),
        }
    }
}

impl Cell {
    /// Create a new cell holding a single glyph
    pub fn new(glyph: u8) -> Self {
        Self {
            glyph,
            ..Default::default()
        }
    }

    /// Create a new cell with glyph and colours
    pub fn with_style(glyph: u8, fg: Color, bg: Color, style: Style) -> Self {
        Self { glyph, fg, bg, style }
    }

    /// Check if this cell is empty (never written)
    pub fn is_empty(&self) -> bool {
        self.glyph == 0
    }

    /// The character shown for this cell; unwritten cells read as blanks
    pub fn as_char(&self) -> char {
        match self.glyph {
            0 => ' ',
            0x20..=0x7e => self.glyph as char,
            // Platform graphics glyphs have no ASCII rendition
            _ => '?',
        }
    }

    /// Clear the cell to default state
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

/// Color of the 16-entry palette shared by the supported 8-bit targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Color {
    /// Whatever the console considers its default text color
    #[default]
    Default,
    /// Palette entry (0-15)
    Indexed(u8),
}

impl Color {
    pub const BLACK: Color = Color::Indexed(0);
    pub const WHITE: Color = Color::Indexed(1);
    pub const RED: Color = Color::Indexed(2);
    pub const CYAN: Color = Color::Indexed(3);
    pub const PURPLE: Color = Color::Indexed(4);
    pub const GREEN: Color = Color::Indexed(5);
    pub const BLUE: Color = Color::Indexed(6);
    pub const YELLOW: Color = Color::Indexed(7);
    pub const ORANGE: Color = Color::Indexed(8);
    pub const BROWN: Color = Color::Indexed(9);
    pub const PINK: Color = Color::Indexed(10);
    pub const DARK_GRAY: Color = Color::Indexed(11);
    pub const GRAY: Color = Color::Indexed(12);
    pub const LIGHT_GREEN: Color = Color::Indexed(13);
    pub const LIGHT_BLUE: Color = Color::Indexed(14);
    pub const LIGHT_GRAY: Color = Color::Indexed(15);

    /// Closest ANSI SGR color number (0-7 normal, 8-15 bright), if any
    pub fn to_ansi(self) -> Option<u8> {
        match self {
            Color::Default => None,
            Color::Indexed(i) => Some(match i {
                0 => 0,  // Black
                1 => 15, // White
                2 => 1,  // Red
                3 => 6,  // Cyan
                4 => 5,  // Purple -> Magenta
                5 => 2,  // Green
                6 => 4,  // Blue
                7 => 11, // Yellow
                8 => 3,  // Orange -> dim yellow
                9 => 3,  // Brown
                10 => 9, // Pink -> bright red
                11 => 8, // Dark gray
                12 => 7, // Gray
                13 => 10,
                14 => 12,
                _ => 7,
            }),
        }
    }
}

/// Text style attributes
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Style {
    /// Foreground and background swapped (reverse video)
    pub inverse: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_default() {
        let cell = Cell::default();
        assert!(cell.is_empty());
        assert_eq!(cell.fg, Color::Default);
        assert_eq!(cell.bg, Color::Default);
        assert_eq!(cell.as_char(), ' ');
    }

    #[test]
    fn test_cell_new() {
        let cell = Cell::new(b'A');
        assert_eq!(cell.as_char(), 'A');
        assert!(!cell.is_empty());
    }

    #[test]
    fn test_cell_graphics_glyph() {
        assert_eq!(Cell::new(0xc1).as_char(), '?');
    }

    #[test]
    fn test_cell_clear() {
        let mut cell = Cell::new(b'A');
        cell.fg = Color::RED;
        cell.style.inverse = true;
        cell.clear();
        assert!(cell.is_empty());
        assert_eq!(cell.fg, Color::Default);
        assert!(!cell.style.inverse);
    }

    #[test]
    fn test_color_to_ansi() {
        assert_eq!(Color::Default.to_ansi(), None);
        assert_eq!(Color::BLACK.to_ansi(), Some(0));
        assert_eq!(Color::RED.to_ansi(), Some(1));
        assert_eq!(Color::BLUE.to_ansi(), Some(4));
        assert_eq!(Color::Indexed(200).to_ansi(), Some(7));
    }
}
