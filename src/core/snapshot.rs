//! Deterministic screen snapshots
//!
//! A snapshot records each screen line as trimmed text plus the runs of
//! colour and reverse video drawn on it. Given the same key script the shell
//! produces identical snapshots, which makes them usable as golden output
//! for the headless runner.

use serde::{Deserialize, Serialize};

use super::cell::{Cell, Color};
use super::cursor::Position;
use super::screen::Screen;

/// Screen state at one point in time
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cols: usize,
    pub rows: usize,
    pub cursor: Position,
    /// Bells rung so far
    pub bells: usize,
    /// Primitives that addressed outside the grid
    pub overflows: usize,
    pub lines: Vec<LineSnapshot>,
}

/// One screen row
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSnapshot {
    /// Row text with trailing blanks removed
    pub text: String,
    /// Styled stretches of the row; cells in default colours are omitted
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub runs: Vec<StyleRun>,
}

/// Consecutive cells drawn with the same colours and attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleRun {
    pub start: usize,
    pub len: usize,
    pub fg: Color,
    pub bg: Color,
    #[serde(default, skip_serializing_if = "is_false")]
    pub reverse: bool,
}

fn is_false(b: &bool) -> bool {
    !*b
}

impl StyleRun {
    fn starting_at(start: usize, cell: &Cell) -> Self {
        Self {
            start,
            len: 1,
            fg: cell.fg,
            bg: cell.bg,
            reverse: cell.style.inverse,
        }
    }

    fn matches(&self, cell: &Cell) -> bool {
        self.fg == cell.fg && self.bg == cell.bg && self.reverse == cell.style.inverse
    }
}

impl LineSnapshot {
    fn from_row(screen: &Screen, row: usize) -> Self {
        let mut runs: Vec<StyleRun> = Vec::new();

        for col in 0..screen.cols() {
            let cell = screen.get_cell(col, row).copied().unwrap_or_default();
            let styled =
                cell.fg != Color::Default || cell.bg != Color::Default || cell.style.inverse;
            if cell.is_empty() || !styled {
                continue;
            }
            match runs.last_mut() {
                Some(run) if run.start + run.len == col && run.matches(&cell) => run.len += 1,
                _ => runs.push(StyleRun::starting_at(col, &cell)),
            }
        }

        Self {
            text: screen.line_text(row),
            runs,
        }
    }
}

impl Snapshot {
    /// Capture the current screen state
    pub fn from_screen(screen: &Screen) -> Self {
        Snapshot {
            cols: screen.cols(),
            rows: screen.rows(),
            cursor: screen.cursor().position(),
            bells: screen.bell_count(),
            overflows: screen.overflow_count(),
            lines: (0..screen.rows())
                .map(|row| LineSnapshot::from_row(screen, row))
                .collect(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Screen text, one line per row, without trailing blank rows
    pub fn to_text(&self) -> String {
        let used = self
            .lines
            .iter()
            .rposition(|line| !line.text.is_empty())
            .map_or(0, |last| last + 1);

        self.lines[..used]
            .iter()
            .map(|line| format!("{}\n", line.text))
            .collect()
    }

    /// Same size and same drawn content, ignoring cursor and counters
    pub fn content_equals(&self, other: &Snapshot) -> bool {
        self.cols == other.cols && self.rows == other.rows && self.lines == other.lines
    }
}
