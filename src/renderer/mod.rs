//! Line Renderer Module
//!
//! Draws the edited line and the status overlay with the direct
//! cursor-addressing primitives of [`crate::term::Console`]. Rendering is
//! total: it never fails and never addresses a column outside the declared
//! screen width.

mod line;
mod overlay;

pub use line::LineRenderer;
pub use overlay::{StatusOverlay, OVERLAY_HEIGHT, OVERLAY_WIDTH};

/// What a refresh had to cut off
///
/// Clipping itself is silent; the report lets callers tell an exact fit
/// from a truncation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderReport {
    /// Part of the visible buffer did not fit
    pub buffer_clipped: bool,
    /// A hint was shortened or dropped for lack of room
    pub hint_clipped: bool,
}

/// Source of the inline hint shown after the buffer
pub trait HintProvider {
    /// Hint for the current line, if any. Called once per refresh.
    fn hint(&self, line: &str) -> Option<String>;
}

impl<F> HintProvider for F
where
    F: Fn(&str) -> Option<String>,
{
    fn hint(&self, line: &str) -> Option<String> {
        self(line)
    }
}

/// Hint provider that never has a hint
#[derive(Debug, Clone, Copy, Default)]
pub struct NoHints;

impl HintProvider for NoHints {
    fn hint(&self, _line: &str) -> Option<String> {
        None
    }
}
