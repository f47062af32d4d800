//! Key Decoding Module
//!
//! Normalizes raw keyboard bytes into canonical key events. The 8-bit
//! targets disagree about almost every non-letter key: PETSCII machines send
//! 20 for DEL and 145 for cursor-up, some keyboards report shifted letters in
//! an unrelated byte range, the ZX maps 12 to delete. Each target is described
//! by a [`PlatformProfile`] table and decoding is a pure function of the raw
//! byte and that table.
//!
//! # Decoding order
//!
//! 1. Direct substitution from the profile table
//! 2. Shifted-letter range folding (fixed offset per profile)
//! 3. CR/LF normalized to [`KeyEvent::Enter`], then the canonical
//!    control-key assignments shared by every profile
//!
//! Decoding never mutates anything. Events with side effects
//! ([`KeyEvent::OverlayToggle`], [`KeyEvent::CaseToggle`]) are acted upon by
//! the shell loop after decoding.

mod profile;
mod source;

pub use profile::{OverlayStart, Platform, PlatformProfile, ShiftFold};
pub use source::{KeySource, Replay, ScriptSource};

/// Canonical key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyEvent {
    /// Printable byte passthrough
    Char(u8),
    Enter,
    Backspace,
    /// Delete under cursor; end of input on an empty line
    Delete,
    Tab,

    // Cursor movement
    Home,
    End,
    Left,
    Right,
    Up,
    Down,

    // Line editing
    Break,
    ClearScreen,
    KillToEnd,
    KillLine,
    KillWord,
    Swap,

    /// Show/hide the status overlay
    OverlayToggle,
    /// Switch the alternate character set
    CaseToggle,

    /// Any other control byte
    Control(u8),
}

impl KeyEvent {
    /// Escape byte, passed through as [`KeyEvent::Control`]
    pub const ESCAPE: u8 = 27;

    /// Map a canonical byte (after profile processing) to its event
    pub fn from_canonical(byte: u8) -> Self {
        match byte {
            1 => KeyEvent::Home,
            2 => KeyEvent::Left,
            3 => KeyEvent::Break,
            4 => KeyEvent::Delete,
            5 => KeyEvent::End,
            6 => KeyEvent::Right,
            8 | 127 => KeyEvent::Backspace,
            9 => KeyEvent::Tab,
            10 | 13 => KeyEvent::Enter,
            11 => KeyEvent::KillToEnd,
            12 => KeyEvent::ClearScreen,
            14 => KeyEvent::Down,
            15 => KeyEvent::OverlayToggle,
            16 => KeyEvent::Up,
            18 => KeyEvent::CaseToggle,
            20 => KeyEvent::Swap,
            21 => KeyEvent::KillLine,
            23 => KeyEvent::KillWord,
            0..=31 => KeyEvent::Control(byte),
            _ => KeyEvent::Char(byte),
        }
    }

    /// Canonical byte for this event, as reported by the status overlay
    pub fn code(self) -> u8 {
        match self {
            KeyEvent::Char(b) | KeyEvent::Control(b) => b,
            KeyEvent::Enter => 13,
            KeyEvent::Backspace => 8,
            KeyEvent::Delete => 4,
            KeyEvent::Tab => 9,
            KeyEvent::Home => 1,
            KeyEvent::End => 5,
            KeyEvent::Left => 2,
            KeyEvent::Right => 6,
            KeyEvent::Up => 16,
            KeyEvent::Down => 14,
            KeyEvent::Break => 3,
            KeyEvent::ClearScreen => 12,
            KeyEvent::KillToEnd => 11,
            KeyEvent::KillLine => 21,
            KeyEvent::KillWord => 23,
            KeyEvent::Swap => 20,
            KeyEvent::OverlayToggle => 15,
            KeyEvent::CaseToggle => 18,
        }
    }
}

/// Decode a raw key byte with the given profile
pub fn decode(raw: u8, profile: &PlatformProfile) -> KeyEvent {
    profile.decode(raw)
}
