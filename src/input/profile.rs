//! Platform key profiles
//!
//! Every supported hardware target is one static [`PlatformProfile`] value.
//! The decoder and the renderer read their per-target behaviour from it; they
//! never branch on the platform itself.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::KeyEvent;

/// Supported hardware targets
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    /// Hosted terminal (Linux, macOS)
    #[default]
    Posix,
    /// Commodore 64
    C64,
    /// MEGA65
    Mega65,
    /// ZX Spectrum Next
    Zx,
}

impl Platform {
    pub const ALL: [Platform; 4] = [Platform::Posix, Platform::C64, Platform::Mega65, Platform::Zx];

    /// Short machine name
    pub fn name(self) -> &'static str {
        match self {
            Platform::Posix => "posix",
            Platform::C64 => "c64",
            Platform::Mega65 => "mega65",
            Platform::Zx => "zx",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Shifted-letter range folding: bytes in `(above, above + span]` are moved
/// down by `offset`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ShiftFold {
    pub above: u8,
    pub span: u8,
    pub offset: u8,
}

impl ShiftFold {
    /// Fold a raw byte, leaving bytes outside the range untouched
    pub fn apply(self, raw: u8) -> u8 {
        if raw > self.above && raw <= self.above.saturating_add(self.span) {
            raw.saturating_sub(self.offset)
        } else {
            raw
        }
    }
}

/// Whether the status overlay is showing when the shell starts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayStart {
    Hidden,
    Visible,
}

/// Fixed per-target key mapping and display capabilities
#[derive(Debug)]
pub struct PlatformProfile {
    pub platform: Platform,
    /// Raw bytes that map straight to an event
    pub substitutions: &'static [(u8, KeyEvent)],
    /// Shifted-letter folding rule, if the keyboard needs one
    pub shift_fold: Option<ShiftFold>,
    /// The display has a switchable alternate (upper/lower case) charset
    pub alternate_charset: bool,
    /// Status overlay state at startup
    pub overlay: OverlayStart,
    /// A real background-colour primitive exists; otherwise reverse video
    /// is used for highlights
    pub background_color: bool,
    /// No hardware blinking cursor; the renderer draws one
    pub software_cursor: bool,
    /// Unknown command names may be loaded as programs
    pub native_exec: bool,
    /// Editor key reference printed by `help`
    pub key_help: &'static str,
}

const PETSCII_KEYS: &[(u8, KeyEvent)] = &[
    (20, KeyEvent::Backspace),
    (148, KeyEvent::Delete), // SHIFT-BACKSPACE
    (131, KeyEvent::Tab),    // SHIFT-ESCAPE
    (94, KeyEvent::Tab),     // SHIFT-TILDE
    (26, KeyEvent::Tab),     // CTRL-Z
    (19, KeyEvent::Home),
    (145, KeyEvent::Up),
    (17, KeyEvent::Down),
    (157, KeyEvent::Left),
    (29, KeyEvent::Right),
    (95, KeyEvent::End),
];

const ZX_KEYS: &[(u8, KeyEvent)] = &[(12, KeyEvent::Backspace)];

const CTRL_KEY_HELP: &str = " c=break b=left  l=cls  k=ceol\n \
                             d=exit  f=right o=osd  u=cline\n \
                             a=home  p=up    r=char w=cword\n \
                             e=end   n=down  t=swap\n";

const ZX_KEY_HELP: &str = " q=break y=left  s=del\n \
                           d=exit  i=right w=osd\n \
                           a=home  u=up\n \
                           e=end   g=down\n";

static POSIX: PlatformProfile = PlatformProfile {
    platform: Platform::Posix,
    substitutions: &[],
    shift_fold: None,
    alternate_charset: false,
    overlay: OverlayStart::Hidden,
    background_color: false,
    software_cursor: false,
    native_exec: false,
    key_help: CTRL_KEY_HELP,
};

static C64: PlatformProfile = PlatformProfile {
    platform: Platform::C64,
    substitutions: PETSCII_KEYS,
    shift_fold: Some(ShiftFold {
        above: 192,
        span: 26,
        offset: 96,
    }),
    alternate_charset: true,
    overlay: OverlayStart::Hidden,
    background_color: false,
    software_cursor: false,
    native_exec: true,
    key_help: CTRL_KEY_HELP,
};

static MEGA65: PlatformProfile = PlatformProfile {
    platform: Platform::Mega65,
    substitutions: PETSCII_KEYS,
    shift_fold: Some(ShiftFold {
        above: 96,
        span: 26,
        offset: 32,
    }),
    alternate_charset: true,
    overlay: OverlayStart::Hidden,
    background_color: false,
    software_cursor: false,
    native_exec: false,
    key_help: CTRL_KEY_HELP,
};

static ZX: PlatformProfile = PlatformProfile {
    platform: Platform::Zx,
    substitutions: ZX_KEYS,
    shift_fold: None,
    alternate_charset: false,
    overlay: OverlayStart::Visible,
    background_color: true,
    software_cursor: true,
    native_exec: false,
    key_help: ZX_KEY_HELP,
};

impl PlatformProfile {
    /// The profile for a platform
    pub fn get(platform: Platform) -> &'static PlatformProfile {
        match platform {
            Platform::Posix => &POSIX,
            Platform::C64 => &C64,
            Platform::Mega65 => &MEGA65,
            Platform::Zx => &ZX,
        }
    }

    /// Decode a raw key byte into its canonical event
    pub fn decode(&self, raw: u8) -> KeyEvent {
        if let Some(&(_, key)) = self.substitutions.iter().find(|(byte, _)| *byte == raw) {
            return key;
        }

        let byte = self.shift_fold.map_or(raw, |fold| fold.apply(raw));
        let key = KeyEvent::from_canonical(byte);
        tracing::trace!(raw, ?key, platform = %self.platform, "decoded key");
        key
    }
}
