//! POSIX host support
//!
//! Puts the controlling terminal into raw mode so single keystrokes reach the
//! shell unprocessed, queries the window size, and reads raw key bytes from
//! stdin.

use std::io::{self, Read};

use nix::libc;
use nix::sys::termios::{self, LocalFlags, SetArg, SpecialCharacterIndices, Termios};

use crate::input::KeySource;

/// Error type for host terminal setup
#[derive(Debug, thiserror::Error)]
pub enum TermError {
    #[error("Failed to read terminal attributes: {0}")]
    GetAttr(#[source] nix::Error),

    #[error("Failed to set terminal attributes: {0}")]
    SetAttr(#[source] nix::Error),
}

/// RAII guard for raw terminal mode
pub struct RawMode {
    original: Termios,
}

impl RawMode {
    /// Switch stdin to raw mode until the guard is dropped
    pub fn enable() -> Result<Self, TermError> {
        let original = termios::tcgetattr(io::stdin()).map_err(TermError::GetAttr)?;

        let mut raw = original.clone();

        // Disable canonical mode, echo and signal keys; ctrl-c and ctrl-z are
        // editor keys here
        raw.local_flags.remove(LocalFlags::ICANON);
        raw.local_flags.remove(LocalFlags::ECHO);
        raw.local_flags.remove(LocalFlags::ISIG);
        raw.local_flags.remove(LocalFlags::IEXTEN);

        // Block until at least one byte is available
        raw.control_chars[SpecialCharacterIndices::VMIN as usize] = 1;
        raw.control_chars[SpecialCharacterIndices::VTIME as usize] = 0;

        termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &raw).map_err(TermError::SetAttr)?;

        tracing::debug!("Raw mode enabled");
        Ok(Self { original })
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = termios::tcsetattr(io::stdin(), SetArg::TCSANOW, &self.original);
    }
}

/// Get terminal size as `(cols, rows)` using ioctl
pub fn window_size() -> Option<(usize, usize)> {
    let mut ws = libc::winsize {
        ws_row: 0,
        ws_col: 0,
        ws_xpixel: 0,
        ws_ypixel: 0,
    };

    // SAFETY: TIOCGWINSZ is a valid ioctl for getting window size and `ws`
    // outlives the call
    let result = unsafe { libc::ioctl(libc::STDOUT_FILENO, libc::TIOCGWINSZ, &mut ws) };

    if result == 0 && ws.ws_col > 0 && ws.ws_row > 0 {
        Some((ws.ws_col as usize, ws.ws_row as usize))
    } else {
        None
    }
}

/// Blocking key source reading single bytes from stdin
#[derive(Debug, Default)]
pub struct StdinKeys;

impl KeySource for StdinKeys {
    fn read_key(&mut self) -> Option<u8> {
        let mut byte = [0u8; 1];
        loop {
            match io::stdin().lock().read(&mut byte) {
                Ok(0) => return None,
                Ok(_) => return Some(byte[0]),
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(e) => {
                    tracing::warn!("Key read failed: {}", e);
                    return None;
                }
            }
        }
    }
}
