//! Push Shell Library
//!
//! A small command shell for character-cell machines: keyboards with
//! incompatible byte encodings, fixed screens, and nothing but direct
//! cursor-addressing primitives to draw with.
//!
//! - `core`: headless character grid, cells, snapshots
//! - `term`: terminal primitives and the ANSI/POSIX backend
//! - `input`: platform key profiles, key decoding, key sources
//! - `parser`: command tokenizer, option flags, path helpers
//! - `editor`: the line-edit core
//! - `renderer`: line refresh and status overlay
//! - `shell`: command table, dispatch and the shell loop
//! - `app`: configuration

pub mod app;
pub mod core;
pub mod editor;
pub mod input;
pub mod parser;
pub mod renderer;
pub mod shell;
pub mod term;

pub use app::Config;
pub use core::{Screen, Snapshot};
pub use input::{KeyEvent, Platform, PlatformProfile};
pub use shell::{Disposition, Shell};
