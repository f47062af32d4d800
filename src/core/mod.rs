//! Screen Core Module
//!
//! Platform-independent character grid. This module contains:
//! - Cell representation with colours
//! - Cursor state and positioning
//! - The `Screen` grid, an in-memory implementation of the terminal primitives
//! - Deterministic snapshot generation
//!
//! The core is completely deterministic: given the same sequence of
//! primitive calls, it will always produce the same state.

mod cell;
mod cursor;
mod screen;
mod snapshot;

pub use cell::{Cell, Color, Style};
pub use cursor::{Cursor, Position};
pub use screen::Screen;
pub use snapshot::{LineSnapshot, Snapshot, StyleRun};
