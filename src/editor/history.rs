//! Line history
//!
//! Bounded list of submitted lines, most recent last. Empty lines and
//! repeats of the previous entry are not recorded.

use std::collections::VecDeque;

/// Default number of remembered lines
pub const DEFAULT_HISTORY_SIZE: usize = 16;

/// Bounded line history
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<String>,
    max_size: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_HISTORY_SIZE)
    }
}

impl History {
    pub fn new(max_size: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(max_size),
            max_size,
        }
    }

    /// Record a submitted line, dropping the oldest when full
    pub fn add(&mut self, line: &str) -> bool {
        if self.max_size == 0 || line.trim().is_empty() {
            return false;
        }
        if self.entries.back().is_some_and(|last| last == line) {
            return false;
        }
        if self.entries.len() == self.max_size {
            self.entries.pop_front();
        }
        self.entries.push_back(line.to_string());
        true
    }

    /// Entry `age` steps back, 0 being the most recent
    pub fn get(&self, age: usize) -> Option<&str> {
        let index = self.entries.len().checked_sub(age + 1)?;
        self.entries.get(index).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_size(&self) -> usize {
        self.max_size
    }

    /// Entries from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(String::as_str)
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
