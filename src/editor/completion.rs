//! TAB completion
//!
//! A [`Completer`] fills a [`Completions`] sink with candidates for the
//! current line. The editor then cycles through them on repeated TAB.

/// Source of completion candidates
pub trait Completer {
    /// Add every candidate for `line` to `out`
    fn complete(&self, line: &str, out: &mut Completions);
}

/// Completer offering nothing
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCompletion;

impl Completer for NoCompletion {
    fn complete(&self, _line: &str, _out: &mut Completions) {}
}

impl<F> Completer for F
where
    F: Fn(&str, &mut Completions),
{
    fn complete(&self, line: &str, out: &mut Completions) {
        self(line, out)
    }
}

/// Completion candidate sink
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Completions {
    candidates: Vec<String>,
}

impl Completions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate
    pub fn add(&mut self, candidate: impl Into<String>) {
        self.candidates.push(candidate.into());
    }

    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&str> {
        self.candidates.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.candidates.iter().map(String::as_str)
    }
}

/// In-progress TAB cycle
#[derive(Debug, Clone)]
pub(crate) struct CompletionCycle {
    pub candidates: Completions,
    /// Shown candidate; `candidates.len()` means the original text
    pub index: usize,
    pub original: String,
}

impl CompletionCycle {
    /// Move to the next candidate, wrapping through the original text
    pub fn advance(&mut self) {
        self.index = (self.index + 1) % (self.candidates.len() + 1);
    }

    /// Text to show for the current position
    pub fn shown(&self) -> &str {
        self.candidates.get(self.index).unwrap_or(self.original.as_str())
    }

    pub fn at_original(&self) -> bool {
        self.index == self.candidates.len()
    }
}
