//! Quote-aware command tokenizer
//!
//! Splits an edited line into an argument vector. Arguments are separated by
//! runs of spaces; double quotes group text containing spaces. Quote
//! characters are elided wherever they appear and only flip the quote state,
//! so `foo"bar baz"qux` is the single argument `foobar bazqux`. A closing
//! quote immediately followed by an opening one (`"a""b"`) ends the argument.
//!
//! The tokenizer never rejects input: an unterminated quote simply runs to
//! the end of the line, and once the argument vector is full the rest of the
//! line is dropped (reported through [`Argv::is_truncated`]).

use std::ops::{Index, Range};

/// Default argument vector capacity
pub const ARGV_CAPACITY: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BetweenTokens,
    InToken,
    InQuote,
}

/// Reusable tokenizer owning the storage the arguments borrow from
#[derive(Debug, Clone)]
pub struct Tokenizer {
    capacity: usize,
    /// Argument text with quotes elided, arguments packed back to back
    text: String,
    /// Byte range of each argument in `text`
    spans: Vec<Range<usize>>,
    truncated: bool,
}

impl Default for Tokenizer {
    fn default() -> Self {
        Self::new(ARGV_CAPACITY)
    }
}

impl Tokenizer {
    /// Create a tokenizer producing at most `capacity` arguments
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            text: String::new(),
            spans: Vec::with_capacity(capacity),
            truncated: false,
        }
    }

    /// Maximum number of arguments
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Split a line into arguments
    ///
    /// The returned arguments borrow the tokenizer and stay valid until the
    /// next call.
    pub fn tokenize(&mut self, line: &str) -> Argv<'_> {
        self.text.clear();
        self.spans.clear();
        self.truncated = false;

        let mut chars = line.trim_end_matches(' ').chars().peekable();
        let mut state = State::BetweenTokens;
        let mut start = 0;

        loop {
            match state {
                State::BetweenTokens => {
                    while chars.next_if_eq(&' ').is_some() {}
                    let Some(&c) = chars.peek() else {
                        break;
                    };
                    if self.spans.len() == self.capacity {
                        self.truncated = true;
                        break;
                    }
                    start = self.text.len();
                    if c == '"' {
                        chars.next();
                        state = State::InQuote;
                    } else {
                        state = State::InToken;
                    }
                }
                State::InToken => match chars.next() {
                    None => break,
                    Some(' ') => {
                        self.spans.push(start..self.text.len());
                        state = State::BetweenTokens;
                    }
                    Some('"') => state = State::InQuote,
                    Some(c) => self.text.push(c),
                },
                State::InQuote => match chars.next() {
                    None => break,
                    Some('"') => {
                        if chars.peek() == Some(&'"') {
                            self.spans.push(start..self.text.len());
                            state = State::BetweenTokens;
                        } else {
                            state = State::InToken;
                        }
                    }
                    Some(c) => self.text.push(c),
                },
            }
        }

        // End of input closes the last argument whatever the quote state
        if state != State::BetweenTokens {
            self.spans.push(start..self.text.len());
        }

        Argv {
            text: &self.text,
            spans: &self.spans,
            truncated: self.truncated,
        }
    }
}

/// Tokenize a line into owned arguments
pub fn tokenize(line: &str, capacity: usize) -> Vec<String> {
    Tokenizer::new(capacity).tokenize(line).to_vec()
}

/// Argument vector borrowed from a [`Tokenizer`]
#[derive(Debug, Clone, Copy)]
pub struct Argv<'a> {
    text: &'a str,
    spans: &'a [Range<usize>],
    truncated: bool,
}

impl<'a> Argv<'a> {
    /// Number of arguments
    pub fn len(&self) -> usize {
        self.spans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    /// Argument by index
    pub fn get(&self, index: usize) -> Option<&'a str> {
        self.spans.get(index).map(|span| &self.text[span.clone()])
    }

    /// The command name (`argv[0]`)
    pub fn command(&self) -> Option<&'a str> {
        self.get(0)
    }

    /// All arguments in order
    pub fn iter(&self) -> impl Iterator<Item = &'a str> + 'a {
        let (text, spans) = (self.text, self.spans);
        spans.iter().map(move |span| &text[span.clone()])
    }

    /// Input was left over after the vector filled up
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    /// Owned copy of the arguments
    pub fn to_vec(&self) -> Vec<String> {
        self.iter().map(str::to_string).collect()
    }
}

impl Index<usize> for Argv<'_> {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.text[self.spans[index].clone()]
    }
}
