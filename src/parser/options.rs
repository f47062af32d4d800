//! Single-letter option flags
//!
//! Commands accept clustered single-letter switches (`-v`, `-?v`) ahead of
//! their operands. Each letter of the option string maps to one bit.

use super::Argv;

/// Parsed option flags and the index of the first operand
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptFlags {
    bits: u32,
    letters: &'static str,
    /// Index of the first non-option argument
    pub optind: usize,
}

impl OptFlags {
    /// Scan the options following `argv[0]`
    ///
    /// Scanning stops at the first argument not starting with `-`, at a lone
    /// `-`, or after `--`. Letters missing from `letters` set the `?` flag
    /// when `letters` declares one.
    pub fn parse(argv: &Argv<'_>, letters: &'static str) -> Self {
        let mut flags = Self {
            bits: 0,
            letters,
            optind: 1,
        };

        while let Some(arg) = argv.get(flags.optind) {
            if arg == "--" {
                flags.optind += 1;
                break;
            }
            let Some(cluster) = arg.strip_prefix('-').filter(|rest| !rest.is_empty()) else {
                break;
            };
            for letter in cluster.chars() {
                if !flags.set(letter) {
                    flags.set('?');
                }
            }
            flags.optind += 1;
        }

        flags
    }

    fn set(&mut self, letter: char) -> bool {
        match self.letters.find(letter) {
            Some(bit) => {
                self.bits |= 1 << bit;
                true
            }
            None => false,
        }
    }

    /// Whether an option letter was given
    pub fn has(&self, letter: char) -> bool {
        self.letters
            .find(letter)
            .is_some_and(|bit| self.bits & (1 << bit) != 0)
    }

    /// Raw flag bits, one per letter of the option string
    pub fn bits(&self) -> u32 {
        self.bits
    }
}
