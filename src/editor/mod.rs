//! Line Editor
//!
//! The line-edit core owns the [`LineState`] of the line being typed and
//! applies decoded key events to it: insertion, deletion, cursor movement,
//! kill commands, history recall and TAB completion. It never draws; the
//! shell loop asks the renderer to refresh after each key.

mod completion;
mod history;
mod state;

pub use completion::{Completer, Completions, NoCompletion};
pub use history::{History, DEFAULT_HISTORY_SIZE};
pub use state::{LineFlags, LineState};

use completion::CompletionCycle;

use crate::input::KeyEvent;

/// What the caller should do after a key was handled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditAction {
    /// Redraw and keep reading keys
    Continue,
    /// Ring the bell, redraw and keep reading keys
    Beep,
    /// Clear the screen, redraw and keep reading keys
    ClearScreen,
    /// The line is complete
    Submit,
    /// The line was abandoned
    Cancel,
    /// End of input requested on an empty line
    EndOfInput,
}

/// Line editor with history and completion cycling
#[derive(Debug, Clone, Default)]
pub struct LineEditor {
    history: History,
    /// Steps back into history, 0 being the line being typed
    history_index: usize,
    /// Line being typed when history navigation started
    stash: String,
    completion: Option<CompletionCycle>,
}

impl LineEditor {
    pub fn new(history_size: usize) -> Self {
        Self {
            history: History::new(history_size),
            ..Self::default()
        }
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut History {
        &mut self.history
    }

    /// A TAB completion cycle is in progress
    pub fn is_completing(&self) -> bool {
        self.completion.is_some()
    }

    /// Reset per-line state before editing a new line
    pub fn begin(&mut self) {
        self.history_index = 0;
        self.stash.clear();
        self.completion = None;
    }

    /// Apply one key event to the line
    pub fn handle(
        &mut self,
        state: &mut LineState,
        key: KeyEvent,
        completer: &dyn Completer,
    ) -> EditAction {
        state.key = key;

        if let Some(action) = self.handle_completion(state, key, completer) {
            return action;
        }

        match key {
            KeyEvent::Char(glyph) => {
                state.insert(glyph);
                EditAction::Continue
            }
            KeyEvent::Enter => {
                self.history.add(state.text());
                state.move_end();
                EditAction::Submit
            }
            KeyEvent::Backspace => {
                state.backspace();
                EditAction::Continue
            }
            KeyEvent::Delete => {
                if state.is_empty() {
                    EditAction::EndOfInput
                } else {
                    state.delete();
                    EditAction::Continue
                }
            }
            KeyEvent::Tab => EditAction::Continue,
            KeyEvent::Home => {
                state.move_home();
                EditAction::Continue
            }
            KeyEvent::End => {
                state.move_end();
                EditAction::Continue
            }
            KeyEvent::Left => {
                state.move_left();
                EditAction::Continue
            }
            KeyEvent::Right => {
                state.move_right();
                EditAction::Continue
            }
            KeyEvent::Up => self.recall(state, true),
            KeyEvent::Down => self.recall(state, false),
            KeyEvent::Break => EditAction::Cancel,
            KeyEvent::ClearScreen => EditAction::ClearScreen,
            KeyEvent::KillToEnd => {
                state.kill_to_end();
                EditAction::Continue
            }
            KeyEvent::KillLine => {
                state.kill_line();
                EditAction::Continue
            }
            KeyEvent::KillWord => {
                state.kill_word();
                EditAction::Continue
            }
            KeyEvent::Swap => {
                state.swap();
                EditAction::Continue
            }
            KeyEvent::OverlayToggle | KeyEvent::CaseToggle | KeyEvent::Control(_) => {
                EditAction::Continue
            }
        }
    }

    /// Start, advance or leave a TAB completion cycle
    ///
    /// Returns `None` when the key still has to be handled as an edit.
    fn handle_completion(
        &mut self,
        state: &mut LineState,
        key: KeyEvent,
        completer: &dyn Completer,
    ) -> Option<EditAction> {
        if !state.flags.contains(LineFlags::COMPLETION) {
            return None;
        }

        match (self.completion.as_mut(), key) {
            (None, KeyEvent::Tab) => {
                let mut candidates = Completions::new();
                completer.complete(state.text(), &mut candidates);
                if candidates.is_empty() {
                    return Some(EditAction::Beep);
                }
                let cycle = CompletionCycle {
                    candidates,
                    index: 0,
                    original: state.text().to_string(),
                };
                state.set_text(cycle.shown());
                self.completion = Some(cycle);
                Some(EditAction::Continue)
            }
            (Some(cycle), KeyEvent::Tab) => {
                cycle.advance();
                state.set_text(cycle.shown());
                if cycle.at_original() {
                    Some(EditAction::Beep)
                } else {
                    Some(EditAction::Continue)
                }
            }
            (Some(cycle), KeyEvent::Control(KeyEvent::ESCAPE)) => {
                state.set_text(&cycle.original);
                self.completion = None;
                Some(EditAction::Continue)
            }
            (Some(_), _) => {
                // The shown candidate is already in the buffer
                self.completion = None;
                None
            }
            (None, _) => None,
        }
    }

    /// Step through history, `older` going back in time
    fn recall(&mut self, state: &mut LineState, older: bool) -> EditAction {
        let next = if older {
            self.history_index + 1
        } else {
            match self.history_index.checked_sub(1) {
                Some(next) => next,
                None => return EditAction::Continue,
            }
        };
        if next > self.history.len() {
            return EditAction::Continue;
        }

        if self.history_index == 0 {
            self.stash = state.text().to_string();
        }
        self.history_index = next;

        match next.checked_sub(1).and_then(|age| self.history.get(age)) {
            Some(entry) => state.set_text(entry),
            None => state.set_text(&self.stash),
        }
        EditAction::Continue
    }
}
