//! Argument hints and TAB completion for the command table

use super::Dispatcher;
use crate::editor::{Completer, Completions};
use crate::renderer::HintProvider;

impl HintProvider for Dispatcher {
    /// The argument synopsis while the line holds exactly a command name
    fn hint(&self, line: &str) -> Option<String> {
        let name = line.trim_start_matches(' ');
        self.find(name)
            .and_then(|command| command.hint)
            .map(str::to_string)
    }
}

impl Completer for Dispatcher {
    /// Command names starting with the typed text
    fn complete(&self, line: &str, out: &mut Completions) {
        let typed = line.trim_start_matches(' ');
        if typed.is_empty() {
            return;
        }

        if typed.starts_with("echo") {
            out.add("echo foo bar");
        }

        for command in self.commands() {
            if command.name.starts_with(typed) {
                out.add(command.name);
            }
        }
    }
}
