//! Command dispatch
//!
//! Maps `argv[0]` to an entry of a fixed command table by exact,
//! case-sensitive match and runs it to completion. Handler failures are
//! printed and never end the shell.

use std::process;

use super::commands::{CommandResult, Session, COMMANDS};
use crate::parser::Argv;
use crate::term::Console;

/// Outcome of a dispatched line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Disposition {
    /// Keep reading lines
    Continue,
    /// Leave the shell
    Exit,
    /// Warm reset: rebuild the shell from scratch
    Reset,
}

/// Built-in command handler
pub type Handler = fn(&mut Session, &mut dyn Console, &Argv<'_>) -> CommandResult;

/// What a command does
#[derive(Clone, Copy)]
pub enum Action {
    Run(Handler),
    Exit,
    Reset,
}

/// Entry of the command table
#[derive(Clone, Copy)]
pub struct Command {
    pub name: &'static str,
    /// Argument hint shown while the line holds just the name
    pub hint: Option<&'static str>,
    pub action: Action,
}

impl Command {
    /// Command running a handler
    pub const fn run(name: &'static str, hint: Option<&'static str>, handler: Handler) -> Self {
        Self {
            name,
            hint,
            action: Action::Run(handler),
        }
    }

    /// Command ending the shell
    pub const fn exit(name: &'static str) -> Self {
        Self {
            name,
            hint: None,
            action: Action::Exit,
        }
    }

    /// Command requesting a warm reset
    pub const fn reset(name: &'static str) -> Self {
        Self {
            name,
            hint: None,
            action: Action::Reset,
        }
    }
}

impl std::fmt::Debug for Command {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("hint", &self.hint)
            .finish()
    }
}

/// Looks up and runs commands
#[derive(Debug, Clone, Copy)]
pub struct Dispatcher {
    commands: &'static [Command],
}

impl Default for Dispatcher {
    fn default() -> Self {
        Self::new(COMMANDS)
    }
}

impl Dispatcher {
    pub fn new(commands: &'static [Command]) -> Self {
        Self { commands }
    }

    /// The command table
    pub fn commands(&self) -> &'static [Command] {
        self.commands
    }

    /// Find a command by exact name
    pub fn find(&self, name: &str) -> Option<&'static Command> {
        self.commands.iter().find(|command| command.name == name)
    }

    /// Run the command named by `argv[0]`
    pub fn dispatch(
        &self,
        session: &mut Session,
        console: &mut dyn Console,
        argv: &Argv<'_>,
    ) -> Disposition {
        let Some(name) = argv.command() else {
            return Disposition::Continue;
        };

        let Some(command) = self.find(name) else {
            if session.profile.native_exec && launch(session, argv) {
                return Disposition::Continue;
            }
            tracing::debug!(name, "Unknown command");
            console.print(&format!("{}: command not found\n", name));
            return Disposition::Continue;
        };

        tracing::debug!(name, argc = argv.len(), "Dispatching command");

        match command.action {
            Action::Exit => Disposition::Exit,
            Action::Reset => Disposition::Reset,
            Action::Run(handler) => {
                if let Err(e) = handler(session, &mut *console, argv) {
                    console.print(&format!("{}: {}\n", name, e));
                }
                Disposition::Continue
            }
        }
    }
}

/// Try to run an unknown name as a program from the working directory
fn launch(session: &Session, argv: &Argv<'_>) -> bool {
    let Some(name) = argv.command() else {
        return false;
    };
    match process::Command::new(name)
        .args(argv.iter().skip(1))
        .current_dir(&session.cwd)
        .status()
    {
        Ok(status) => {
            tracing::debug!(name, %status, "External program finished");
            true
        }
        Err(e) => {
            tracing::debug!(name, "Not loadable: {}", e);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::CommandError;
    use crate::core::Screen;
    use crate::input::{Platform, PlatformProfile};
    use crate::parser::Tokenizer;

    fn greet(_: &mut Session, console: &mut dyn Console, argv: &Argv<'_>) -> CommandResult {
        let name = argv.get(1).ok_or(CommandError::MissingArgument)?;
        console.print(&format!("hello {}\n", name));
        Ok(())
    }

    static TABLE: &[Command] = &[
        Command::run("greet", Some("<name>"), greet),
        Command::exit("bye"),
        Command::reset("reboot"),
    ];

    fn run(platform: Platform, line: &str) -> (Disposition, Screen) {
        let mut session = Session::new(PlatformProfile::get(platform), std::env::temp_dir());
        let mut screen = Screen::new(40, 25);
        let mut tokenizer = Tokenizer::default();
        let argv = tokenizer.tokenize(line);
        let disposition = Dispatcher::new(TABLE).dispatch(&mut session, &mut screen, &argv);
        (disposition, screen)
    }

    #[test]
    fn test_dispatch_runs_handler() {
        let (disposition, screen) = run(Platform::Posix, "greet world");
        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(screen.line_text(0), "hello world");
    }

    #[test]
    fn test_handler_error_is_printed() {
        let (disposition, screen) = run(Platform::Posix, "greet");
        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(screen.line_text(0), "greet: missing argument");
    }

    #[test]
    fn test_exit_and_reset() {
        assert_eq!(run(Platform::Posix, "bye").0, Disposition::Exit);
        assert_eq!(run(Platform::Posix, "  reboot now").0, Disposition::Reset);
    }

    #[test]
    fn test_match_is_case_sensitive() {
        let (disposition, screen) = run(Platform::Posix, "BYE");
        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(screen.line_text(0), "BYE: command not found");
    }

    #[test]
    fn test_empty_line() {
        let (disposition, screen) = run(Platform::Posix, "    ");
        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(screen.text().trim(), "");
    }

    #[test]
    fn test_native_exec_falls_back_to_not_found() {
        let (disposition, screen) = run(Platform::C64, "no-such-program-here");
        assert_eq!(disposition, Disposition::Continue);
        assert_eq!(screen.line_text(0), "no-such-program-here: command not found");
    }

    #[test]
    fn test_default_table_lookup() {
        let dispatcher = Dispatcher::default();
        assert!(dispatcher.find("help").is_some());
        assert!(dispatcher.find("Help").is_none());
        assert!(dispatcher.find("hel").is_none());
    }
}
